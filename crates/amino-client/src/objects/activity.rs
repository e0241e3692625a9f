//! Community activity objects: notifications, lottery, moderation logs and
//! sticker collections

use super::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A community notification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    /// Notification id
    pub notification_id: String,
    /// Notification type
    #[serde(rename = "type")]
    pub notification_type: Option<i64>,
    /// Text
    pub content: Option<String>,
    /// Acting user
    pub author: Option<UserProfile>,
    /// Related object id
    pub object_id: Option<String>,
    /// Related object type
    pub object_type: Option<i64>,
    /// Community id
    pub ndc_id: Option<i64>,
    /// Timestamp
    pub created_time: Option<String>,
    /// Extra data
    pub context_comment_content: Option<String>,
}

/// Result of a lottery draw
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LotteryLog {
    /// Kind of award
    pub award_type: Option<i64>,
    /// Award amount
    pub award_value: Option<f64>,
    /// Related object
    pub object_id: Option<String>,
    /// Related object type
    pub object_type: Option<i64>,
    /// Parent id
    pub parent_id: Option<String>,
    /// Timestamp
    pub created_time: Option<String>,
}

/// A moderation log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminLogEntry {
    /// Log id
    pub log_id: Option<String>,
    /// Operation code
    pub operation: Option<i64>,
    /// Operation name
    pub operation_name: Option<String>,
    /// Operation details
    pub operation_detail: Option<Value>,
    /// Target id
    pub object_id: Option<String>,
    /// Target type
    pub object_type: Option<i64>,
    /// Moderator
    pub author: Option<UserProfile>,
    /// Timestamp
    pub created_time: Option<String>,
}

/// A sticker collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickerCollection {
    /// Collection id
    pub collection_id: String,
    /// Name
    pub name: Option<String>,
    /// Icon URL
    pub icon: Option<String>,
    /// Owner user id
    pub uid: Option<String>,
    /// Owner profile
    pub author: Option<UserProfile>,
    /// Number of stickers
    pub stickers_count: Option<i64>,
    /// Stickers, when requested with `includeStickers`
    pub sticker_list: Option<Vec<Value>>,
    /// Status
    pub status: Option<i64>,
}
