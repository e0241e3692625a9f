//! Chat thread and message objects

use super::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chat thread
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thread {
    /// Thread id
    pub thread_id: String,
    /// Thread title
    pub title: Option<String>,
    /// Thread icon URL
    pub icon: Option<String>,
    /// Description
    pub content: Option<String>,
    /// Search keywords
    pub keywords: Option<String>,
    /// 0 direct, 1 private group, 2 public
    #[serde(rename = "type")]
    pub thread_type: Option<i64>,
    /// Thread status
    pub status: Option<i64>,
    /// Host user id
    pub uid: Option<String>,
    /// Host profile
    pub author: Option<UserProfile>,
    /// Community id, absent for global chats
    pub ndc_id: Option<i64>,
    /// Member count
    pub members_count: Option<i64>,
    /// Member limit
    pub members_quota: Option<i64>,
    /// A few members for previews
    pub members_summary: Option<Vec<UserProfile>>,
    /// Latest message preview
    pub last_message_summary: Option<Message>,
    /// Last activity timestamp
    pub latest_activity_time: Option<String>,
    /// Creation timestamp
    pub created_time: Option<String>,
    /// Last modification timestamp
    pub modified_time: Option<String>,
    /// Chat settings (co-hosts, announcement, view-only, ...)
    pub extensions: Option<Value>,
}

impl Thread {
    /// Co-host user ids
    pub fn co_hosts(&self) -> Vec<String> {
        self.extension("coHost")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Pinned announcement text
    pub fn announcement(&self) -> Option<&str> {
        self.extension("announcement").and_then(Value::as_str)
    }

    /// Whether only hosts can send messages
    pub fn view_only(&self) -> bool {
        self.extension("viewOnly").and_then(Value::as_bool).unwrap_or(false)
    }

    fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.as_ref().and_then(|ext| ext.get(key))
    }
}

/// A chat message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    /// Message id (absent on some socket frames)
    pub message_id: Option<String>,
    /// Thread the message belongs to
    pub thread_id: Option<String>,
    /// Message type (0 text, 2 voice, 3 sticker, 100+ system notices)
    #[serde(rename = "type")]
    pub message_type: Option<i64>,
    /// Media type (100 image, 103 youtube, 110 voice, 113 sticker)
    pub media_type: Option<i64>,
    /// Media URL
    pub media_value: Option<String>,
    /// Text content
    pub content: Option<String>,
    /// Client-side reference id
    pub client_ref_id: Option<i64>,
    /// Author user id
    pub uid: Option<String>,
    /// Author profile
    pub author: Option<UserProfile>,
    /// Creation timestamp
    pub created_time: Option<String>,
    /// Hidden by a moderator
    pub is_hidden: Option<bool>,
    /// Mentions, reply info, sticker details
    pub extensions: Option<Value>,
}

impl Message {
    /// User ids mentioned in the message
    pub fn mentioned_ids(&self) -> Vec<String> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("mentionedArray"))
            .and_then(Value::as_array)
            .map(|mentions| {
                mentions
                    .iter()
                    .filter_map(|m| m.get("uid").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Id of the message this one replies to
    pub fn reply_to(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("replyMessageId"))
            .and_then(Value::as_str)
    }
}
