//! User profile objects

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user profile, global or community scoped
///
/// The service returns the same shape for `account`, `userProfile`,
/// message authors and member lists. Every field is optional on the wire;
/// absent fields decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// User id
    pub uid: String,
    /// Display name
    pub nickname: Option<String>,
    /// Avatar URL
    pub icon: Option<String>,
    /// Bio
    pub content: Option<String>,
    /// Handle chosen by the user
    pub amino_id: Option<String>,
    /// Account email (only on the `account` object)
    pub email: Option<String>,
    /// Community level
    pub level: Option<i64>,
    /// Reputation points
    pub reputation: Option<i64>,
    /// Role in the community (leader, curator, member)
    pub role: Option<i64>,
    /// Account status
    pub status: Option<i64>,
    /// 1 online, 2 offline
    pub online_status: Option<i64>,
    /// Community id for community-scoped profiles
    pub ndc_id: Option<i64>,
    /// Number of followers
    pub members_count: Option<i64>,
    /// Number of users followed
    pub joined_count: Option<i64>,
    /// Number of blogs posted
    pub blogs_count: Option<i64>,
    /// Number of wall comments
    pub comments_count: Option<i64>,
    /// Number of posts
    pub posts_count: Option<i64>,
    /// Number of wiki entries
    pub items_count: Option<i64>,
    /// Whether the current user follows this one
    pub following_status: Option<i64>,
    /// Amino+ membership status
    pub account_membership_status: Option<i64>,
    /// Current check-in streak
    pub consecutive_check_in_days: Option<i64>,
    /// Global profile flag
    pub is_global: Option<bool>,
    /// Nickname verified by the service
    pub is_nickname_verified: Option<bool>,
    /// Creation timestamp (ISO 8601)
    pub created_time: Option<String>,
    /// Last modification timestamp (ISO 8601)
    pub modified_time: Option<String>,
    /// Attached media
    pub media_list: Option<Value>,
    /// Free-form extensions (style, titles, privileges)
    pub extensions: Option<Value>,
}

impl UserProfile {
    /// Custom titles shown on the profile
    pub fn titles(&self) -> Vec<String> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("customTitles"))
            .and_then(Value::as_array)
            .map(|titles| {
                titles
                    .iter()
                    .filter_map(|t| t.get("title").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One entry of a profile's visitor list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visitor {
    /// Visiting user
    pub profile: UserProfile,
    /// Privacy mode the visitor used
    pub visitor_privacy_mode: Option<i64>,
    /// Visit timestamp
    pub visit_time: Option<String>,
}

/// Visitors of a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitorsList {
    /// Recent visitors
    pub visitors: Vec<Visitor>,
    /// Number of visitors kept by the service
    pub capacity: Option<i64>,
    /// Total visitors
    pub visitors_count: Option<i64>,
}

/// A page of users with the community-wide total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfileCountList {
    /// Users on this page
    pub user_profile_list: Vec<UserProfile>,
    /// Total matching users
    pub user_profile_count: Option<i64>,
}

/// Check-in statistics of a community member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckInStats {
    /// Raw check-in history
    pub check_in_history: Option<Value>,
    /// Current streak
    pub consecutive_check_in_days: Option<i64>,
    /// Checked in today
    pub has_check_in_today: Option<bool>,
    /// Ever checked in
    pub has_any_check_in: Option<bool>,
    /// Member profile
    pub user_profile: Option<UserProfile>,
}
