//! Response objects
//!
//! Typed views over the JSON the service returns. Every struct deserializes
//! with `#[serde(default)]` so that missing fields never fail a call; the
//! service omits fields freely depending on privacy settings and endpoint.

pub mod activity;
pub mod blog;
pub mod chat;
pub mod community;
pub mod event;
pub mod user;
pub mod wallet;

pub use activity::{AdminLogEntry, LotteryLog, Notification, StickerCollection};
pub use blog::{Blog, Comment, Wiki};
pub use chat::{Message, Thread};
pub use community::Community;
pub use event::Event;
pub use user::{CheckInStats, UserProfile, UserProfileCountList, Visitor, VisitorsList};
pub use wallet::{CoinHistoryEntry, LinkInfo, Membership, WalletInfo};

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract and deserialize one top-level field of a response body
pub(crate) fn field<T: DeserializeOwned>(data: &Value, key: &str) -> Result<T> {
    let value = data
        .get(key)
        .ok_or_else(|| Error::UnexpectedResponse(key.to_string()))?;
    Ok(serde_json::from_value(value.clone())?)
}

/// Like [`field`], but a missing or null field yields the type's default
pub(crate) fn field_or_default<T: DeserializeOwned + Default>(
    data: &Value,
    key: &str,
) -> Result<T> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_extracts_typed_value() {
        let data = json!({"userProfile": {"uid": "u-1", "nickname": "Ferris"}});
        let profile: UserProfile = field(&data, "userProfile").unwrap();
        assert_eq!(profile.uid, "u-1");
        assert_eq!(profile.nickname.as_deref(), Some("Ferris"));
    }

    #[test]
    fn test_field_missing_is_unexpected_response() {
        let data = json!({});
        let result: Result<UserProfile> = field(&data, "userProfile");
        assert!(matches!(result, Err(Error::UnexpectedResponse(key)) if key == "userProfile"));
    }

    #[test]
    fn test_field_or_default_on_null() {
        let data = json!({"threadList": null});
        let threads: Vec<Thread> = field_or_default(&data, "threadList").unwrap();
        assert!(threads.is_empty());
    }
}
