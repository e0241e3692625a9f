//! Wallet, membership and link resolution objects

use super::{Community, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coin balance of the logged-in account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletInfo {
    /// Total coins
    pub total_coins: Option<f64>,
    /// Coins earned from business activity
    pub total_business_coins: Option<f64>,
    /// Ads are shown for coin rewards
    pub ads_enabled: Option<bool>,
    /// Ads flags
    pub ads_flags: Option<i64>,
    /// Whether a wallet was created
    pub is_wallet_created: Option<bool>,
}

/// One entry in the coin history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinHistoryEntry {
    /// Coins added or removed
    pub changed_coins: Option<f64>,
    /// Balance after the change
    pub total_coins: Option<f64>,
    /// Tax taken by the service
    pub tax_coins: Option<f64>,
    /// Origin of the change (tip, check-in, purchase, ...)
    pub source_type: Option<i64>,
    /// Timestamp
    pub created_time: Option<String>,
    /// Extra data (sender, target object)
    pub ext_data: Option<Value>,
}

/// Amino+ membership details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Membership {
    /// Membership is active on the account
    pub account_membership_enabled: Option<bool>,
    /// Has an Apple subscription
    pub has_any_apple_subscription: Option<bool>,
    /// Has an Android subscription
    pub has_any_android_subscription: Option<bool>,
    /// Premium features enabled
    pub premium_feature_enabled: Option<bool>,
    /// Raw membership record (renewal, expiry)
    pub membership: Option<Value>,
    /// Profile of the subscriber
    pub user_profile: Option<UserProfile>,
}

/// A resolved share link or object id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkInfo {
    /// Path of the target
    pub path: Option<String>,
    /// Link details and the owning community
    pub extensions: Option<Value>,
}

impl LinkInfo {
    fn link_field(&self, key: &str) -> Option<&Value> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("linkInfo"))
            .and_then(|info| info.get(key))
    }

    /// Id of the linked object
    pub fn object_id(&self) -> Option<&str> {
        self.link_field("objectId").and_then(Value::as_str)
    }

    /// Type of the linked object (0 user, 1 blog, 2 wiki, 12 chat, 16 community)
    pub fn object_type(&self) -> Option<i64> {
        self.link_field("objectType").and_then(Value::as_i64)
    }

    /// Short share code
    pub fn short_code(&self) -> Option<&str> {
        self.link_field("shortCode").and_then(Value::as_str)
    }

    /// Full link path
    pub fn full_path(&self) -> Option<&str> {
        self.link_field("fullPath").and_then(Value::as_str)
    }

    /// Community the object belongs to
    pub fn com_id(&self) -> Option<i64> {
        self.link_field("ndcId").and_then(Value::as_i64)
    }

    /// The owning community, when the service includes it
    pub fn community(&self) -> Option<Community> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("community"))
            .and_then(|c| serde_json::from_value(c.clone()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_info_accessors() {
        let info: LinkInfo = serde_json::from_value(json!({
            "path": "p/abc",
            "extensions": {
                "linkInfo": {
                    "objectId": "obj-1",
                    "objectType": 0,
                    "shortCode": "abc",
                    "fullPath": "/x1/s/user-profile/obj-1",
                    "ndcId": 1
                },
                "community": {"ndcId": 1, "name": "One"}
            }
        }))
        .unwrap();

        assert_eq!(info.object_id(), Some("obj-1"));
        assert_eq!(info.object_type(), Some(0));
        assert_eq!(info.short_code(), Some("abc"));
        assert_eq!(info.com_id(), Some(1));
        assert_eq!(info.community().map(|c| c.ndc_id), Some(1));
    }

    #[test]
    fn test_wallet_info_accepts_integers() {
        let wallet: WalletInfo =
            serde_json::from_value(json!({"totalCoins": 120, "adsEnabled": true})).unwrap();
        assert_eq!(wallet.total_coins, Some(120.0));
        assert_eq!(wallet.ads_enabled, Some(true));
    }
}
