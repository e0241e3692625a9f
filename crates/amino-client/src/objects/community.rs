//! Community objects

use super::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A community
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Community {
    /// Community id
    pub ndc_id: i64,
    /// Community name
    pub name: Option<String>,
    /// Icon URL
    pub icon: Option<String>,
    /// Short tagline
    pub tagline: Option<String>,
    /// Description
    pub content: Option<String>,
    /// Endpoint name used in links
    pub endpoint: Option<String>,
    /// Share link
    pub link: Option<String>,
    /// Primary language code
    pub primary_language: Option<String>,
    /// Search keywords
    pub keywords: Option<String>,
    /// Member count
    pub members_count: Option<i64>,
    /// 0 open, 1 approval required, 2 invite only
    pub join_type: Option<i64>,
    /// Listing status
    pub listed_status: Option<i64>,
    /// Probation status
    pub probation_status: Option<i64>,
    /// Community status
    pub status: Option<i64>,
    /// Activity score
    pub community_heat: Option<f64>,
    /// Leader agent profile
    pub agent: Option<UserProfile>,
    /// Theme pack
    pub theme_pack: Option<Value>,
    /// Creation timestamp
    pub created_time: Option<String>,
    /// Last modification timestamp
    pub modified_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_community_mapping() {
        let community: Community = serde_json::from_value(json!({
            "ndcId": 123,
            "name": "Rustaceans",
            "endpoint": "rust",
            "membersCount": 5000,
            "communityHeat": 12.5,
            "agent": {"uid": "leader"}
        }))
        .unwrap();

        assert_eq!(community.ndc_id, 123);
        assert_eq!(community.name.as_deref(), Some("Rustaceans"));
        assert_eq!(community.community_heat, Some(12.5));
        assert_eq!(community.agent.map(|a| a.uid), Some("leader".to_string()));
    }
}
