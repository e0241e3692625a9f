//! Blog, wiki and comment objects

use super::UserProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A blog post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blog {
    /// Blog id
    pub blog_id: String,
    /// Title
    pub title: Option<String>,
    /// Body
    pub content: Option<String>,
    /// 0 normal, 1 repost source, 2 repost, 4 poll, 6 quiz
    #[serde(rename = "type")]
    pub blog_type: Option<i64>,
    /// Status
    pub status: Option<i64>,
    /// Author user id
    pub uid: Option<String>,
    /// Author profile
    pub author: Option<UserProfile>,
    /// Community id
    pub ndc_id: Option<i64>,
    /// Number of likes
    pub votes_count: Option<i64>,
    /// Sum of vote values
    pub votes_sum: Option<i64>,
    /// Number of comments
    pub comments_count: Option<i64>,
    /// Id of the reposted object
    pub ref_object_id: Option<String>,
    /// The reposted object
    pub ref_object: Option<Value>,
    /// Attached media
    pub media_list: Option<Value>,
    /// Style, fans-only flag, poll options
    pub extensions: Option<Value>,
    /// Creation timestamp
    pub created_time: Option<String>,
    /// Last modification timestamp
    pub modified_time: Option<String>,
}

/// A wiki entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Wiki {
    /// Wiki item id
    pub item_id: String,
    /// Title
    pub label: Option<String>,
    /// Body
    pub content: Option<String>,
    /// Icon URL
    pub icon: Option<String>,
    /// Search keywords
    pub keywords: Option<String>,
    /// Status
    pub status: Option<i64>,
    /// Author profile
    pub author: Option<UserProfile>,
    /// Community id
    pub ndc_id: Option<i64>,
    /// Number of likes
    pub votes_count: Option<i64>,
    /// Number of comments
    pub comments_count: Option<i64>,
    /// Attached media
    pub media_list: Option<Value>,
    /// Style, properties
    pub extensions: Option<Value>,
    /// Creation timestamp
    pub created_time: Option<String>,
    /// Last modification timestamp
    pub modified_time: Option<String>,
}

/// A comment on a blog, wiki or profile wall
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    /// Comment id
    pub comment_id: String,
    /// Text
    pub content: Option<String>,
    /// Author profile
    pub author: Option<UserProfile>,
    /// Id of the commented object
    pub parent_id: Option<String>,
    /// Type of the commented object
    pub parent_type: Option<i64>,
    /// Community id
    pub ndc_id: Option<i64>,
    /// Sum of vote values
    pub votes_sum: Option<i64>,
    /// Number of replies
    pub subcomments_count: Option<i64>,
    /// Sticker and mention info
    pub extensions: Option<Value>,
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
    fn test_blog_mapping() {
        let blog: Blog = serde_json::from_value(json!({
            "blogId": "b-1",
            "title": "Hello",
            "type": 2,
            "refObjectId": "b-0",
            "votesCount": 4
        }))
        .unwrap();
        assert_eq!(blog.blog_id, "b-1");
        assert_eq!(blog.blog_type, Some(2));
        assert_eq!(blog.ref_object_id.as_deref(), Some("b-0"));
    }

    #[test]
    fn test_comment_mapping() {
        let comment: Comment = serde_json::from_value(json!({
            "commentId": "c-1",
            "content": "nice",
            "author": {"uid": "u-1"},
            "votesSum": 3
        }))
        .unwrap();
        assert_eq!(comment.comment_id, "c-1");
        assert_eq!(comment.votes_sum, Some(3));
    }
}
