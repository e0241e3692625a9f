//! Request scope
//!
//! The global API lives under `/g/s` and every community under `/x{id}/s`.
//! Most chat, profile and social endpoints exist in both with the same
//! shape, so [`Scope`] implements them once for a path prefix. The global
//! scope also prefixes comment and vote resources with `g-`.

use crate::http::{timestamp_ms, ApiHttpClient, ApiRequest, ApiResponse};
use crate::objects::{self, Comment, Message, Thread, UserProfile, VisitorsList};
use crate::params::{stamped, ChatSettings, OutgoingMessage, Target};
use crate::session::SessionContext;
use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Shared state and endpoints for one path prefix
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    http: ApiHttpClient,
    context: SessionContext,
    prefix: String,
    resource_prefix: &'static str,
}

impl Scope {
    /// The global `/g/s` scope
    pub(crate) fn global(http: ApiHttpClient, context: SessionContext) -> Self {
        Self {
            http,
            context,
            prefix: "/g/s".to_string(),
            resource_prefix: "g-",
        }
    }

    /// A community `/x{com_id}/s` scope sharing the same client
    pub(crate) fn community(&self, com_id: &str) -> Self {
        Self {
            http: self.http.clone(),
            context: self.context.clone(),
            prefix: format!("/x{}/s", com_id),
            resource_prefix: "",
        }
    }

    pub(crate) fn context(&self) -> &SessionContext {
        &self.context
    }

    pub(crate) fn http(&self) -> &ApiHttpClient {
        &self.http
    }

    /// Path under this scope
    pub(crate) fn path(&self, rest: &str) -> String {
        format!("{}/{}", self.prefix, rest)
    }

    /// `comment`, or `g-comment` in the global scope
    fn comment_resource(&self) -> String {
        format!("{}comment", self.resource_prefix)
    }

    /// `vote`, or `g-vote` in the global scope
    fn vote_resource(&self) -> String {
        format!("{}vote", self.resource_prefix)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Execute a request with the current credentials
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let auth = self.context.snapshot();
        self.http.execute(request, &auth).await
    }

    /// Execute and discard the body
    pub(crate) async fn run(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// POST a JSON body with the current timestamp
    pub(crate) async fn post(&self, path: String, body: Value) -> Result<()> {
        let request = ApiRequest::post(path).json_body(&stamped(body, timestamp_ms()))?;
        self.run(request).await
    }

    /// Execute and extract a required top-level field
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        key: &str,
    ) -> Result<T> {
        let response = self.execute(request).await?;
        objects::field(&response.data, key)
    }

    /// Execute and extract a list field, empty when absent
    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        key: &str,
    ) -> Result<Vec<T>> {
        let response = self.execute(request).await?;
        objects::field_or_default(&response.data, key)
    }

    /// Execute and deserialize the whole body
    pub(crate) async fn fetch_body<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        Ok(serde_json::from_value(response.data)?)
    }

    fn page(path: String, start: u32, size: u32) -> ApiRequest {
        ApiRequest::get(path).param("start", start).param("size", size)
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub(crate) async fn user_info(&self, user_id: &str) -> Result<UserProfile> {
        let path = self.path(&format!("user-profile/{}", user_id));
        self.fetch(ApiRequest::get(path), "userProfile").await
    }

    pub(crate) async fn user_following(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        let path = self.path(&format!("user-profile/{}/joined", user_id));
        self.fetch_list(Self::page(path, start, size), "userProfileList")
            .await
    }

    pub(crate) async fn user_followers(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        let path = self.path(&format!("user-profile/{}/member", user_id));
        self.fetch_list(Self::page(path, start, size), "userProfileList")
            .await
    }

    pub(crate) async fn user_visitors(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<VisitorsList> {
        let path = self.path(&format!("user-profile/{}/visitors", user_id));
        self.fetch_body(Self::page(path, start, size)).await
    }

    pub(crate) async fn blocked_users(&self, start: u32, size: u32) -> Result<Vec<UserProfile>> {
        let path = self.path("block");
        self.fetch_list(Self::page(path, start, size), "userProfileList")
            .await
    }

    pub(crate) async fn wall_comments(
        &self,
        user_id: &str,
        sorting: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<Comment>> {
        let path = self.path(&format!(
            "user-profile/{}/{}",
            user_id,
            self.comment_resource()
        ));
        let request = Self::page(path, start, size).param("sort", sorting);
        self.fetch_list(request, "commentList").await
    }

    pub(crate) async fn visit(&self, user_id: &str) -> Result<()> {
        let path = self.path(&format!("user-profile/{}", user_id));
        self.run(ApiRequest::get(path).param("action", "visit"))
            .await
    }

    /// Follow one user, or several at once
    pub(crate) async fn follow(&self, user_ids: &[&str]) -> Result<()> {
        match user_ids {
            [] => Ok(()),
            [user_id] => {
                let path = self.path(&format!("user-profile/{}/member", user_id));
                self.run(ApiRequest::post(path)).await
            }
            many => {
                let me = self.context.user_id()?;
                let path = self.path(&format!("user-profile/{}/joined", me));
                self.post(path, json!({ "targetUidList": many })).await
            }
        }
    }

    pub(crate) async fn block(&self, user_id: &str) -> Result<()> {
        let path = self.path(&format!("block/{}", user_id));
        self.run(ApiRequest::post(path)).await
    }

    pub(crate) async fn unblock(&self, user_id: &str) -> Result<()> {
        let path = self.path(&format!("block/{}", user_id));
        self.run(ApiRequest::delete(path)).await
    }

    /// Report an object; guests use the `g-flag` endpoint
    pub(crate) async fn flag(
        &self,
        reason: &str,
        flag_type: i64,
        target: &Target,
        as_guest: bool,
    ) -> Result<()> {
        let endpoint = if as_guest { "g-flag" } else { "flag" };
        self.post(self.path(endpoint), target.flag_body(reason, flag_type))
            .await
    }

    // =========================================================================
    // Comments and votes
    // =========================================================================

    pub(crate) async fn comment(
        &self,
        message: &str,
        target: &Target,
        reply_to: Option<&str>,
    ) -> Result<()> {
        let target = target.commentable()?;
        if message.is_empty() {
            return Err(crate::Error::MessageNeeded);
        }

        let mut body = json!({
            "content": message,
            "stickerId": null,
            "type": 0,
            "eventSource": target.event_source(),
        });
        if let Some(reply_to) = reply_to {
            body["respondTo"] = json!(reply_to);
        }

        let path = self.path(&format!("{}/{}", target.path(), self.comment_resource()));
        self.post(path, body).await
    }

    pub(crate) async fn delete_comment(&self, comment_id: &str, target: &Target) -> Result<()> {
        let target = target.commentable()?;
        let path = self.path(&format!(
            "{}/{}/{}",
            target.path(),
            self.comment_resource(),
            comment_id
        ));
        self.run(ApiRequest::delete(path)).await
    }

    /// Like a blog or wiki
    pub(crate) async fn like_post(&self, target: &Target) -> Result<()> {
        let event_source = match target {
            Target::Blog(_) => "UserProfileView",
            Target::Wiki(_) => "PostDetailView",
            _ => {
                return Err(crate::Error::SpecifyType(
                    "likes need a blog or wiki target".to_string(),
                ))
            }
        };
        let path = self.path(&format!("{}/{}", target.path(), self.vote_resource()));
        let body = stamped(
            json!({ "value": 4, "eventSource": event_source }),
            timestamp_ms(),
        );
        let request = ApiRequest::post(path).param("cv", "1.2").json_body(&body)?;
        self.run(request).await
    }

    /// Like several blogs at once
    pub(crate) async fn like_posts(&self, blog_ids: &[&str]) -> Result<()> {
        let path = self.path(&format!("feed/{}", self.vote_resource()));
        self.post(path, json!({ "value": 4, "targetIdList": blog_ids }))
            .await
    }

    pub(crate) async fn unlike_post(&self, target: &Target) -> Result<()> {
        let event_source = match target {
            Target::Blog(_) => "UserProfileView",
            Target::Wiki(_) => "PostDetailView",
            _ => {
                return Err(crate::Error::SpecifyType(
                    "likes need a blog or wiki target".to_string(),
                ))
            }
        };
        let path = self.path(&format!("{}/{}", target.path(), self.vote_resource()));
        self.run(ApiRequest::delete(path).param("eventSource", event_source))
            .await
    }

    /// Vote on a comment; `value` is 1 or -1 in a community, 4 globally
    pub(crate) async fn vote_comment(
        &self,
        comment_id: &str,
        target: &Target,
        value: i64,
    ) -> Result<()> {
        let target = target.commentable()?;
        let path = self.path(&format!(
            "{}/comment/{}/{}",
            target.path(),
            comment_id,
            self.vote_resource()
        ));
        let body = stamped(
            json!({ "value": value, "eventSource": target.event_source() }),
            timestamp_ms(),
        );
        let request = ApiRequest::post(path)
            .param("cv", "1.2")
            .param("value", value.signum())
            .json_body(&body)?;
        self.run(request).await
    }

    pub(crate) async fn unvote_comment(&self, comment_id: &str, target: &Target) -> Result<()> {
        let target = target.commentable()?;
        let path = self.path(&format!(
            "{}/comment/{}/{}",
            target.path(),
            comment_id,
            self.vote_resource()
        ));
        self.run(ApiRequest::delete(path).param("eventSource", target.event_source()))
            .await
    }

    // =========================================================================
    // Chats
    // =========================================================================

    pub(crate) async fn chat_threads(&self, start: u32, size: u32) -> Result<Vec<Thread>> {
        let request = Self::page(self.path("chat/thread"), start, size).param("type", "joined-me");
        self.fetch_list(request, "threadList").await
    }

    pub(crate) async fn chat_thread(&self, chat_id: &str) -> Result<Thread> {
        let path = self.path(&format!("chat/thread/{}", chat_id));
        self.fetch(ApiRequest::get(path), "thread").await
    }

    pub(crate) async fn chat_messages(&self, chat_id: &str, size: u32) -> Result<Vec<Message>> {
        let path = self.path(&format!("chat/thread/{}/message", chat_id));
        let request = ApiRequest::get(path)
            .param("v", 2)
            .param("pagingType", "t")
            .param("size", size);
        self.fetch_list(request, "messageList").await
    }

    pub(crate) async fn message_info(&self, chat_id: &str, message_id: &str) -> Result<Message> {
        let path = self.path(&format!("chat/thread/{}/message/{}", chat_id, message_id));
        self.fetch(ApiRequest::get(path), "message").await
    }

    pub(crate) async fn send_message(
        &self,
        chat_id: &str,
        message: &OutgoingMessage,
    ) -> Result<()> {
        let path = self.path(&format!("chat/thread/{}/message", chat_id));
        let request = ApiRequest::post(path).json_body(&message.to_body(timestamp_ms()))?;
        self.run(request).await?;
        tracing::debug!(chat_id, "Message sent");
        Ok(())
    }

    /// Delete a message; staff deletions go through the admin endpoint
    pub(crate) async fn delete_message(
        &self,
        chat_id: &str,
        message_id: &str,
        as_staff: bool,
        reason: Option<&str>,
    ) -> Result<()> {
        let path = self.path(&format!("chat/thread/{}/message/{}", chat_id, message_id));
        if as_staff {
            let body = json!({
                "adminOpName": 102,
                "adminOpNote": { "content": reason },
            });
            self.post(format!("{}/admin", path), body).await
        } else {
            self.run(ApiRequest::delete(path)).await
        }
    }

    pub(crate) async fn mark_as_read(&self, chat_id: &str, message_id: &str) -> Result<()> {
        let path = self.path(&format!("chat/thread/{}/mark-as-read", chat_id));
        self.post(path, json!({ "messageId": message_id })).await
    }

    /// Apply chat settings
    ///
    /// Each toggle is its own request; the thread update is sent last. The
    /// first failing request aborts the rest.
    pub(crate) async fn edit_chat(&self, chat_id: &str, settings: &ChatSettings) -> Result<()> {
        let thread = self.path(&format!("chat/thread/{}", chat_id));
        let needs_member = settings.do_not_disturb.is_some() || settings.background_image.is_some();
        let me = if needs_member {
            Some(self.context.user_id()?)
        } else {
            None
        };

        if let (Some(dnd), Some(me)) = (settings.do_not_disturb, me.as_deref()) {
            let alert_option = if dnd { 2 } else { 1 };
            self.post(
                format!("{}/member/{}/alert", thread, me),
                json!({ "alertOption": alert_option }),
            )
            .await?;
        }

        if let Some(pin) = settings.pin_chat {
            let action = if pin { "pin" } else { "unpin" };
            self.run(ApiRequest::post(format!("{}/{}", thread, action)))
                .await?;
        }

        if let (Some(image), Some(me)) = (&settings.background_image, me.as_deref()) {
            self.post(
                format!("{}/member/{}/background", thread, me),
                json!({ "media": [100, image, null] }),
            )
            .await?;
        }

        if !settings.co_hosts.is_empty() {
            self.post(
                format!("{}/co-host", thread),
                json!({ "uidList": settings.co_hosts }),
            )
            .await?;
        }

        let toggles = [
            ("view-only", settings.view_only),
            ("members-can-invite", settings.can_invite),
            ("tipping-perm-status", settings.can_tip),
        ];
        for (resource, value) in toggles {
            if let Some(enabled) = value {
                let state = if enabled { "enable" } else { "disable" };
                self.run(ApiRequest::post(format!("{}/{}/{}", thread, resource, state)))
                    .await?;
            }
        }

        let request = ApiRequest::post(thread).json_body(&settings.thread_body(timestamp_ms()))?;
        self.run(request).await?;
        tracing::info!(chat_id, "Chat settings updated");
        Ok(())
    }
}
