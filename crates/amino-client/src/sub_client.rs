//! Community API client
//!
//! [`SubClient`] wraps the `/x{community}/s` endpoints of one community:
//! posts, check-ins, comments, chats, member lists and moderation. It
//! shares the session and HTTP client of the [`Client`] it was created from,
//! so a login or logout on the parent is seen immediately.

use crate::client::{local_timezone, Client};
use crate::http::{timestamp_ms, ApiRequest};
use crate::objects::{
    AdminLogEntry, Blog, CheckInStats, Comment, LotteryLog, Message, Notification,
    StickerCollection, Thread, UserProfile, UserProfileCountList, VisitorsList, Wiki,
};
use crate::params::{
    feature_seconds, stamped, strike_seconds, ChatSettings, LeaderboardType, OutgoingMessage,
    PostDraft, ProfileEdit, RepairMethod, Sorting, Target, UserListType, OBJECT_TYPE_USER,
};
use crate::scope::Scope;
use crate::{Error, Result};
use serde_json::{json, Value};

/// Client for one community
///
/// # Example
///
/// ```rust,no_run
/// # use amino_client::{Client, ClientConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new(ClientConfig::default()).await?;
/// client.login("ferris@example.com", "password").await?;
///
/// let community = client.sub_client("12345")?;
/// community.check_in(None).await?;
/// for thread in community.get_chat_threads(0, 25).await? {
///     println!("{:?}", thread.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SubClient {
    scope: Scope,
    com_id: String,
}

impl SubClient {
    /// Create a client for a community
    ///
    /// Fails with [`Error::NoCommunity`] for an empty id and
    /// [`Error::NotLoggedIn`] when `client` has no session.
    pub fn new(client: &Client, com_id: impl Into<String>) -> Result<Self> {
        let com_id = com_id.into();
        if com_id.trim().is_empty() {
            return Err(Error::NoCommunity);
        }
        if !client.is_authenticated() {
            return Err(Error::NotLoggedIn);
        }

        Ok(Self {
            scope: client.scope().community(&com_id),
            com_id,
        })
    }

    /// Community id
    pub fn com_id(&self) -> &str {
        &self.com_id
    }

    fn me(&self) -> Result<String> {
        self.scope.context().user_id()
    }

    fn path(&self, rest: &str) -> String {
        self.scope.path(rest)
    }

    fn page(&self, rest: &str, start: u32, size: u32) -> ApiRequest {
        ApiRequest::get(self.path(rest))
            .param("start", start)
            .param("size", size)
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// Publish a blog
    pub async fn post_blog(&self, draft: &PostDraft) -> Result<()> {
        let request =
            ApiRequest::post(self.path("blog")).json_body(&draft.blog_body(timestamp_ms()))?;
        self.scope.run(request).await
    }

    /// Publish a wiki item
    pub async fn post_wiki(&self, draft: &PostDraft) -> Result<()> {
        let request =
            ApiRequest::post(self.path("item")).json_body(&draft.wiki_body(timestamp_ms()))?;
        self.scope.run(request).await
    }

    /// Edit a blog; empty title or content in the draft are left unchanged
    pub async fn edit_blog(&self, blog_id: &str, draft: &PostDraft) -> Result<()> {
        let request = ApiRequest::post(self.path(&format!("blog/{}", blog_id)))
            .json_body(&draft.blog_edit_body(timestamp_ms()))?;
        self.scope.run(request).await
    }

    /// Delete a blog
    pub async fn delete_blog(&self, blog_id: &str) -> Result<()> {
        self.scope
            .run(ApiRequest::delete(self.path(&format!("blog/{}", blog_id))))
            .await
    }

    /// Delete a wiki item
    pub async fn delete_wiki(&self, wiki_id: &str) -> Result<()> {
        self.scope
            .run(ApiRequest::delete(self.path(&format!("item/{}", wiki_id))))
            .await
    }

    /// Repost a blog or wiki with an optional comment
    pub async fn repost_blog(&self, content: Option<&str>, target: &Target) -> Result<()> {
        if !matches!(target, Target::Blog(_) | Target::Wiki(_)) {
            return Err(Error::SpecifyType(
                "reposts need a blog or wiki target".to_string(),
            ));
        }
        let body = json!({
            "content": content,
            "refObjectId": target.id(),
            "refObjectType": target.object_type(),
            "type": 2,
        });
        self.scope.post(self.path("blog"), body).await
    }

    /// Vote in a poll
    pub async fn vote_poll(&self, blog_id: &str, option_id: &str) -> Result<()> {
        let path = self.path(&format!("blog/{}/poll/option/{}/vote", blog_id, option_id));
        self.scope
            .post(path, json!({ "value": 1, "eventSource": "PostDetailView" }))
            .await
    }

    // =========================================================================
    // Check-in
    // =========================================================================

    /// Daily check-in; `tz` defaults to the local offset
    pub async fn check_in(&self, tz: Option<i64>) -> Result<Value> {
        let body = json!({ "timezone": tz.unwrap_or_else(local_timezone) });
        let request = ApiRequest::post(self.path("check-in"))
            .json_body(&stamped(body, timestamp_ms()))?;
        Ok(self.scope.execute(request).await?.data)
    }

    /// Repair a broken check-in streak
    pub async fn repair_check_in(&self, method: RepairMethod) -> Result<()> {
        self.scope
            .post(
                self.path("check-in/repair"),
                json!({ "repairMethod": method.as_str() }),
            )
            .await
    }

    /// Play the daily lottery
    pub async fn lottery(&self, tz: Option<i64>) -> Result<LotteryLog> {
        let body = json!({ "timezone": tz.unwrap_or_else(local_timezone) });
        let request = ApiRequest::post(self.path("check-in/lottery"))
            .json_body(&stamped(body, timestamp_ms()))?;
        self.scope.fetch(request, "lotteryLog").await
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Edit the community profile
    pub async fn edit_profile(&self, edit: &ProfileEdit) -> Result<()> {
        let me = self.me()?;
        let request = ApiRequest::post(self.path(&format!("user-profile/{}", me)))
            .json_body(&edit.community_body(timestamp_ms()))?;
        self.scope.run(request).await
    }

    /// Appear online or offline for a day
    pub async fn activity_status(&self, online: bool) -> Result<()> {
        let me = self.me()?;
        let body = json!({
            "onlineStatus": if online { 1 } else { 2 },
            "duration": 86_400,
        });
        self.scope
            .post(self.path(&format!("user-profile/{}/online-status", me)), body)
            .await
    }

    // =========================================================================
    // Comments and votes
    // =========================================================================

    /// Comment on a wall, blog or wiki
    pub async fn comment(&self, message: &str, target: &Target, reply_to: Option<&str>) -> Result<()> {
        self.scope.comment(message, target, reply_to).await
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: &str, target: &Target) -> Result<()> {
        self.scope.delete_comment(comment_id, target).await
    }

    /// Like a blog or wiki
    pub async fn like_blog(&self, target: &Target) -> Result<()> {
        self.scope.like_post(target).await
    }

    /// Like several blogs
    pub async fn like_blogs(&self, blog_ids: &[&str]) -> Result<()> {
        self.scope.like_posts(blog_ids).await
    }

    /// Remove a like from a blog or wiki
    pub async fn unlike_blog(&self, target: &Target) -> Result<()> {
        self.scope.unlike_post(target).await
    }

    /// Like a comment on a wall or blog
    pub async fn like_comment(&self, comment_id: &str, target: &Target) -> Result<()> {
        self.scope.vote_comment(comment_id, target, 1).await
    }

    /// Remove a like from a comment
    pub async fn unlike_comment(&self, comment_id: &str, target: &Target) -> Result<()> {
        self.scope.unvote_comment(comment_id, target).await
    }

    /// Upvote a blog comment
    pub async fn upvote_comment(&self, blog_id: &str, comment_id: &str) -> Result<()> {
        self.scope
            .vote_comment(comment_id, &Target::Blog(blog_id.to_string()), 1)
            .await
    }

    /// Downvote a blog comment
    pub async fn downvote_comment(&self, blog_id: &str, comment_id: &str) -> Result<()> {
        self.scope
            .vote_comment(comment_id, &Target::Blog(blog_id.to_string()), -1)
            .await
    }

    /// Remove a vote from a blog comment
    pub async fn unvote_comment(&self, blog_id: &str, comment_id: &str) -> Result<()> {
        self.scope
            .unvote_comment(comment_id, &Target::Blog(blog_id.to_string()))
            .await
    }

    /// Reply to a wall comment
    pub async fn reply_wall(&self, user_id: &str, comment_id: &str, message: &str) -> Result<()> {
        if message.is_empty() {
            return Err(Error::MessageNeeded);
        }
        let body = json!({
            "content": message,
            "stackedId": null,
            "respondTo": comment_id,
            "type": 0,
            "eventSource": "UserProfileView",
        });
        self.scope
            .post(self.path(&format!("user-profile/{}/comment", user_id)), body)
            .await
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Latest notifications
    pub async fn get_notifications(&self, start: u32, size: u32) -> Result<Vec<Notification>> {
        let request = self.page("notification", start, size).param("pagingType", "t");
        self.scope.fetch_list(request, "notificationList").await
    }

    /// Delete one notification
    pub async fn delete_notification(&self, notification_id: &str) -> Result<()> {
        let path = self.path(&format!("notification/{}", notification_id));
        self.scope.run(ApiRequest::delete(path)).await
    }

    /// Delete all notifications
    pub async fn clear_notifications(&self) -> Result<()> {
        self.scope
            .run(ApiRequest::delete(self.path("notification")))
            .await
    }

    /// Mark notifications as seen
    pub async fn check_notifications(&self) -> Result<()> {
        self.scope
            .run(ApiRequest::post(self.path("notification/checked")))
            .await
    }

    // =========================================================================
    // Chats
    // =========================================================================

    /// Open a chat with users and an initial message
    pub async fn start_chat(&self, user_ids: &[&str], message: &str) -> Result<()> {
        let body = json!({
            "type": 0,
            "inviteeUids": user_ids,
            "initialMessageContent": message,
        });
        self.scope.post(self.path("chat/thread"), body).await
    }

    /// Invite users to a chat
    pub async fn invite_to_chat(&self, user_ids: &[&str], chat_id: &str) -> Result<()> {
        self.scope
            .post(
                self.path(&format!("chat/thread/{}/member/invite", chat_id)),
                json!({ "uids": user_ids }),
            )
            .await
    }

    /// Send a chat message
    pub async fn send_message(&self, chat_id: &str, message: &OutgoingMessage) -> Result<()> {
        self.scope.send_message(chat_id, message).await
    }

    /// Delete a chat message
    pub async fn delete_message(
        &self,
        chat_id: &str,
        message_id: &str,
        as_staff: bool,
        reason: Option<&str>,
    ) -> Result<()> {
        self.scope
            .delete_message(chat_id, message_id, as_staff, reason)
            .await
    }

    /// Mark a chat as read up to a message
    pub async fn mark_as_read(&self, chat_id: &str, message_id: &str) -> Result<()> {
        self.scope.mark_as_read(chat_id, message_id).await
    }

    /// Change chat settings
    pub async fn edit_chat(&self, chat_id: &str, settings: &ChatSettings) -> Result<()> {
        self.scope.edit_chat(chat_id, settings).await
    }

    /// Hand the chat over to other users
    pub async fn transfer_host(&self, chat_id: &str, user_ids: &[&str]) -> Result<()> {
        self.scope
            .post(
                self.path(&format!("chat/thread/{}/transfer-organizer", chat_id)),
                json!({ "uidList": user_ids }),
            )
            .await
    }

    /// Remove a user from a chat
    pub async fn kick(&self, user_id: &str, chat_id: &str, allow_rejoin: bool) -> Result<()> {
        let path = self.path(&format!("chat/thread/{}/member/{}", chat_id, user_id));
        let request = ApiRequest::delete(path).param("allowRejoin", u8::from(allow_rejoin));
        self.scope.run(request).await
    }

    /// Join a public chat
    pub async fn join_chat(&self, chat_id: &str) -> Result<()> {
        let me = self.me()?;
        let path = self.path(&format!("chat/thread/{}/member/{}", chat_id, me));
        self.scope.run(ApiRequest::post(path)).await
    }

    /// Leave a chat
    pub async fn leave_chat(&self, chat_id: &str) -> Result<()> {
        let me = self.me()?;
        let path = self.path(&format!("chat/thread/{}/member/{}", chat_id, me));
        self.scope.run(ApiRequest::delete(path)).await
    }

    /// Chats the account is in
    pub async fn get_chat_threads(&self, start: u32, size: u32) -> Result<Vec<Thread>> {
        self.scope.chat_threads(start, size).await
    }

    /// Public chats, e.g. `recommended` or `latest`
    pub async fn get_public_chat_threads(
        &self,
        filter_type: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<Thread>> {
        let request = self
            .page("chat/thread", start, size)
            .param("type", "public-all")
            .param("filterType", filter_type);
        self.scope.fetch_list(request, "threadList").await
    }

    /// One chat thread
    pub async fn get_chat_thread(&self, chat_id: &str) -> Result<Thread> {
        self.scope.chat_thread(chat_id).await
    }

    /// Latest messages of a chat
    pub async fn get_chat_messages(&self, chat_id: &str, size: u32) -> Result<Vec<Message>> {
        self.scope.chat_messages(chat_id, size).await
    }

    /// One message of a chat
    pub async fn get_message_info(&self, chat_id: &str, message_id: &str) -> Result<Message> {
        self.scope.message_info(chat_id, message_id).await
    }

    /// Members of a chat
    pub async fn get_chat_users(
        &self,
        chat_id: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        let request = self
            .page(&format!("chat/thread/{}/member", chat_id), start, size)
            .param("type", "default")
            .param("cv", "1.2");
        self.scope.fetch_list(request, "memberList").await
    }

    // =========================================================================
    // Social and coins
    // =========================================================================

    /// Tip coins to a chat, blog or wiki
    ///
    /// A random transaction id is generated when none is given.
    pub async fn send_coins(
        &self,
        coins: u32,
        target: &Target,
        transaction_id: Option<&str>,
    ) -> Result<()> {
        let transaction_id = transaction_id
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut body = json!({
            "coins": coins,
            "tippingContext": { "transactionId": transaction_id },
        });

        let path = match target {
            Target::Chat(id) => self.path(&format!("chat/thread/{}/tipping", id)),
            Target::Blog(id) => self.path(&format!("blog/{}/tipping", id)),
            Target::Wiki(id) => {
                body["objectId"] = json!(id);
                body["objectType"] = json!(target.object_type());
                self.path("tipping")
            }
            Target::User(_) => {
                return Err(Error::SpecifyType(
                    "coins go to a chat, blog or wiki".to_string(),
                ))
            }
        };

        self.scope.post(path, body).await?;
        tracing::info!(coins, object_id = target.id(), "Coins sent");
        Ok(())
    }

    /// Thank a user for a chat tip
    pub async fn thank_tip(&self, chat_id: &str, user_id: &str) -> Result<()> {
        let path = self.path(&format!(
            "chat/thread/{}/tipping/tipped-users/{}/thank",
            chat_id, user_id
        ));
        self.scope.run(ApiRequest::post(path)).await
    }

    /// Follow one or more users
    pub async fn follow(&self, user_ids: &[&str]) -> Result<()> {
        self.scope.follow(user_ids).await
    }

    /// Stop following a user
    pub async fn unfollow(&self, user_id: &str) -> Result<()> {
        let me = self.me()?;
        let path = self.path(&format!("user-profile/{}/joined/{}", me, user_id));
        self.scope.run(ApiRequest::delete(path)).await
    }

    /// Block a user
    pub async fn block(&self, user_id: &str) -> Result<()> {
        self.scope.block(user_id).await
    }

    /// Unblock a user
    pub async fn unblock(&self, user_id: &str) -> Result<()> {
        self.scope.unblock(user_id).await
    }

    /// Visit a profile
    pub async fn visit(&self, user_id: &str) -> Result<()> {
        self.scope.visit(user_id).await
    }

    /// Report a user, blog or wiki
    pub async fn flag(
        &self,
        reason: &str,
        flag_type: i64,
        target: &Target,
        as_guest: bool,
    ) -> Result<()> {
        self.scope.flag(reason, flag_type, target, as_guest).await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Members by list type
    pub async fn get_all_users(
        &self,
        list: UserListType,
        start: u32,
        size: u32,
    ) -> Result<UserProfileCountList> {
        let request = self
            .page("user-profile", start, size)
            .param("type", list.as_str());
        self.scope.fetch_body(request).await
    }

    /// Members currently online
    pub async fn get_online_users(&self, start: u32, size: u32) -> Result<UserProfileCountList> {
        let request = self.page("live-layer", start, size).param(
            "topic",
            format!("ndtopic:x{}:online-members", self.com_id),
        );
        self.scope.fetch_body(request).await
    }

    /// Community profile of a user
    pub async fn get_user_info(&self, user_id: &str) -> Result<UserProfile> {
        self.scope.user_info(user_id).await
    }

    /// Users a member follows
    pub async fn get_user_following(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        self.scope.user_following(user_id, start, size).await
    }

    /// Users following a member
    pub async fn get_user_followers(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        self.scope.user_followers(user_id, start, size).await
    }

    /// Recent visitors of a member profile
    pub async fn get_user_visitors(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<VisitorsList> {
        self.scope.user_visitors(user_id, start, size).await
    }

    /// Check-in statistics of a member
    pub async fn get_user_checkins(&self, user_id: &str) -> Result<CheckInStats> {
        let request = ApiRequest::get(self.path(&format!("check-in/stats/{}", user_id)))
            .param("timezone", local_timezone());
        self.scope.fetch_body(request).await
    }

    /// Blogs written by a member
    pub async fn get_user_blogs(&self, user_id: &str, start: u32, size: u32) -> Result<Vec<Blog>> {
        let request = self
            .page("blog", start, size)
            .param("type", "user")
            .param("q", user_id);
        self.scope.fetch_list(request, "blogList").await
    }

    /// Wiki items written by a member
    pub async fn get_user_wikis(&self, user_id: &str, start: u32, size: u32) -> Result<Vec<Wiki>> {
        let request = self
            .page("item", start, size)
            .param("type", "user-all")
            .param("cv", "1.2")
            .param("uid", user_id);
        self.scope.fetch_list(request, "itemList").await
    }

    /// Users the account blocked in this community
    pub async fn get_blocked_users(&self, start: u32, size: u32) -> Result<Vec<UserProfile>> {
        self.scope.blocked_users(start, size).await
    }

    /// Search members by nickname
    pub async fn search_users(
        &self,
        nickname: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        let request = self
            .page("user-profile", start, size)
            .param("type", "name")
            .param("q", nickname);
        self.scope.fetch_list(request, "userProfileList").await
    }

    /// Leaderboard ranking
    pub async fn get_leaderboard_info(
        &self,
        board: LeaderboardType,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        let mut request = ApiRequest::get(format!("/g/s-x{}/community/leaderboard", self.com_id))
            .param("rankingType", board.ranking_type());
        if board != LeaderboardType::CheckIn {
            request = request.param("start", start).param("size", size);
        }
        self.scope.fetch_list(request, "userProfileList").await
    }

    /// One wiki item
    pub async fn get_wiki_info(&self, wiki_id: &str) -> Result<Wiki> {
        self.scope
            .fetch(ApiRequest::get(self.path(&format!("item/{}", wiki_id))), "item")
            .await
    }

    /// One blog
    pub async fn get_blog_info(&self, blog_id: &str) -> Result<Blog> {
        self.scope
            .fetch(ApiRequest::get(self.path(&format!("blog/{}", blog_id))), "blog")
            .await
    }

    /// Comments on a blog or wiki
    pub async fn get_blog_comments(
        &self,
        target: &Target,
        sorting: Sorting,
        start: u32,
        size: u32,
    ) -> Result<Vec<Comment>> {
        if !matches!(target, Target::Blog(_) | Target::Wiki(_)) {
            return Err(Error::SpecifyType(
                "blog comments need a blog or wiki target".to_string(),
            ));
        }
        let request = self
            .page(&format!("{}/comment", target.path()), start, size)
            .param("sort", sorting.as_str());
        self.scope.fetch_list(request, "commentList").await
    }

    /// Comments on a member's wall
    pub async fn get_wall_comments(
        &self,
        user_id: &str,
        sorting: Sorting,
        start: u32,
        size: u32,
    ) -> Result<Vec<Comment>> {
        self.scope
            .wall_comments(user_id, sorting.as_str(), start, size)
            .await
    }

    /// Latest blogs of the community feed
    pub async fn get_recent_blogs(&self, start: u32, size: u32) -> Result<Vec<Blog>> {
        let request = self.page("feed/blog-all", start, size).param("pagingType", "t");
        self.scope.fetch_list(request, "blogList").await
    }

    /// A sticker collection with its stickers
    pub async fn get_sticker_collection(&self, collection_id: &str) -> Result<StickerCollection> {
        let request = ApiRequest::get(self.path(&format!("sticker-collection/{}", collection_id)))
            .param("includeStickers", true);
        self.scope.fetch(request, "stickerCollection").await
    }

    // =========================================================================
    // Moderation
    // =========================================================================

    /// Staff actions, optionally for one user or blog
    pub async fn moderation_history(
        &self,
        target: Option<&Target>,
        size: u32,
    ) -> Result<Vec<AdminLogEntry>> {
        let mut request = ApiRequest::get(self.path("admin/operation"));
        if let Some(target) = target {
            request = request
                .param("objectId", target.id())
                .param("objectType", target.object_type());
        }
        let request = request.param("pagingType", "t").param("size", size);
        self.scope.fetch_list(request, "adminLogList").await
    }

    async fn admin(&self, target: &Target, body: Value) -> Result<()> {
        let path = self.path(&format!("{}/admin", target.path()));
        self.scope.post(path, body).await?;
        tracing::info!(object_id = target.id(), "Staff action applied");
        Ok(())
    }

    /// Feature an object; `time` 1-3 is hours for chats and days otherwise
    pub async fn feature(&self, time: u8, target: &Target) -> Result<()> {
        let featured_type = match target {
            Target::User(_) => 4,
            Target::Blog(_) | Target::Wiki(_) => 1,
            Target::Chat(_) => 5,
        };
        let body = json!({
            "adminOpName": 114,
            "adminOpValue": {
                "featuredType": featured_type,
                "featuredDuration": feature_seconds(time, target)?,
            },
        });
        self.admin(target, body).await
    }

    /// Remove an object from the featured list
    pub async fn unfeature(&self, target: &Target) -> Result<()> {
        let body = json!({
            "adminOpName": 114,
            "adminOpValue": { "featuredType": 0 },
        });
        self.admin(target, body).await
    }

    /// Hide an object
    pub async fn hide(&self, target: &Target, reason: Option<&str>) -> Result<()> {
        let body = match target {
            Target::User(_) => json!({
                "adminOpName": 18,
                "adminOpNote": { "content": reason },
            }),
            _ => json!({
                "adminOpName": 110,
                "adminOpValue": 9,
                "adminOpNote": { "content": reason },
            }),
        };
        self.admin(target, body).await
    }

    /// Unhide an object
    pub async fn unhide(&self, target: &Target, reason: Option<&str>) -> Result<()> {
        let body = match target {
            Target::User(_) => json!({
                "adminOpName": 19,
                "adminOpNote": { "content": reason },
            }),
            _ => json!({
                "adminOpName": 110,
                "adminOpValue": 0,
                "adminOpNote": { "content": reason },
            }),
        };
        self.admin(target, body).await
    }

    /// Send a warning notice
    pub async fn warn(&self, user_id: &str, reason: Option<&str>) -> Result<()> {
        let body = json!({
            "uid": user_id,
            "title": "Custom",
            "content": reason,
            "attachedObject": { "objectId": user_id, "objectType": OBJECT_TYPE_USER },
            "penaltyType": 0,
            "adminOpNote": {},
            "noticeType": 7,
        });
        self.scope.post(self.path("notice"), body).await
    }

    /// Strike a member, muting them for the chosen duration (1-5)
    pub async fn strike(
        &self,
        user_id: &str,
        time: u8,
        title: Option<&str>,
        reason: Option<&str>,
    ) -> Result<()> {
        let body = json!({
            "uid": user_id,
            "title": title,
            "content": reason,
            "attachedObject": { "objectId": user_id, "objectType": OBJECT_TYPE_USER },
            "penaltyType": 1,
            "penaltyValue": strike_seconds(time)?,
            "adminOpNote": {},
            "noticeType": 4,
        });
        self.scope.post(self.path("notice"), body).await
    }

    /// Ban a member
    pub async fn ban(&self, user_id: &str, reason: &str, ban_type: Option<i64>) -> Result<()> {
        let body = json!({
            "reasonType": ban_type,
            "note": { "content": reason },
        });
        self.scope
            .post(self.path(&format!("user-profile/{}/ban", user_id)), body)
            .await
    }

    /// Lift a ban
    pub async fn unban(&self, user_id: &str, reason: &str) -> Result<()> {
        self.scope
            .post(
                self.path(&format!("user-profile/{}/unban", user_id)),
                json!({ "note": { "content": reason } }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{logged_in, test_client};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_new_requires_community_and_login() {
        let client = test_client("http://127.0.0.1:1").await;
        assert!(matches!(
            SubClient::new(&client, "42"),
            Err(Error::NotLoggedIn)
        ));

        logged_in(&client, "SID", "u-1");
        assert!(matches!(SubClient::new(&client, " "), Err(Error::NoCommunity)));

        let sub = client.sub_client("42").unwrap();
        assert_eq!(sub.com_id(), "42");
        assert_eq!(sub.path("blog"), "/x42/s/blog");
    }

    #[tokio::test]
    async fn test_send_coins_to_wiki() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/x42/s/tipping"))
            .and(body_partial_json(json!({
                "coins": 5,
                "objectId": "w-1",
                "objectType": 2,
                "tippingContext": {"transactionId": "tx-1"}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri()).await;
        logged_in(&client, "SID", "u-1");
        let sub = client.sub_client("42").unwrap();

        sub.send_coins(5, &Target::Wiki("w-1".into()), Some("tx-1"))
            .await
            .unwrap();
        assert!(matches!(
            sub.send_coins(5, &Target::User("u-2".into()), None).await,
            Err(Error::SpecifyType(_))
        ));
    }

    #[tokio::test]
    async fn test_feature_chat_for_hours() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/x42/s/chat/thread/c-1/admin"))
            .and(body_partial_json(json!({
                "adminOpName": 114,
                "adminOpValue": {"featuredType": 5, "featuredDuration": 7200}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri()).await;
        logged_in(&client, "SID", "u-1");
        let sub = client.sub_client("42").unwrap();

        sub.feature(2, &Target::Chat("c-1".into())).await.unwrap();
    }

    #[tokio::test]
    async fn test_kick_query() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/x42/s/chat/thread/c-1/member/u-2"))
            .and(query_param("allowRejoin", "0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri()).await;
        logged_in(&client, "SID", "u-1");
        let sub = client.sub_client("42").unwrap();

        sub.kick("u-2", "c-1", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_lottery_maps_log() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/x42/s/check-in/lottery"))
            .and(body_partial_json(json!({"timezone": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lotteryLog": {"awardType": 1, "awardValue": 10.0}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri()).await;
        logged_in(&client, "SID", "u-1");
        let sub = client.sub_client("42").unwrap();

        let log = sub.lottery(Some(3)).await.unwrap();
        assert_eq!(log.award_value, Some(10.0));
    }

    #[tokio::test]
    async fn test_leaderboard_check_in_has_no_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/g/s-x42/community/leaderboard"))
            .and(query_param("rankingType", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userProfileList": [{"uid": "u-9"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri()).await;
        logged_in(&client, "SID", "u-1");
        let sub = client.sub_client("42").unwrap();

        let users = sub
            .get_leaderboard_info(LeaderboardType::CheckIn, 0, 25)
            .await
            .unwrap();
        assert_eq!(users[0].uid, "u-9");
    }
}
