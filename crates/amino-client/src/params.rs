//! Request parameters
//!
//! Typed arguments shared by [`Client`](crate::Client) and
//! [`SubClient`](crate::SubClient), and the JSON bodies built from them.

use crate::{Error, Result};
use serde_json::{json, Map, Value};
use std::str::FromStr;

/// Service object type of a user profile
pub const OBJECT_TYPE_USER: i64 = 0;
/// Service object type of a blog
pub const OBJECT_TYPE_BLOG: i64 = 1;
/// Service object type of a wiki item
pub const OBJECT_TYPE_WIKI: i64 = 2;
/// Service object type of a chat thread
pub const OBJECT_TYPE_CHAT: i64 = 12;
/// Service object type of a community
pub const OBJECT_TYPE_COMMUNITY: i64 = 16;

/// Insert the millisecond `timestamp` every request body carries
pub(crate) fn stamped(mut body: Value, timestamp: i64) -> Value {
    if let Value::Object(map) = &mut body {
        map.insert("timestamp".to_string(), json!(timestamp));
    }
    body
}

/// Merge `value` into `map[key]`, creating the object when absent
fn merge_object(map: &mut Map<String, Value>, key: &str, value: Map<String, Value>) {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(existing) = entry {
        existing.extend(value);
    }
}

// =============================================================================
// Targets
// =============================================================================

/// The object an action applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A user profile (or its wall)
    User(String),
    /// A blog post
    Blog(String),
    /// A wiki item
    Wiki(String),
    /// A chat thread
    Chat(String),
}

impl Target {
    /// Object id
    pub fn id(&self) -> &str {
        match self {
            Target::User(id) | Target::Blog(id) | Target::Wiki(id) | Target::Chat(id) => id,
        }
    }

    /// Service object type code
    pub fn object_type(&self) -> i64 {
        match self {
            Target::User(_) => OBJECT_TYPE_USER,
            Target::Blog(_) => OBJECT_TYPE_BLOG,
            Target::Wiki(_) => OBJECT_TYPE_WIKI,
            Target::Chat(_) => OBJECT_TYPE_CHAT,
        }
    }

    /// Path segment of the object, relative to a scope prefix
    pub(crate) fn path(&self) -> String {
        match self {
            Target::User(id) => format!("user-profile/{}", id),
            Target::Blog(id) => format!("blog/{}", id),
            Target::Wiki(id) => format!("item/{}", id),
            Target::Chat(id) => format!("chat/thread/{}", id),
        }
    }

    /// `eventSource` reported for comments and votes on this object
    pub(crate) fn event_source(&self) -> &'static str {
        match self {
            Target::User(_) => "UserProfileView",
            _ => "PostDetailView",
        }
    }

    /// Fail unless the target can carry comments
    pub(crate) fn commentable(&self) -> Result<&Self> {
        match self {
            Target::Chat(_) => Err(Error::SpecifyType(
                "comments need a user, blog or wiki target".to_string(),
            )),
            _ => Ok(self),
        }
    }

    /// Flag body for this target
    pub(crate) fn flag_body(&self, reason: &str, flag_type: i64) -> Value {
        json!({
            "flagType": flag_type,
            "message": reason,
            "objectId": self.id(),
            "objectType": self.object_type(),
        })
    }
}

/// Comment ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sorting {
    /// Newest first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Most voted first
    Top,
}

impl Sorting {
    /// Query value
    pub fn as_str(&self) -> &'static str {
        match self {
            Sorting::Newest => "newest",
            Sorting::Oldest => "oldest",
            Sorting::Top => "vote",
        }
    }
}

impl FromStr for Sorting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(Sorting::Newest),
            "oldest" => Ok(Sorting::Oldest),
            "top" | "vote" => Ok(Sorting::Top),
            other => Err(Error::SpecifyType(format!("unknown sorting `{}`", other))),
        }
    }
}

/// Account gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Non-binary
    NonBinary,
}

impl Gender {
    /// Service code
    pub fn code(&self) -> i64 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::NonBinary => 255,
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "non-binary" => Ok(Gender::NonBinary),
            other => Err(Error::SpecifyType(format!("unknown gender `{}`", other))),
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Kind of media attached to a chat message or uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// JPEG or PNG image
    Image,
    /// Animated GIF
    Gif,
    /// AAC voice note
    Audio,
}

impl FileKind {
    /// Guess the kind from a file extension
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" => Ok(FileKind::Image),
            "gif" => Ok(FileKind::Gif),
            "aac" => Ok(FileKind::Audio),
            other => Err(Error::UnsupportedFileType(other.to_string())),
        }
    }

    /// Content type used for uploads
    pub fn content_type(&self) -> &'static str {
        match self {
            FileKind::Image => "image/jpg",
            FileKind::Gif => "image/gif",
            FileKind::Audio => "audio/aac",
        }
    }
}

/// A file sent inline with a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Media kind
    pub kind: FileKind,
    /// Raw file bytes
    pub data: Vec<u8>,
}

/// A link card attached to a chat message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    /// Linked object id
    pub object_id: Option<String>,
    /// Linked object type
    pub object_type: Option<i64>,
    /// Link url
    pub link: Option<String>,
    /// Card title
    pub title: Option<String>,
    /// Card text
    pub content: Option<String>,
    /// Card image, an already uploaded media url
    pub image: Option<String>,
}

impl Embed {
    fn to_value(&self) -> Value {
        json!({
            "objectId": self.object_id,
            "objectType": self.object_type,
            "link": self.link,
            "title": self.title,
            "content": self.content,
            "mediaList": self.image.as_ref().map(|url| json!([[100, url, null]])),
        })
    }
}

/// A chat message to send
///
/// # Example
///
/// ```rust
/// use amino_client::params::OutgoingMessage;
///
/// let message = OutgoingMessage::text("hello")
///     .reply_to("message-id")
///     .mention("user-id");
/// assert_eq!(message.content.as_deref(), Some("hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Text content
    pub content: Option<String>,
    /// Message type, 0 for plain text
    pub message_type: i64,
    /// Message being replied to
    pub reply_to: Option<String>,
    /// Mentioned users
    pub mention_user_ids: Vec<String>,
    /// Sticker to send instead of text
    pub sticker_id: Option<String>,
    /// Inline file
    pub attachment: Option<Attachment>,
    /// Link card
    pub embed: Option<Embed>,
    /// Client reference id; derived from the clock when unset
    pub client_ref_id: Option<i64>,
}

impl OutgoingMessage {
    /// A plain text message
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// A sticker message
    pub fn sticker(sticker_id: impl Into<String>) -> Self {
        Self {
            sticker_id: Some(sticker_id.into()),
            ..Default::default()
        }
    }

    /// A media message
    pub fn file(kind: FileKind, data: Vec<u8>) -> Self {
        Self {
            attachment: Some(Attachment { kind, data }),
            ..Default::default()
        }
    }

    /// Set the message type
    pub fn with_type(mut self, message_type: i64) -> Self {
        self.message_type = message_type;
        self
    }

    /// Reply to a message
    pub fn reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reply_to = Some(message_id.into());
        self
    }

    /// Mention a user
    pub fn mention(mut self, user_id: impl Into<String>) -> Self {
        self.mention_user_ids.push(user_id.into());
        self
    }

    /// Attach a link card
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    /// Set the client reference id
    pub fn with_client_ref_id(mut self, id: i64) -> Self {
        self.client_ref_id = Some(id);
        self
    }

    /// Build the request body
    pub fn to_body(&self, timestamp: i64) -> Value {
        use base64::prelude::*;

        let mentions: Vec<Value> = self
            .mention_user_ids
            .iter()
            .map(|uid| json!({ "uid": uid }))
            .collect();

        let mut body = json!({
            "type": self.message_type,
            "content": self.content,
            "clientRefId": self
                .client_ref_id
                .unwrap_or((timestamp / 10_000) % 1_000_000_000),
            "attachedObject": self.embed.clone().unwrap_or_default().to_value(),
            "extensions": { "mentionedArray": mentions },
        });

        if let Value::Object(map) = &mut body {
            if let Some(reply_to) = &self.reply_to {
                map.insert("replyMessageId".to_string(), json!(reply_to));
            }

            if let Some(sticker_id) = &self.sticker_id {
                map.insert("content".to_string(), Value::Null);
                map.insert("stickerId".to_string(), json!(sticker_id));
                map.insert("type".to_string(), json!(3));
            }

            if let Some(attachment) = &self.attachment {
                map.insert("content".to_string(), Value::Null);
                match attachment.kind {
                    FileKind::Audio => {
                        map.insert("type".to_string(), json!(2));
                        map.insert("mediaType".to_string(), json!(110));
                    }
                    FileKind::Image | FileKind::Gif => {
                        map.insert("mediaType".to_string(), json!(100));
                        map.insert(
                            "mediaUploadValueContentType".to_string(),
                            json!(attachment.kind.content_type()),
                        );
                        map.insert("mediaUhqEnabled".to_string(), json!(true));
                    }
                }
                map.insert(
                    "mediaUploadValue".to_string(),
                    json!(BASE64_STANDARD.encode(&attachment.data)),
                );
            }
        }

        stamped(body, timestamp)
    }
}

// =============================================================================
// Chat settings
// =============================================================================

/// Changes to apply to a chat thread
///
/// Only fields that are set are sent. Toggles such as `view_only` each map to
/// their own enable/disable request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSettings {
    /// Mute notifications for the caller
    pub do_not_disturb: Option<bool>,
    /// Pin the chat for the caller
    pub pin_chat: Option<bool>,
    /// Chat title
    pub title: Option<String>,
    /// Chat icon url
    pub icon: Option<String>,
    /// Background image url for the caller
    pub background_image: Option<String>,
    /// Chat description
    pub content: Option<String>,
    /// Announcement text
    pub announcement: Option<String>,
    /// Users to make co-hosts
    pub co_hosts: Vec<String>,
    /// Keywords
    pub keywords: Vec<String>,
    /// Pin the announcement
    pub pin_announcement: Option<bool>,
    /// List the chat publicly
    pub publish_to_global: Option<bool>,
    /// Allow tipping
    pub can_tip: Option<bool>,
    /// Only hosts may write
    pub view_only: Option<bool>,
    /// Members may invite others
    pub can_invite: Option<bool>,
    /// Restrict to fans
    pub fans_only: Option<bool>,
}

impl ChatSettings {
    /// Empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the announcement
    pub fn with_announcement(mut self, announcement: impl Into<String>) -> Self {
        self.announcement = Some(announcement.into());
        self
    }

    /// Set do-not-disturb
    pub fn with_do_not_disturb(mut self, enabled: bool) -> Self {
        self.do_not_disturb = Some(enabled);
        self
    }

    /// Pin or unpin the chat
    pub fn with_pin_chat(mut self, pinned: bool) -> Self {
        self.pin_chat = Some(pinned);
        self
    }

    /// Set view-only mode
    pub fn with_view_only(mut self, enabled: bool) -> Self {
        self.view_only = Some(enabled);
        self
    }

    /// Allow or forbid member invites
    pub fn with_can_invite(mut self, enabled: bool) -> Self {
        self.can_invite = Some(enabled);
        self
    }

    /// Allow or forbid tipping
    pub fn with_can_tip(mut self, enabled: bool) -> Self {
        self.can_tip = Some(enabled);
        self
    }

    /// Add co-hosts
    pub fn with_co_hosts(mut self, user_ids: Vec<String>) -> Self {
        self.co_hosts = user_ids;
        self
    }

    /// Body of the thread update request
    pub fn thread_body(&self, timestamp: i64) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), json!(1));

        if let Some(title) = &self.title {
            map.insert("title".to_string(), json!(title));
        }
        if let Some(content) = &self.content {
            map.insert("content".to_string(), json!(content));
        }
        if let Some(icon) = &self.icon {
            map.insert("icon".to_string(), json!(icon));
        }
        if !self.keywords.is_empty() {
            map.insert("keywords".to_string(), json!(self.keywords));
        }

        let mut extensions = Map::new();
        if let Some(announcement) = &self.announcement {
            extensions.insert("announcement".to_string(), json!(announcement));
        }
        if let Some(pin) = self.pin_announcement {
            extensions.insert("pinAnnouncement".to_string(), json!(pin));
        }
        if let Some(fans_only) = self.fans_only {
            extensions.insert("fansOnly".to_string(), json!(fans_only));
        }
        if !extensions.is_empty() {
            merge_object(&mut map, "extensions", extensions);
        }

        if let Some(publish) = self.publish_to_global {
            map.insert(
                "publishToGlobal".to_string(),
                json!(if publish { 0 } else { 1 }),
            );
        }

        stamped(Value::Object(map), timestamp)
    }
}

// =============================================================================
// Profile edits
// =============================================================================

/// Changes to a user profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEdit {
    /// Display name
    pub nickname: Option<String>,
    /// Bio
    pub content: Option<String>,
    /// Avatar url
    pub icon: Option<String>,
    /// Background colour, e.g. `#ffffff`
    pub background_color: Option<String>,
    /// Background image url
    pub background_image: Option<String>,
    /// Who may send chat invites (community profiles only)
    pub chat_request_privilege: Option<String>,
    /// Profile gallery (community profiles only)
    pub media_list: Option<Value>,
}

impl ProfileEdit {
    /// Empty edit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nickname
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Set the bio
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the avatar
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the background colour
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set the background image
    pub fn with_background_image(mut self, url: impl Into<String>) -> Self {
        self.background_image = Some(url.into());
        self
    }

    fn apply(&self, map: &mut Map<String, Value>, community: bool) {
        if let Some(nickname) = &self.nickname {
            map.insert("nickname".to_string(), json!(nickname));
        }
        if let Some(icon) = &self.icon {
            map.insert("icon".to_string(), json!(icon));
        }
        if let Some(content) = &self.content {
            map.insert("content".to_string(), json!(content));
        }

        let mut style = Map::new();
        if let Some(color) = &self.background_color {
            style.insert("backgroundColor".to_string(), json!(color));
        }
        if let Some(url) = &self.background_image {
            style.insert(
                "backgroundMediaList".to_string(),
                json!([[100, url, null, null, null]]),
            );
        }

        let mut extensions = Map::new();
        if !style.is_empty() {
            extensions.insert("style".to_string(), Value::Object(style));
        }

        if community {
            if let Some(media) = &self.media_list {
                map.insert("mediaList".to_string(), media.clone());
            }
            if let Some(privilege) = &self.chat_request_privilege {
                extensions.insert("privilegeOfChatInviteRequest".to_string(), json!(privilege));
            }
        }

        if !extensions.is_empty() {
            merge_object(map, "extensions", extensions);
        }
    }

    /// Body for the global profile
    pub fn global_body(&self, timestamp: i64) -> Value {
        let mut map = Map::new();
        map.insert("address".to_string(), Value::Null);
        map.insert("latitude".to_string(), json!(0));
        map.insert("longitude".to_string(), json!(0));
        map.insert("mediaList".to_string(), Value::Null);
        map.insert("eventSource".to_string(), json!("UserProfileView"));
        self.apply(&mut map, false);
        stamped(Value::Object(map), timestamp)
    }

    /// Body for a community profile
    pub fn community_body(&self, timestamp: i64) -> Value {
        let mut map = Map::new();
        self.apply(&mut map, true);
        stamped(Value::Object(map), timestamp)
    }
}

// =============================================================================
// Posts
// =============================================================================

/// A blog or wiki to publish or edit
///
/// Images are already uploaded media urls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Blog title or wiki label
    pub title: String,
    /// Body text
    pub content: String,
    /// Blog category ids
    pub categories: Vec<String>,
    /// Background colour
    pub background_color: Option<String>,
    /// Inline images
    pub images: Vec<String>,
    /// Restrict to fans
    pub fans_only: bool,
    /// Wiki icon url
    pub icon: Option<String>,
    /// Wiki keywords
    pub keywords: Option<String>,
}

impl PostDraft {
    /// A draft with title and body
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Set the background colour
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Add an image
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Tag a blog category
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.categories.push(category_id.into());
        self
    }

    /// Restrict to fans
    pub fn fans_only(mut self) -> Self {
        self.fans_only = true;
        self
    }

    fn media_list(&self) -> Value {
        if self.images.is_empty() {
            Value::Null
        } else {
            Value::Array(
                self.images
                    .iter()
                    .map(|url| json!([100, url, null]))
                    .collect(),
            )
        }
    }

    fn extensions(&self) -> Map<String, Value> {
        let mut extensions = Map::new();
        if self.fans_only {
            extensions.insert("fansOnly".to_string(), json!(true));
        }
        if let Some(color) = &self.background_color {
            extensions.insert("style".to_string(), json!({ "backgroundColor": color }));
        }
        extensions
    }

    /// Body for a new blog
    pub fn blog_body(&self, timestamp: i64) -> Value {
        let mut body = json!({
            "address": null,
            "content": self.content,
            "mediaList": self.media_list(),
            "title": self.title,
            "extensions": self.extensions(),
            "latitude": 0,
            "longitude": 0,
            "eventSource": "GlobalComposeMenu",
        });
        if !self.categories.is_empty() {
            body["taggedBlogCategoryIdList"] = json!(self.categories);
        }
        stamped(body, timestamp)
    }

    /// Body for an edit of an existing blog; empty title or content are kept
    pub fn blog_edit_body(&self, timestamp: i64) -> Value {
        let mut body = json!({
            "address": null,
            "mediaList": self.media_list(),
            "latitude": 0,
            "longitude": 0,
            "eventSource": "PostDetailView",
        });
        if !self.title.is_empty() {
            body["title"] = json!(self.title);
        }
        if !self.content.is_empty() {
            body["content"] = json!(self.content);
        }
        let extensions = self.extensions();
        if !extensions.is_empty() {
            body["extensions"] = Value::Object(extensions);
        }
        if !self.categories.is_empty() {
            body["taggedBlogCategoryIdList"] = json!(self.categories);
        }
        stamped(body, timestamp)
    }

    /// Body for a new wiki item
    pub fn wiki_body(&self, timestamp: i64) -> Value {
        let mut body = json!({
            "label": self.title,
            "content": self.content,
            "eventSource": "GlobalComposeMenu",
        });
        if let Some(icon) = &self.icon {
            body["icon"] = json!(icon);
        }
        if let Some(keywords) = &self.keywords {
            body["keywords"] = json!(keywords);
        }
        if !self.images.is_empty() {
            body["mediaList"] = self.media_list();
        }
        let extensions = self.extensions();
        if !extensions.is_empty() {
            body["extensions"] = Value::Object(extensions);
        }
        stamped(body, timestamp)
    }
}

// =============================================================================
// Community parameters
// =============================================================================

/// Member list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserListType {
    /// Recently active
    Recent,
    /// Banned members
    Banned,
    /// Featured members
    Featured,
    /// Leaders
    Leaders,
    /// Curators
    Curators,
}

impl UserListType {
    /// Query value
    pub fn as_str(&self) -> &'static str {
        match self {
            UserListType::Recent => "recent",
            UserListType::Banned => "banned",
            UserListType::Featured => "featured",
            UserListType::Leaders => "leaders",
            UserListType::Curators => "curators",
        }
    }
}

impl FromStr for UserListType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "recent" => Ok(UserListType::Recent),
            "banned" => Ok(UserListType::Banned),
            "featured" => Ok(UserListType::Featured),
            "leaders" => Ok(UserListType::Leaders),
            "curators" => Ok(UserListType::Curators),
            other => Err(Error::SpecifyType(format!("unknown user list `{}`", other))),
        }
    }
}

/// Community leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardType {
    /// Most active in the last 24 hours
    Daily,
    /// Most active in the last 7 days
    Weekly,
    /// Reputation
    Reputation,
    /// Check-in streaks
    CheckIn,
    /// Quiz scores
    Quiz,
}

impl LeaderboardType {
    /// `rankingType` query value
    pub fn ranking_type(&self) -> i64 {
        match self {
            LeaderboardType::Daily => 1,
            LeaderboardType::Weekly => 2,
            LeaderboardType::Reputation => 3,
            LeaderboardType::CheckIn => 4,
            LeaderboardType::Quiz => 5,
        }
    }
}

/// How to repair a broken check-in streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepairMethod {
    /// Pay with coins
    #[default]
    Coins,
    /// Use the membership perk
    Membership,
}

impl RepairMethod {
    /// `repairMethod` body value
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairMethod::Coins => "1",
            RepairMethod::Membership => "2",
        }
    }
}

/// Feature duration in seconds for the 1-3 duration choice
///
/// Chats are featured for hours, everything else for days.
pub fn feature_seconds(choice: u8, target: &Target) -> Result<i64> {
    let unit = match target {
        Target::Chat(_) => 3_600,
        _ => 86_400,
    };
    match choice {
        1..=3 => Ok(unit * i64::from(choice)),
        other => Err(Error::SpecifyType(format!(
            "feature duration {} is not 1, 2 or 3",
            other
        ))),
    }
}

/// Strike duration in seconds for the 1-5 duration choice
pub fn strike_seconds(choice: u8) -> Result<i64> {
    match choice {
        1 => Ok(86_400),
        2 => Ok(10_800),
        3 => Ok(21_600),
        4 => Ok(43_200),
        5 => Ok(86_400),
        other => Err(Error::SpecifyType(format!(
            "strike duration {} is not between 1 and 5",
            other
        ))),
    }
}
