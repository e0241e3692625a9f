//! Global API client
//!
//! [`Client`] wraps the `/g/s` endpoints: authentication, account settings,
//! global chats and profiles, wallet and link resolution. It owns the
//! session context shared with every [`SubClient`] created from it and the
//! event socket that is started on login.

use crate::device::{DeviceIdentity, DeviceStore, DEFAULT_DEVICE_FILE};
use crate::headers::{HeaderBuilder, RequestSigner};
use crate::http::{timestamp_ms, ApiHttpClient, ApiRequest, HttpClientConfig};
use crate::objects::{
    Blog, CoinHistoryEntry, Comment, Community, LinkInfo, Membership, Message, Thread,
    UserProfile, VisitorsList, WalletInfo,
};
use crate::params::{
    ChatSettings, FileKind, Gender, OutgoingMessage, ProfileEdit, Sorting, Target,
    OBJECT_TYPE_COMMUNITY,
};
use crate::scope::Scope;
use crate::session::{Session, SessionContext};
use crate::socket::{Callbacks, Connector, SocketConfig, SocketHandler, TungsteniteConnector};
use crate::sub_client::SubClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// `clientType` sent by the Android app
const CLIENT_TYPE: i64 = 100;
/// Bundle id reported on device checks
const BUNDLE_ID: &str = "com.narvii.amino.master";

/// UTC offset in the unit the check-in and device endpoints expect
pub fn local_timezone() -> i64 {
    let seconds = chrono::Local::now().offset().local_minus_utc();
    i64::from(seconds).div_euclid(1000)
}

// =============================================================================
// Configuration
// =============================================================================

/// Where the device identity comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSource {
    /// Load from (or create) a JSON file
    File(PathBuf),
    /// Use this identity without touching the filesystem
    Fixed(DeviceIdentity),
}

impl Default for DeviceSource {
    fn default() -> Self {
        DeviceSource::File(PathBuf::from(DEFAULT_DEVICE_FILE))
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST settings
    pub http: HttpClientConfig,
    /// Event socket settings
    pub socket: SocketConfig,
    /// Device identity source
    pub device: DeviceSource,
    /// Signs request bodies (`NDC-MSG-SIG`); unsigned when `None`
    pub signer: Option<Arc<dyn RequestSigner>>,
    /// Socket connector override
    pub connector: Option<Arc<dyn Connector>>,
    /// Start the event socket after a successful login
    pub connect_socket_on_login: bool,
    /// Register the device with the service when the client is created
    pub check_device_on_start: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            socket: SocketConfig::default(),
            device: DeviceSource::default(),
            signer: None,
            connector: None,
            connect_socket_on_login: true,
            check_device_on_start: false,
        }
    }
}

impl ClientConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the REST settings
    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the socket settings
    pub fn with_socket(mut self, socket: SocketConfig) -> Self {
        self.socket = socket;
        self
    }

    /// Set the device source
    pub fn with_device(mut self, device: DeviceSource) -> Self {
        self.device = device;
        self
    }

    /// Set the request signer
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set the socket connector
    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Start (or not) the socket on login
    pub fn with_socket_on_login(mut self, enabled: bool) -> Self {
        self.connect_socket_on_login = enabled;
        self
    }

    /// Check (or not) the device on creation
    pub fn with_device_check(mut self, enabled: bool) -> Self {
        self.check_device_on_start = enabled;
        self
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    email: String,
    v: i64,
    secret: String,
    #[serde(rename = "deviceID")]
    device_id: String,
    client_type: i64,
    action: &'static str,
    timestamp: i64,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    sid: String,
    #[serde(default)]
    account: Value,
    #[serde(default)]
    user_profile: UserProfile,
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    secret: String,
    #[serde(rename = "deviceID")]
    device_id: String,
    email: String,
    client_type: i64,
    nickname: String,
    latitude: i64,
    longitude: i64,
    address: Option<String>,
    #[serde(rename = "clientCallbackURL")]
    client_callback_url: &'static str,
    validation_context: Value,
    #[serde(rename = "type")]
    kind: i64,
    identity: String,
    timestamp: i64,
}

/// Account restore request
#[derive(Debug, Clone, Serialize)]
struct RestoreRequest {
    secret: String,
    #[serde(rename = "deviceID")]
    device_id: String,
    email: String,
    timestamp: i64,
}

/// Logout request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutRequest {
    #[serde(rename = "deviceID")]
    device_id: String,
    client_type: i64,
    timestamp: i64,
}

/// Device check request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceCheckRequest {
    #[serde(rename = "deviceID")]
    device_id: String,
    #[serde(rename = "bundleID")]
    bundle_id: &'static str,
    client_type: i64,
    timezone: i64,
    system_push_enabled: bool,
    locale: String,
    timestamp: i64,
}

fn email_validation(email: &str, code: &str) -> Value {
    json!({ "type": 1, "identity": email, "data": { "code": code } })
}

// =============================================================================
// Client
// =============================================================================

/// Client for the global API
///
/// Cloning is cheap; clones share the session, the socket and the callback
/// registry.
///
/// # Example
///
/// ```rust,no_run
/// # use amino_client::{Client, ClientConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new(ClientConfig::default()).await?;
/// client.login("ferris@example.com", "password").await?;
/// let me = client.get_user_info(&client.user_id()?).await?;
/// println!("{:?}", me.nickname);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    scope: Scope,
    socket: SocketHandler,
    callbacks: Arc<Callbacks>,
    connect_socket_on_login: bool,
}

impl Client {
    /// Create a client, loading the device identity
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let device = match config.device {
            DeviceSource::File(path) => DeviceStore::new(path).load_or_create().await?,
            DeviceSource::Fixed(identity) => identity,
        };

        let mut headers = HeaderBuilder::new(device.user_agent.clone());
        if let Some(signer) = config.signer {
            headers = headers.with_signer(signer);
        }

        let context = SessionContext::new(device);
        let http = ApiHttpClient::new(config.http, headers)?;
        let callbacks = Arc::new(Callbacks::new());
        let connector = config
            .connector
            .unwrap_or_else(|| Arc::new(TungsteniteConnector) as Arc<dyn Connector>);
        let socket = SocketHandler::new(
            config.socket,
            context.clone(),
            Arc::clone(&callbacks),
            connector,
        );

        let client = Self {
            scope: Scope::global(http, context),
            socket,
            callbacks,
            connect_socket_on_login: config.connect_socket_on_login,
        };

        if config.check_device_on_start {
            let device_id = client.device().device_id.clone();
            client.check_device(&device_id).await?;
        }

        Ok(client)
    }

    pub(crate) fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Shared session context
    pub fn context(&self) -> &SessionContext {
        self.scope.context()
    }

    /// Device identity in use
    pub fn device(&self) -> &DeviceIdentity {
        self.context().device()
    }

    /// Current session, if logged in
    pub fn session(&self) -> Option<Arc<Session>> {
        self.context().current()
    }

    /// Whether a session is present
    pub fn is_authenticated(&self) -> bool {
        self.context().is_authenticated()
    }

    /// User id of the logged-in account
    pub fn user_id(&self) -> Result<String> {
        self.context().user_id()
    }

    /// Event socket
    pub fn socket(&self) -> &SocketHandler {
        &self.socket
    }

    /// Callback registry fed by the socket
    pub fn callbacks(&self) -> &Arc<Callbacks> {
        &self.callbacks
    }

    /// Client for one community
    pub fn sub_client(&self, com_id: impl Into<String>) -> Result<SubClient> {
        SubClient::new(self, com_id)
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Log in with email and password
    ///
    /// On success the session is stored for every later request and, unless
    /// disabled in [`ClientConfig`], the event socket is started. A socket
    /// still connected with a different session is reconnected.
    ///
    /// # Arguments
    ///
    /// * `email` - Account email
    /// * `password` - Account password
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            v: 2,
            secret: format!("0 {}", password),
            device_id: self.device().device_id.clone(),
            client_type: CLIENT_TYPE,
            action: "normal",
            timestamp: timestamp_ms(),
        };

        let api_request = ApiRequest::post(self.scope.path("auth/login")).json_body(&request)?;
        let response: LoginResponse = self.scope.fetch_body(api_request).await?;

        let user_id = response
            .account
            .get("uid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| response.user_profile.uid.clone());

        let session = Session {
            sid: response.sid,
            user_id,
            account: response.account,
            profile: response.user_profile,
        };
        let previous_sid = self.context().snapshot().sid;
        self.context().set(session.clone());
        tracing::info!(user_id = %session.user_id, "Logged in");

        if self.connect_socket_on_login {
            // A live socket still authenticates as the previous session
            if self.socket.is_running() && previous_sid.as_deref() != Some(session.sid.as_str()) {
                tracing::info!("Session changed, reconnecting socket");
                self.socket.shutdown().await;
            }
            self.socket.start()?;
        }

        Ok(session)
    }

    /// Log out, dropping the session and closing the socket
    pub async fn logout(&self) -> Result<()> {
        let request = LogoutRequest {
            device_id: self.device().device_id.clone(),
            client_type: CLIENT_TYPE,
            timestamp: timestamp_ms(),
        };
        let api_request = ApiRequest::post(self.scope.path("auth/logout")).json_body(&request)?;
        self.scope.run(api_request).await?;

        self.context().clear();
        self.socket.close();
        tracing::info!("Logged out");
        Ok(())
    }

    /// Register a new account
    ///
    /// `verification_code` is the code mailed by
    /// [`request_verify_code`](Self::request_verify_code).
    pub async fn register(
        &self,
        nickname: &str,
        email: &str,
        password: &str,
        verification_code: &str,
    ) -> Result<()> {
        let request = RegisterRequest {
            secret: format!("0 {}", password),
            device_id: self.device().device_id.clone(),
            email: email.to_string(),
            client_type: CLIENT_TYPE,
            nickname: nickname.to_string(),
            latitude: 0,
            longitude: 0,
            address: None,
            client_callback_url: "narviiapp://relogin",
            validation_context: email_validation(email, verification_code),
            kind: 1,
            identity: email.to_string(),
            timestamp: timestamp_ms(),
        };
        let api_request = ApiRequest::post(self.scope.path("auth/register")).json_body(&request)?;
        self.scope.run(api_request).await
    }

    /// Cancel a pending account deletion
    pub async fn restore(&self, email: &str, password: &str) -> Result<()> {
        let request = RestoreRequest {
            secret: format!("0 {}", password),
            device_id: self.device().device_id.clone(),
            email: email.to_string(),
            timestamp: timestamp_ms(),
        };
        let api_request = ApiRequest::post(self.scope.path("account/delete-request/cancel"))
            .json_body(&request)?;
        self.scope.run(api_request).await
    }

    /// Set age and gender of a new account
    pub async fn configure(&self, age: u32, gender: Gender) -> Result<()> {
        if age <= 12 {
            return Err(Error::AgeTooLow(age));
        }
        self.scope
            .post(
                self.scope.path("persona/profile/basic"),
                json!({ "age": age, "gender": gender.code() }),
            )
            .await
    }

    /// Submit an email verification code
    pub async fn verify(&self, email: &str, code: &str) -> Result<()> {
        let body = json!({
            "validationContext": email_validation(email, code),
            "deviceID": self.device().device_id,
        });
        self.scope
            .post(self.scope.path("auth/check-security-validation"), body)
            .await
    }

    /// Ask the service to mail a verification code
    pub async fn request_verify_code(&self, email: &str, reset_password: bool) -> Result<()> {
        let mut body = json!({
            "identity": email,
            "type": 1,
            "deviceID": self.device().device_id,
        });
        if reset_password {
            body["level"] = json!(2);
            body["purpose"] = json!("reset-password");
        }
        self.scope
            .post(self.scope.path("auth/request-security-validation"), body)
            .await
    }

    /// Activate an account email
    pub async fn activate_account(&self, email: &str, code: &str) -> Result<()> {
        let mut body = email_validation(email, code);
        body["deviceID"] = json!(self.device().device_id);
        self.scope
            .post(self.scope.path("auth/activate-email"), body)
            .await
    }

    /// Register a device id with the service
    pub async fn check_device(&self, device_id: &str) -> Result<()> {
        let request = DeviceCheckRequest {
            device_id: device_id.to_string(),
            bundle_id: BUNDLE_ID,
            client_type: CLIENT_TYPE,
            timezone: local_timezone(),
            system_push_enabled: true,
            locale: self.scope.http().config().language.replace('-', "_"),
            timestamp: timestamp_ms(),
        };
        let api_request = ApiRequest::post(self.scope.path("device")).json_body(&request)?;
        self.scope.run(api_request).await?;
        tracing::debug!(device_id, "Device checked");
        Ok(())
    }

    /// Upload media, returning its url
    pub async fn upload_media(&self, data: Vec<u8>, kind: FileKind) -> Result<String> {
        let request =
            ApiRequest::post(self.scope.path("media/upload")).raw_body(data, kind.content_type());
        self.scope.fetch(request, "mediaValue").await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Communities the account has joined
    pub async fn sub_clients(&self, start: u32, size: u32) -> Result<Vec<Community>> {
        if !self.is_authenticated() {
            return Err(Error::NotLoggedIn);
        }
        let request = ApiRequest::get(self.scope.path("community/joined"))
            .param("v", 1)
            .param("start", start)
            .param("size", size);
        self.scope.fetch_list(request, "communityList").await
    }

    /// Global profile of a user
    pub async fn get_user_info(&self, user_id: &str) -> Result<UserProfile> {
        self.scope.user_info(user_id).await
    }

    /// Chats the account is in
    pub async fn get_chat_threads(&self, start: u32, size: u32) -> Result<Vec<Thread>> {
        self.scope.chat_threads(start, size).await
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

    /// Public information about a community
    pub async fn get_community_info(&self, com_id: &str) -> Result<Community> {
        let request = ApiRequest::get(format!("/g/s-x{}/community/info", com_id))
            .param("withInfluencerList", 1)
            .param("withTopicList", true)
            .param("influencerListOrderStrategy", "fansCount");
        self.scope.fetch(request, "community").await
    }

    /// Users a user follows
    pub async fn get_user_following(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        self.scope.user_following(user_id, start, size).await
    }

    /// Users following a user
    pub async fn get_user_followers(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<UserProfile>> {
        self.scope.user_followers(user_id, start, size).await
    }

    /// Recent visitors of a profile
    pub async fn get_user_visitors(
        &self,
        user_id: &str,
        start: u32,
        size: u32,
    ) -> Result<VisitorsList> {
        self.scope.user_visitors(user_id, start, size).await
    }

    /// Users the account blocked
    pub async fn get_blocked_users(&self, start: u32, size: u32) -> Result<Vec<UserProfile>> {
        self.scope.blocked_users(start, size).await
    }

    /// Ids of users blocking the account
    pub async fn get_blocker_users(&self, start: u32, size: u32) -> Result<Vec<String>> {
        let request = ApiRequest::get(self.scope.path("block/full-list"))
            .param("start", start)
            .param("size", size);
        self.scope.fetch_list(request, "blockerUidList").await
    }

    /// Comments on a user's wall
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

    /// Communities linked on a profile
    pub async fn get_linked_communities(&self, user_id: &str) -> Result<Vec<Community>> {
        let path = self.scope.path(&format!("user-profile/{}/linked-community", user_id));
        self.scope
            .fetch_list(ApiRequest::get(path), "linkedCommunityList")
            .await
    }

    /// Joined communities not linked on a profile
    pub async fn get_unlinked_communities(&self, user_id: &str) -> Result<Vec<Community>> {
        let path = self.scope.path(&format!("user-profile/{}/linked-community", user_id));
        self.scope
            .fetch_list(ApiRequest::get(path), "unlinkedCommunityList")
            .await
    }

    /// Membership status of the account
    pub async fn get_membership_info(&self) -> Result<Membership> {
        let request = ApiRequest::get(self.scope.path("membership")).param("force", true);
        self.scope.fetch_body(request).await
    }

    /// Announcement blogs of the service team
    pub async fn get_ta_announcements(
        &self,
        language: &str,
        start: u32,
        size: u32,
    ) -> Result<Vec<Blog>> {
        let request = ApiRequest::get(self.scope.path("announcement"))
            .param("language", language)
            .param("start", start)
            .param("size", size);
        self.scope.fetch_list(request, "blogList").await
    }

    /// Wallet balance
    pub async fn get_wallet_info(&self) -> Result<WalletInfo> {
        self.scope
            .fetch(ApiRequest::get(self.scope.path("wallet")), "wallet")
            .await
    }

    /// Coin transactions
    pub async fn get_wallet_history(&self, start: u32, size: u32) -> Result<Vec<CoinHistoryEntry>> {
        let request = ApiRequest::get(self.scope.path("wallet/coin/history"))
            .param("start", start)
            .param("size", size);
        self.scope.fetch_list(request, "coinHistoryList").await
    }

    /// User id registered for a device id
    pub async fn get_from_deviceid(&self, device_id: &str) -> Result<String> {
        let request = ApiRequest::get(self.scope.path("auid")).param("deviceId", device_id);
        self.scope.fetch(request, "auid").await
    }

    /// Resolve a share link or code
    pub async fn get_from_code(&self, code: &str) -> Result<LinkInfo> {
        let request = ApiRequest::get(self.scope.path("link-resolution")).param("q", code);
        self.scope.fetch(request, "linkInfoV2").await
    }

    /// Resolve an object id to its link information
    pub async fn get_from_id(
        &self,
        object_id: &str,
        object_type: i64,
        com_id: Option<&str>,
    ) -> Result<LinkInfo> {
        let path = match com_id {
            Some(com_id) => format!("/g/s-x{}/link-resolution", com_id),
            None => self.scope.path("link-resolution"),
        };
        let body = crate::params::stamped(
            json!({
                "objectId": object_id,
                "targetCode": 1,
                "objectType": object_type,
            }),
            timestamp_ms(),
        );
        let request = ApiRequest::post(path).json_body(&body)?;
        self.scope.fetch(request, "linkInfoV2").await
    }

    /// Language codes communities can use
    pub async fn get_supported_languages(&self) -> Result<Vec<String>> {
        let request = ApiRequest::get(self.scope.path("community-collection/supported-languages"))
            .param("start", 0)
            .param("size", 100);
        self.scope.fetch_list(request, "supportedLanguages").await
    }

    /// Store subscriptions of the account
    pub async fn get_subscriptions(&self, start: u32, size: u32) -> Result<Vec<Value>> {
        let request = ApiRequest::get(self.scope.path("store/subscription"))
            .param("objectType", 122)
            .param("start", start)
            .param("size", size);
        self.scope.fetch_list(request, "storeSubscriptionItemList").await
    }

    // =========================================================================
    // Actions
    // =========================================================================

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

    /// Visit a profile
    pub async fn visit(&self, user_id: &str) -> Result<()> {
        self.scope.visit(user_id).await
    }

    /// Follow one or more users
    pub async fn follow(&self, user_ids: &[&str]) -> Result<()> {
        self.scope.follow(user_ids).await
    }

    /// Stop following a user
    pub async fn unfollow(&self, user_id: &str) -> Result<()> {
        let me = self.user_id()?;
        let path = self.scope.path(&format!("user-profile/{}/member/{}", user_id, me));
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

    /// Join a community, optionally through an invitation
    pub async fn join_community(&self, com_id: &str, invitation_id: Option<&str>) -> Result<()> {
        let mut body = json!({});
        if let Some(invitation_id) = invitation_id {
            body["invitationId"] = json!(invitation_id);
        }
        self.scope
            .post(format!("/x{}/s/community/join", com_id), body)
            .await
    }

    /// Ask to join a community that requires approval
    pub async fn request_join_community(&self, com_id: &str, message: Option<&str>) -> Result<()> {
        self.scope
            .post(
                format!("/x{}/s/community/membership-request", com_id),
                json!({ "message": message }),
            )
            .await
    }

    /// Leave a community
    pub async fn leave_community(&self, com_id: &str) -> Result<()> {
        self.scope
            .run(ApiRequest::post(format!("/x{}/s/community/leave", com_id)))
            .await
    }

    /// Report a community
    pub async fn flag_community(
        &self,
        com_id: &str,
        reason: &str,
        flag_type: i64,
        is_guest: bool,
    ) -> Result<()> {
        let endpoint = if is_guest { "g-flag" } else { "flag" };
        let body = json!({
            "objectId": com_id,
            "objectType": OBJECT_TYPE_COMMUNITY,
            "flagType": flag_type,
            "message": reason,
        });
        self.scope
            .post(format!("/x{}/s/{}", com_id, endpoint), body)
            .await
    }

    /// Edit the global profile
    pub async fn edit_profile(&self, edit: &ProfileEdit) -> Result<()> {
        let me = self.user_id()?;
        let request = ApiRequest::post(self.scope.path(&format!("user-profile/{}", me)))
            .json_body(&edit.global_body(timestamp_ms()))?;
        self.scope.run(request).await
    }

    /// Set profile visit privacy and visit notifications
    pub async fn set_privacy_status(&self, is_anonymous: bool, get_notifications: bool) -> Result<()> {
        let body = json!({
            "privacyMode": if is_anonymous { 2 } else { 1 },
            "notificationStatus": if get_notifications { 1 } else { 2 },
        });
        self.scope
            .post(self.scope.path("account/visit-settings"), body)
            .await
    }

    /// Set the account's public id; it can only be set once
    pub async fn set_amino_id(&self, amino_id: &str) -> Result<()> {
        self.scope
            .post(
                self.scope.path("account/change-amino-id"),
                json!({ "aminoId": amino_id }),
            )
            .await
    }

    /// Link a community on the profile
    pub async fn add_linked_community(&self, com_id: &str) -> Result<()> {
        let me = self.user_id()?;
        let path = self
            .scope
            .path(&format!("user-profile/{}/linked-community/{}", me, com_id));
        self.scope.run(ApiRequest::post(path)).await
    }

    /// Unlink a community from the profile
    pub async fn remove_linked_community(&self, com_id: &str) -> Result<()> {
        let me = self.user_id()?;
        let path = self
            .scope
            .path(&format!("user-profile/{}/linked-community/{}", me, com_id));
        self.scope.run(ApiRequest::delete(path)).await
    }

    /// Reorder linked communities
    pub async fn reorder_linked_communities(&self, com_ids: &[i64]) -> Result<()> {
        let me = self.user_id()?;
        let path = self
            .scope
            .path(&format!("user-profile/{}/linked-community/reorder", me));
        self.scope.post(path, json!({ "ndcIds": com_ids })).await
    }

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

    /// Like a comment
    pub async fn like_comment(&self, comment_id: &str, target: &Target) -> Result<()> {
        self.scope.vote_comment(comment_id, target, 4).await
    }

    /// Remove a like from a comment
    pub async fn unlike_comment(&self, comment_id: &str, target: &Target) -> Result<()> {
        self.scope.unvote_comment(comment_id, target).await
    }

    /// Claim the coupon offered to new accounts
    pub async fn claim_new_user_coupon(&self) -> Result<()> {
        self.scope
            .run(ApiRequest::post(self.scope.path("coupon/new-user-coupon/claim")))
            .await
    }
}
