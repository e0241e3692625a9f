//! Amino API Client Library
//!
//! This crate provides an async Rust client for the Amino social network API:
//! signed REST calls for the global and community scopes, a persisted device
//! identity, typed response objects, and a reconnecting event socket with a
//! callback router.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod device;
pub mod headers;
pub mod http;
pub mod objects;
pub mod params;
mod scope;
pub mod session;
pub mod socket;
pub mod status;
pub mod sub_client;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{Client, ClientConfig, DeviceSource};
pub use device::{DeviceIdentity, DeviceStore};
pub use headers::{HeaderBuilder, HmacSigner, RequestSigner};
pub use objects::Event;
pub use params::{
    Attachment, ChatSettings, Embed, FileKind, Gender, LeaderboardType, OutgoingMessage,
    PostDraft, ProfileEdit, RepairMethod, Sorting, Target, UserListType,
};
pub use session::{AuthSnapshot, Session, SessionContext};
pub use socket::{Callbacks, ConnectionState, EventType, SocketConfig, SocketError, SocketHandler};
pub use status::{ApiError, ApiErrorKind};
pub use sub_client::SubClient;

/// Result type for Amino client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Amino client operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service rejected the request with an application status code
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The operation needs a logged-in session
    #[error("Not logged in")]
    NotLoggedIn,

    /// A community-scoped client was created without a community id
    #[error("No community id provided")]
    NoCommunity,

    /// None of the mutually exclusive targets or types was specified, or
    /// the one given is not recognised
    #[error("Specify a valid type: {0}")]
    SpecifyType(String),

    /// The file type cannot be sent as a chat message
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Accounts must be older than 12
    #[error("Age {0} is too low")]
    AgeTooLow(u32),

    /// A comment or message needs content
    #[error("A message is required")]
    MessageNeeded,

    /// A successful response did not have the expected shape
    #[error("Unexpected response: missing field `{0}`")]
    UnexpectedResponse(String),

    /// Device identity could not be loaded or saved
    #[error("Device storage error: {0}")]
    Device(#[from] storage::PersistenceError),

    /// Socket error
    #[error("Socket error: {0}")]
    Socket(#[from] SocketError),
}

impl Error {
    /// The decoded service status, if this is an API error
    pub fn api_kind(&self) -> Option<&ApiErrorKind> {
        match self {
            Error::Api(e) => Some(&e.kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = Error::SpecifyType("sorting".to_string());
        assert!(err.to_string().contains("sorting"));

        let err = Error::AgeTooLow(9);
        assert_eq!(err.to_string(), "Age 9 is too low");
    }

    #[test]
    fn test_api_kind() {
        let api = ApiError::from_payload(400, serde_json::json!({"api:statuscode": 225}));
        let err = Error::from(api);
        assert_eq!(err.api_kind(), Some(&ApiErrorKind::UserUnavailable));
        assert!(Error::NotLoggedIn.api_kind().is_none());
    }
}
