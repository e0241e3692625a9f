//! Event socket
//!
//! A long-lived WebSocket connection delivering chat events, plus the router
//! that turns frames into callback invocations.
//!
//! # Examples
//!
//! ```no_run
//! use amino_client::{Callbacks, EventType};
//!
//! let callbacks = Callbacks::new();
//! callbacks.on(EventType::TextMessage, |event| {
//!     println!("{:?}", event.content());
//! });
//! ```

mod callbacks;
mod handler;
mod reconnect;
mod transport;

pub use callbacks::{dispatch_key, Callbacks, DispatchError, DispatchKey, EventHandler, EventType};
pub use handler::{ConnectionState, SocketHandler};
pub use reconnect::{ExponentialBackoff, Immediate, NoReconnect, ReconnectPolicy};
pub use transport::{
    ConnectTarget, Connector, Transport, TungsteniteConnector, TungsteniteTransport, WireMessage,
};

use std::sync::Arc;
use std::time::Duration;

/// Default event socket url
pub const DEFAULT_SOCKET_URL: &str = "wss://ws1.narvii.com";

/// Socket errors
#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    /// The handshake could not be completed
    #[error("Connection failed: {0}")]
    Connect(String),

    /// A handshake header is not valid
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Reading or writing a frame failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// There is no connection task to send through
    #[error("Socket is not running")]
    NotRunning,

    /// The connection task exists but is not connected
    #[error("Socket is not open (state: {0:?})")]
    NotOpen(ConnectionState),

    /// `start()` was called outside a tokio runtime
    #[error("No tokio runtime available")]
    NoRuntime,

    /// Outbound payload could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Socket configuration
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// Base socket url
    pub socket_url: String,
    /// Interval between keepalive pings
    pub ping_interval: Duration,
    /// What to do after an unexpected disconnect
    pub reconnect_policy: Arc<dyn ReconnectPolicy>,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            socket_url: DEFAULT_SOCKET_URL.to_string(),
            ping_interval: Duration::from_secs(60),
            reconnect_policy: Arc::new(ExponentialBackoff::default()),
        }
    }
}

impl SocketConfig {
    /// Create a config for a socket url
    pub fn new(socket_url: impl Into<String>) -> Self {
        Self {
            socket_url: socket_url.into(),
            ..Default::default()
        }
    }

    /// Set the keepalive interval
    pub fn with_ping_interval(mut self, interval: Duration) -> Self {
        self.ping_interval = interval;
        self
    }

    /// Set the reconnect policy
    pub fn with_reconnect_policy(mut self, policy: impl ReconnectPolicy + 'static) -> Self {
        self.reconnect_policy = Arc::new(policy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_config_default() {
        let config = SocketConfig::default();
        assert_eq!(config.socket_url, "wss://ws1.narvii.com");
        assert_eq!(config.ping_interval, Duration::from_secs(60));
        assert_eq!(
            config.reconnect_policy.next_delay(0),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_socket_config_builder() {
        let config = SocketConfig::new("ws://localhost:9000")
            .with_ping_interval(Duration::from_secs(5))
            .with_reconnect_policy(Immediate);
        assert_eq!(config.socket_url, "ws://localhost:9000");
        assert_eq!(config.ping_interval, Duration::from_secs(5));
        assert_eq!(config.reconnect_policy.next_delay(3), Some(Duration::ZERO));
    }
}
