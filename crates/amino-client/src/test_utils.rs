//! Shared helpers for unit tests

use crate::client::{Client, ClientConfig, DeviceSource};
use crate::device::DeviceIdentity;
use crate::http::HttpClientConfig;
use crate::session::Session;

/// A client pointed at `uri` with the fixed device identity and no socket
pub(crate) async fn test_client(uri: &str) -> Client {
    let config = ClientConfig::new()
        .with_http(HttpClientConfig::new(uri))
        .with_device(DeviceSource::Fixed(DeviceIdentity::default()))
        .with_socket_on_login(false);
    Client::new(config).await.expect("test client")
}

/// Install a session without going through login
pub(crate) fn logged_in(client: &Client, sid: &str, user_id: &str) {
    client.context().set(Session {
        sid: sid.to_string(),
        user_id: user_id.to_string(),
        ..Default::default()
    });
}
