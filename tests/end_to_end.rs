//! End-to-end tests
//!
//! Drive a full client session against a mock service: device creation on
//! disk, login, the event socket started by login, and community calls.

use amino_client::http::HttpClientConfig;
use amino_client::socket::{ConnectTarget, Connector, NoReconnect, Transport, WireMessage};
use amino_client::{
    Client, ClientConfig, ConnectionState, DeviceSource, EventType, SocketConfig, SocketError,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage::JsonFile;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Connector that replays frames pushed by the test
#[derive(Debug)]
struct ChannelConnector {
    feed: Mutex<Option<mpsc::UnboundedReceiver<WireMessage>>>,
}

#[async_trait]
impl Connector for ChannelConnector {
    async fn connect(&self, _target: &ConnectTarget) -> Result<Box<dyn Transport>, SocketError> {
        let feed = self
            .feed
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| SocketError::Connect("feed already taken".to_string()))?;
        Ok(Box::new(ChannelTransport { feed }))
    }
}

struct ChannelTransport {
    feed: mpsc::UnboundedReceiver<WireMessage>,
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn next_frame(&mut self) -> Option<Result<WireMessage, SocketError>> {
        self.feed.recv().await.map(Ok)
    }

    async fn send_frame(&mut self, _message: WireMessage) -> Result<(), SocketError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        Ok(())
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/g/s/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "SID",
            "account": {"uid": "u-1"},
            "userProfile": {"uid": "u-1", "nickname": "ferris"}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_device_file_is_reused() {
    let temp_dir = TempDir::new().unwrap();
    let device_path = temp_dir.path().join("device.json");

    let config = || ClientConfig::new().with_device(DeviceSource::File(device_path.clone()));

    let first = Client::new(config()).await.unwrap();
    assert!(device_path.exists());

    let second = Client::new(config()).await.unwrap();
    assert_eq!(first.device(), second.device());

    let stored: JsonFile<serde_json::Value> = JsonFile::new(&device_path);
    let raw = stored.load().await.unwrap();
    assert_eq!(raw["device_id"], json!(first.device().device_id));
}

#[tokio::test]
async fn test_login_starts_socket_and_routes_messages() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let (feed, rx) = mpsc::unbounded_channel();
    let connector = Arc::new(ChannelConnector {
        feed: Mutex::new(Some(rx)),
    });

    let config = ClientConfig::new()
        .with_http(HttpClientConfig::new(server.uri()))
        .with_device(DeviceSource::Fixed(Default::default()))
        .with_socket(SocketConfig::new("wss://socket.test").with_reconnect_policy(NoReconnect))
        .with_connector(connector);
    let client = Client::new(config).await.unwrap();

    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    client.callbacks().on(EventType::TextMessage, move |event| {
        let _ = seen_tx.send(event.content().map(str::to_string));
    });

    client.login("ferris@example.com", "secret").await.unwrap();
    let mut state = client.socket().subscribe_state();
    timeout(Duration::from_secs(5), async {
        while *state.borrow_and_update() != ConnectionState::Open {
            state.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    feed.send(WireMessage::Text(
        json!({"t": 1000, "o": {"chatMessage": {"type": 0, "content": "hi"}}}).to_string(),
    ))
    .unwrap();

    let content = timeout(Duration::from_secs(5), seen_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(content.as_deref(), Some("hi"));

    client.socket().shutdown().await;
}

#[tokio::test]
async fn test_community_session_flow() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/x42/s/check-in"))
        .and(header("NDCAUTH", "sid=SID"))
        .and(body_partial_json(json!({"timezone": 0})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"consecutiveCheckInDays": 3})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/x42/s/user-profile/u-1/online-status"))
        .and(body_partial_json(json!({"onlineStatus": 1, "duration": 86400})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new()
        .with_http(HttpClientConfig::new(server.uri()))
        .with_device(DeviceSource::Fixed(Default::default()))
        .with_socket_on_login(false);
    let client = Client::new(config).await.unwrap();
    client.login("ferris@example.com", "secret").await.unwrap();

    let community = client.sub_client("42").unwrap();
    let check_in = community.check_in(Some(0)).await.unwrap();
    assert_eq!(check_in["consecutiveCheckInDays"], json!(3));
    community.activity_status(true).await.unwrap();
}
