//! Socket transport seam
//!
//! The handler talks to the network through [`Connector`] and [`Transport`]
//! so the connection lifecycle can be driven by a scripted transport in
//! tests. [`TungsteniteConnector`] is the production implementation.

use super::SocketError;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::fmt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// A frame as seen by the socket handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireMessage {
    /// Text frame
    Text(String),
    /// Ping with payload
    Ping(Vec<u8>),
    /// Pong with payload
    Pong(Vec<u8>),
    /// Close frame
    Close,
}

/// Where and how to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    /// Full socket url including the signed query
    pub url: String,
    /// Handshake headers
    pub headers: Vec<(String, String)>,
}

impl ConnectTarget {
    /// Get a handshake header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An open connection
#[async_trait]
pub trait Transport: Send {
    /// Next inbound frame; `None` once the connection is gone
    async fn next_frame(&mut self) -> Option<Result<WireMessage, SocketError>>;

    /// Send one frame
    async fn send_frame(&mut self, message: WireMessage) -> Result<(), SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Opens connections
#[async_trait]
pub trait Connector: Send + Sync + fmt::Debug {
    /// Perform the handshake
    async fn connect(&self, target: &ConnectTarget) -> Result<Box<dyn Transport>, SocketError>;
}

/// WebSocket connector over tokio-tungstenite
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

#[async_trait]
impl Connector for TungsteniteConnector {
    async fn connect(&self, target: &ConnectTarget) -> Result<Box<dyn Transport>, SocketError> {
        let mut request = target
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| SocketError::Connect(e.to_string()))?;

        for (name, value) in &target.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SocketError::InvalidHeader(e.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| SocketError::InvalidHeader(e.to_string()))?;
            request.headers_mut().insert(name, value);
        }

        let (stream, _response) = connect_async(request)
            .await
            .map_err(|e| SocketError::Connect(e.to_string()))?;

        Ok(Box::new(TungsteniteTransport { stream }))
    }
}

/// A tokio-tungstenite WebSocket connection
pub struct TungsteniteTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Transport for TungsteniteTransport {
    async fn next_frame(&mut self) -> Option<Result<WireMessage, SocketError>> {
        loop {
            let message = match self.stream.next().await? {
                Ok(message) => message,
                Err(e) => return Some(Err(SocketError::Transport(e.to_string()))),
            };

            let frame = match message {
                Message::Text(text) => WireMessage::Text(text.as_str().to_owned()),
                Message::Ping(data) => WireMessage::Ping(data.to_vec()),
                Message::Pong(data) => WireMessage::Pong(data.to_vec()),
                Message::Close(_) => WireMessage::Close,
                // The event stream is text only
                Message::Binary(_) | Message::Frame(_) => continue,
            };
            return Some(Ok(frame));
        }
    }

    async fn send_frame(&mut self, message: WireMessage) -> Result<(), SocketError> {
        let message = match message {
            WireMessage::Text(text) => Message::Text(text.into()),
            WireMessage::Ping(data) => Message::Ping(data.into()),
            WireMessage::Pong(data) => Message::Pong(data.into()),
            WireMessage::Close => Message::Close(None),
        };
        self.stream
            .send(message)
            .await
            .map_err(|e| SocketError::Transport(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| SocketError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_target_header_lookup() {
        let target = ConnectTarget {
            url: "wss://example.test/?signbody=D%7C1".to_string(),
            headers: vec![
                ("NDCDEVICEID".to_string(), "D".to_string()),
                ("NDCAUTH".to_string(), "sid=abc".to_string()),
            ],
        };
        assert_eq!(target.header("ndcdeviceid"), Some("D"));
        assert_eq!(target.header("NDCAUTH"), Some("sid=abc"));
        assert_eq!(target.header("missing"), None);
    }

    #[tokio::test]
    async fn test_connector_rejects_bad_header() {
        let target = ConnectTarget {
            url: "ws://127.0.0.1:1/".to_string(),
            headers: vec![("bad header".to_string(), "x".to_string())],
        };
        let result = TungsteniteConnector.connect(&target).await;
        assert!(matches!(result, Err(SocketError::InvalidHeader(_))));
    }
}
