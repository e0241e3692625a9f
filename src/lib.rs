//! Amino
//!
//! Unofficial async client for the Amino social network. Re-exports the
//! client crate so applications depend on one package.
//!
//! ```rust,no_run
//! use amino::{Client, ClientConfig, EventType};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), amino::Error> {
//! let client = Client::new(ClientConfig::default()).await?;
//! client.callbacks().on(EventType::TextMessage, |event| {
//!     tracing::info!(content = ?event.content(), "Message");
//! });
//! client.login("ferris@example.com", "password").await?;
//! # Ok(())
//! # }
//! ```

pub use amino_client::*;
pub use storage;
