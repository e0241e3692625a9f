//! Echo bot
//!
//! Logs in, listens on the event socket and repeats every text message back
//! into the chat it came from.
//!
//! ```text
//! AMINO_EMAIL=... AMINO_PASSWORD=... AMINO_COMMUNITY=... \
//!     RUST_LOG=info cargo run --example echo_bot
//! ```

use amino_client::{Client, ClientConfig, EventType, OutgoingMessage};
use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let email = std::env::var("AMINO_EMAIL").context("AMINO_EMAIL is not set")?;
    let password = std::env::var("AMINO_PASSWORD").context("AMINO_PASSWORD is not set")?;
    let com_id = std::env::var("AMINO_COMMUNITY").context("AMINO_COMMUNITY is not set")?;

    let client = Client::new(ClientConfig::default()).await?;

    // Callbacks run on the socket task, so hand work to the main loop
    let (tx, mut rx) = mpsc::unbounded_channel::<(String, String)>();
    let me = client.context().clone();
    client.callbacks().on(EventType::TextMessage, move |event| {
        let (Some(thread_id), Some(content)) = (event.thread_id(), event.content()) else {
            return;
        };
        if event.author_id() == me.user_id().ok().as_deref() {
            return;
        }
        let _ = tx.send((thread_id.to_string(), content.to_string()));
    });

    let session = client.login(&email, &password).await?;
    tracing::info!(user_id = %session.user_id, "Echo bot ready");

    let community = client.sub_client(com_id)?;
    while let Some((thread_id, content)) = rx.recv().await {
        if let Err(error) = community
            .send_message(&thread_id, &OutgoingMessage::text(content))
            .await
        {
            tracing::warn!(%error, thread_id, "Echo failed");
        }
    }

    Ok(())
}
