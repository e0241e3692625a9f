//! Socket connection lifecycle
//!
//! [`SocketHandler::start`] spawns one tokio task that owns the connection.
//! The task connects, pumps frames into the router, answers pings, sends a
//! keepalive ping on a fixed interval and, when the connection ends without
//! a deliberate [`SocketHandler::close`], asks the configured
//! [`ReconnectPolicy`](super::ReconnectPolicy) whether to try again.
//!
//! ```text
//! Idle ──start()──► Connecting ──handshake ok──► Open
//!                      ▲   │                      │
//!                      │   └─handshake failed─┐   │ transport closed
//!                      │                      ▼   ▼
//!                      └──policy gives delay── Closed ◄──close()
//! ```

use super::transport::{ConnectTarget, Connector, Transport, WireMessage};
use super::{Callbacks, SocketConfig, SocketError};
use crate::headers::{auth_header, AUTH_HEADER, DEVICE_ID_HEADER};
use crate::http::timestamp_ms;
use crate::session::SessionContext;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempted yet
    Idle,
    /// Handshake in flight
    Connecting,
    /// Frames are flowing
    Open,
    /// Not connected
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionEnd {
    /// The transport went away
    Dropped,
    /// `close()` was called
    Shutdown,
}

struct RunHandle {
    shutdown: watch::Sender<bool>,
    outbound: mpsc::UnboundedSender<WireMessage>,
    task: JoinHandle<()>,
}

struct Inner {
    config: SocketConfig,
    context: SessionContext,
    callbacks: Arc<Callbacks>,
    connector: Arc<dyn Connector>,
    reconnect: AtomicBool,
    state: watch::Sender<ConnectionState>,
    /// Bumped on every start and close; tasks only publish state while
    /// their generation is current
    generation: Mutex<u64>,
    run: Mutex<Option<RunHandle>>,
    /// Task detached by `close()` that may still be closing its transport
    retiring: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn run_handle(&self) -> MutexGuard<'_, Option<RunHandle>> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn retiring(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.retiring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: ConnectionState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            tracing::debug!(?previous, ?state, "Socket state changed");
        }
    }

    /// Publish `state` and retire every earlier task's updates
    fn advance(&self, state: ConnectionState) -> u64 {
        let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        self.set_state(state);
        *generation
    }

    /// Publish `state` on behalf of the task started at `generation`
    fn set_task_state(&self, generation: u64, state: ConnectionState) {
        let current = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == generation {
            self.set_state(state);
        } else {
            tracing::trace!(generation, ?state, "Ignoring state from a retired socket task");
        }
    }

    fn target(&self) -> ConnectTarget {
        let auth = self.context.snapshot();
        let url = format!(
            "{}/?signbody={}%7C{}",
            self.config.socket_url.trim_end_matches('/'),
            auth.device_id,
            timestamp_ms()
        );

        let mut headers = vec![(DEVICE_ID_HEADER.to_string(), auth.device_id.clone())];
        if let Some(sid) = &auth.sid {
            headers.push((AUTH_HEADER.to_string(), auth_header(sid)));
        }

        ConnectTarget { url, headers }
    }
}

/// Owns the event socket connection
///
/// Cloning is cheap; clones control the same connection.
#[derive(Clone)]
pub struct SocketHandler {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SocketHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketHandler")
            .field("socket_url", &self.inner.config.socket_url)
            .field("state", &self.state())
            .field("reconnect", &self.inner.reconnect.load(Ordering::SeqCst))
            .finish()
    }
}

impl SocketHandler {
    /// Create an idle handler
    pub fn new(
        config: SocketConfig,
        context: SessionContext,
        callbacks: Arc<Callbacks>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Idle);
        Self {
            inner: Arc::new(Inner {
                config,
                context,
                callbacks,
                connector,
                reconnect: AtomicBool::new(true),
                state,
                generation: Mutex::new(0),
                run: Mutex::new(None),
                retiring: Mutex::new(None),
            }),
        }
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        *self.inner.state.borrow()
    }

    /// Watch connection state changes
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    /// The router frames are delivered to
    pub fn callbacks(&self) -> &Arc<Callbacks> {
        &self.inner.callbacks
    }

    /// Whether a connection task is alive
    pub fn is_running(&self) -> bool {
        self.inner
            .run_handle()
            .as_ref()
            .is_some_and(|run| !run.task.is_finished())
    }

    /// Start the connection task.
    ///
    /// Returns as soon as the task is spawned; the handshake outcome is only
    /// visible through [`state`](Self::state). Calling `start` while a task
    /// is alive does nothing. Re-enables reconnecting after a `close()`.
    ///
    /// A task still winding down from an earlier `close()` is aborted, and
    /// the new task waits for it to exit before connecting, so at most one
    /// connection is ever live.
    pub fn start(&self) -> Result<(), SocketError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SocketError::NoRuntime)?;

        let mut run = self.inner.run_handle();
        if run.as_ref().is_some_and(|r| !r.task.is_finished()) {
            tracing::debug!("Socket already running");
            return Ok(());
        }

        let previous = self.inner.retiring().take();
        if let Some(previous) = &previous {
            previous.abort();
        }

        self.inner.reconnect.store(true, Ordering::SeqCst);
        let generation = self.inner.advance(ConnectionState::Connecting);

        let (shutdown, shutdown_rx) = watch::channel(false);
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let task = runtime.spawn(run_connection(
            self.inner.clone(),
            generation,
            previous,
            shutdown_rx,
            outbound_rx,
        ));

        *run = Some(RunHandle {
            shutdown,
            outbound,
            task,
        });
        Ok(())
    }

    /// Close the connection and stop reconnecting.
    ///
    /// A callback that is already running finishes first; the task exits at
    /// its next await point.
    pub fn close(&self) {
        self.inner.reconnect.store(false, Ordering::SeqCst);
        let run = self.inner.run_handle().take();
        if let Some(run) = run {
            let _ = run.shutdown.send(true);
            if let Some(older) = self.inner.retiring().replace(run.task) {
                older.abort();
            }
        }
        self.inner.advance(ConnectionState::Closed);
        tracing::info!("Socket closed");
    }

    /// Close the connection and wait for the task to exit
    pub async fn shutdown(&self) {
        self.inner.reconnect.store(false, Ordering::SeqCst);
        let run = self.inner.run_handle().take();
        if let Some(run) = run {
            let _ = run.shutdown.send(true);
            if let Err(error) = run.task.await {
                tracing::warn!(%error, "Socket task ended abnormally");
            }
        }
        let retiring = self.inner.retiring().take();
        if let Some(task) = retiring {
            let _ = task.await;
        }
        self.inner.advance(ConnectionState::Closed);
    }

    /// Queue a text frame on the open connection.
    ///
    /// Fails with [`SocketError::NotOpen`] while connecting or waiting to
    /// reconnect. Frames still queued when the connection drops are
    /// discarded rather than sent on the next connection.
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), SocketError> {
        let run = self.inner.run_handle();
        let run = run.as_ref().ok_or(SocketError::NotRunning)?;
        let state = self.state();
        if state != ConnectionState::Open {
            return Err(SocketError::NotOpen(state));
        }
        run.outbound
            .send(WireMessage::Text(text.into()))
            .map_err(|_| SocketError::NotRunning)
    }

    /// Queue a JSON frame on the open connection
    pub fn send_json(&self, value: &Value) -> Result<(), SocketError> {
        let text = serde_json::to_string(value)?;
        self.send_text(text)
    }
}

async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

async fn run_connection(
    inner: Arc<Inner>,
    generation: u64,
    previous: Option<JoinHandle<()>>,
    mut shutdown: watch::Receiver<bool>,
    mut outbound: mpsc::UnboundedReceiver<WireMessage>,
) {
    if let Some(previous) = previous {
        // Aborted by `start()`; wait until its transport is dropped
        let _ = previous.await;
    }

    let mut attempt: u32 = 0;

    loop {
        if *shutdown.borrow() {
            break;
        }
        inner.set_task_state(generation, ConnectionState::Connecting);

        let target = inner.target();
        let connected = tokio::select! {
            result = inner.connector.connect(&target) => result,
            _ = wait_for_shutdown(&mut shutdown) => break,
        };

        let end = match connected {
            Ok(transport) => {
                inner.set_task_state(generation, ConnectionState::Open);
                tracing::info!(url = %inner.config.socket_url, "Socket connected");
                attempt = 0;
                pump(&inner, transport, &mut shutdown, &mut outbound).await
            }
            Err(error) => {
                tracing::warn!(%error, attempt, "Socket connection failed");
                ConnectionEnd::Dropped
            }
        };

        inner.set_task_state(generation, ConnectionState::Closed);

        let mut discarded = 0usize;
        while outbound.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            tracing::debug!(discarded, "Discarded frames queued for the lost connection");
        }

        if end == ConnectionEnd::Shutdown || !inner.reconnect.load(Ordering::SeqCst) {
            break;
        }

        let Some(delay) = inner.config.reconnect_policy.next_delay(attempt) else {
            tracing::warn!(attempt, "Reconnect policy gave up");
            break;
        };
        attempt = attempt.saturating_add(1);
        tracing::info!(?delay, attempt, "Socket reconnecting");

        if !delay.is_zero() {
            tokio::select! {
                _ = sleep(delay) => {}
                _ = wait_for_shutdown(&mut shutdown) => break,
            }
        }
    }

    inner.set_task_state(generation, ConnectionState::Closed);
}

async fn pump(
    inner: &Inner,
    mut transport: Box<dyn Transport>,
    shutdown: &mut watch::Receiver<bool>,
    outbound: &mut mpsc::UnboundedReceiver<WireMessage>,
) -> ConnectionEnd {
    let every = inner.config.ping_interval.max(Duration::from_millis(1));
    let mut keepalive = interval_at(Instant::now() + every, every);
    keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let end = loop {
        tokio::select! {
            frame = transport.next_frame() => match frame {
                Some(Ok(WireMessage::Text(text))) => {
                    if let Err(error) = inner.callbacks.resolve(&text) {
                        tracing::warn!(%error, "Dropping malformed socket frame");
                    }
                }
                Some(Ok(WireMessage::Ping(data))) => {
                    if let Err(error) = transport.send_frame(WireMessage::Pong(data)).await {
                        tracing::warn!(%error, "Failed to answer ping");
                        break ConnectionEnd::Dropped;
                    }
                }
                Some(Ok(WireMessage::Pong(_))) => {}
                Some(Ok(WireMessage::Close)) => {
                    tracing::info!("Socket closed by server");
                    break ConnectionEnd::Dropped;
                }
                Some(Err(error)) => {
                    tracing::warn!(%error, "Socket read failed");
                    break ConnectionEnd::Dropped;
                }
                None => {
                    tracing::info!("Socket stream ended");
                    break ConnectionEnd::Dropped;
                }
            },
            Some(message) = outbound.recv() => {
                if let Err(error) = transport.send_frame(message).await {
                    tracing::warn!(%error, "Socket send failed");
                    break ConnectionEnd::Dropped;
                }
            }
            _ = keepalive.tick() => {
                if let Err(error) = transport.send_frame(WireMessage::Ping(Vec::new())).await {
                    tracing::warn!(%error, "Keepalive ping failed");
                    break ConnectionEnd::Dropped;
                }
            }
            _ = wait_for_shutdown(shutdown) => break ConnectionEnd::Shutdown,
        }
    };

    if let Err(error) = transport.close().await {
        tracing::debug!(%error, "Socket close failed");
    }
    end
}
