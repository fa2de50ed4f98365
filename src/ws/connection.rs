//! Observer connection lifecycle.
//!
//! A connection is registered once the upgrade completes, then loops until
//! it closes. While open it forwards queued events to the peer, sends
//! heartbeat pings, and reads inbound frames only to see that the peer is
//! still there. Every exit path deregisters the channel.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::HubConfig;
use crate::domain::{ObserverChannel, ObserverRegistry};

/// Why an observer connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer sent a close frame or the stream ended.
    PeerClosed,
    /// Reading from the socket failed.
    ReadError,
    /// Writing to the socket failed.
    WriteError,
    /// The registry side of the queue went away.
    QueueClosed,
    /// No inbound frame arrived within the idle timeout.
    IdleTimeout,
    /// The server is shutting down.
    Shutdown,
}

impl CloseReason {
    /// Returns a short snake_case label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PeerClosed => "peer_closed",
            Self::ReadError => "read_error",
            Self::WriteError => "write_error",
            Self::QueueClosed => "queue_closed",
            Self::IdleTimeout => "idle_timeout",
            Self::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder period for the ticker when neither heartbeat nor idle
/// timeout is configured; the tick branch is disabled in that case.
const UNUSED_TICK: Duration = Duration::from_secs(3600);

/// How long the final close frame may take before the socket is dropped.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

type WsSink = SplitSink<WebSocket, Message>;

/// Treats a zero duration as "not configured".
fn non_zero(period: Option<Duration>) -> Option<Duration> {
    period.filter(|period| !period.is_zero())
}

/// Watches the shutdown flag. Disarms itself once the sender is gone.
#[derive(Debug)]
struct ShutdownWatch {
    rx: watch::Receiver<bool>,
    armed: bool,
}

impl ShutdownWatch {
    fn new(rx: watch::Receiver<bool>) -> Self {
        let armed = !*rx.borrow();
        Self { rx, armed }
    }

    fn requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is requested; pends forever if it never can be.
    async fn wait(&mut self) {
        while self.armed {
            match self.rx.changed().await {
                Ok(()) if *self.rx.borrow() => return,
                Ok(()) => {}
                // Sender dropped: nobody can signal shutdown any more.
                Err(_) => self.armed = false,
            }
        }
        std::future::pending::<()>().await;
    }
}

/// Writes one frame, giving up at `deadline` or on shutdown.
///
/// A peer that stops reading fills the socket buffer, so an unbounded
/// write would never return.
async fn write_frame(
    ws_tx: &mut WsSink,
    message: Message,
    deadline: Option<Instant>,
    shutdown: &mut ShutdownWatch,
) -> Result<(), CloseReason> {
    let expiry = time::sleep_until(deadline.unwrap_or_else(|| Instant::now() + UNUSED_TICK));
    tokio::pin!(expiry);

    tokio::select! {
        result = ws_tx.send(message) => result.map_err(|err| {
            tracing::debug!(error = %err, "observer write failed");
            CloseReason::WriteError
        }),
        () = &mut expiry, if deadline.is_some() => Err(CloseReason::IdleTimeout),
        () = shutdown.wait() => Err(CloseReason::Shutdown),
    }
}

/// Runs one observer connection from registration to deregistration.
///
/// Returns the reason the connection closed.
pub async fn run_observer(
    socket: WebSocket,
    observers: Arc<ObserverRegistry>,
    config: Arc<HubConfig>,
    shutdown: watch::Receiver<bool>,
) -> CloseReason {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (channel, mut outbox) = ObserverChannel::bounded(config.observer_queue_capacity);
    let observer_id = channel.id();
    observers.register(channel).await;
    tracing::info!(%observer_id, "observer connected");

    let heartbeat = non_zero(config.heartbeat_interval);
    let idle_timeout = non_zero(config.idle_timeout);
    let tick_period = heartbeat.or(idle_timeout);
    let period = tick_period.unwrap_or(UNUSED_TICK);
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_seen = Instant::now();
    let mut shutdown = ShutdownWatch::new(shutdown);

    let reason = if shutdown.requested() {
        CloseReason::Shutdown
    } else {
        loop {
            // Writes must finish before the peer counts as idle.
            let write_deadline = idle_timeout.map(|limit| last_seen + limit);
            tokio::select! {
                // Inbound frames only prove liveness; content is ignored.
                frame = ws_rx.next() => {
                    match frame {
                        Some(Ok(Message::Close(_))) | None => break CloseReason::PeerClosed,
                        Some(Ok(_)) => last_seen = Instant::now(),
                        Some(Err(err)) => {
                            tracing::debug!(%observer_id, error = %err, "observer read failed");
                            break CloseReason::ReadError;
                        }
                    }
                }
                // Events queued by the registry
                payload = outbox.recv() => {
                    let Some(json) = payload else {
                        break CloseReason::QueueClosed;
                    };
                    let frame = Message::text(json.to_string());
                    if let Err(reason) =
                        write_frame(&mut ws_tx, frame, write_deadline, &mut shutdown).await
                    {
                        break reason;
                    }
                }
                _ = ticker.tick(), if tick_period.is_some() => {
                    if idle_timeout.is_some_and(|limit| last_seen.elapsed() >= limit) {
                        break CloseReason::IdleTimeout;
                    }
                    if heartbeat.is_some() {
                        let ping = Message::Ping(Bytes::new());
                        if let Err(reason) =
                            write_frame(&mut ws_tx, ping, write_deadline, &mut shutdown).await
                        {
                            break reason;
                        }
                    }
                }
                () = shutdown.wait() => break CloseReason::Shutdown,
            }
        }
    };

    if matches!(reason, CloseReason::Shutdown | CloseReason::IdleTimeout) {
        let _ = time::timeout(CLOSE_GRACE, ws_tx.send(Message::Close(None))).await;
    }

    observers.deregister(observer_id).await;
    tracing::info!(%observer_id, reason = %reason, "observer disconnected");
    reason
}
