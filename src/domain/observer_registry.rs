//! Registry of live observer channels with failure-isolated fan-out.
//!
//! Each WebSocket observer owns a bounded queue; the registry holds the
//! sending half. [`ObserverRegistry::broadcast`] serializes an event once
//! and makes a single non-blocking delivery attempt per channel, so a dead
//! or slow observer can neither stall nor break delivery to the rest.

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use super::{CheckinEvent, ObserverId};

/// Serialized event as queued for an observer.
pub type ObserverPayload = Arc<str>;

/// Reasons a single delivery attempt can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The observer's queue is full; the peer is not draining it.
    #[error("observer queue is full")]
    QueueFull,
    /// The observer's receiving task has gone away.
    #[error("observer has disconnected")]
    Disconnected,
}

impl<T> From<mpsc::error::TrySendError<T>> for DeliveryError {
    fn from(err: mpsc::error::TrySendError<T>) -> Self {
        match err {
            mpsc::error::TrySendError::Full(_) => Self::QueueFull,
            mpsc::error::TrySendError::Closed(_) => Self::Disconnected,
        }
    }
}

/// Send capability for one live observer.
#[derive(Debug, Clone)]
pub struct ObserverChannel {
    id: ObserverId,
    outbox: mpsc::Sender<ObserverPayload>,
}

impl ObserverChannel {
    /// Wraps an existing queue sender.
    #[must_use]
    pub const fn new(id: ObserverId, outbox: mpsc::Sender<ObserverPayload>) -> Self {
        Self { id, outbox }
    }

    /// Creates a channel with a fresh ID and a bounded queue of `capacity`
    /// payloads, returning the receiving half for the connection task.
    ///
    /// A `capacity` of zero is treated as one.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<ObserverPayload>) {
        let (outbox, inbox) = mpsc::channel(capacity.max(1));
        (Self::new(ObserverId::new(), outbox), inbox)
    }

    /// Returns the channel's identifier.
    #[must_use]
    pub const fn id(&self) -> ObserverId {
        self.id
    }

    /// Attempts to enqueue a payload without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the queue is full or the receiver has
    /// been dropped.
    pub fn try_deliver(&self, payload: &ObserverPayload) -> Result<(), DeliveryError> {
        self.outbox.try_send(Arc::clone(payload))?;
        Ok(())
    }
}

/// Set of currently connected observers, kept in registration order.
///
/// A channel is present from [`register`](Self::register) until its own
/// lifecycle calls [`deregister`](Self::deregister). Broadcast failures do
/// not remove channels.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    channels: RwLock<Vec<ObserverChannel>>,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a channel to the live set.
    ///
    /// Each connection registers exactly once.
    pub async fn register(&self, channel: ObserverChannel) {
        let id = channel.id();
        let mut channels = self.channels.write().await;
        channels.push(channel);
        tracing::debug!(observer_id = %id, live = channels.len(), "observer registered");
    }

    /// Removes a channel from the live set.
    ///
    /// Unknown or already-removed IDs are a no-op. Returns `true` if a
    /// channel was removed.
    pub async fn deregister(&self, id: ObserverId) -> bool {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|channel| channel.id() != id);
        let removed = channels.len() != before;
        if removed {
            tracing::debug!(observer_id = %id, live = channels.len(), "observer deregistered");
        }
        removed
    }

    /// Delivers `event` to every channel registered at the time of the call.
    ///
    /// Failed deliveries are logged and skipped. Returns the number of
    /// channels the event was queued for.
    pub async fn broadcast(&self, event: &CheckinEvent) -> usize {
        let payload: ObserverPayload = match serde_json::to_string(event) {
            Ok(json) => json.into(),
            Err(err) => {
                tracing::error!(kind = event.kind(), error = %err, "failed to serialize event");
                return 0;
            }
        };

        let snapshot = self.channels.read().await.clone();
        let mut delivered = 0;
        for channel in &snapshot {
            match channel.try_deliver(&payload) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    tracing::warn!(
                        observer_id = %channel.id(),
                        kind = event.kind(),
                        error = %err,
                        "event delivery failed"
                    );
                }
            }
        }

        tracing::debug!(
            kind = event.kind(),
            delivered,
            observers = snapshot.len(),
            "event broadcast"
        );
        delivered
    }

    /// Returns the number of live channels.
    pub async fn len(&self) -> usize {
        self.channels.read().await.len()
    }

    /// Returns `true` if no observer is connected.
    pub async fn is_empty(&self) -> bool {
        self.channels.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AttendanceRecord, AttendeeType};
    use chrono::Utc;

    fn make_event(name: &str) -> CheckinEvent {
        CheckinEvent::NewCheckin(AttendanceRecord::new(
            name,
            AttendeeType::Guest,
            "2024-01-01T10:00:00",
            Utc::now(),
        ))
    }

    fn received_name(payload: &ObserverPayload) -> String {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(payload) else {
            panic!("payload is not JSON: {payload}");
        };
        value["data"]["name"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn broadcast_without_observers_delivers_nothing() {
        let registry = ObserverRegistry::new();
        assert_eq!(registry.broadcast(&make_event("Ann")).await, 0);
    }

    #[tokio::test]
    async fn every_observer_receives_exactly_one_event() {
        let registry = ObserverRegistry::new();
        let mut inboxes = Vec::new();
        for _ in 0..3 {
            let (channel, inbox) = ObserverChannel::bounded(8);
            registry.register(channel).await;
            inboxes.push(inbox);
        }

        assert_eq!(registry.broadcast(&make_event("Ann")).await, 3);

        for inbox in &mut inboxes {
            let Ok(payload) = inbox.try_recv() else {
                panic!("observer missed the event");
            };
            assert_eq!(received_name(&payload), "Ann");
            assert!(inbox.try_recv().is_err(), "observer received a duplicate");
        }
    }

    #[tokio::test]
    async fn per_observer_order_follows_broadcast_order() {
        let registry = ObserverRegistry::new();
        let (channel, mut inbox) = ObserverChannel::bounded(8);
        registry.register(channel).await;

        registry.broadcast(&make_event("A")).await;
        registry.broadcast(&make_event("B")).await;

        let mut names = Vec::new();
        while let Ok(payload) = inbox.try_recv() {
            names.push(received_name(&payload));
        }
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn broken_observer_does_not_block_the_others() {
        let registry = ObserverRegistry::new();
        let (first, mut first_inbox) = ObserverChannel::bounded(8);
        let (broken, broken_inbox) = ObserverChannel::bounded(8);
        let (third, mut third_inbox) = ObserverChannel::bounded(8);
        registry.register(first).await;
        registry.register(broken).await;
        registry.register(third).await;
        drop(broken_inbox);

        assert_eq!(registry.broadcast(&make_event("Ann")).await, 2);
        assert!(first_inbox.try_recv().is_ok());
        assert!(third_inbox.try_recv().is_ok());
    }

    #[tokio::test]
    async fn failed_observer_stays_registered() {
        let registry = ObserverRegistry::new();
        let (broken, broken_inbox) = ObserverChannel::bounded(1);
        registry.register(broken).await;
        drop(broken_inbox);

        registry.broadcast(&make_event("Ann")).await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn full_queue_is_a_delivery_failure() {
        let (channel, _inbox) = ObserverChannel::bounded(1);
        let payload: ObserverPayload = Arc::from("{}");

        assert_eq!(channel.try_deliver(&payload), Ok(()));
        assert_eq!(channel.try_deliver(&payload), Err(DeliveryError::QueueFull));
    }

    #[tokio::test]
    async fn closed_queue_is_a_disconnect() {
        let (channel, inbox) = ObserverChannel::bounded(1);
        drop(inbox);
        let payload: ObserverPayload = Arc::from("{}");

        assert_eq!(channel.try_deliver(&payload), Err(DeliveryError::Disconnected));
    }

    #[tokio::test]
    async fn deregister_is_idempotent() {
        let registry = ObserverRegistry::new();
        let (leaving, _leaving_inbox) = ObserverChannel::bounded(8);
        let (staying, mut staying_inbox) = ObserverChannel::bounded(8);
        let leaving_id = leaving.id();
        registry.register(leaving).await;
        registry.register(staying).await;

        assert!(registry.deregister(leaving_id).await);
        assert!(!registry.deregister(leaving_id).await);
        assert!(!registry.deregister(ObserverId::new()).await);
        assert_eq!(registry.len().await, 1);

        assert_eq!(registry.broadcast(&make_event("Ann")).await, 1);
        assert!(staying_inbox.try_recv().is_ok());
    }

    #[tokio::test]
    async fn deregistered_observer_receives_nothing() {
        let registry = ObserverRegistry::new();
        let (channel, mut inbox) = ObserverChannel::bounded(8);
        let id = channel.id();
        registry.register(channel).await;
        registry.deregister(id).await;

        assert_eq!(registry.broadcast(&make_event("Ann")).await, 0);
        assert!(inbox.try_recv().is_err());
        assert!(registry.is_empty().await);
    }
}
