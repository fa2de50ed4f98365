//! Check-in events (meetings) created by the organiser.
//!
//! These are the gatherings people check in to, not the real-time
//! [`super::CheckinEvent`] messages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// A scheduled gathering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EventEntry {
    /// Event name.
    pub name: String,
    /// Event date as entered by the organiser.
    pub date: String,
    /// Server time the event was created.
    pub created_at: DateTime<Utc>,
}

/// Append-only list of created events.
#[derive(Debug, Default)]
pub struct EventStore {
    events: RwLock<Vec<EventEntry>>,
}

impl EventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new event and returns it.
    pub async fn create(&self, name: impl Into<String>, date: impl Into<String>) -> EventEntry {
        let entry = EventEntry {
            name: name.into(),
            date: date.into(),
            created_at: Utc::now(),
        };
        self.events.write().await.push(entry.clone());
        entry
    }

    /// Returns all events in creation order.
    pub async fn all(&self) -> Vec<EventEntry> {
        self.events.read().await.clone()
    }
}
