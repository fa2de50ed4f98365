//! Events pushed to live observers.
//!
//! A [`CheckinEvent`] is built per broadcast and never stored. Its JSON
//! shape is the observer wire format:
//!
//! ```json
//! {"type": "new_checkin", "data": {"name": "Ann", "type": "guest", "timestamp": "...", "received_at": "..."}}
//! ```

use serde::Serialize;

use super::AttendanceRecord;

/// Event broadcast to every registered observer channel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CheckinEvent {
    /// A check-in was admitted and appended to the record store.
    NewCheckin(AttendanceRecord),
}

impl CheckinEvent {
    /// Returns the event kind as it appears in the `type` field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NewCheckin(_) => "new_checkin",
        }
    }
}
