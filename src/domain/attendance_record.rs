//! The immutable attendance record produced by an admitted check-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AttendeeType;

/// One admitted check-in.
///
/// Records carry no identity of their own; their position in the
/// [`super::RecordStore`] is their only ordering key. Field names on the
/// wire follow the check-in client: `timestamp` is the caller's clock,
/// `received_at` is the server's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    /// Name as submitted.
    pub name: String,
    /// Guest or member.
    #[serde(rename = "type")]
    pub attendee_type: AttendeeType,
    /// Client-supplied time of the check-in, stored verbatim.
    #[serde(rename = "timestamp")]
    pub client_timestamp: String,
    /// Wall-clock time at which the record was appended.
    #[serde(rename = "received_at")]
    pub server_received_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Builds a record stamped with the given server time.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        attendee_type: AttendeeType,
        client_timestamp: impl Into<String>,
        server_received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            attendee_type,
            client_timestamp: client_timestamp.into(),
            server_received_at,
        }
    }
}
