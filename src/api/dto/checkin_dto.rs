//! Check-in and record DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AttendanceRecord;

/// Request body for `POST /api/checkin`.
///
/// Field names follow the check-in pages: `type` and `currentTime`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckinRequest {
    /// Name of the person checking in.
    pub name: String,
    /// `guest` or `member`, any case.
    #[serde(rename = "type")]
    pub attendee_type: String,
    /// Client clock at check-in, stored verbatim.
    #[serde(rename = "currentTime")]
    pub current_time: String,
}

/// Generic acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Always `"success"`.
    pub status: String,
    /// Human-readable outcome.
    pub message: String,
}

impl StatusResponse {
    /// Builds a `"success"` acknowledgement.
    #[must_use]
    pub fn success(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }
}

/// Response body for `GET /api/records`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordsResponse {
    /// Every admitted record in arrival order.
    pub records: Vec<AttendanceRecord>,
}
