//! Event (gathering) and member roster DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EventEntry;

/// Request body for `POST /api/events`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Event name.
    pub name: String,
    /// Event date as entered by the organiser.
    pub date: String,
}

/// Response body for `GET /api/events`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventsResponse {
    /// Events in creation order.
    pub events: Vec<EventEntry>,
}

/// Response body for `GET /api/members`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MembersResponse {
    /// Member names in roster order.
    pub members: Vec<String>,
}
