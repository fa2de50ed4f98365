//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Resource endpoints are mounted under `/api`; `/health` sits at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "checkin-hub",
        description = "Event check-in service. New check-ins are also pushed to WebSocket observers on `/ws/records` as `{\"type\":\"new_checkin\",\"data\":{...}}`."
    ),
    paths(
        handlers::checkin::submit_checkin,
        handlers::records::list_records,
        handlers::records::export_records,
        handlers::events::create_event,
        handlers::events::list_events,
        handlers::events::list_members,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::CheckinRequest,
        dto::StatusResponse,
        dto::RecordsResponse,
        dto::CreateEventRequest,
        dto::EventsResponse,
        dto::MembersResponse,
        crate::domain::AttendanceRecord,
        crate::domain::AttendeeType,
        crate::domain::EventEntry,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Check-in", description = "Check-in submission"),
        (name = "Records", description = "Listing and export of attendance records"),
        (name = "Events", description = "Gatherings and member roster"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}
