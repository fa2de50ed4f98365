//! Event (gathering) and member roster handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateEventRequest, EventsResponse, MembersResponse, StatusResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, HubError};

/// `POST /api/events` — Create a gathering.
///
/// # Errors
///
/// Returns [`HubError::InvalidRequest`] for a malformed body.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create an event",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = StatusResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HubError> {
    let Json(req) = payload.map_err(|rejection| HubError::InvalidRequest(rejection.body_text()))?;
    state
        .checkin_service
        .create_event(&req.name, &req.date)
        .await;
    Ok(Json(StatusResponse::success("Event created")))
}

/// `GET /api/events` — List created gatherings.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List events",
    responses(
        (status = 200, description = "Events in creation order", body = EventsResponse),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(EventsResponse {
        events: state.checkin_service.list_events().await,
    })
}

/// `GET /api/members` — List known member names.
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Events",
    summary = "List members",
    responses(
        (status = 200, description = "Member roster", body = MembersResponse),
    )
)]
pub async fn list_members(State(state): State<AppState>) -> impl IntoResponse {
    Json(MembersResponse {
        members: state.checkin_service.members().to_vec(),
    })
}

/// Event and member routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/members", get(list_members))
}
