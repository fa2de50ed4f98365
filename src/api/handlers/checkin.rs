//! Check-in submission handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CheckinRequest, StatusResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, HubError};

/// `POST /api/checkin` — Admit a check-in and notify live observers.
///
/// # Errors
///
/// Returns [`HubError::InvalidAttendeeType`] for a `type` other than guest
/// or member, and [`HubError::InvalidRequest`] for a malformed body.
#[utoipa::path(
    post,
    path = "/api/checkin",
    tag = "Check-in",
    summary = "Submit a check-in",
    description = "Validates the attendee type, appends an attendance record, and pushes it to every connected `/ws/records` observer.",
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Check-in admitted", body = StatusResponse),
        (status = 400, description = "Invalid attendee type or malformed body", body = ErrorResponse),
    )
)]
pub async fn submit_checkin(
    State(state): State<AppState>,
    payload: Result<Json<CheckinRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HubError> {
    let Json(req) = payload.map_err(|rejection| HubError::InvalidRequest(rejection.body_text()))?;

    state
        .checkin_service
        .admit(&req.name, &req.attendee_type, &req.current_time)
        .await?;

    Ok(Json(StatusResponse::success("Check-in successful")))
}

/// Check-in routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/checkin", post(submit_checkin))
}
