//! Record listing and CSV export handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::RecordsResponse;
use crate::app_state::AppState;
use crate::service::csv_export;

/// `GET /api/records` — List every admitted record in arrival order.
#[utoipa::path(
    get,
    path = "/api/records",
    tag = "Records",
    summary = "List attendance records",
    description = "Returns a snapshot of every admitted record, oldest first.",
    responses(
        (status = 200, description = "All records", body = RecordsResponse),
    )
)]
pub async fn list_records(State(state): State<AppState>) -> impl IntoResponse {
    let records = state.checkin_service.all_records().await;
    Json(RecordsResponse { records })
}

/// `GET /api/export` — Download every record as CSV.
#[utoipa::path(
    get,
    path = "/api/export",
    tag = "Records",
    summary = "Export attendance as CSV",
    description = "Returns `attendance.csv` with one row per admitted record, oldest first.",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
    )
)]
pub async fn export_records(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.checkin_service.export_csv().await;
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", csv_export::FILE_NAME),
            ),
        ],
        body,
    )
}

/// Record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records))
        .route("/export", get(export_records))
}
