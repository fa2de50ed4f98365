//! REST endpoint handlers organized by resource.

pub mod checkin;
pub mod events;
pub mod records;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(checkin::routes())
        .merge(records::routes())
        .merge(events::routes())
}
