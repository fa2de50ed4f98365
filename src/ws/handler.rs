//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_observer;
use crate::app_state::AppState;

/// `GET /ws/records` — Upgrade to a receive-only feed of new check-ins.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let observers = Arc::clone(&state.observers);
    let config = Arc::clone(&state.config);
    let shutdown = state.shutdown.clone();

    ws.on_upgrade(move |socket| async move {
        run_observer(socket, observers, config, shutdown).await;
    })
}
