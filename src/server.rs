//! Application assembly: router, middleware, and shutdown signalling.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::{self, ApiDoc};
use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the full application: REST routes, the `/ws/records` observer
/// feed, API docs, and the HTTP middleware stack.
pub fn build_app(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout;

    let router = Router::new()
        .merge(api::build_router())
        .route("/ws/records", get(ws_handler));

    with_api_docs(router)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(feature = "swagger-ui")]
fn with_api_docs(router: Router<AppState>) -> Router<AppState> {
    router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn with_api_docs(router: Router<AppState>) -> Router<AppState> {
    router.route(
        OPENAPI_PATH,
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    )
}

/// Resolves on Ctrl-C or SIGTERM and then flips `shutdown_tx` to `true`,
/// telling every observer connection to close.
pub async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
    let _ = shutdown_tx.send(true);
}
