//! checkin-hub server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use tracing_subscriber::EnvFilter;

use checkin_hub::app_state::AppState;
use checkin_hub::config::{HubConfig, LogFormat};
use checkin_hub::server::{build_app, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = HubConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let listen_addr = config.listen_addr;
    tracing::info!(
        addr = %listen_addr,
        members = config.member_roster.names().len(),
        heartbeat = ?config.heartbeat_interval,
        idle_timeout = ?config.idle_timeout,
        "starting checkin-hub"
    );

    // Build state and router
    let (app_state, shutdown_tx) = AppState::new(config);
    let app = build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
