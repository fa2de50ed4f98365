//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::HubConfig;
use crate::domain::{EventStore, ObserverRegistry, RecordStore};
use crate::service::CheckinService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Check-in service for all business logic.
    pub checkin_service: Arc<CheckinService>,
    /// Registry that observer connections join and leave.
    pub observers: Arc<ObserverRegistry>,
    /// Runtime configuration.
    pub config: Arc<HubConfig>,
    /// Flips to `true` when the process is shutting down.
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// Builds fresh stores and wires them into a new state.
    ///
    /// Returns the state together with the sender that triggers shutdown.
    #[must_use]
    pub fn new(config: HubConfig) -> (Self, watch::Sender<bool>) {
        let records = Arc::new(RecordStore::new());
        let observers = Arc::new(ObserverRegistry::new());
        let events = Arc::new(EventStore::new());

        let checkin_service = Arc::new(CheckinService::new(
            records,
            Arc::clone(&observers),
            events,
            config.member_roster.clone(),
        ));

        let (shutdown_tx, shutdown) = watch::channel(false);
        let state = Self {
            checkin_service,
            observers,
            config: Arc::new(config),
            shutdown,
        };
        (state, shutdown_tx)
    }
}
