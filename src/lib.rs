//! # checkin-hub
//!
//! Event check-in service with a real-time feed of new attendance records.
//!
//! Clients submit check-ins over REST; every admitted record is appended to
//! an in-memory store and pushed to all WebSocket observers connected to
//! `/ws/records`. The records can be listed or exported as CSV.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Observer connections (ws/)
//!     │
//!     ├── CheckinService (service/)
//!     │
//!     ├── RecordStore (domain/)
//!     └── ObserverRegistry (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
