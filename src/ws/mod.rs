//! WebSocket layer: the real-time check-in feed.
//!
//! The endpoint at `/ws/records` is receive-only from the client's point of
//! view: each connection joins the observer registry and is pushed a
//! `new_checkin` message for every admitted record.

pub mod connection;
pub mod handler;
