//! Data Transfer Objects for REST request/response serialization.

pub mod checkin_dto;
pub mod event_dto;

pub use checkin_dto::*;
pub use event_dto::*;
