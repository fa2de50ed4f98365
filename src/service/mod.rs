//! Service layer: business logic orchestration.
//!
//! [`CheckinService`] admits check-ins, appends them to the
//! [`super::domain::RecordStore`], and fans them out through the
//! [`super::domain::ObserverRegistry`].

pub mod checkin_service;
pub mod csv_export;

pub use checkin_service::CheckinService;
