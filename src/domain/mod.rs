//! Domain layer: attendance records, stores, and the observer registry.
//!
//! This module holds the service's owned state: the append-only
//! [`RecordStore`], the [`ObserverRegistry`] that fans new check-ins out
//! to live WebSocket observers, the [`EventStore`] of scheduled
//! gatherings, and the static [`MemberRoster`].

pub mod attendance_record;
pub mod attendee_type;
pub mod checkin_event;
pub mod event_entry;
pub mod member_roster;
pub mod observer_id;
pub mod observer_registry;
pub mod record_store;

pub use attendance_record::AttendanceRecord;
pub use attendee_type::AttendeeType;
pub use checkin_event::CheckinEvent;
pub use event_entry::{EventEntry, EventStore};
pub use member_roster::MemberRoster;
pub use observer_id::ObserverId;
pub use observer_registry::{DeliveryError, ObserverChannel, ObserverPayload, ObserverRegistry};
pub use record_store::RecordStore;
