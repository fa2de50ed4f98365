//! Check-in service: admits submissions and notifies observers.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    AttendanceRecord, AttendeeType, CheckinEvent, EventEntry, EventStore, MemberRoster,
    ObserverRegistry, RecordStore,
};
use crate::error::HubError;

use super::csv_export;

/// Orchestration layer for check-ins, listing, and export.
///
/// Owns handles to the [`RecordStore`] and [`ObserverRegistry`]. Admission
/// follows the pattern: validate → stamp → append → broadcast → return.
#[derive(Debug, Clone)]
pub struct CheckinService {
    records: Arc<RecordStore>,
    observers: Arc<ObserverRegistry>,
    events: Arc<EventStore>,
    roster: MemberRoster,
}

impl CheckinService {
    /// Creates a new `CheckinService`.
    #[must_use]
    pub fn new(
        records: Arc<RecordStore>,
        observers: Arc<ObserverRegistry>,
        events: Arc<EventStore>,
        roster: MemberRoster,
    ) -> Self {
        Self {
            records,
            observers,
            events,
            roster,
        }
    }

    /// Returns a reference to the inner [`ObserverRegistry`].
    #[must_use]
    pub fn observers(&self) -> &Arc<ObserverRegistry> {
        &self.observers
    }

    /// Returns a reference to the inner [`RecordStore`].
    #[must_use]
    pub fn records(&self) -> &Arc<RecordStore> {
        &self.records
    }

    /// Admits one check-in.
    ///
    /// The record is stamped and appended before it is broadcast, and the
    /// store stays locked until the broadcast has been queued, so every
    /// observer sees `new_checkin` events in store order and a listing
    /// taken after an event was observed already contains its record.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidAttendeeType`] if `attendee_type` is not
    /// `guest` or `member` (any case). Nothing is stored or broadcast.
    pub async fn admit(
        &self,
        name: &str,
        attendee_type: &str,
        current_time: &str,
    ) -> Result<AttendanceRecord, HubError> {
        let attendee_type: AttendeeType = attendee_type.parse()?;

        let mut appender = self.records.begin_append().await;
        let record = AttendanceRecord::new(name, attendee_type, current_time, Utc::now());
        let total = appender.push(record.clone());

        let event = CheckinEvent::NewCheckin(record);
        let delivered = self.observers.broadcast(&event).await;
        drop(appender);

        tracing::info!(
            attendee = name,
            attendee_type = %attendee_type,
            total,
            delivered,
            "check-in admitted"
        );
        let CheckinEvent::NewCheckin(record) = event;
        Ok(record)
    }

    /// Returns every admitted record in arrival order.
    pub async fn all_records(&self) -> Vec<AttendanceRecord> {
        self.records.all().await
    }

    /// Renders every admitted record as CSV.
    pub async fn export_csv(&self) -> String {
        let records = self.records.all().await;
        tracing::info!(records = records.len(), "exporting attendance");
        csv_export::render(&records)
    }

    /// Creates a new gathering.
    pub async fn create_event(&self, name: &str, date: &str) -> EventEntry {
        let entry = self.events.create(name, date).await;
        tracing::info!(event_name = name, date, "event created");
        entry
    }

    /// Returns all created gatherings.
    pub async fn list_events(&self) -> Vec<EventEntry> {
        self.events.all().await
    }

    /// Returns the configured member names.
    #[must_use]
    pub fn members(&self) -> &[String] {
        self.roster.names()
    }
}
