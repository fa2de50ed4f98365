//! Append-only in-memory store of attendance records.
//!
//! [`RecordStore`] is the single source of truth for listing and export.
//! Records are never mutated or removed; sequence order is arrival order.

use tokio::sync::{RwLock, RwLockWriteGuard};

use super::AttendanceRecord;

/// Ordered, append-only sequence of [`AttendanceRecord`]s.
///
/// # Concurrency
///
/// - Readers take a snapshot clone and never block each other.
/// - Appends are serialized by the write lock, so sequence order is the
///   order in which appenders acquired it.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<Vec<AttendanceRecord>>,
}

/// Exclusive append access to a [`RecordStore`].
///
/// Holding the guard keeps readers and other appenders out, which lets a
/// caller append and then fan the record out before anyone else appends.
#[derive(Debug)]
pub struct AppendGuard<'a> {
    records: RwLockWriteGuard<'a, Vec<AttendanceRecord>>,
}

impl AppendGuard<'_> {
    /// Appends a record and returns the new length of the store.
    pub fn push(&mut self, record: AttendanceRecord) -> usize {
        self.records.push(record);
        self.records.len()
    }
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires exclusive append access.
    pub async fn begin_append(&self) -> AppendGuard<'_> {
        AppendGuard {
            records: self.records.write().await,
        }
    }

    /// Appends a single record, returning the new length of the store.
    pub async fn append(&self, record: AttendanceRecord) -> usize {
        self.begin_append().await.push(record)
    }

    /// Returns a snapshot of every record in arrival order.
    pub async fn all(&self) -> Vec<AttendanceRecord> {
        self.records.read().await.clone()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if nothing has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
