//! Type-safe identifier for a live observer connection.

use std::fmt;

use serde::Serialize;

/// Identifies one observer channel inside the [`super::ObserverRegistry`].
///
/// Wraps a UUID v4 minted when the connection is accepted. It is never sent
/// to the peer; it exists so the connection can deregister itself and so
/// log lines can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObserverId(uuid::Uuid);

impl ObserverId {
    /// Creates a new random `ObserverId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
