//! Attendee classification for a check-in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::HubError;

/// Whether the person checking in is a guest or a member.
///
/// Parsed case-insensitively from submissions (`"Guest"`, `"MEMBER"`, ...)
/// and always serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeType {
    /// A visitor who is not on the member roster.
    Guest,
    /// A registered member.
    Member,
}

impl AttendeeType {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for AttendeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendeeType {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "member" => Ok(Self::Member),
            _ => Err(HubError::InvalidAttendeeType(s.to_string())),
        }
    }
}
