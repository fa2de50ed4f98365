//! Known member names offered to the member check-in page.

/// Names used when `MEMBER_ROSTER` is not configured.
pub const DEFAULT_MEMBERS: [&str; 10] = [
    "Alice Smith",
    "Bob Jones",
    "Charlie Brown",
    "David Wilson",
    "Eva Green",
    "Frank White",
    "Grace Lee",
    "Henry Ford",
    "Ivy Chen",
    "Jack Black",
];

/// Read-only list of member names, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRoster {
    names: Vec<String>,
}

impl MemberRoster {
    /// Builds a roster from the given names, dropping blanks.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Parses a comma-separated list such as `"Ann Lee, Bo Kim"`.
    #[must_use]
    pub fn from_csv_list(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Returns the member names in roster order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for MemberRoster {
    fn default() -> Self {
        Self::new(DEFAULT_MEMBERS)
    }
}
