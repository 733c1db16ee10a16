//! Pinned clock for tests.

use chrono::{DateTime, Utc};
use folio_core::clock::Clock;

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Stops the clock at an RFC 3339 timestamp such as
    /// `2026-01-15T10:00:00Z`.
    ///
    /// # Panics
    ///
    /// Panics if `rfc3339` does not parse.
    #[must_use]
    pub fn at(rfc3339: &str) -> Self {
        let instant = DateTime::parse_from_rfc3339(rfc3339)
            .unwrap_or_else(|e| panic!("invalid fixed clock timestamp {rfc3339:?}: {e}"));
        Self(instant.with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
