//! Time sources for validation timestamps

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamp stamped on results when no real clock is wired in
pub const PLACEHOLDER_TIMESTAMP: &str = "2025-11-27T12:00:00Z";

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock frozen at a single instant, for reproducible results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at [`PLACEHOLDER_TIMESTAMP`]
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_TIMESTAMP.parse().unwrap_or_default())
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// RFC 3339 with second precision and a `Z` suffix
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
