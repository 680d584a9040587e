//! Clock abstraction for fresh-seed synthesis.

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Abstraction over system time so seed synthesis can be pinned in tests.
pub trait Clock: Send + Sync {
    /// Returns the current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns a high-resolution monotonic reading in milliseconds.
    ///
    /// Only the low 32 bits are mixed into seeds, so the epoch is irrelevant.
    fn uptime_millis(&self) -> u64 {
        0
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    /// Creates a clock whose monotonic reading starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn uptime_millis(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
