//! Test clock and salt: pinned sources for fresh-seed synthesis.

use chrono::{DateTime, Utc};
use dynamath_core::clock::Clock;
use dynamath_core::seed::SaltSource;

/// A clock that always returns a fixed point in time and a fixed uptime.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>, pub u64);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn uptime_millis(&self) -> u64 {
        self.1
    }
}

/// A salt source that always returns the configured value.
#[derive(Debug, Clone, Copy)]
pub struct FixedSalt(pub Option<u32>);

impl SaltSource for FixedSalt {
    fn salt(&self) -> Option<u32> {
        self.0
    }
}
