//! Mock implementations of port traits

use std::sync::RwLock;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::ports::Clock;

// ============================================================================
// Manual Clock
// ============================================================================

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Start at [`ManualClock::start`]
    pub fn new() -> Self {
        Self::starting_at(Self::start())
    }

    /// 2024-01-01T00:00:00Z
    pub fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.write().unwrap() += by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap() = now;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}
