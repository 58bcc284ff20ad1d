//! Network time.
//!
//! Time instants are whole seconds since the nemesis block.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds elapsed since the nemesis block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeInstant(u32);

impl TimeInstant {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u32::MAX);

    pub fn new(secs: u32) -> Self {
        Self(secs)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn add_seconds(&self, secs: i64) -> Self {
        let shifted = i64::from(self.0).saturating_add(secs);
        Self(shifted.clamp(0, i64::from(u32::MAX)) as u32)
    }

    pub fn add_minutes(&self, minutes: i64) -> Self {
        self.add_seconds(minutes.saturating_mul(60))
    }

    pub fn add_hours(&self, hours: i64) -> Self {
        self.add_minutes(hours.saturating_mul(60))
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.add_hours(days.saturating_mul(24))
    }
}

impl fmt::Display for TimeInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
