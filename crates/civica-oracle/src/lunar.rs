//! The portal's moon.

use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Which quarter of a (simplified, 28-day) lunar cycle a date falls in.
///
/// This is decoration, not astronomy: the cycle restarts every 28 days of
/// the month and ignores the real moon entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarPhase {
    New,
    Waxing,
    Full,
    Waning,
}

impl LunarPhase {
    /// Length of the simplified cycle, in days.
    pub const CYCLE_DAYS: u32 = 28;

    /// Buckets a day of the month into a quarter.
    ///
    /// `(day % 28) / 28 * 4` gives the position in the cycle in quarters;
    /// `[0, 1)` is new, `[1, 2)` waxing, `[2, 3)` full, `[3, 4)` waning.
    /// With whole days that is just `(day % 28) / 7`.
    pub fn from_day_of_month(day: u32) -> Self {
        match (day % Self::CYCLE_DAYS) / (Self::CYCLE_DAYS / 4) {
            0 => Self::New,
            1 => Self::Waxing,
            2 => Self::Full,
            _ => Self::Waning,
        }
    }

    /// The phase on the calendar day of `at`, in `at`'s own time zone.
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self::from_day_of_month(at.day())
    }

    /// The phase today, by the local clock.
    pub fn today() -> Self {
        Self::at(&Local::now())
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Waxing => write!(f, "waxing"),
            Self::Full => write!(f, "full"),
            Self::Waning => write!(f, "waning"),
        }
    }
}
