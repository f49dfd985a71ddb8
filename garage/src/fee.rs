use chrono::NaiveDateTime;

use crate::error::ConfigError;
use crate::rates::{Amount, RateTable, RateUnit};

pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_WEEK: i64 = 604_800;

/// How many billable seconds one second on the wall clock is worth.
///
/// The simulation runs accelerated so that one real second bills as one
/// hour; set it to [`TimeScale::REAL_TIME`] to bill actual time parked.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TimeScale(u32);

impl TimeScale {
    pub const ACCELERATED: TimeScale = TimeScale(3_600);
    pub const REAL_TIME: TimeScale = TimeScale(1);

    pub fn new(multiplier: u32) -> Result<Self, ConfigError> {
        if multiplier == 0 {
            return Err(ConfigError::InvalidTimeScale);
        }
        Ok(TimeScale(multiplier))
    }

    pub fn multiplier(self) -> u32 {
        self.0
    }

    /// Whole scaled seconds between `start` and `end`. Time running
    /// backwards counts as zero.
    pub fn scaled_seconds(self, start: NaiveDateTime, end: NaiveDateTime) -> i64 {
        let elapsed_ms = (end - start).num_milliseconds().max(0);
        elapsed_ms.saturating_mul(i64::from(self.0)) / 1_000
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        TimeScale::ACCELERATED
    }
}

/// Whole weeks, days and hours in a scaled duration. Any remainder under an
/// hour is dropped.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BilledPeriod {
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
}

impl BilledPeriod {
    pub fn from_seconds(seconds: i64) -> Self {
        let seconds = seconds.max(0);
        let within_week = seconds % SECONDS_PER_WEEK;
        BilledPeriod {
            weeks: seconds / SECONDS_PER_WEEK,
            days: within_week / SECONDS_PER_DAY,
            hours: (within_week % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
        }
    }

    pub fn is_under_an_hour(&self) -> bool {
        self.weeks == 0 && self.days == 0 && self.hours == 0
    }

    /// Sum of the tiers, or the hourly rate as a one hour minimum.
    pub fn charge(&self, rates: &RateTable) -> Amount {
        if self.is_under_an_hour() {
            return rates.get(RateUnit::Hour);
        }
        Amount::from(self.weeks) * rates.get(RateUnit::Week)
            + Amount::from(self.days) * rates.get(RateUnit::Day)
            + Amount::from(self.hours) * rates.get(RateUnit::Hour)
    }
}
