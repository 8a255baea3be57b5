//! Sleep interval between polls.
//!
//! Inside the peak window of the reference timezone the page is polled
//! often; outside it the watcher backs off to a long interval. The reference
//! timezone is fixed, so the host's own timezone has no effect.

use std::ops::Range;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};

use crate::error::{AppError, Result};
use crate::models::{ScheduleConfig, ScheduleMode};
use crate::utils::{fixed_offset, in_offset, now_in};

/// Chooses how long to wait before the next poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SleepPolicy {
    /// Time-of-day dependent interval.
    Adaptive {
        reference: FixedOffset,
        /// Peak hours, start inclusive, end exclusive
        peak_hours: Range<u32>,
        peak: Duration,
        off_peak: Duration,
    },
    /// Constant interval.
    Fixed(Duration),
}

impl SleepPolicy {
    /// Build a policy from settings.
    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        let policy = match config.mode {
            ScheduleMode::Fixed => Self::Fixed(Duration::from_secs(config.fixed_interval_secs)),
            ScheduleMode::Adaptive => {
                let reference = fixed_offset(config.utc_offset_minutes).ok_or_else(|| {
                    AppError::validation(format!(
                        "schedule.utc_offset_minutes {} is out of range",
                        config.utc_offset_minutes
                    ))
                })?;
                Self::Adaptive {
                    reference,
                    peak_hours: config.peak_start_hour..config.peak_end_hour,
                    peak: Duration::from_secs(config.peak_interval_secs),
                    off_peak: Duration::from_secs(config.off_peak_interval_secs),
                }
            }
        };
        Ok(policy)
    }

    /// Timezone the peak window is expressed in, if any.
    pub fn reference(&self) -> Option<&FixedOffset> {
        match self {
            Self::Adaptive { reference, .. } => Some(reference),
            Self::Fixed(_) => None,
        }
    }

    /// Interval to wait when the reference clock shows `hour`.
    pub fn interval_for_hour(&self, hour: u32) -> Duration {
        match self {
            Self::Adaptive {
                peak_hours,
                peak,
                off_peak,
                ..
            } => {
                if peak_hours.contains(&hour) {
                    *peak
                } else {
                    *off_peak
                }
            }
            Self::Fixed(interval) => *interval,
        }
    }

    /// Interval to wait after a poll finishing at `now`.
    ///
    /// `now` may be in any timezone; it is converted to the reference offset
    /// before the hour is read.
    pub fn next_interval<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Duration {
        match self {
            Self::Adaptive { reference, .. } => {
                self.interval_for_hour(in_offset(now, reference).hour())
            }
            Self::Fixed(interval) => *interval,
        }
    }

    /// Interval to wait from the current instant.
    pub fn next_interval_now(&self) -> Duration {
        match self.reference() {
            Some(reference) => self.next_interval(&now_in(reference)),
            None => self.interval_for_hour(0),
        }
    }
}
