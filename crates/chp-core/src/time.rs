//! Explicit time inputs for the control kernel.
//!
//! Nothing in the kernel reads a wall clock. Callers hand in the hour of
//! day (or a `NaiveTime` it is derived from) and the fixed control step.

use crate::error::{CoreError, CoreResult};
use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Hour of the day, always in `0..=23`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct HourOfDay(u8);

impl HourOfDay {
    pub fn new(hour: u8) -> CoreResult<Self> {
        if hour > 23 {
            return Err(CoreError::InvalidArg {
                what: "hour must be in 0..=23",
            });
        }
        Ok(Self(hour))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `true` for `[start, end)`; wraps past midnight when `start > end`.
    pub fn in_window(self, start: u8, end: u8) -> bool {
        if start <= end {
            self.0 >= start && self.0 < end
        } else {
            self.0 >= start || self.0 < end
        }
    }
}

impl From<NaiveTime> for HourOfDay {
    fn from(t: NaiveTime) -> Self {
        // chrono guarantees hour() < 24
        Self(t.hour() as u8)
    }
}

impl TryFrom<u8> for HourOfDay {
    type Error = CoreError;

    fn try_from(hour: u8) -> CoreResult<Self> {
        Self::new(hour)
    }
}

impl From<HourOfDay> for u8 {
    fn from(h: HourOfDay) -> Self {
        h.0
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Fixed control-loop time step in seconds (finite, strictly positive).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct TimeStep(f64);

impl TimeStep {
    pub const ONE_SECOND: TimeStep = TimeStep(1.0);

    pub fn new(dt_s: f64) -> CoreResult<Self> {
        if !dt_s.is_finite() {
            return Err(CoreError::NonFinite {
                what: "time step",
                value: dt_s,
            });
        }
        if dt_s <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "time step must be positive",
            });
        }
        Ok(Self(dt_s))
    }

    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TimeStep {
    type Error = CoreError;

    fn try_from(dt_s: f64) -> CoreResult<Self> {
        Self::new(dt_s)
    }
}

impl From<TimeStep> for f64 {
    fn from(dt: TimeStep) -> Self {
        dt.0
    }
}
