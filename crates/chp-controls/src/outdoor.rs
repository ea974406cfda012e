//! Three-day outdoor temperature log.
//!
//! Three days, three readings each (07:00, 14:00, 21:00). The averaged
//! value is what the switching decision compares against its threshold.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of days in the log.
pub const DAYS: usize = 3;
/// Readings per day.
pub const SAMPLES_PER_DAY: usize = 3;

/// Validated outdoor temperature log keyed by day `1..=3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<u8, Vec<f64>>",
    into = "BTreeMap<u8, Vec<f64>>"
)]
pub struct ThreeDayTemperatureLog {
    days: [[f64; SAMPLES_PER_DAY]; DAYS],
}

impl ThreeDayTemperatureLog {
    /// Build from already-shaped readings, day 1 first.
    pub fn from_days(days: [[f64; SAMPLES_PER_DAY]; DAYS]) -> Self {
        Self { days }
    }

    /// Readings of `day` (1-based), or `None` outside `1..=3`.
    pub fn day(&self, day: u8) -> Option<&[f64; SAMPLES_PER_DAY]> {
        let idx = usize::from(day).checked_sub(1)?;
        self.days.get(idx)
    }

    pub fn daily_means(&self) -> [f64; DAYS] {
        self.days
            .map(|samples| samples.iter().sum::<f64>() / SAMPLES_PER_DAY as f64)
    }
}

impl TryFrom<BTreeMap<u8, Vec<f64>>> for ThreeDayTemperatureLog {
    type Error = ControlError;

    fn try_from(map: BTreeMap<u8, Vec<f64>>) -> ControlResult<Self> {
        let keys: Vec<u8> = map.keys().copied().collect();
        if keys != [1, 2, 3] {
            return Err(ControlError::InvalidStructure {
                what: format!("expected days 1, 2 and 3, got {keys:?}"),
            });
        }

        let mut days = [[0.0; SAMPLES_PER_DAY]; DAYS];
        for (slot, (day, samples)) in days.iter_mut().zip(&map) {
            if samples.len() != SAMPLES_PER_DAY {
                return Err(ControlError::InvalidStructure {
                    what: format!(
                        "day {day} needs exactly {SAMPLES_PER_DAY} readings, got {}",
                        samples.len()
                    ),
                });
            }
            slot.copy_from_slice(samples);
        }
        Ok(Self { days })
    }
}

impl From<ThreeDayTemperatureLog> for BTreeMap<u8, Vec<f64>> {
    fn from(log: ThreeDayTemperatureLog) -> Self {
        (1u8..)
            .zip(log.days)
            .map(|(day, samples)| (day, samples.to_vec()))
            .collect()
    }
}

/// Mean outdoor temperature over the whole log.
pub fn average_three_day(log: &ThreeDayTemperatureLog) -> f64 {
    let means = log.daily_means();
    let avg = means.iter().sum::<f64>() / DAYS as f64;
    tracing::debug!(?means, avg, "three-day outdoor average");
    avg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(u8, &[f64])]) -> BTreeMap<u8, Vec<f64>> {
        entries.iter().map(|(k, v)| (*k, v.to_vec())).collect()
    }

    #[test]
    fn average_of_sample_week() {
        let log = ThreeDayTemperatureLog::from_days([
            [12.2, 12.1, 12.4],
            [12.0, 12.3, 12.7],
            [12.8, 12.5, 12.0],
        ]);
        assert!((average_three_day(&log) - 111.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn map_with_valid_shape_is_accepted() {
        let log = ThreeDayTemperatureLog::try_from(map(&[
            (1, &[15.2, 20.1, 17.4]),
            (2, &[16.0, 21.3, 18.7]),
            (3, &[14.8, 19.5, 17.0]),
        ]))
        .unwrap();
        assert_eq!(log.day(2), Some(&[16.0, 21.3, 18.7]));
        assert_eq!(log.day(0), None);
        assert_eq!(log.day(4), None);
    }

    #[test]
    fn wrong_keys_rejected() {
        let err = ThreeDayTemperatureLog::try_from(map(&[
            (1, &[1.0, 2.0, 3.0]),
            (2, &[1.0, 2.0, 3.0]),
            (4, &[1.0, 2.0, 3.0]),
        ]))
        .unwrap_err();
        assert!(matches!(err, ControlError::InvalidStructure { .. }));

        let missing = ThreeDayTemperatureLog::try_from(map(&[
            (1, &[1.0, 2.0, 3.0]),
            (2, &[1.0, 2.0, 3.0]),
        ]));
        assert!(missing.is_err());
    }

    #[test]
    fn wrong_sample_count_rejected() {
        let err = ThreeDayTemperatureLog::try_from(map(&[
            (1, &[1.0, 2.0, 3.0]),
            (2, &[1.0, 2.0]),
            (3, &[1.0, 2.0, 3.0]),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ControlError::InvalidStructure {
                what: "day 2 needs exactly 3 readings, got 2".to_string()
            }
        );
    }

    #[test]
    fn back_to_map_keeps_day_order() {
        let log = ThreeDayTemperatureLog::from_days([[1.0; 3], [2.0; 3], [3.0; 3]]);
        let m: BTreeMap<u8, Vec<f64>> = log.into();
        assert_eq!(m[&1], vec![1.0; 3]);
        assert_eq!(m[&3], vec![3.0; 3]);
    }
}
