//! Settling detection on recorded temperature traces.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// Settling criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlingConfig {
    /// Allowed deviation from the target (K).
    pub tolerance: f64,
    /// Number of consecutive samples that must stay within tolerance.
    pub stable_duration: usize,
}

impl Default for SettlingConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            stable_duration: 30,
        }
    }
}

/// First index `i >= start` such that every sample in
/// `[i, i + stable_duration)` lies within `tolerance` of `target`.
///
/// A window that would run past the end of the trace never qualifies.
pub fn find_settling_index(
    trace: &[f64],
    start: usize,
    target: f64,
    tolerance: f64,
    stable_duration: usize,
) -> Option<usize> {
    // The sample at `i` itself must always be inside tolerance.
    let needed = stable_duration.max(1);
    let mut run_start = None;

    for (i, sample) in trace.iter().enumerate().skip(start) {
        if (sample - target).abs() <= tolerance {
            let first = *run_start.get_or_insert(i);
            if i + 1 - first >= needed {
                return Some(first);
            }
        } else {
            run_start = None;
        }
    }
    None
}

/// Settling detector bound to a validated criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlingTimeAnalyzer {
    config: SettlingConfig,
}

impl SettlingTimeAnalyzer {
    pub fn new(config: SettlingConfig) -> ControlResult<Self> {
        if !config.tolerance.is_finite() || config.tolerance < 0.0 {
            return Err(ControlError::Configuration {
                what: "settling tolerance must be finite and non-negative",
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SettlingConfig {
        &self.config
    }

    pub fn find(&self, trace: &[f64], start: usize, target: f64) -> Option<usize> {
        find_settling_index(
            trace,
            start,
            target,
            self.config.tolerance,
            self.config.stable_duration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10 samples far from 40 °C, then `hold` samples at 40.2 °C, then far again.
    fn trace_with_plateau(hold: usize, tail: usize) -> Vec<f64> {
        let mut t = vec![30.0; 10];
        t.extend(std::iter::repeat_n(40.2, hold));
        t.extend(std::iter::repeat_n(35.0, tail));
        t
    }

    #[test]
    fn sustained_plateau_settles_at_its_start() {
        let trace = trace_with_plateau(35, 5);
        assert_eq!(find_settling_index(&trace, 0, 40.0, 0.5, 30), Some(10));
    }

    #[test]
    fn brief_touch_does_not_settle() {
        let trace = trace_with_plateau(5, 50);
        assert_eq!(find_settling_index(&trace, 0, 40.0, 0.5, 30), None);
    }

    #[test]
    fn window_running_past_end_does_not_settle() {
        let trace = trace_with_plateau(29, 0);
        assert_eq!(find_settling_index(&trace, 0, 40.0, 0.5, 30), None);
        let exact = trace_with_plateau(30, 0);
        assert_eq!(find_settling_index(&exact, 0, 40.0, 0.5, 30), Some(10));
    }

    #[test]
    fn start_index_skips_earlier_samples() {
        let trace = trace_with_plateau(40, 0);
        assert_eq!(find_settling_index(&trace, 15, 40.0, 0.5, 30), Some(15));
        assert_eq!(find_settling_index(&trace, 200, 40.0, 0.5, 30), None);
    }

    #[test]
    fn dip_restarts_the_window() {
        let mut trace = vec![40.0; 50];
        trace[20] = 45.0;
        assert_eq!(find_settling_index(&trace, 0, 40.0, 0.5, 25), Some(21));
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let trace = vec![40.5; 5];
        assert_eq!(find_settling_index(&trace, 0, 40.0, 0.5, 5), Some(0));
    }

    #[test]
    fn zero_duration_needs_one_sample_in_band() {
        let trace = vec![30.0, 40.1, 30.0];
        assert_eq!(find_settling_index(&trace, 0, 40.0, 0.5, 0), Some(1));
    }

    #[test]
    fn analyzer_rejects_negative_tolerance() {
        assert!(SettlingTimeAnalyzer::new(SettlingConfig {
            tolerance: -0.1,
            stable_duration: 3
        })
        .is_err());
        let analyzer = SettlingTimeAnalyzer::new(SettlingConfig::default()).unwrap();
        assert_eq!(analyzer.find(&trace_with_plateau(35, 0), 0, 40.0), Some(10));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn reported_index_has_a_full_stable_window(
            trace in prop::collection::vec(38.0_f64..42.0, 0..120),
            start in 0usize..60,
            duration in 1usize..40,
        ) {
            if let Some(i) = find_settling_index(&trace, start, 40.0, 0.5, duration) {
                prop_assert!(i >= start);
                prop_assert!(i + duration <= trace.len());
                prop_assert!(trace[i..i + duration].iter().all(|t| (t - 40.0).abs() <= 0.5));
                // no earlier qualifying index
                for j in start..i {
                    let ok = j + duration <= trace.len()
                        && trace[j..j + duration].iter().all(|t| (t - 40.0).abs() <= 0.5);
                    prop_assert!(!ok);
                }
            }
        }
    }
}
