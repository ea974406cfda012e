//! Heating curve: target flow temperature from outdoor temperature.
//!
//! `base = K * (T_ref - T_out)^n + B`, lowered by the night setback between
//! 22:00 and 06:00, optionally corrected by the room temperature deviation,
//! then clamped to the flow temperature limits.

use crate::error::{ControlError, ControlResult};
use chp_core::{HourOfDay, ensure_finite};
use serde::{Deserialize, Serialize};

/// Night setback starts at this hour (inclusive).
pub const NIGHT_START: u8 = 22;
/// Night setback ends at this hour (exclusive).
pub const NIGHT_END: u8 = 6;

/// Heating curve configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatingCurveParameters {
    /// Curve slope `K`.
    pub slope: f64,
    /// Fixed offset `B` (°C).
    pub offset: f64,
    /// Curve exponent `n`.
    pub exponent: f64,
    /// Lower flow temperature clamp (°C).
    pub min_flow_temp: f64,
    /// Upper flow temperature clamp (°C). `None` means unbounded.
    pub max_flow_temp: Option<f64>,
    /// Night setback subtracted between 22:00 and 06:00 (K).
    pub night_setback_delta: f64,
    /// Enables room temperature compensation.
    pub room_compensation: bool,
    /// Share of the room deviation added to the flow target (%).
    pub compensation_pct: f64,
    /// Normalised room temperature `T_ref` (°C).
    pub reference_room_temp: f64,
}

impl Default for HeatingCurveParameters {
    fn default() -> Self {
        Self {
            slope: 1.5,
            offset: 25.0,
            exponent: 1.2,
            min_flow_temp: 15.0,
            max_flow_temp: Some(55.0),
            night_setback_delta: 5.0,
            room_compensation: false,
            compensation_pct: 10.0,
            reference_room_temp: 20.0,
        }
    }
}

impl HeatingCurveParameters {
    /// Check that all parameters are finite and the clamp range is ordered.
    pub fn validate(&self) -> ControlResult<()> {
        ensure_finite(self.slope, "slope must be finite")?;
        ensure_finite(self.offset, "offset must be finite")?;
        ensure_finite(self.exponent, "exponent must be finite")?;
        ensure_finite(self.min_flow_temp, "min_flow_temp must be finite")?;
        ensure_finite(self.night_setback_delta, "night_setback_delta must be finite")?;
        ensure_finite(self.compensation_pct, "compensation_pct must be finite")?;
        ensure_finite(self.reference_room_temp, "reference_room_temp must be finite")?;
        if let Some(max) = self.max_flow_temp {
            ensure_finite(max, "max_flow_temp must be finite")?;
            if max < self.min_flow_temp {
                return Err(ControlError::Configuration {
                    what: "max_flow_temp must not be below min_flow_temp",
                });
            }
        }
        Ok(())
    }

    fn clamp(&self, value: f64) -> f64 {
        let lower = value.max(self.min_flow_temp);
        match self.max_flow_temp {
            Some(max) => lower.min(max),
            None => lower,
        }
    }
}

/// `true` while the night setback applies.
pub fn is_night(hour: HourOfDay) -> bool {
    hour.in_window(NIGHT_START, NIGHT_END)
}

/// Target flow temperature for the given conditions.
///
/// # Errors
///
/// Returns [`ControlError::Domain`] when `(T_ref - T_out)^n` has no real
/// value: a negative base with a non-integer exponent, or a zero base with
/// a negative exponent. Invalid `params` give [`ControlError::Configuration`].
pub fn compute_heating_curve(
    outdoor_temp: f64,
    room_temp_measured: f64,
    room_temp_target: f64,
    params: &HeatingCurveParameters,
    hour: HourOfDay,
) -> ControlResult<f64> {
    params.validate()?;
    let base = params.reference_room_temp - outdoor_temp;
    let n = params.exponent;
    if base < 0.0 && n.fract() != 0.0 {
        return Err(ControlError::Domain {
            what: "negative base with non-integer exponent",
            base,
            exponent: n,
        });
    }
    let power = base.powf(n);
    if !power.is_finite() {
        return Err(ControlError::Domain {
            what: "power is not finite",
            base,
            exponent: n,
        });
    }

    let mut flow = params.slope * power + params.offset;

    if is_night(hour) {
        flow -= params.night_setback_delta;
    }

    if params.room_compensation {
        flow += (room_temp_target - room_temp_measured) * (params.compensation_pct / 100.0);
    }

    let setpoint = params.clamp(flow);
    tracing::debug!(outdoor_temp, %hour, unclamped = flow, setpoint, "heating curve");
    Ok(setpoint)
}
