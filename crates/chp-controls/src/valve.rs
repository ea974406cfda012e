//! Mixing-valve flow temperature regulator.
//!
//! A PID loop with:
//! - Dead zone on the error
//! - Gated integration: the integral is frozen while `|error| <= reset_band`
//! - Integral clamped to `[-100, 100]`
//! - Output clamped to `[0, 100]` % and slew-rate limited per tick
//!
//! The plant behind the valve is modelled as a first-order lag toward the
//! mix of boiler and return temperature selected by the valve opening.

use crate::error::{ControlError, ControlResult};
use chp_core::{TimeStep, ensure_finite, ensure_non_negative};
use serde::{Deserialize, Serialize};

/// Symmetric bound of the integral accumulator.
pub const INTEGRAL_LIMIT: f64 = 100.0;
/// Lower bound of the valve opening (%).
pub const OUTPUT_MIN: f64 = 0.0;
/// Upper bound of the valve opening (%).
pub const OUTPUT_MAX: f64 = 100.0;

/// Thermal model of the mixed heating circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixingCircuitModel {
    /// Boiler (hot side) temperature (°C).
    pub boiler_temp: f64,
    /// Return line temperature (°C).
    pub return_temp: f64,
    /// Fraction of the gap to the mixed temperature closed per tick, in (0, 1].
    pub lag_coefficient: f64,
}

impl Default for MixingCircuitModel {
    fn default() -> Self {
        Self {
            boiler_temp: 95.0,
            return_temp: 30.0,
            lag_coefficient: 0.04,
        }
    }
}

impl MixingCircuitModel {
    /// Temperature downstream of the valve at `opening`.
    pub fn mixed_temp(&self, opening: ValveCommand) -> f64 {
        let alpha = opening.fraction();
        alpha * self.boiler_temp + (1.0 - alpha) * self.return_temp
    }
}

/// Regulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValveControllerConfig {
    /// Proportional gain (%/K).
    pub kp: f64,
    /// Integral gain (%/(K·s)).
    pub ki: f64,
    /// Derivative gain (%·s/K).
    pub kd: f64,
    /// Errors with magnitude below this are treated as zero (K).
    pub dead_zone: f64,
    /// Integration only runs while `|error|` exceeds this (K).
    pub reset_band: f64,
    /// Maximum change of the valve opening per tick (%).
    pub max_delta: f64,
    /// Controlled circuit.
    pub circuit: MixingCircuitModel,
}

impl Default for ValveControllerConfig {
    fn default() -> Self {
        Self {
            kp: 2.0,
            ki: 0.15,
            kd: 0.0,
            dead_zone: 0.3,
            reset_band: 0.2,
            max_delta: 5.0,
            circuit: MixingCircuitModel::default(),
        }
    }
}

impl ValveControllerConfig {
    pub fn validate(&self) -> ControlResult<()> {
        ensure_non_negative(self.kp, "kp must be finite and non-negative")?;
        ensure_non_negative(self.ki, "ki must be finite and non-negative")?;
        ensure_non_negative(self.kd, "kd must be finite and non-negative")?;
        ensure_non_negative(self.dead_zone, "dead_zone must be finite and non-negative")?;
        ensure_non_negative(self.reset_band, "reset_band must be finite and non-negative")?;
        ensure_non_negative(self.max_delta, "max_delta must be finite and non-negative")?;
        let lag = self.circuit.lag_coefficient;
        if !(lag > 0.0 && lag <= 1.0) {
            return Err(ControlError::Configuration {
                what: "lag_coefficient must be in (0, 1]",
            });
        }
        ensure_finite(self.circuit.boiler_temp, "boiler_temp must be finite")?;
        ensure_finite(self.circuit.return_temp, "return_temp must be finite")?;
        Ok(())
    }
}

/// Valve opening in percent, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct ValveCommand(f64);

impl ValveCommand {
    pub const CLOSED: ValveCommand = ValveCommand(OUTPUT_MIN);
    pub const OPEN: ValveCommand = ValveCommand(OUTPUT_MAX);

    /// Clamp `pct` into the valid opening range.
    pub fn saturating(pct: f64) -> Self {
        Self(pct.clamp(OUTPUT_MIN, OUTPUT_MAX))
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    /// Opening as a fraction in `[0, 1]`.
    pub fn fraction(self) -> f64 {
        self.0 / OUTPUT_MAX
    }
}

/// Regulator memory carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlLoopState {
    /// Integral accumulator, within `[-100, 100]`.
    pub integral: f64,
    /// Dead-zoned error of the previous tick.
    pub last_error: f64,
    /// Opening commanded on the previous tick.
    pub last_output: ValveCommand,
}

/// Simulated state of the controlled circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantThermalState {
    /// Flow temperature (°C).
    pub flow_temp: f64,
}

/// Result of one regulator tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValveTick {
    pub command: ValveCommand,
    pub flow_temp: f64,
}

/// Closed-loop mixing-valve controller.
///
/// Owns its loop and plant state; `tick` takes `&mut self`, so a single
/// instance can never be advanced from two places at once.
#[derive(Debug, Clone)]
pub struct MixingValveController {
    config: ValveControllerConfig,
    state: ControlLoopState,
    thermal: PlantThermalState,
}

impl MixingValveController {
    /// Create a controller with a closed valve and zeroed loop memory.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Configuration`] for out-of-range gains or
    /// limits, or a non-finite initial flow temperature.
    pub fn new(config: ValveControllerConfig, initial_flow_temp: f64) -> ControlResult<Self> {
        config.validate()?;
        if !initial_flow_temp.is_finite() {
            return Err(ControlError::Configuration {
                what: "initial flow temperature must be finite",
            });
        }
        Ok(Self {
            config,
            state: ControlLoopState::default(),
            thermal: PlantThermalState {
                flow_temp: initial_flow_temp,
            },
        })
    }

    pub fn config(&self) -> &ValveControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &ControlLoopState {
        &self.state
    }

    pub fn thermal(&self) -> &PlantThermalState {
        &self.thermal
    }

    pub fn flow_temp(&self) -> f64 {
        self.thermal.flow_temp
    }

    /// Advance the loop and the simulated circuit by one step toward `setpoint`.
    pub fn tick(&mut self, setpoint: f64, dt: TimeStep) -> ValveTick {
        let cfg = &self.config;
        let dt_s = dt.seconds();

        let mut error = setpoint - self.thermal.flow_temp;
        if error.abs() < cfg.dead_zone {
            error = 0.0;
        }

        // Frozen, not clamped, inside the reset band.
        if error.abs() > cfg.reset_band {
            self.state.integral += error * dt_s;
        }
        self.state.integral = self.state.integral.clamp(-INTEGRAL_LIMIT, INTEGRAL_LIMIT);

        let derivative = (error - self.state.last_error) / dt_s;
        self.state.last_error = error;

        let raw = ValveCommand::saturating(
            cfg.kp * error + cfg.ki * self.state.integral + cfg.kd * derivative,
        );

        let last = self.state.last_output.percent();
        let delta = (raw.percent() - last).clamp(-cfg.max_delta, cfg.max_delta);
        let command = ValveCommand::saturating(last + delta);
        self.state.last_output = command;

        let mixed = cfg.circuit.mixed_temp(command);
        self.thermal.flow_temp += (mixed - self.thermal.flow_temp) * cfg.circuit.lag_coefficient;

        tracing::trace!(
            setpoint,
            error,
            integral = self.state.integral,
            valve_pct = command.percent(),
            flow_temp = self.thermal.flow_temp,
            "valve tick"
        );

        ValveTick {
            command,
            flow_temp: self.thermal.flow_temp,
        }
    }
}
