//! CHP switching decision.

use crate::error::{ControlError, ControlResult};
use crate::status::PlantStatus;
use serde::{Deserialize, Serialize};

/// Decision configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Averaged outdoor temperature must be strictly below this (°C).
    pub outdoor_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            outdoor_threshold: 16.0,
        }
    }
}

/// Switch command emitted once per control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SwitchCommand {
    On { setpoint: f64 },
    Off,
}

impl SwitchCommand {
    pub fn is_on(&self) -> bool {
        matches!(self, SwitchCommand::On { .. })
    }

    /// Flow setpoint to regulate to, only while switched on.
    pub fn setpoint(&self) -> Option<f64> {
        match *self {
            SwitchCommand::On { setpoint } => Some(setpoint),
            SwitchCommand::Off => None,
        }
    }
}

/// Switches on only when all three conditions hold: the plant status is
/// running, the averaged outdoor temperature is below the threshold, and
/// the measured flow temperature is below the curve setpoint.
pub fn decide(
    status: &PlantStatus,
    averaged_outdoor_temp: f64,
    curve_setpoint: f64,
    measured_flow_temp: f64,
    threshold: f64,
) -> SwitchCommand {
    let running = status.is_running();
    let cold_enough = averaged_outdoor_temp < threshold;
    let demand = measured_flow_temp < curve_setpoint;

    let command = if running && cold_enough && demand {
        SwitchCommand::On {
            setpoint: curve_setpoint,
        }
    } else {
        SwitchCommand::Off
    };
    tracing::debug!(
        running,
        cold_enough,
        demand,
        on = command.is_on(),
        "switch decision"
    );
    command
}

/// Stateless decision engine bound to a configured threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantDecisionEngine {
    config: DecisionConfig,
}

impl PlantDecisionEngine {
    pub fn new(config: DecisionConfig) -> ControlResult<Self> {
        if !config.outdoor_threshold.is_finite() {
            return Err(ControlError::Configuration {
                what: "outdoor_threshold must be finite",
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn decide(
        &self,
        status: &PlantStatus,
        averaged_outdoor_temp: f64,
        curve_setpoint: f64,
        measured_flow_temp: f64,
    ) -> SwitchCommand {
        decide(
            status,
            averaged_outdoor_temp,
            curve_setpoint,
            measured_flow_temp,
            self.config.outdoor_threshold,
        )
    }
}
