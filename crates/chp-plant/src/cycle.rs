//! One evaluation of the plant switching pipeline.
//!
//! signals + time → status; outdoor log → average; outdoor/room readings →
//! heating-curve setpoint; all of it → switch command.

use crate::error::PlantResult;
use chp_controls::{
    DecisionConfig, HeatingCurveParameters, PlantDecisionEngine, PlantSignals, PlantStatus,
    SwitchCommand, ThreeDayTemperatureLog, average_three_day, compute_heating_curve,
    evaluate_status,
};
use chp_core::HourOfDay;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Live sensor values for one cycle (°C).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    pub outdoor_temp: f64,
    pub room_temp_measured: f64,
    pub room_temp_target: f64,
    pub flow_temp_measured: f64,
}

/// Everything decided in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleOutcome {
    pub status: PlantStatus,
    pub averaged_outdoor_temp: f64,
    pub curve_setpoint: f64,
    pub command: SwitchCommand,
}

#[derive(Debug, Clone)]
pub struct ControlCycle {
    curve: HeatingCurveParameters,
    engine: PlantDecisionEngine,
}

impl ControlCycle {
    pub fn new(curve: HeatingCurveParameters, decision: DecisionConfig) -> PlantResult<Self> {
        curve.validate()?;
        let engine = PlantDecisionEngine::new(decision)?;
        Ok(Self { curve, engine })
    }

    pub fn curve(&self) -> &HeatingCurveParameters {
        &self.curve
    }

    /// Evaluate the pipeline at `at`.
    ///
    /// # Errors
    ///
    /// A heating-curve domain error aborts the cycle; no command is produced.
    pub fn evaluate(
        &self,
        signals: PlantSignals,
        log: &ThreeDayTemperatureLog,
        readings: &SensorReadings,
        at: NaiveTime,
    ) -> PlantResult<CycleOutcome> {
        let status = evaluate_status(signals, at);
        let averaged_outdoor_temp = average_three_day(log);
        let curve_setpoint = compute_heating_curve(
            readings.outdoor_temp,
            readings.room_temp_measured,
            readings.room_temp_target,
            &self.curve,
            HourOfDay::from(at),
        )?;
        let command = self.engine.decide(
            &status,
            averaged_outdoor_temp,
            curve_setpoint,
            readings.flow_temp_measured,
        );

        match command {
            SwitchCommand::On { setpoint } => {
                tracing::info!(%status, setpoint, "CHP switch on")
            }
            SwitchCommand::Off => tracing::info!(%status, "CHP switch off"),
        }

        Ok(CycleOutcome {
            status,
            averaged_outdoor_temp,
            curve_setpoint,
            command,
        })
    }
}
