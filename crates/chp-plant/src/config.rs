//! Plant configuration document.
//!
//! Every section has defaults, so a YAML file only needs the values that
//! differ. Loading always validates.

use crate::cycle::ControlCycle;
use crate::error::{PlantError, PlantResult};
use crate::sim::{SetpointProfile, SimOptions};
use chp_controls::{
    DecisionConfig, HeatingCurveParameters, MixingValveController, PlantDecisionEngine,
    SettlingConfig, SettlingTimeAnalyzer, ValveControllerConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    pub heating_curve: HeatingCurveParameters,
    pub decision: DecisionConfig,
    pub valve: ValveControllerConfig,
    /// Flow temperature of the simulated circuit at start-up (°C).
    pub initial_flow_temp: f64,
    pub settling: SettlingConfig,
    pub simulation: SimOptions,
    pub setpoint: SetpointProfile,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            heating_curve: HeatingCurveParameters::default(),
            decision: DecisionConfig::default(),
            valve: ValveControllerConfig::default(),
            initial_flow_temp: 28.0,
            settling: SettlingConfig::default(),
            simulation: SimOptions::default(),
            setpoint: SetpointProfile::default(),
        }
    }
}

impl PlantConfig {
    pub fn from_yaml_str(content: &str) -> PlantResult<Self> {
        let config: PlantConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_yaml(path: &Path) -> PlantResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded plant configuration");
        Ok(config)
    }

    pub fn validate(&self) -> PlantResult<()> {
        self.heating_curve.validate()?;
        self.valve.validate()?;
        if !self.initial_flow_temp.is_finite() {
            return Err(PlantError::Validation {
                what: format!("initial_flow_temp must be finite, got {}", self.initial_flow_temp),
            });
        }
        PlantDecisionEngine::new(self.decision)?;
        SettlingTimeAnalyzer::new(self.settling)?;
        self.simulation.validate()?;
        self.setpoint.validate()?;
        Ok(())
    }

    pub fn controller(&self) -> PlantResult<MixingValveController> {
        Ok(MixingValveController::new(
            self.valve.clone(),
            self.initial_flow_temp,
        )?)
    }

    pub fn control_cycle(&self) -> PlantResult<ControlCycle> {
        ControlCycle::new(self.heating_curve.clone(), self.decision)
    }

    pub fn settling_analyzer(&self) -> PlantResult<SettlingTimeAnalyzer> {
        Ok(SettlingTimeAnalyzer::new(self.settling)?)
    }
}
