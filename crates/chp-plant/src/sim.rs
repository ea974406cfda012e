//! Closed-loop simulation of the mixing-valve regulator.
//!
//! The runner ticks a [`MixingValveController`] against a setpoint profile
//! and records every step into an owned [`SimTrace`].

use crate::error::{PlantError, PlantResult};
use chp_controls::{MixingValveController, SettlingTimeAnalyzer};
use chp_core::{TimeStep, whole_steps};
use serde::{Deserialize, Serialize};

/// One step of a step-shaped setpoint profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetpointStep {
    /// Time from which this value applies (s).
    pub from_s: f64,
    /// Flow temperature setpoint (°C).
    pub value: f64,
}

/// Flow temperature setpoint over simulated time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetpointProfile {
    Constant { value: f64 },
    Steps { steps: Vec<SetpointStep> },
}

impl Default for SetpointProfile {
    fn default() -> Self {
        SetpointProfile::Constant { value: 42.0 }
    }
}

impl SetpointProfile {
    pub fn validate(&self) -> PlantResult<()> {
        match self {
            SetpointProfile::Constant { value } => {
                if !value.is_finite() {
                    return Err(PlantError::Validation {
                        what: "constant setpoint must be finite".to_string(),
                    });
                }
            }
            SetpointProfile::Steps { steps } => {
                let Some(first) = steps.first() else {
                    return Err(PlantError::Validation {
                        what: "setpoint profile needs at least one step".to_string(),
                    });
                };
                if first.from_s > 0.0 {
                    return Err(PlantError::Validation {
                        what: format!("first setpoint step starts at {} s, not at 0", first.from_s),
                    });
                }
                if steps
                    .iter()
                    .any(|s| !s.from_s.is_finite() || !s.value.is_finite())
                {
                    return Err(PlantError::Validation {
                        what: "setpoint steps must be finite".to_string(),
                    });
                }
                if steps.windows(2).any(|w| w[1].from_s <= w[0].from_s) {
                    return Err(PlantError::Validation {
                        what: "setpoint steps must be strictly increasing in time".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Setpoint in force at `t_s`. Assumes a validated profile.
    pub fn value_at(&self, t_s: f64) -> f64 {
        match self {
            SetpointProfile::Constant { value } => *value,
            SetpointProfile::Steps { steps } => steps
                .iter()
                .take_while(|s| s.from_s <= t_s)
                .last()
                .or(steps.first())
                .map_or(f64::NAN, |s| s.value),
        }
    }
}

/// Upper bound on simulated ticks per run.
pub const MAX_SIM_STEPS: usize = 10_000_000;

/// Simulation length and step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    pub dt: TimeStep,
    pub duration_s: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: TimeStep::ONE_SECOND,
            duration_s: 400.0,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> PlantResult<()> {
        self.steps().map(|_| ())
    }

    /// Number of ticks needed to cover `duration_s`.
    ///
    /// # Errors
    ///
    /// [`PlantError::Validation`] when the duration is not a finite
    /// non-negative value or the count exceeds [`MAX_SIM_STEPS`].
    pub fn steps(&self) -> PlantResult<usize> {
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(PlantError::Validation {
                what: format!("duration_s must be finite and non-negative, got {}", self.duration_s),
            });
        }
        let n = whole_steps(self.duration_s, self.dt.seconds());
        if !(n <= MAX_SIM_STEPS as f64) {
            return Err(PlantError::Validation {
                what: format!(
                    "{} s at dt {} s needs more than {MAX_SIM_STEPS} steps",
                    self.duration_s,
                    self.dt.seconds()
                ),
            });
        }
        Ok(n as usize)
    }
}

/// One recorded simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimSample {
    pub time_s: f64,
    pub setpoint: f64,
    pub flow_temp: f64,
    pub valve_pct: f64,
}

/// Recorded simulation history.
#[derive(Debug, Clone, PartialEq)]
pub struct SimTrace {
    dt: TimeStep,
    samples: Vec<SimSample>,
}

impl SimTrace {
    pub fn with_capacity(dt: TimeStep, capacity: usize) -> Self {
        Self {
            dt,
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: SimSample) {
        self.samples.push(sample);
    }

    pub fn dt(&self) -> TimeStep {
        self.dt
    }

    pub fn samples(&self) -> &[SimSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&SimSample> {
        self.samples.last()
    }

    pub fn flow_temps(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.flow_temp).collect()
    }

    pub fn valve_openings(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.valve_pct).collect()
    }

    pub fn setpoints(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.setpoint).collect()
    }

    /// Sample index recorded at (or just after) `time_s`.
    pub fn index_at(&self, time_s: f64) -> usize {
        (time_s.max(0.0) / self.dt.seconds()).ceil() as usize
    }

    /// Index from which the flow temperature stays near `target`.
    pub fn settling_index(
        &self,
        analyzer: &SettlingTimeAnalyzer,
        start: usize,
        target: f64,
    ) -> Option<usize> {
        analyzer.find(&self.flow_temps(), start, target)
    }

    /// Seconds from `start_s` until the flow temperature settles on `target`.
    pub fn settling_time_s(
        &self,
        analyzer: &SettlingTimeAnalyzer,
        start_s: f64,
        target: f64,
    ) -> Option<f64> {
        let start = self.index_at(start_s);
        match self.settling_index(analyzer, start, target) {
            Some(i) => Some((i - start) as f64 * self.dt.seconds()),
            None => {
                tracing::warn!(start_s, target, "flow temperature did not settle");
                None
            }
        }
    }
}

/// Tick `controller` over the whole profile and record each step.
pub fn run_closed_loop(
    controller: &mut MixingValveController,
    profile: &SetpointProfile,
    options: &SimOptions,
) -> PlantResult<SimTrace> {
    profile.validate()?;
    let steps = options.steps()?;
    let dt = options.dt;
    let mut trace = SimTrace::with_capacity(dt, steps);

    for k in 0..steps {
        let time_s = k as f64 * dt.seconds();
        let setpoint = profile.value_at(time_s);
        let tick = controller.tick(setpoint, dt);
        trace.push(SimSample {
            time_s,
            setpoint,
            flow_temp: tick.flow_temp,
            valve_pct: tick.command.percent(),
        });
    }

    if let Some(last) = trace.last() {
        tracing::info!(
            steps,
            flow_temp = last.flow_temp,
            valve_pct = last.valve_pct,
            integral = controller.state().integral,
            "closed-loop simulation finished"
        );
    }
    Ok(trace)
}
