//! chp-plant: drives the CHP control kernel.
//!
//! Contains:
//! - config (YAML plant configuration with defaults and validation)
//! - cycle (status → outdoor average → heating curve → switch command)
//! - sim (closed-loop valve simulation with an owned trace buffer)
//! - heat (heating-circuit heat output and load-based flow temperature)
//! - error (plant-level error type)

pub mod config;
pub mod cycle;
pub mod error;
pub mod heat;
pub mod sim;

pub use config::PlantConfig;
pub use cycle::{ControlCycle, CycleOutcome, SensorReadings};
pub use error::{PlantError, PlantResult};
pub use heat::{Medium, flow_temp_for_load, heat_load, heat_output};
pub use sim::{
    MAX_SIM_STEPS, SetpointProfile, SetpointStep, SimOptions, SimSample, SimTrace, run_closed_loop,
};
