//! Control kernel for a combined-heat-and-power plant.
//!
//! The kernel is a chain of pure or single-owner components:
//! - **Status**: interlock chain over plant signals and time of day
//! - **Outdoor log**: three-day outdoor temperature average
//! - **Heating curve**: target flow temperature from outdoor temperature
//! - **Decision**: combines the above into an on/off command
//! - **Valve**: PID mixing-valve regulator with a first-order circuit model
//! - **Settling**: post-hoc settling detection on recorded traces
//!
//! Nothing here reads a clock or performs I/O. Callers supply the time of
//! day and drive [`MixingValveController::tick`] at their own cadence.

pub mod decision;
pub mod error;
pub mod heating_curve;
pub mod outdoor;
pub mod settling;
pub mod status;
pub mod valve;

pub use decision::{DecisionConfig, PlantDecisionEngine, SwitchCommand, decide};
pub use error::{ControlError, ControlResult};
pub use heating_curve::{HeatingCurveParameters, compute_heating_curve, is_night};
pub use outdoor::{ThreeDayTemperatureLog, average_three_day};
pub use settling::{SettlingConfig, SettlingTimeAnalyzer, find_settling_index};
pub use status::{PlantSignals, PlantStatus, evaluate_status};
pub use valve::{
    ControlLoopState, MixingCircuitModel, MixingValveController, PlantThermalState,
    ValveCommand, ValveControllerConfig, ValveTick,
};
