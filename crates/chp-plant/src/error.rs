//! Error types for plant-level operations.

use thiserror::Error;

/// Errors raised while configuring or driving the plant.
#[derive(Error, Debug)]
pub enum PlantError {
    #[error("Control error: {0}")]
    Control(#[from] chp_controls::ControlError),

    #[error("Invalid argument: {0}")]
    Core(#[from] chp_core::CoreError),

    #[error("Validation error: {what}")]
    Validation { what: String },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type PlantResult<T> = Result<T, PlantError>;
