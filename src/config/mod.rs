//! Configuration module for loading simulation parameters.
//!
//! Parameters are plain serde structs with defaults, optionally read from a
//! JSON file at startup and passed by reference into every evaluation.

mod parameters;

pub use parameters::{
    GridParameters, Parameters, RuleParameters, SensitivityParameters, SimulationParameters,
};
