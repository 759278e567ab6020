//! VioFlux - epigenetic tuning simulator for the violacein pathway
//!
//! Estimates a dimensionless production yield for a five-gene pathway
//! (VioA, VioB, VioE, VioD, VioC) from a per-gene choice of epigenetic
//! control module and level, with a bottleneck/penalty decomposition,
//! per-gene sensitivities and an exhaustive OFF/MED/ON grid search.

pub mod config;
pub mod error;
pub mod export;
pub mod pathway;
pub mod simulation;

pub use config::Parameters;
pub use error::{Error, Result};
pub use pathway::{Configuration, Gene, Module, ModuleKind, PathwayModel, SimulationRequest};
pub use simulation::{
    grid_search, simulate, GridEntry, GridSearch, GridSearchResult, SimulationResult,
    YieldEvaluator,
};
