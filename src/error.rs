//! Error types for pathway loading and simulation.
//!
//! The numerical core never fails on numbers (zero activities and medians are
//! floored with a small epsilon); everything here is a configuration or data
//! problem detected before the pipeline runs.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the simulation boundary
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown module: {0}")]
    UnknownModule(String),

    #[error("unknown gene for {role} role: {gene}")]
    UnknownGene { role: &'static str, gene: String },

    #[error("length mismatch: {genes} genes, {modules} modules, {levels} levels")]
    LengthMismatch {
        genes: usize,
        modules: usize,
        levels: usize,
    },

    #[error("missing columns in {}: {columns:?}", path.display())]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("invalid data in {}: {message}", path.display())]
    InvalidData { path: PathBuf, message: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
