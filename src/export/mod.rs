//! Export functionality for simulation output.
//!
//! Provides CSV export of grid-search rankings and JSON export of single
//! simulation reports. Non-finite floats become nulls/empty cells here, at
//! the boundary, never inside the engine.

mod csv_export;
mod json_export;

pub use csv_export::{write_grid_csv, write_grid_csv_to};
pub use json_export::{
    export_report_json, BurdenReport, FluxReport, SimulationReport, REPORT_VERSION,
};

/// `Some(value)` for finite floats, `None` for NaN and ±∞
#[inline]
pub fn finite_or_none(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
