//! JSON export of simulation reports.

use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::simulation::SimulationResult;

use super::finite_or_none;

/// Report format version
pub const REPORT_VERSION: &str = "1.0.0";

/// Serialisable simulation report with non-finite floats as `null`
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    #[serde(rename = "yield")]
    pub yield_value: Option<f64>,
    pub flux: FluxReport,
    /// `[gene, influence]` pairs in pathway order
    pub sensitivities: Vec<(String, Option<f64>)>,
    pub burden: BurdenReport,
    pub imbalance_penalty: Option<f64>,
    pub leak: Option<f64>,
    pub activities: Vec<Option<f64>>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FluxReport {
    #[serde(rename = "Fcore")]
    pub fcore: Option<f64>,
    #[serde(rename = "F")]
    pub flux: Option<f64>,
    pub bottleneck_gene: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BurdenReport {
    pub phi: Option<f64>,
    pub penalty: Option<f64>,
}

impl From<&SimulationResult> for SimulationReport {
    fn from(r: &SimulationResult) -> Self {
        Self {
            exported_at: Local::now().to_rfc3339(),
            version: REPORT_VERSION,
            yield_value: finite_or_none(r.yield_value),
            flux: FluxReport {
                fcore: finite_or_none(r.flux.fcore),
                flux: finite_or_none(r.flux.flux),
                bottleneck_gene: r.flux.bottleneck_gene.clone(),
            },
            sensitivities: r
                .sensitivities
                .iter()
                .map(|s| (s.gene.clone(), finite_or_none(s.influence)))
                .collect(),
            burden: BurdenReport {
                phi: finite_or_none(r.burden.phi),
                penalty: finite_or_none(r.burden.penalty),
            },
            imbalance_penalty: finite_or_none(r.imbalance_penalty),
            leak: finite_or_none(r.leak),
            activities: r.activities.iter().map(|&a| finite_or_none(a)).collect(),
            notes: r.notes.clone(),
        }
    }
}

impl SimulationReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Export a simulation result to a JSON file
pub fn export_report_json<P: AsRef<Path>>(result: &SimulationResult, path: P) -> Result<()> {
    let path = path.as_ref();
    let report = SimulationReport::from(result);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let file = std::fs::File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(file, &report)?;

    log::info!("JSON report exported: {}", path.display());
    Ok(())
}
