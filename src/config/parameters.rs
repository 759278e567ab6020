//! Parameter structures for the yield model.
//!
//! Defaults reproduce the tuning used by the violacein pathway tool; every
//! block can be overridden from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Top-level parameters container
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Flux aggregation and penalty knobs
    pub simulation: SimulationParameters,
    /// Pathway-specific gate/shunt rules
    pub rules: RuleParameters,
    /// Finite-difference sensitivity settings
    pub sensitivity: SensitivityParameters,
    /// Grid search discretization
    pub grid: GridParameters,
    /// Directory holding the pathway and module tables
    pub data_dir: PathBuf,
}

impl Parameters {
    /// Load parameters from a JSON file, or use defaults if it can't be read
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Parameters file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Load parameters from a JSON file, failing on any I/O or parse error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&contents)?;
        params.validate()?;
        log::info!("Loaded parameters from {:?}", path);
        Ok(params)
    }

    /// Check ranges that the numerical core assumes
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.rules.validate()?;
        self.sensitivity.validate()?;
        self.grid.validate()
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            simulation: SimulationParameters::default(),
            rules: RuleParameters::default(),
            sensitivity: SensitivityParameters::default(),
            grid: GridParameters::default(),
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Flux aggregation, supply and penalty parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Exogenous upstream supply ceiling on flux
    pub supply_cap: f64,
    /// Burden sensitivity γ
    pub gamma_burden: f64,
    /// Soft-min exponent p (higher is closer to a hard minimum)
    pub p_softmin: f64,
    /// Ratio to core flux above which a gene counts as accumulating (s)
    pub imbalance_threshold: f64,
    /// Exponential decay rate of the imbalance penalty (α)
    pub imbalance_alpha: f64,
}

impl SimulationParameters {
    fn validate(&self) -> Result<()> {
        if !(self.supply_cap.is_finite() && self.supply_cap > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "supply_cap must be positive, got {}",
                self.supply_cap
            )));
        }
        if !(self.p_softmin.is_finite() && self.p_softmin > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "p_softmin must be positive, got {}",
                self.p_softmin
            )));
        }
        if !(self.gamma_burden.is_finite() && self.gamma_burden >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "gamma_burden must be non-negative, got {}",
                self.gamma_burden
            )));
        }
        if !(self.imbalance_threshold.is_finite() && self.imbalance_threshold >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "imbalance_threshold must be non-negative, got {}",
                self.imbalance_threshold
            )));
        }
        // Keeps the imbalance penalty in (0, 1]
        if !(self.imbalance_alpha.is_finite() && self.imbalance_alpha >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "imbalance_alpha must be non-negative, got {}",
                self.imbalance_alpha
            )));
        }
        Ok(())
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            supply_cap: 2.0,
            gamma_burden: 0.05,
            p_softmin: 6.0,
            imbalance_threshold: 2.0,
            imbalance_alpha: 0.15,
        }
    }
}

/// Gate and shunt gene roles
///
/// A role set to `None` disables its rule. Configured ids must exist in the
/// loaded gene set; the model refuses to build otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParameters {
    /// Gene whose collapse diverts the whole pathway (VioE)
    pub gate_gene_id: Option<String>,
    /// Gene whose relative weakness opens a side shunt (VioC)
    pub shunt_gene_id: Option<String>,
    /// Gate activity below which yield is zero
    pub gate_threshold: f64,
}

impl RuleParameters {
    fn validate(&self) -> Result<()> {
        if !(self.gate_threshold.is_finite() && self.gate_threshold >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "gate_threshold must be non-negative, got {}",
                self.gate_threshold
            )));
        }
        Ok(())
    }
}

impl Default for RuleParameters {
    fn default() -> Self {
        Self {
            gate_gene_id: Some("VioE".to_string()),
            shunt_gene_id: Some("VioC".to_string()),
            gate_threshold: 0.10,
        }
    }
}

/// Sensitivity analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityParameters {
    /// Multiplicative perturbation applied up and down to each activity
    pub step: f64,
}

impl SensitivityParameters {
    fn validate(&self) -> Result<()> {
        if !(self.step > 0.0 && self.step < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "sensitivity step must be in (0, 1), got {}",
                self.step
            )));
        }
        Ok(())
    }
}

impl Default for SensitivityParameters {
    fn default() -> Self {
        Self { step: 0.05 }
    }
}

/// Grid search discretization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParameters {
    /// Representative levels tried for every gene (OFF/MED/ON)
    pub levels: Vec<f64>,
    /// Number of ranked combinations returned
    pub top_k: usize,
    /// Module applied to every gene; first loaded module when unset or unknown
    pub module_id: Option<String>,
}

impl GridParameters {
    fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::InvalidParameter("grid levels must not be empty".into()));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidParameter("grid top_k must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            levels: vec![0.05, 0.5, 1.0],
            top_k: 20,
            module_id: Some("CRISPRa_Ec".to_string()),
        }
    }
}
