//! Per-request configuration: one module and one level per gene.

use serde::{Deserialize, Serialize};

use crate::config::Parameters;

/// Module assignment and control level for every gene, in pathway order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Module id per gene
    pub modules: Vec<String>,
    /// Activation/repression level per gene, conventionally in [0, 1]
    pub levels: Vec<f64>,
}

impl Configuration {
    /// Create a configuration from per-gene modules and levels
    pub fn new(modules: Vec<String>, levels: Vec<f64>) -> Self {
        Self { modules, levels }
    }

    /// Same module and level on every one of `n_genes` genes
    pub fn uniform(module_id: &str, level: f64, n_genes: usize) -> Self {
        Self {
            modules: vec![module_id.to_string(); n_genes],
            levels: vec![level; n_genes],
        }
    }
}

/// Simulation request body: a configuration plus optional knob overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Module id per gene
    pub modules: Vec<String>,
    /// Level per gene
    pub levels: Vec<f64>,
    #[serde(default)]
    pub supply_cap: Option<f64>,
    #[serde(default)]
    pub gamma_burden: Option<f64>,
    #[serde(default)]
    pub p_softmin: Option<f64>,
}

impl SimulationRequest {
    /// Split into a configuration and the parameters with overrides applied
    pub fn into_parts(self, base: &Parameters) -> (Configuration, Parameters) {
        let mut params = base.clone();
        if let Some(supply_cap) = self.supply_cap {
            params.simulation.supply_cap = supply_cap;
        }
        if let Some(gamma_burden) = self.gamma_burden {
            params.simulation.gamma_burden = gamma_burden;
        }
        if let Some(p_softmin) = self.p_softmin {
            params.simulation.p_softmin = p_softmin;
        }
        (Configuration::new(self.modules, self.levels), params)
    }
}
