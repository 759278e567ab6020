//! Pathway data model.
//!
//! The gene and module tables are loaded once and frozen into a
//! [`PathwayModel`], which every evaluation borrows immutably. Gate and shunt
//! gene roles are resolved against the gene set when the model is built, so
//! the evaluation path never looks genes up by name.

pub mod configuration;
pub mod loader;
pub mod module;

pub use configuration::{Configuration, SimulationRequest};
pub use loader::{load_modules, load_pathway, MODULES_FILE, PATHWAY_FILE};
pub use module::{Module, ModuleKind};

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::config::RuleParameters;
use crate::error::{Error, Result};
use crate::simulation::rules::PathwayRules;

/// A pathway gene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gene {
    /// Gene identifier (e.g. "VioA")
    pub id: String,
    /// Intrinsic step capacity; positive
    pub baseline_k: f64,
    /// Proteome cost weight; non-negative
    pub burden_w: f64,
}

impl Gene {
    /// Create a gene
    pub fn new(id: impl Into<String>, baseline_k: f64, burden_w: f64) -> Self {
        Self {
            id: id.into(),
            baseline_k,
            burden_w,
        }
    }
}

/// Immutable gene set, module table and resolved rule roles
#[derive(Debug, Clone)]
pub struct PathwayModel {
    genes: Vec<Gene>,
    burden_weights: Vec<f64>,
    modules: Vec<Module>,
    module_index: HashMap<String, usize>,
    rules: PathwayRules,
}

impl PathwayModel {
    /// Build a model, resolving the configured gate/shunt genes.
    ///
    /// Fails if either table is empty, a module id repeats, or a configured
    /// rule gene is not part of the gene set.
    pub fn new(genes: Vec<Gene>, modules: Vec<Module>, rules: &RuleParameters) -> Result<Self> {
        if genes.is_empty() {
            return Err(Error::InvalidParameter("pathway has no genes".into()));
        }
        if modules.is_empty() {
            return Err(Error::InvalidParameter("module table is empty".into()));
        }

        let mut module_index = HashMap::with_capacity(modules.len());
        for (i, module) in modules.iter().enumerate() {
            if module_index.insert(module.id.clone(), i).is_some() {
                return Err(Error::InvalidParameter(format!("duplicate module {}", module.id)));
            }
        }

        let rules = PathwayRules::resolve(&genes, rules)?;
        let burden_weights = genes.iter().map(|g| g.burden_w).collect();

        Ok(Self {
            genes,
            burden_weights,
            modules,
            module_index,
            rules,
        })
    }

    /// Load both tables from a data directory and build the model
    pub fn load_from_dir<P: AsRef<Path>>(dir: P, rules: &RuleParameters) -> Result<Self> {
        let dir = dir.as_ref();
        let genes = load_pathway(dir.join(PATHWAY_FILE))?;
        let modules = load_modules(dir.join(MODULES_FILE))?;
        Self::new(genes, modules, rules)
    }

    /// Genes in pathway order
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Number of genes
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    /// Gene identifiers in pathway order
    pub fn gene_ids(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(|g| g.id.as_str())
    }

    /// Burden weight per gene, in pathway order
    pub fn burden_weights(&self) -> &[f64] {
        &self.burden_weights
    }

    /// Modules in table order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up a module by id
    pub fn module(&self, id: &str) -> Result<&Module> {
        self.module_index
            .get(id)
            .map(|&i| &self.modules[i])
            .ok_or_else(|| Error::UnknownModule(id.to_string()))
    }

    /// Resolved gate/shunt rules
    pub fn rules(&self) -> &PathwayRules {
        &self.rules
    }

    /// Resolve a configuration into per-gene modules, checking lengths and ids
    pub fn resolve<'a>(&'a self, config: &Configuration) -> Result<Vec<&'a Module>> {
        let n = self.genes.len();
        if config.modules.len() != n || config.levels.len() != n {
            return Err(Error::LengthMismatch {
                genes: n,
                modules: config.modules.len(),
                levels: config.levels.len(),
            });
        }
        config.modules.iter().map(|id| self.module(id)).collect()
    }
}
