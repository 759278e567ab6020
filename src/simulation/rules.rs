//! Pathway-specific gating and shunt rules.
//!
//! Two heuristics from violacein biosynthesis:
//! - VioE gate: without enough VioE the IPA imine dimer is not channelled
//!   into the violacein scaffold and flux collapses to chromopyrrolic acid.
//! - VioC shunt: when VioC is weak relative to the rest of the pathway,
//!   VioD products leak into the deoxy/chromoviridans side branch.
//!
//! References:
//! - Balibar CJ, Walsh CT. Biochemistry. 2006;45:15444-15457
//! - Füller JJ et al. J Am Chem Soc. 2016;138:9356-9365

use crate::config::RuleParameters;
use crate::error::{Error, Result};
use crate::pathway::Gene;

use super::flux::ACTIVITY_FLOOR;

/// Shunt ratio at or above which no yield is diverted
pub const SHUNT_ONSET_RATIO: f64 = 0.6;
/// Largest deficit below the onset ratio that still increases the shunt
pub const SHUNT_MAX_DEFICIT: f64 = 0.5;
/// Fraction of the deficit diverted as leak (max leak 0.35)
pub const SHUNT_DIVERSION: f64 = 0.7;

/// Gate gene role
#[derive(Debug, Clone, PartialEq)]
pub struct GateRule {
    pub gene_index: usize,
    pub gene_id: String,
    /// Activity below which the pathway collapses
    pub threshold: f64,
}

/// Shunt-prone gene role
#[derive(Debug, Clone, PartialEq)]
pub struct ShuntRule {
    pub gene_index: usize,
    pub gene_id: String,
}

/// Outcome of applying the rules to an activity vector
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleOutcome {
    /// Fraction of yield diverted, in [0, 0.35]
    pub leak: f64,
    /// Gate fired: yield is exactly zero
    pub hard_zero: bool,
    /// Advisory messages
    pub notes: Vec<String>,
}

/// Gate and shunt rules resolved against a gene set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathwayRules {
    pub gate: Option<GateRule>,
    pub shunt: Option<ShuntRule>,
}

impl PathwayRules {
    /// Resolve configured gene ids to positions in `genes`
    pub fn resolve(genes: &[Gene], params: &RuleParameters) -> Result<Self> {
        let gate = match &params.gate_gene_id {
            Some(id) => Some(GateRule {
                gene_index: find_gene(genes, id, "gate")?,
                gene_id: id.clone(),
                threshold: params.gate_threshold,
            }),
            None => None,
        };
        let shunt = match &params.shunt_gene_id {
            Some(id) => Some(ShuntRule {
                gene_index: find_gene(genes, id, "shunt")?,
                gene_id: id.clone(),
            }),
            None => None,
        };
        Ok(Self { gate, shunt })
    }

    /// Apply the gate, then (if the gate passes) the shunt
    pub fn apply(&self, activities: &[f64]) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        if let Some(gate) = &self.gate {
            let a = activities[gate.gene_index];
            if a < gate.threshold {
                outcome.hard_zero = true;
                outcome.notes.push(format!(
                    "{} below {:.2} (activity {:.3}): pathway diverts to CPA, no violacein.",
                    gate.gene_id, gate.threshold, a
                ));
                return outcome;
            }
        }

        if let Some(shunt) = &self.shunt {
            let median = median(activities) + ACTIVITY_FLOOR;
            let ratio = activities[shunt.gene_index] / median;
            outcome.leak = shunt_leak(ratio);
            if outcome.leak > 0.0 {
                outcome.notes.push(format!(
                    "Low {} relative to others (ratio {:.2}): chromoviridans shunt risk, {:.0}% diverted.",
                    shunt.gene_id,
                    ratio,
                    outcome.leak * 100.0
                ));
            }
        }

        outcome
    }
}

/// Leak fraction for a shunt gene at `ratio` of the pathway median
///
/// leak = max(0, min(0.5, 0.6 - min(ratio, 1))) × 0.7
#[inline]
pub fn shunt_leak(ratio: f64) -> f64 {
    (SHUNT_ONSET_RATIO - ratio.min(1.0)).clamp(0.0, SHUNT_MAX_DEFICIT) * SHUNT_DIVERSION
}

/// Median of a slice; mean of the two middle values for even lengths
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn find_gene(genes: &[Gene], id: &str, role: &'static str) -> Result<usize> {
    genes.iter().position(|g| g.id == id).ok_or_else(|| Error::UnknownGene {
        role,
        gene: id.to_string(),
    })
}
