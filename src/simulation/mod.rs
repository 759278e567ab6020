//! Yield simulation engine.
//!
//! Pipeline for one configuration:
//! 1. module(level) → fold-change per gene (`dose_response`)
//! 2. activities a_i = k_i × fold_i
//! 3. soft-min core flux, capped by upstream supply (`flux`)
//! 4. imbalance and burden penalties (`penalty`)
//! 5. VioE gate and VioC shunt (`rules`)
//! 6. yield = F × P × (1 - leak) × Q (`evaluator`)
//! 7. per-gene log-sensitivities (`sensitivity`)
//!
//! `grid_search` reruns steps 1-6 over a discretized level grid.
//!
//! All functions are pure over an immutable [`PathwayModel`] and
//! [`Parameters`]; repeated calls return bit-identical results.

pub mod dose_response;
pub mod evaluator;
pub mod flux;
pub mod grid_search;
pub mod penalty;
pub mod rules;
pub mod sensitivity;

pub use dose_response::{fold_change, hill};
pub use evaluator::{Evaluation, YieldEvaluator};
pub use flux::softmin;
pub use grid_search::{GridEntry, GridSearch, GridSearchResult};
pub use penalty::BurdenPenalty;
pub use rules::{PathwayRules, RuleOutcome};

use serde::Serialize;

use crate::config::Parameters;
use crate::error::Result;
use crate::pathway::{Configuration, PathwayModel};

/// Flux snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluxSummary {
    /// Soft-min core flux
    #[serde(rename = "Fcore")]
    pub fcore: f64,
    /// Supply-capped flux
    #[serde(rename = "F")]
    pub flux: f64,
    /// Gene with the lowest activity (first on ties)
    pub bottleneck_gene: String,
}

/// Normalized influence of one gene on yield
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneInfluence {
    pub gene: String,
    /// In [0, 1]; the most influential gene reads 1
    pub influence: f64,
}

/// Full result of simulating one configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    #[serde(rename = "yield")]
    pub yield_value: f64,
    pub flux: FluxSummary,
    /// Gene order matches the pathway
    pub sensitivities: Vec<GeneInfluence>,
    pub burden: BurdenPenalty,
    pub imbalance_penalty: f64,
    /// Shunt leak fraction
    pub leak: f64,
    /// Activity per gene, pathway order
    pub activities: Vec<f64>,
    pub notes: Vec<String>,
}

/// Simulate one configuration: yield, decomposition and sensitivities
pub fn simulate(
    model: &PathwayModel,
    config: &Configuration,
    params: &Parameters,
) -> Result<SimulationResult> {
    let modules = model.resolve(config)?;
    let activities = dose_response::activities(model.genes(), &modules, &config.levels);

    let evaluator = YieldEvaluator::new(model, &params.simulation);
    let eval = evaluator.evaluate(&activities);

    let influence = if eval.hard_zero {
        vec![0.0; activities.len()]
    } else {
        sensitivity::sensitivities(&evaluator, &activities, params.sensitivity.step)
    };

    let gene_ids: Vec<&str> = model.gene_ids().collect();
    log::debug!(
        "Simulated {:?}: yield {:.4}, bottleneck {}",
        config.levels,
        eval.yield_value,
        gene_ids[eval.bottleneck]
    );

    Ok(SimulationResult {
        yield_value: eval.yield_value,
        flux: FluxSummary {
            fcore: eval.fcore,
            flux: eval.flux,
            bottleneck_gene: gene_ids[eval.bottleneck].to_string(),
        },
        sensitivities: gene_ids
            .iter()
            .zip(influence)
            .map(|(gene, influence)| GeneInfluence {
                gene: gene.to_string(),
                influence,
            })
            .collect(),
        burden: eval.burden,
        imbalance_penalty: eval.imbalance_penalty,
        leak: eval.leak,
        activities,
        notes: eval.notes,
    })
}

/// Run the OFF/MED/ON grid search configured in `params.grid`
pub fn grid_search(model: &PathwayModel, params: &Parameters) -> Result<GridSearchResult> {
    GridSearch::new(model, &params.simulation, &params.grid)?.run(params.grid.top_k)
}
