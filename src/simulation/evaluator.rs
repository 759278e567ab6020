//! Yield evaluation from an activity vector.
//!
//! Every consumer (the base configuration, each perturbed branch of the
//! sensitivity analysis, and each grid combination) goes through
//! [`YieldEvaluator::evaluate`].

use crate::config::SimulationParameters;
use crate::pathway::PathwayModel;

use super::flux::{aggregate, bottleneck_index};
use super::penalty::{burden_penalty, imbalance_penalty, BurdenPenalty};

/// Decomposed yield for one activity vector
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Yield = F × P × (1 - leak) × Q, or 0 when the gate fires
    pub yield_value: f64,
    /// Soft-min core flux
    pub fcore: f64,
    /// Supply-capped flux (0 when the gate fires)
    pub flux: f64,
    /// Index of the hard-minimum gene
    pub bottleneck: usize,
    /// Imbalance penalty P
    pub imbalance_penalty: f64,
    /// Burden load φ and penalty Q
    pub burden: BurdenPenalty,
    /// Shunt leak fraction
    pub leak: f64,
    /// Whether the gate rule collapsed the pathway
    pub hard_zero: bool,
    /// Rule advisories
    pub notes: Vec<String>,
}

/// Pure evaluator bound to a model and a parameter set
#[derive(Debug, Clone, Copy)]
pub struct YieldEvaluator<'a> {
    model: &'a PathwayModel,
    params: &'a SimulationParameters,
}

impl<'a> YieldEvaluator<'a> {
    /// Bind an evaluator to a model and parameters
    pub fn new(model: &'a PathwayModel, params: &'a SimulationParameters) -> Self {
        Self { model, params }
    }

    /// Model this evaluator reads genes and rules from
    pub fn model(&self) -> &'a PathwayModel {
        self.model
    }

    /// Evaluate one activity vector (one entry per gene, pathway order)
    ///
    /// # Panics
    /// If `activities` is shorter than the model's gene count.
    pub fn evaluate(&self, activities: &[f64]) -> Evaluation {
        debug_assert_eq!(activities.len(), self.model.gene_count());
        let params = self.params;
        let (fcore, flux) = aggregate(activities, params.p_softmin, params.supply_cap);
        let imbalance = imbalance_penalty(
            activities,
            fcore,
            params.imbalance_threshold,
            params.imbalance_alpha,
        );
        let burden = burden_penalty(activities, self.model.burden_weights(), params.gamma_burden);
        let rules = self.model.rules().apply(activities);
        let bottleneck = bottleneck_index(activities);

        if rules.hard_zero {
            return Evaluation {
                yield_value: 0.0,
                fcore,
                flux: 0.0,
                bottleneck,
                imbalance_penalty: imbalance,
                burden,
                leak: rules.leak,
                hard_zero: true,
                notes: rules.notes,
            };
        }

        Evaluation {
            yield_value: flux * imbalance * (1.0 - rules.leak) * burden.penalty,
            fcore,
            flux,
            bottleneck,
            imbalance_penalty: imbalance,
            burden,
            leak: rules.leak,
            hard_zero: false,
            notes: rules.notes,
        }
    }

    /// Yield only
    #[inline]
    pub fn yield_of(&self, activities: &[f64]) -> f64 {
        self.evaluate(activities).yield_value
    }
}
