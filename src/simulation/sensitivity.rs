//! Finite-difference sensitivity of yield to each gene's activity.
//!
//! Each activity is nudged up and down by a multiplicative step with the
//! others held fixed, and the central difference is taken in log-activity:
//!
//! d_i = (Y_up - Y_dn) / (ln(a_i (1 + ε)) - ln(max(1e-9, a_i (1 - ε))))
//!
//! Negative derivatives are clamped to zero and the rest scaled so the most
//! influential gene reads 1.

use super::evaluator::YieldEvaluator;
use super::flux::ACTIVITY_FLOOR;

/// Raw central log-derivatives, one per gene, before clamping
///
/// A perturbed branch that trips the gate contributes a yield of exactly 0.
pub fn log_derivatives(evaluator: &YieldEvaluator<'_>, activities: &[f64], step: f64) -> Vec<f64> {
    let mut perturbed = activities.to_vec();
    let mut derivatives = Vec::with_capacity(activities.len());

    for (i, &a) in activities.iter().enumerate() {
        let up = a * (1.0 + step);
        let down = (a * (1.0 - step)).max(ACTIVITY_FLOOR);

        perturbed[i] = up;
        let y_up = evaluator.yield_of(&perturbed);
        perturbed[i] = down;
        let y_dn = evaluator.yield_of(&perturbed);
        perturbed[i] = a;

        derivatives.push((y_up - y_dn) / (up.ln() - down.ln()));
    }

    derivatives
}

/// Clamp to non-negative and scale so the maximum is 1
///
/// All zeros when no derivative is positive.
pub fn normalize(derivatives: &[f64]) -> Vec<f64> {
    let clamped: Vec<f64> = derivatives.iter().map(|&d| d.max(0.0)).collect();
    let scale = clamped.iter().copied().fold(ACTIVITY_FLOOR, f64::max);
    clamped.into_iter().map(|d| d / scale).collect()
}

/// Normalized per-gene influence in [0, 1], in gene order
pub fn sensitivities(evaluator: &YieldEvaluator<'_>, activities: &[f64], step: f64) -> Vec<f64> {
    normalize(&log_derivatives(evaluator, activities, step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuleParameters, SimulationParameters};
    use crate::pathway::{Gene, Module, PathwayModel};

    fn model() -> PathwayModel {
        let genes = ["VioA", "VioB", "VioE", "VioD", "VioC"]
            .iter()
            .map(|id| Gene::new(*id, 1.0, 1.0))
            .collect();
        PathwayModel::new(genes, vec![Module::neutral("Neutral")], &RuleParameters::default())
            .unwrap()
    }

    #[test]
    fn test_normalize_max_is_one() {
        let normalized = normalize(&[0.2, -0.5, 0.8, 0.4]);
        assert_eq!(normalized, vec![0.25, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_normalize_all_negative() {
        let normalized = normalize(&[-0.2, -1.0, 0.0]);
        assert!(normalized.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_bottleneck_gene_dominates() {
        let model = model();
        let params = SimulationParameters {
            gamma_burden: 0.0,
            ..SimulationParameters::default()
        };
        let evaluator = YieldEvaluator::new(&model, &params);
        let activities = [1.0, 1.0, 1.0, 0.4, 1.0];

        let sens = sensitivities(&evaluator, &activities, 0.05);
        assert_eq!(sens.len(), 5);
        assert_eq!(sens[3], 1.0);
        for (i, &s) in sens.iter().enumerate() {
            assert!((0.0..=1.0).contains(&s), "gene {} influence {} out of range", i, s);
        }
    }

    #[test]
    fn test_zero_activity_is_finite() {
        let model = model();
        let params = SimulationParameters::default();
        let evaluator = YieldEvaluator::new(&model, &params);

        let raw = log_derivatives(&evaluator, &[1.0, 0.0, 1.0, 1.0, 1.0], 0.05);
        assert!(raw.iter().all(|d| !d.is_nan()));
    }
}
