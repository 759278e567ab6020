//! Multiplicative penalties on pathway yield.
//!
//! - Imbalance: upstream steps far faster than the core flux accumulate
//!   intermediates, penalised exponentially in the total excess ratio.
//! - Burden: total weighted activity away from the all-baseline load costs
//!   proteome capacity, penalised quadratically around that target.

use serde::Serialize;

use super::flux::ACTIVITY_FLOOR;

/// Burden load and its penalty factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurdenPenalty {
    /// Weighted total activity φ = Σ w_i a_i
    pub phi: f64,
    /// Penalty factor in (0, 1]
    pub penalty: f64,
}

/// Imbalance penalty
///
/// P = exp(-α Σ max(0, a_i / (Fcore + ε) - s))
///
/// Equals 1 while every gene stays below `threshold` × Fcore.
pub fn imbalance_penalty(activities: &[f64], fcore: f64, threshold: f64, alpha: f64) -> f64 {
    let excess: f64 = activities
        .iter()
        .map(|&a| (a.max(0.0) / (fcore + ACTIVITY_FLOOR) - threshold).max(0.0))
        .sum();
    (-alpha * excess).exp()
}

/// Burden penalty
///
/// Q = 1 / (1 + γ (φ - N)^2), symmetric around φ = N.
pub fn burden_penalty(activities: &[f64], weights: &[f64], gamma: f64) -> BurdenPenalty {
    let phi: f64 = weights.iter().zip(activities).map(|(w, a)| w * a).sum();
    let target = activities.len() as f64;
    let penalty = 1.0 / (1.0 + gamma * (phi - target).powi(2));
    BurdenPenalty { phi, penalty }
}
