//! Dose-response curves for epigenetic control modules.
//!
//! Converts a module and a control level into a fold-change on the gene's
//! baseline step capacity:
//! - Activator: Hill-shaped rise from 1 towards A_max
//! - Repressor: Hill-shaped fall from 1 + leak towards min_fold + leak
//! - Binary: step at half level (deliberately discontinuous)
//! - Neutral: always 1
//!
//! References:
//! - Hill AV. Journal of Physiology. 1910;40:iv-vii
//! - Gilbert LA et al. Cell. 2014;159:647-661 (CRISPRi/a dose response)

use crate::pathway::{Gene, Module, ModuleKind};

/// Level at or above which a binary module switches ON
pub const BINARY_ON_LEVEL: f64 = 0.5;

/// Hill term for a control level
///
/// hill(x) = x^h / (x^h + EC50^h), with x clipped to [0, 1]
///
/// Equals 0 at x = 0 and reaches 1 / (1 + EC50^h) at x = 1, so it only
/// approaches 1 as EC50 → 0.
///
/// # Arguments
/// * `x` - Control level
/// * `ec50` - Half-maximal level; must be positive
/// * `hill_n` - Hill coefficient
#[inline]
pub fn hill(x: f64, ec50: f64, hill_n: f64) -> f64 {
    let x_n = x.clamp(0.0, 1.0).powf(hill_n);
    x_n / (x_n + ec50.powf(hill_n))
}

/// Fold-change produced by `module` at `level`
///
/// The level is clipped to [0, 1] first. `module.ec50` must be positive;
/// the loader enforces this.
pub fn fold_change(module: &Module, level: f64) -> f64 {
    let level = level.clamp(0.0, 1.0);
    match module.kind {
        ModuleKind::Activator { a_max } => {
            1.0 + (a_max - 1.0) * hill(level, module.ec50, module.hill_n)
        }
        ModuleKind::Repressor { min_fold } => {
            min_fold
                + (1.0 - min_fold) / (1.0 + (level / module.ec50).powf(module.hill_n))
                + module.leak
        }
        ModuleKind::Binary => {
            let on = if level >= BINARY_ON_LEVEL { 1.0 } else { 0.0 };
            on + module.leak
        }
        ModuleKind::Neutral => 1.0,
    }
}

/// Activity vector: baseline capacity × fold-change, per gene
pub fn activities(genes: &[Gene], modules: &[&Module], levels: &[f64]) -> Vec<f64> {
    genes
        .iter()
        .zip(modules)
        .zip(levels)
        .map(|((gene, module), &level)| gene.baseline_k * fold_change(module, level))
        .collect()
}
