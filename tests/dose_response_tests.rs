//! Property tests for dose-response curves and flux aggregation.
//!
//! | Property | Expectation |
//! |----------|-------------|
//! | hill(0) | 0 for any EC50 > 0, h > 0 |
//! | hill on [0, 1] | monotone non-decreasing |
//! | activator fold at level 0 | exactly 1 |
//! | repressor fold | non-increasing in level |
//! | softmin | never above the minimum |

use vioflux::{
    simulation::{fold_change, hill, softmin},
    Module, ModuleKind,
};

fn grid(n: usize) -> impl Iterator<Item = f64> {
    (0..=n).map(move |i| i as f64 / n as f64)
}

// ============================================================================
// Hill Term
// ============================================================================

#[test]
fn test_hill_zero_at_origin() {
    for ec50 in [0.05, 0.3, 0.5, 1.0, 4.0] {
        for h in [0.5, 1.0, 2.0, 4.0, 8.0] {
            assert_eq!(hill(0.0, ec50, h), 0.0, "EC50={} h={}", ec50, h);
        }
    }
}

#[test]
fn test_hill_monotone_on_unit_interval() {
    for ec50 in [0.1, 0.5, 0.9] {
        for h in [1.0, 2.0, 3.5] {
            let values: Vec<f64> = grid(200).map(|x| hill(x, ec50, h)).collect();
            for pair in values.windows(2) {
                assert!(
                    pair[1] >= pair[0],
                    "hill decreased for EC50={} h={}: {} -> {}",
                    ec50,
                    h,
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn test_hill_ceiling_below_one() {
    let top = hill(1.0, 0.5, 2.0);
    assert!((top - 1.0 / (1.0 + 0.25)).abs() < 1e-12);
    assert!(top < 1.0);
}

// ============================================================================
// Fold-Change
// ============================================================================

#[test]
fn test_activator_neutral_at_zero() {
    for a_max in [1.5, 3.0, 10.0] {
        let module = Module::new("act", ModuleKind::Activator { a_max }, 0.4, 2.0, 0.3);
        // Leak does not apply to activators
        assert_eq!(fold_change(&module, 0.0), 1.0);
    }
}

#[test]
fn test_activator_rises_towards_a_max() {
    let module = Module::activator("CRISPRa_Ec", 0.01, 2.0, 3.0);
    let top = fold_change(&module, 1.0);
    assert!(top > 2.99 && top < 3.0);
}

#[test]
fn test_repressor_decreasing() {
    let module = Module::repressor("CRISPRi_dCas9", 0.3, 2.0, 0.1, 0.02);
    let folds: Vec<f64> = grid(100).map(|l| fold_change(&module, l)).collect();
    for pair in folds.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert!((folds[0] - 1.02).abs() < 1e-12);
    assert!(folds[100] > 0.1 + 0.02);
}

#[test]
fn test_binary_step_discontinuity() {
    let module = Module::binary("Methylation", 0.05);
    let below = fold_change(&module, 0.4999);
    let at = fold_change(&module, 0.5);
    assert!((at - below - 1.0).abs() < 1e-12);
}

#[test]
fn test_unknown_type_is_neutral() {
    let kind = ModuleKind::from_type("zinc-finger", Some(5.0), Some(0.0));
    let module = Module::new("ZF", kind, 0.5, 2.0, 0.4);
    for level in [0.0, 0.25, 0.5, 1.0] {
        assert_eq!(fold_change(&module, level), 1.0);
    }
}

#[test]
fn test_fold_change_never_negative() {
    let modules = [
        Module::activator("a", 0.5, 2.0, 3.0),
        Module::repressor("r", 0.3, 2.0, 0.0, 0.0),
        Module::binary("b", 0.0),
        Module::neutral("n"),
    ];
    for module in &modules {
        for level in [-5.0, -0.1, 0.0, 0.3, 0.5, 0.99, 1.0, 7.0] {
            assert!(fold_change(module, level) >= 0.0);
        }
    }
}

// ============================================================================
// Soft-Min
// ============================================================================

#[test]
fn test_softmin_never_exceeds_min() {
    let vectors: [&[f64]; 4] = [
        &[1.0, 2.0, 3.0, 4.0, 5.0],
        &[0.3, 0.3001, 2.5],
        &[10.0],
        &[1e-6, 1e3, 1.0],
    ];
    for values in vectors {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        for p in [0.5, 1.0, 4.0, 6.0, 8.0, 100.0] {
            let f = softmin(values, p);
            assert!(f <= min, "softmin {} > min {} at p={}", f, min, p);
            assert!(f > 0.0);
        }
    }
}

#[test]
fn test_softmin_large_p_does_not_underflow() {
    let f = softmin(&[0.5, 5.0, 50.0], 400.0);
    assert!((f - 0.5).abs() < 1e-6);
}
