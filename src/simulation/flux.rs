//! Bottleneck flux aggregation.
//!
//! Core flux is a power-mean soft-min over gene activities, which tracks the
//! slowest step while staying smooth for the sensitivity derivatives. The
//! exogenous supply cap is applied on top.

/// Floor applied to activities before they enter a reciprocal or logarithm
pub const ACTIVITY_FLOOR: f64 = 1e-9;

/// Soft-min of positive values
///
/// Fcore = (Σ max(a_i, ε)^-p)^(-1/p)
///
/// Evaluated relative to the smallest value so large `p` cannot overflow the
/// sum; the result never exceeds the minimum.
pub fn softmin(values: &[f64], p: f64) -> f64 {
    let floored = values.iter().map(|&v| v.max(ACTIVITY_FLOOR));
    let min = floored.clone().fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return min;
    }
    let sum: f64 = floored.map(|v| (v / min).powf(-p)).sum();
    min * sum.powf(-1.0 / p)
}

/// Core flux and supply-capped flux
///
/// Returns `(Fcore, F)` with F = min(Fcore, supply_cap).
pub fn aggregate(activities: &[f64], p: f64, supply_cap: f64) -> (f64, f64) {
    let fcore = softmin(activities, p);
    (fcore, fcore.min(supply_cap))
}

/// Index of the smallest activity; the first one wins ties.
///
/// This is the hard minimum and can differ from the gene dominating the
/// soft-min when activities are close.
pub fn bottleneck_index(activities: &[f64]) -> usize {
    let mut best = 0;
    for (i, &a) in activities.iter().enumerate().skip(1) {
        if a < activities[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmin_below_min() {
        let values = [0.7, 1.3, 2.0, 0.9, 5.0];
        for p in [1.0, 4.0, 6.0, 8.0, 50.0] {
            let f = softmin(&values, p);
            assert!(f <= 0.7, "p={}: softmin {} exceeds min", p, f);
            assert!(f > 0.0);
        }
        // Higher p is closer to the hard minimum
        assert!(softmin(&values, 50.0) > softmin(&values, 4.0));
        assert!((softmin(&values, 200.0) - 0.7).abs() < 1e-2);
    }

    #[test]
    fn test_softmin_of_equal_values() {
        // N equal values a give a * N^(-1/p)
        let f = softmin(&[2.0; 5], 6.0);
        assert!((f - 2.0 * 5f64.powf(-1.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_softmin_floors_zero() {
        let f = softmin(&[0.0, 1.0, 1.0], 6.0);
        assert!(f > 0.0);
        assert!(f <= ACTIVITY_FLOOR);
    }

    #[test]
    fn test_supply_cap() {
        let (fcore, f) = aggregate(&[10.0, 10.0], 6.0, 2.0);
        assert!(fcore > 2.0);
        assert_eq!(f, 2.0);

        let (fcore, f) = aggregate(&[0.5, 0.5], 6.0, 2.0);
        assert_eq!(f, fcore);
    }

    #[test]
    fn test_bottleneck_first_on_ties() {
        assert_eq!(bottleneck_index(&[2.0, 2.0, 2.0]), 0);
        assert_eq!(bottleneck_index(&[2.0, 1.0, 1.0, 3.0]), 1);
    }
}
