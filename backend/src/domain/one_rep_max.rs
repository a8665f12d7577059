//! Estimated one-rep-max calculation.
//!
//! Uses the Epley formula: the estimated single-repetition maximum grows
//! linearly with repetitions at a slope of one thirtieth of the lifted
//! weight per rep. Bodyweight attempts (zero weight) have no meaningful
//! load axis, so they are ranked by repetitions alone.

/// Reps-to-load slope of the Epley estimate.
const EPLEY_DIVISOR: f64 = 30.0;

/// Estimate the maximum weight liftable for a single repetition.
///
/// `weight` is the lifted load and must be non-negative; `reps` must be
/// positive. Both are enforced at the validation boundary, not here.
/// A zero `weight` marks a bodyweight attempt and the estimate degrades to
/// the rep count so attempts remain comparable within that pool.
#[must_use]
pub fn estimate(weight: f64, reps: i32) -> f64 {
    if weight == 0.0 {
        return f64::from(reps);
    }
    weight * (1.0 + f64::from(reps) / EPLEY_DIVISOR)
}

/// True when the attempt carries no external load.
#[must_use]
pub fn is_bodyweight(weight: f64) -> bool {
    weight == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, 1, 103.0 + 1.0 / 3.0)]
    #[case(100.0, 5, 100.0 * (1.0 + 5.0 / 30.0))]
    #[case(60.0, 10, 80.0)]
    fn known_estimates(#[case] weight: f64, #[case] reps: i32, #[case] expected: f64) {
        let got = estimate(weight, reps);
        assert!((got - expected).abs() < 1e-9, "got {got}, want {expected}");
    }

    #[test]
    fn strictly_increasing_in_reps() {
        let mut previous = estimate(80.0, 1);
        for reps in 2..=20 {
            let next = estimate(80.0, reps);
            assert!(next > previous, "reps {reps} did not increase the estimate");
            previous = next;
        }
    }

    #[test]
    fn strictly_increasing_in_weight() {
        assert!(estimate(81.0, 5) > estimate(80.0, 5));
        assert!(estimate(100.5, 3) > estimate(100.0, 3));
    }

    #[test]
    fn bodyweight_ranks_by_reps() {
        assert_eq!(estimate(0.0, 12), 12.0);
        assert!(estimate(0.0, 13) > estimate(0.0, 12));
        assert!(is_bodyweight(0.0));
        assert!(!is_bodyweight(20.0));
    }
}
