//! Scan-agreement sensor model.
//!
//! Scores a predicted range vector against the observed one with an inverse
//! mean-absolute-difference kernel. Identical scans score 1; the score falls
//! off hyperbolically as the scans diverge and never reaches zero.

use crate::scan::RangeVector;

/// Weight assigned to a particle standing in a blocked cell.
pub const BLOCKED_WEIGHT: f64 = 1e-4;

/// Likelihood of `predicted` given the `actual` scan: `1 / (MAD + 1)`.
///
/// Every bucket takes part, unset buckets included.
#[inline]
pub fn scan_weight(actual: &RangeVector, predicted: &RangeVector) -> f64 {
    1.0 / (actual.mean_absolute_difference(predicted) + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::UNSET_RANGE;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn ranges(values: [f64; 4]) -> RangeVector {
        let mut rv = RangeVector::new(PI / 2.0);
        rv.ranges_mut().copy_from_slice(&values);
        rv
    }

    #[test]
    fn test_identical_scans_weigh_one() {
        let a = ranges([10.0, 20.0, 30.0, 40.0]);
        assert_relative_eq!(scan_weight(&a, &a), 1.0);
    }

    #[test]
    fn test_weight_decreases_with_difference() {
        let actual = ranges([10.0, 20.0, 30.0, 40.0]);
        let close = ranges([11.0, 21.0, 31.0, 41.0]);
        let far = ranges([20.0, 30.0, 40.0, 50.0]);

        assert_relative_eq!(scan_weight(&actual, &close), 0.5);
        assert_relative_eq!(scan_weight(&actual, &far), 1.0 / 11.0);
        assert!(scan_weight(&actual, &far) > 0.0);
    }

    #[test]
    fn test_unset_buckets_count() {
        let actual = ranges([10.0, 10.0, 10.0, 10.0]);
        let partial = ranges([10.0, 10.0, 10.0, UNSET_RANGE]);
        // |10 - (-1)| / 4
        assert_relative_eq!(scan_weight(&actual, &partial), 1.0 / (11.0 / 4.0 + 1.0));
    }

    #[test]
    fn test_blocked_weight_below_any_plausible_score() {
        let actual = ranges([1000.0, 1000.0, 1000.0, 1000.0]);
        let worst = ranges([UNSET_RANGE; 4]);
        assert!(BLOCKED_WEIGHT < scan_weight(&actual, &worst));
    }
}
