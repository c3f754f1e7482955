//! Fixed-length range vector.

use crate::core::math::ray_count;
use std::f64::consts::PI;

/// Sentinel for buckets no wall was written to.
pub const UNSET_RANGE: f64 = -1.0;

/// Ranges indexed by angular bucket.
///
/// Bucket `i` looks along `angle_increment * i - π`; the vector always holds
/// `round(2π / angle_increment)` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeVector {
    angle_increment: f64,
    ranges: Vec<f64>,
}

impl RangeVector {
    /// Create a vector with every bucket unset.
    pub fn new(angle_increment: f64) -> Self {
        Self {
            angle_increment,
            ranges: vec![UNSET_RANGE; ray_count(angle_increment)],
        }
    }

    /// Angular spacing between buckets (radians).
    #[inline]
    pub fn angle_increment(&self) -> f64 {
        self.angle_increment
    }

    /// Number of buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if the vector has no buckets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Ray direction of bucket `index`.
    #[inline]
    pub fn angle_of(&self, index: usize) -> f64 {
        self.angle_increment * index as f64 - PI
    }

    /// Range values.
    #[inline]
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Mutable range values.
    #[inline]
    pub fn ranges_mut(&mut self) -> &mut [f64] {
        &mut self.ranges
    }

    /// Range at bucket `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.ranges.get(index).copied()
    }

    /// Iterate `(angle, range)` pairs.
    pub fn rays(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, &r)| (self.angle_of(i), r))
    }

    /// Count of buckets still holding the sentinel.
    pub fn unset_count(&self) -> usize {
        self.ranges.iter().filter(|&&r| r == UNSET_RANGE).count()
    }

    /// Elementwise mean absolute difference over the full vector.
    ///
    /// Sentinel buckets are compared as ordinary values. Vectors of
    /// different lengths are compared over the shorter one.
    pub fn mean_absolute_difference(&self, other: &RangeVector) -> f64 {
        let n = self.ranges.len().min(other.ranges.len());
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .ranges
            .iter()
            .zip(&other.ranges)
            .map(|(a, b)| (a - b).abs())
            .sum();
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_matches_increment() {
        for &inc in &[PI / 1800.0, PI / 180.0, 0.05, 0.7, 1.0] {
            let rv = RangeVector::new(inc);
            assert_eq!(rv.len(), (2.0 * PI / inc).round() as usize);
            assert_eq!(rv.unset_count(), rv.len());
        }
    }

    #[test]
    fn test_bucket_angles() {
        let rv = RangeVector::new(PI / 2.0);
        assert_eq!(rv.len(), 4);
        assert_relative_eq!(rv.angle_of(0), -PI);
        assert_relative_eq!(rv.angle_of(2), 0.0);
        assert_relative_eq!(rv.angle_of(3), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_absolute_difference() {
        let mut a = RangeVector::new(PI / 2.0);
        let mut b = RangeVector::new(PI / 2.0);
        a.ranges_mut().copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        b.ranges_mut().copy_from_slice(&[1.0, 4.0, 3.0, UNSET_RANGE]);

        assert_relative_eq!(a.mean_absolute_difference(&b), (2.0 + 5.0) / 4.0);
        assert_relative_eq!(a.mean_absolute_difference(&a), 0.0);
    }
}
