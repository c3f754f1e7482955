//! Low-variance (systematic) resampling.
//!
//! One uniform draw `r ∈ [0, 1/N)` positions a comb of `N` evenly spaced
//! pointers over the cumulative weight distribution. Each pointer selects
//! the particle whose cumulative interval it falls into, so a particle with
//! weight `w` is selected either `⌊N·w⌋` or `⌈N·w⌉` times.

use crate::core::NoiseGenerator;

/// Indices selected by the comb starting at `r`.
///
/// `weights` should sum to 1 and `r` should lie in `[0, 1/N)`. Floating point
/// drift that pushes a pointer past the last cumulative bound selects the
/// last particle.
pub fn low_variance_indices(weights: &[f64], r: f64) -> Vec<usize> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let step = 1.0 / n as f64;
    let mut indices = Vec::with_capacity(n);
    let mut c = weights[0];
    let mut i = 0;

    for m in 0..n {
        let u = r + m as f64 * step;
        while u > c && i < n - 1 {
            i += 1;
            c += weights[i];
        }
        indices.push(i);
    }

    indices
}

/// Resample `items` by `weights`, returning exactly `items.len()` copies.
pub fn low_variance_resample<T: Clone>(
    items: &[T],
    weights: &[f64],
    noise: &mut NoiseGenerator,
) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let r = noise.uniform_range(0.0, 1.0 / items.len() as f64);
    low_variance_indices(weights, r)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_size_matches_input() {
        let weights = [0.1, 0.2, 0.3, 0.4];
        for &r in &[0.0, 0.1, 0.2499] {
            assert_eq!(low_variance_indices(&weights, r).len(), 4);
        }
        assert!(low_variance_indices(&[], 0.0).is_empty());
    }

    #[test]
    fn test_uniform_weights_select_each_once() {
        let weights = [0.25; 4];
        assert_eq!(low_variance_indices(&weights, 0.1), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_dominant_particle_takes_all() {
        let weights = [0.0, 1.0, 0.0];
        assert_eq!(low_variance_indices(&weights, 0.2), vec![1, 1, 1]);
    }

    #[test]
    fn test_drift_clamps_to_last() {
        // Weights summing to slightly less than 1
        let weights = [0.3, 0.3, 0.3];
        let indices = low_variance_indices(&weights, 0.33);
        assert_eq!(indices, vec![1, 2, 2]);
    }

    #[test]
    fn test_counts_follow_weights() {
        let weights = [0.5, 0.25, 0.125, 0.125];
        let mut noise = NoiseGenerator::new(5);
        let items: Vec<usize> = (0..4).collect();

        for _ in 0..20 {
            let mut big = Vec::new();
            let mut big_weights = Vec::new();
            for k in 0..100 {
                big.push(items[k % 4]);
                big_weights.push(weights[k % 4] / 25.0);
            }
            let out = low_variance_resample(&big, &big_weights, &mut noise);
            assert_eq!(out.len(), 100);
            let count0 = out.iter().filter(|&&v| v == 0).count();
            // Systematic resampling is exact to within one draw per source
            assert!((49..=51).contains(&count0), "count {}", count0);
        }
    }
}
