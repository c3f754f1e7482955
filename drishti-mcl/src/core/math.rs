//! Mathematical primitives for planar localization.
//!
//! Functions for angle normalization and angular arithmetic. All angles are
//! in radians and normalized to the half-open interval (-π, π].

use std::f64::consts::{PI, TAU};

/// Normalize angle to (-π, π].
///
/// # Example
/// ```
/// use drishti_mcl::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-9);
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-9);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Shortest angular difference from angle `a` to angle `b`.
///
/// Returns the signed angle you need to add to `a` to reach `b`,
/// taking the shortest path around the circle.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}

/// Counter-clockwise sweep from `start` to `end`, in [0, 2π).
#[inline]
pub fn ccw_span(start: f64, end: f64) -> f64 {
    (end - start).rem_euclid(TAU)
}

/// Number of rays needed to cover the full circle at `angle_increment`.
#[inline]
pub fn ray_count(angle_increment: f64) -> usize {
    (TAU / angle_increment).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle_zero() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_normalize_angle_pi_boundary() {
        assert_relative_eq!(normalize_angle(PI), PI);
        // -π is folded onto +π
        assert_relative_eq!(normalize_angle(-PI), PI);
    }

    #[test]
    fn test_normalize_angle_wrap() {
        assert_relative_eq!(normalize_angle(2.0 * PI), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-2.0 * PI), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(PI + 0.001), -PI + 0.001, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_diff_crossing_pi() {
        assert_relative_eq!(angle_diff(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-12);
        assert_relative_eq!(angle_diff(-PI + 0.1, PI - 0.1), -0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_ccw_span() {
        assert_relative_eq!(ccw_span(0.0, PI / 2.0), PI / 2.0);
        assert_relative_eq!(ccw_span(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-12);
        assert_relative_eq!(ccw_span(PI / 2.0, 0.0), 1.5 * PI);
    }

    #[test]
    fn test_ray_count() {
        assert_eq!(ray_count(PI / 1800.0), 3600);
        assert_eq!(ray_count(PI / 180.0), 360);
        assert_eq!(ray_count(0.7), 9);
    }
}
