//! Point type for planar localization.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D point in map pixel coordinates.
///
/// Used both for particle positions and for polygon vertices. Serializes as a
/// two-element `[x, y]` sequence so map files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2D {
    /// X coordinate (pixel column)
    pub x: f64,
    /// Y coordinate (pixel row)
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Unit vector pointing along `angle` (radians, CCW from +X).
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(cos_a, sin_a)
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Length of the vector from the origin.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(&self, other: Point2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Angle from this point to another (radians, CCW from +X).
    #[inline]
    pub fn angle_to(&self, other: &Point2D) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point2D {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(a.distance_squared(&b), 25.0);
    }

    #[test]
    fn test_cross() {
        let x = Point2D::new(1.0, 0.0);
        let y = Point2D::new(0.0, 1.0);
        assert_relative_eq!(x.cross(y), 1.0);
        assert_relative_eq!(y.cross(x), -1.0);
    }

    #[test]
    fn test_angle_to() {
        let origin = Point2D::ZERO;
        assert_relative_eq!(origin.angle_to(&Point2D::new(0.0, 2.0)), PI / 2.0);
        assert_relative_eq!(origin.angle_to(&Point2D::new(-1.0, 0.0)), PI);
    }

    #[test]
    fn test_from_angle_is_unit() {
        let v = Point2D::from_angle(0.3);
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_serde_as_pair() {
        let p: Point2D = serde_yaml::from_str("[12.5, 40]").unwrap();
        assert_eq!(p, Point2D::new(12.5, 40.0));
    }
}
