//! Line segment primitive.

use crate::core::Point2D;

/// Parallel-ray threshold for the intersection cross product.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A directed line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub start: Point2D,
    /// End point
    pub end: Point2D,
}

impl Segment {
    /// Create a new segment.
    #[inline]
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Direction vector (end - start), not normalized.
    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    /// Intersect the ray `origin + t * direction` with the supporting line.
    ///
    /// Returns the ray parameter `t` (a distance when `direction` is a unit
    /// vector), which may be negative for lines behind the origin. The
    /// segment extent is not checked; callers that already know the ray
    /// falls inside the segment's angular span use this for an exact range.
    ///
    /// Returns `None` for rays parallel to the segment.
    pub fn line_intersection(&self, origin: Point2D, direction: Point2D) -> Option<f64> {
        let seg = self.direction();
        let denom = direction.cross(seg);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        Some((self.start - origin).cross(seg) / denom)
    }

    /// Intersect the ray with the segment itself.
    ///
    /// Returns `t >= 0` only when the hit lies within the segment.
    pub fn ray_intersection(&self, origin: Point2D, direction: Point2D) -> Option<f64> {
        let seg = self.direction();
        let denom = direction.cross(seg);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let origin_to_start = self.start - origin;
        let t = origin_to_start.cross(seg) / denom;
        let s = origin_to_start.cross(direction) / denom;

        if t >= 0.0 && (0.0..=1.0).contains(&s) {
            Some(t)
        } else {
            None
        }
    }
}
