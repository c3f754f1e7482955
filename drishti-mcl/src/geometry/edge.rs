//! Visible edges with angular bounds.

use super::Segment;
use crate::core::Point2D;
use crate::core::math::{ccw_span, normalize_angle};

/// A wall segment annotated with the angular interval in which it is the
/// nearest surface seen from an observer.
///
/// Both bounds lie in (-π, π]. The interval runs counter-clockwise from
/// `angle_start` to `angle_end`; when `angle_start > angle_end` it crosses
/// the ±π seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Full supporting wall segment
    pub segment: Segment,
    /// First visible angle (radians)
    pub angle_start: f64,
    /// Last visible angle (radians)
    pub angle_end: f64,
}

impl Edge {
    /// Create an edge; both bounds are normalized to (-π, π].
    pub fn new(segment: Segment, angle_start: f64, angle_end: f64) -> Self {
        Self {
            segment,
            angle_start: normalize_angle(angle_start),
            angle_end: normalize_angle(angle_end),
        }
    }

    /// True if the interval crosses the ±π seam.
    #[inline]
    pub fn wraps(&self) -> bool {
        self.angle_start > self.angle_end
    }

    /// Angular width of the interval.
    #[inline]
    pub fn angular_width(&self) -> f64 {
        ccw_span(self.angle_start, self.angle_end)
    }

    /// True if `angle` lies inside the interval (bounds inclusive).
    pub fn contains_angle(&self, angle: f64) -> bool {
        ccw_span(self.angle_start, normalize_angle(angle)) <= self.angular_width()
    }

    /// Distance from `observer` along the ray at `angle` to this edge.
    ///
    /// `None` when the ray is parallel to the wall or the wall lies behind
    /// the observer.
    #[inline]
    pub fn range_at(&self, observer: Point2D, angle: f64) -> Option<f64> {
        self.segment
            .line_intersection(observer, Point2D::from_angle(angle))
            .filter(|t| *t >= 0.0)
    }

    /// End points of the visible portion of the wall.
    pub fn visible_points(&self, observer: Point2D) -> Option<(Point2D, Point2D)> {
        let near = self.range_at(observer, self.angle_start)?;
        let far = self.range_at(observer, self.angle_end)?;
        Some((
            observer + Point2D::from_angle(self.angle_start) * near,
            observer + Point2D::from_angle(self.angle_end) * far,
        ))
    }
}
