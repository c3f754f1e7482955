//! Polygonal map geometry and visibility.
//!
//! The map is a rectangular free floor ([`MapBoundary`]) with polygonal
//! [`Obstacle`]s placed on it. Together they form an [`Environment`], the
//! read-only world every visibility query runs against.
//!
//! # Components
//!
//! - [`Segment`]: line segment with exact ray intersection
//! - [`Obstacle`]: closed polygon given by its ordered vertices
//! - [`MapBoundary`]: the implicit wall around the free floor
//! - [`Edge`]: a segment annotated with the angular interval it occupies
//!   as seen from an observer
//! - [`VisualVolume`]: the visible edges around an observer

mod boundary;
mod edge;
mod polygon;
mod segment;
mod visibility;

pub use boundary::MapBoundary;
pub use edge::Edge;
pub use polygon::Obstacle;
pub use segment::Segment;
pub use visibility::VisualVolume;

use crate::core::Point2D;
use serde::{Deserialize, Serialize};

/// Static world geometry: boundary walls plus obstacle polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Free floor rectangle; its sides are walls.
    #[serde(default)]
    pub boundary: MapBoundary,
    /// Obstacle polygons, in map order.
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Environment {
    /// Create an environment from a boundary and an obstacle list.
    pub fn new(boundary: MapBoundary, obstacles: Vec<Obstacle>) -> Self {
        Self {
            boundary,
            obstacles,
        }
    }

    /// Open room: boundary walls only.
    pub fn open(boundary: MapBoundary) -> Self {
        Self::new(boundary, Vec::new())
    }

    /// All wall segments: boundary first, then every obstacle side.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.boundary
            .segments()
            .into_iter()
            .chain(self.obstacles.iter().flat_map(|o| o.segments()))
    }

    /// Total number of wall segments.
    pub fn segment_count(&self) -> usize {
        4 + self.obstacles.iter().map(|o| o.len()).sum::<usize>()
    }

    /// True if `point` is on the free floor and outside every obstacle.
    pub fn is_free(&self, point: Point2D) -> bool {
        self.boundary.contains(point) && !self.obstacles.iter().any(|o| o.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_count() {
        let square = Obstacle::new(vec![
            Point2D::new(100.0, 100.0),
            Point2D::new(200.0, 100.0),
            Point2D::new(200.0, 200.0),
            Point2D::new(100.0, 200.0),
        ]);
        let env = Environment::new(MapBoundary::default(), vec![square]);

        assert_eq!(env.segment_count(), 8);
        assert_eq!(env.segments().count(), 8);
    }

    #[test]
    fn test_is_free() {
        let square = Obstacle::new(vec![
            Point2D::new(100.0, 100.0),
            Point2D::new(200.0, 100.0),
            Point2D::new(200.0, 200.0),
            Point2D::new(100.0, 200.0),
        ]);
        let env = Environment::new(MapBoundary::default(), vec![square]);

        assert!(env.is_free(Point2D::new(600.0, 450.0)));
        assert!(!env.is_free(Point2D::new(150.0, 150.0)));
        assert!(!env.is_free(Point2D::new(10.0, 10.0)));
    }
}
