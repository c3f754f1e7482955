//! Rectangular map boundary.

use super::Segment;
use crate::core::Point2D;
use serde::{Deserialize, Serialize};

/// The free floor rectangle; its four sides are the outer walls.
///
/// Defaults to the 1200×900 simulation map with a 30 px wall band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBoundary {
    /// Top-left corner of the free floor
    #[serde(default = "default_min")]
    pub min: Point2D,
    /// Bottom-right corner of the free floor
    #[serde(default = "default_max")]
    pub max: Point2D,
}

fn default_min() -> Point2D {
    Point2D::new(30.0, 30.0)
}

fn default_max() -> Point2D {
    Point2D::new(1170.0, 870.0)
}

impl Default for MapBoundary {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
        }
    }
}

impl MapBoundary {
    /// Create a boundary from two opposite corners.
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// Floor width.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Floor height.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True if the point lies on the free floor (min inclusive, max exclusive).
    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    /// The four walls, counter-clockwise in image coordinates.
    pub fn segments(&self) -> [Segment; 4] {
        let a = self.min;
        let b = Point2D::new(self.max.x, self.min.y);
        let c = self.max;
        let d = Point2D::new(self.min.x, self.max.y);
        [
            Segment::new(a, b),
            Segment::new(b, c),
            Segment::new(c, d),
            Segment::new(d, a),
        ]
    }
}
