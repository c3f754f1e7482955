//! Obstacle polygons.

use super::Segment;
use crate::core::Point2D;
use serde::{Deserialize, Serialize};

/// A closed obstacle polygon given by its ordered boundary vertices.
///
/// The closing side from the last vertex back to the first is implicit.
/// Serializes as a plain list of `[x, y]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Obstacle {
    vertices: Vec<Point2D>,
}

impl Obstacle {
    /// Create an obstacle from its ordered vertices.
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle obstacle.
    pub fn rectangle(min: Point2D, max: Point2D) -> Self {
        Self::new(vec![
            min,
            Point2D::new(max.x, min.y),
            max,
            Point2D::new(min.x, max.y),
        ])
    }

    /// Ordered boundary vertices.
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Number of sides.
    pub fn len(&self) -> usize {
        match self.vertices.len() {
            0 | 1 => 0,
            2 => 1,
            n => n,
        }
    }

    /// True for degenerate polygons with no sides.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Polygon sides, closing back to the first vertex.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..self.len()).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Axis-aligned bounding box as (min, max).
    pub fn bounds(&self) -> (Point2D, Point2D) {
        self.vertices.iter().fold(
            (
                Point2D::new(f64::INFINITY, f64::INFINITY),
                Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(min, max), v| {
                (
                    Point2D::new(min.x.min(v.x), min.y.min(v.y)),
                    Point2D::new(max.x.max(v.x), max.y.max(v.y)),
                )
            },
        )
    }

    /// Even-odd point-in-polygon test.
    pub fn contains(&self, point: Point2D) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for (i, vi) in self.vertices.iter().enumerate() {
            let vj = self.vertices[j];
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_cross = vi.x + (point.y - vi.y) * (vj.x - vi.x) / (vj.y - vi.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Obstacle {
        Obstacle::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_segments_close_polygon() {
        let tri = triangle();
        let segs: Vec<Segment> = tri.segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2].start, Point2D::new(0.0, 10.0));
        assert_eq!(segs[2].end, Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_contains() {
        let tri = triangle();
        assert!(tri.contains(Point2D::new(2.0, 2.0)));
        assert!(!tri.contains(Point2D::new(8.0, 8.0)));
        assert!(!tri.contains(Point2D::new(-1.0, 2.0)));
    }

    #[test]
    fn test_concave_contains() {
        // U shape opening upward
        let u = Obstacle::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(30.0, 0.0),
            Point2D::new(30.0, 30.0),
            Point2D::new(20.0, 30.0),
            Point2D::new(20.0, 10.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 30.0),
            Point2D::new(0.0, 30.0),
        ]);
        assert!(u.contains(Point2D::new(5.0, 20.0)));
        assert!(!u.contains(Point2D::new(15.0, 20.0)));
        assert!(u.contains(Point2D::new(15.0, 5.0)));
    }

    #[test]
    fn test_bounds() {
        let (min, max) = triangle().bounds();
        assert_eq!(min, Point2D::new(0.0, 0.0));
        assert_eq!(max, Point2D::new(10.0, 10.0));
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(Obstacle::new(vec![]).is_empty());
        let wall = Obstacle::new(vec![Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0)]);
        assert_eq!(wall.segments().count(), 1);
        assert!(!wall.contains(Point2D::new(2.0, 0.0)));
    }

    #[test]
    fn test_deserialize_from_pairs() {
        let obstacle: Obstacle = serde_yaml::from_str("[[0, 0], [10, 0], [0, 10]]").unwrap();
        assert_eq!(obstacle, triangle());
    }
}
