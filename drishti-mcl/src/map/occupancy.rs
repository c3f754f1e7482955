//! Binary occupancy raster.
//!
//! One cell per map pixel; a cell is traversable when its pixel value is
//! non-zero. Built once per run and shared read-only by all workers.

use crate::core::Point2D;
use crate::geometry::Environment;
use image::{GrayImage, Luma};

/// Pixel value of a traversable cell
const FREE: u8 = 255;

/// Pixel value of a blocked cell
const BLOCKED: u8 = 0;

/// Traversable/blocked classification of every map cell.
#[derive(Debug, Clone)]
pub struct OccupancyRaster {
    pixels: GrayImage,
}

impl OccupancyRaster {
    /// Wrap an externally produced raster (non-zero = traversable).
    pub fn from_image(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    /// Rasterize an environment: the boundary floor is free, obstacle
    /// interiors and everything outside the floor are blocked.
    ///
    /// Cells are classified by their centre point.
    pub fn from_environment(width: u32, height: u32, environment: &Environment) -> Self {
        let boundary = environment.boundary;
        let mut pixels = GrayImage::from_fn(width, height, |col, row| {
            if boundary.contains(cell_center(col, row)) {
                Luma([FREE])
            } else {
                Luma([BLOCKED])
            }
        });

        for obstacle in &environment.obstacles {
            if obstacle.vertices().len() < 3 {
                continue;
            }
            let (min, max) = obstacle.bounds();
            let col_lo = min.x.floor().max(0.0) as u32;
            let row_lo = min.y.floor().max(0.0) as u32;
            let col_hi = (max.x.ceil().max(0.0) as u32).min(width);
            let row_hi = (max.y.ceil().max(0.0) as u32).min(height);

            for row in row_lo..row_hi {
                for col in col_lo..col_hi {
                    if obstacle.contains(cell_center(col, row)) {
                        pixels.put_pixel(col, row, Luma([BLOCKED]));
                    }
                }
            }
        }

        let raster = Self { pixels };
        log::debug!(
            "Rasterized {}x{} occupancy map: {} free cells, {} obstacles",
            width,
            height,
            raster.free_cell_count(),
            environment.obstacles.len()
        );
        raster
    }

    /// Raster width in cells
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Raster height in cells
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Check whether a cell is traversable. Out of bounds = blocked.
    pub fn is_free_cell(&self, col: u32, row: u32) -> bool {
        col < self.pixels.width()
            && row < self.pixels.height()
            && self.pixels.get_pixel(col, row).0[0] != BLOCKED
    }

    /// Check whether the cell containing `point` is traversable.
    ///
    /// Points outside the raster (including negative coordinates) are blocked.
    pub fn is_free(&self, point: Point2D) -> bool {
        let col = point.x.floor();
        let row = point.y.floor();
        if !(col >= 0.0 && row >= 0.0) {
            return false;
        }
        self.is_free_cell(col as u32, row as u32)
    }

    /// Number of traversable cells.
    pub fn free_cell_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[0] != BLOCKED).count()
    }
}

#[inline]
fn cell_center(col: u32, row: u32) -> Point2D {
    Point2D::new(col as f64 + 0.5, row as f64 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{MapBoundary, Obstacle};

    fn small_env() -> Environment {
        Environment::new(
            MapBoundary::new(Point2D::new(2.0, 2.0), Point2D::new(18.0, 13.0)),
            vec![Obstacle::rectangle(
                Point2D::new(8.0, 5.0),
                Point2D::new(12.0, 9.0),
            )],
        )
    }

    #[test]
    fn test_boundary_band_is_blocked() {
        let raster = OccupancyRaster::from_environment(20, 15, &small_env());

        assert!(!raster.is_free(Point2D::new(1.5, 7.0)));
        assert!(raster.is_free(Point2D::new(2.5, 7.0)));
        assert!(raster.is_free(Point2D::new(17.9, 7.0)));
        assert!(!raster.is_free(Point2D::new(18.1, 7.0)));
    }

    #[test]
    fn test_obstacle_interior_is_blocked() {
        let raster = OccupancyRaster::from_environment(20, 15, &small_env());

        assert!(!raster.is_free(Point2D::new(10.0, 7.0)));
        assert!(raster.is_free(Point2D::new(7.5, 7.0)));
    }

    #[test]
    fn test_free_cell_count() {
        let raster = OccupancyRaster::from_environment(20, 15, &small_env());
        // 16x11 floor minus a 4x4 obstacle
        assert_eq!(raster.free_cell_count(), 16 * 11 - 16);
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let raster = OccupancyRaster::from_environment(20, 15, &small_env());

        assert!(!raster.is_free(Point2D::new(-0.5, 5.0)));
        assert!(!raster.is_free(Point2D::new(5.0, 100.0)));
        assert!(!raster.is_free(Point2D::new(f64::NAN, 5.0)));
    }

    #[test]
    fn test_from_image() {
        let mut pixels = GrayImage::from_pixel(4, 4, Luma([FREE]));
        pixels.put_pixel(1, 2, Luma([BLOCKED]));
        let raster = OccupancyRaster::from_image(pixels);

        assert!(raster.is_free_cell(0, 2));
        assert!(!raster.is_free_cell(1, 2));
        assert!(!raster.is_free(Point2D::new(1.2, 2.7)));
        assert_eq!(raster.free_cell_count(), 15);
    }
}
