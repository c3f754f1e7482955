//! Diagnostic render surface.
//!
//! A thin drawing layer over an [`RgbImage`] used to inspect filter steps:
//! map background, the observer's visual volume, ray fans and the particle
//! population. All drawing clips silently at the image border.
//!
//! # Colours
//!
//! | Element | Colour |
//! |---------|--------|
//! | Walls and obstacles | dark grey (10, 10, 10) |
//! | Free floor | grey (40, 40, 40) |
//! | Visual volume | light grey fill, green visible walls |
//! | Rays | red |
//! | Particles | red → blue as weight grows |
//! | Estimate | blue |

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::core::Point2D;
use crate::error::Result;
use crate::geometry::{Environment, Obstacle, VisualVolume};
use crate::localization::Particle;
use crate::scan::{RangeVector, UNSET_RANGE};

const WALL: Rgb<u8> = Rgb([10, 10, 10]);
const FLOOR: Rgb<u8> = Rgb([40, 40, 40]);
const VISIBLE: Rgb<u8> = Rgb([90, 90, 90]);
const VISIBLE_WALL: Rgb<u8> = Rgb([0, 200, 0]);
const RAY: Rgb<u8> = Rgb([255, 0, 0]);
const ESTIMATE: Rgb<u8> = Rgb([0, 0, 255]);
const OBSERVER: Rgb<u8> = Rgb([255, 255, 0]);

/// Upper bound on pixels walked by a single line.
const MAX_LINE_LENGTH: usize = 10_000;

/// RGB image with map-specific drawing helpers.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    show_rays: bool,
}

impl Canvas {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
            show_rays: false,
        }
    }

    /// Also draw the observed ray fan on filter steps.
    pub fn with_rays(mut self, show_rays: bool) -> Self {
        self.show_rays = show_rays;
        self
    }

    /// Whether filter steps draw the observed ray fan.
    pub fn shows_rays(&self) -> bool {
        self.show_rays
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour at a pixel, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    /// Write the canvas as PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path.as_ref())?;
        Ok(())
    }

    /// Paint walls, free floor and obstacles over the whole canvas.
    pub fn draw_environment(&mut self, environment: &Environment) {
        let boundary = environment.boundary;
        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let center = Point2D::new(x as f64 + 0.5, y as f64 + 0.5);
            *px = if boundary.contains(center) { FLOOR } else { WALL };
        }
        for obstacle in &environment.obstacles {
            self.fill_obstacle(obstacle, WALL);
        }
    }

    /// Shade the region visible from the observer and outline the visible
    /// wall portions.
    pub fn draw_visual_volume(&mut self, volume: &VisualVolume) {
        let observer = volume.observer();
        let mut outline = Vec::with_capacity(volume.edges().len());
        for edge in volume.edges() {
            if let Some((a, b)) = edge.visible_points(observer) {
                self.fill_triangle(observer, a, b, VISIBLE);
                outline.push((a, b));
            }
        }
        for (a, b) in outline {
            self.draw_line(a, b, VISIBLE_WALL);
        }
        self.draw_disc(observer, 4, OBSERVER);
    }

    /// Draw one line per set bucket from the observer to the range end point.
    pub fn draw_rays(&mut self, ranges: &RangeVector, observer: Point2D) {
        for (angle, range) in ranges.rays() {
            if range == UNSET_RANGE {
                continue;
            }
            let end = observer + Point2D::from_angle(angle) * range;
            self.draw_line(observer, end, RAY);
        }
    }

    /// Draw every particle, coloured by its weight.
    pub fn draw_particles(&mut self, particles: &[Particle]) {
        for particle in particles {
            self.draw_disc(particle.position, 3, weight_color(particle.weight));
        }
    }

    /// Mark the position estimate.
    pub fn draw_estimate(&mut self, estimate: Point2D) {
        self.draw_disc(estimate, 4, ESTIMATE);
    }

    /// Bresenham line between two points.
    pub fn draw_line(&mut self, from: Point2D, to: Point2D, color: Rgb<u8>) {
        let (x0, y0) = (from.x.floor() as i64, from.y.floor() as i64);
        let (x1, y1) = (to.x.floor() as i64, to.y.floor() as i64);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let mut x = x0;
        let mut y = y0;
        let mut err = dx - dy;

        for _ in 0..MAX_LINE_LENGTH {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled disc of `radius` pixels.
    pub fn draw_disc(&mut self, center: Point2D, radius: i64, color: Rgb<u8>) {
        let (cx, cy) = (center.x.floor() as i64, center.y.floor() as i64);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn fill_obstacle(&mut self, obstacle: &Obstacle, color: Rgb<u8>) {
        if obstacle.vertices().len() < 3 {
            return;
        }
        let (min, max) = obstacle.bounds();
        self.fill_where(min, max, color, |p| obstacle.contains(p));
    }

    fn fill_triangle(&mut self, a: Point2D, b: Point2D, c: Point2D, color: Rgb<u8>) {
        let min = Point2D::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y));
        let max = Point2D::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y));
        self.fill_where(min, max, color, |p| {
            let d1 = (b - a).cross(p - a);
            let d2 = (c - b).cross(p - b);
            let d3 = (a - c).cross(p - c);
            let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            !(has_neg && has_pos)
        });
    }

    /// Paint every pixel in the `[min, max]` box whose centre passes `inside`.
    fn fill_where<F>(&mut self, min: Point2D, max: Point2D, color: Rgb<u8>, inside: F)
    where
        F: Fn(Point2D) -> bool,
    {
        let x_lo = min.x.floor().max(0.0) as u32;
        let y_lo = min.y.floor().max(0.0) as u32;
        let x_hi = (max.x.ceil().max(0.0) as u32).min(self.width());
        let y_hi = (max.y.ceil().max(0.0) as u32).min(self.height());
        for y in y_lo..y_hi {
            for x in x_lo..x_hi {
                if inside(Point2D::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0
            && y >= 0
            && (x as u64) < self.width() as u64
            && (y as u64) < self.height() as u64
        {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Particle colour: red for negligible weight, blue for weight 1.
fn weight_color(weight: f64) -> Rgb<u8> {
    let blue = (254.0 * weight.clamp(0.0, 1.0)) as u8;
    Rgb([255 - blue, 0, blue])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MapBoundary;

    fn env() -> Environment {
        Environment::new(
            MapBoundary::new(Point2D::new(5.0, 5.0), Point2D::new(35.0, 25.0)),
            vec![Obstacle::rectangle(
                Point2D::new(20.0, 10.0),
                Point2D::new(25.0, 15.0),
            )],
        )
    }

    #[test]
    fn test_environment_background() {
        let mut canvas = Canvas::new(40, 30);
        canvas.draw_environment(&env());

        assert_eq!(canvas.pixel(1, 1), Some(WALL));
        assert_eq!(canvas.pixel(10, 10), Some(FLOOR));
        assert_eq!(canvas.pixel(22, 12), Some(WALL));
        assert_eq!(canvas.pixel(40, 0), None);
    }

    #[test]
    fn test_line_endpoints() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_line(Point2D::new(2.0, 3.0), Point2D::new(15.0, 9.0), RAY);

        assert_eq!(canvas.pixel(2, 3), Some(RAY));
        assert_eq!(canvas.pixel(15, 9), Some(RAY));
        assert_eq!(canvas.pixel(15, 3), Some(Rgb([0, 0, 0])));
    }

    #[test]
    fn test_line_clips_outside() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(Point2D::new(-5.0, 5.0), Point2D::new(20.0, 5.0), RAY);

        assert_eq!(canvas.pixel(0, 5), Some(RAY));
        assert_eq!(canvas.pixel(9, 5), Some(RAY));
    }

    #[test]
    fn test_particles_colored_by_weight() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_particles(&[
            Particle::with_weight(Point2D::new(5.0, 5.0), 0.0),
            Particle::with_weight(Point2D::new(15.0, 15.0), 1.0),
        ]);

        assert_eq!(canvas.pixel(5, 5), Some(Rgb([255, 0, 0])));
        assert_eq!(canvas.pixel(15, 15), Some(Rgb([1, 0, 254])));
    }

    #[test]
    fn test_visual_volume_marks_observer() {
        let environment = env();
        let observer = Point2D::new(10.0, 20.0);
        let mut canvas = Canvas::new(40, 30);
        canvas.draw_environment(&environment);
        canvas.draw_visual_volume(&VisualVolume::compute(&environment, observer));

        assert_eq!(canvas.pixel(10, 20), Some(OBSERVER));
        // Behind the obstacle, seen from the observer
        assert_eq!(canvas.pixel(28, 6), Some(FLOOR));
        assert_eq!(canvas.pixel(15, 15), Some(VISIBLE));
    }

    #[test]
    fn test_rays_end_at_range() {
        let mut ranges = RangeVector::new(std::f64::consts::FRAC_PI_2);
        // -X, -Y, +X; +Y stays unset
        ranges.ranges_mut().copy_from_slice(&[4.0, 6.0, 9.0, UNSET_RANGE]);
        let observer = Point2D::new(10.5, 10.5);

        let mut canvas = Canvas::new(20, 20);
        canvas.draw_rays(&ranges, observer);

        assert_eq!(canvas.pixel(6, 10), Some(RAY));
        assert_eq!(canvas.pixel(10, 4), Some(RAY));
        assert_eq!(canvas.pixel(19, 10), Some(RAY));
        // Nothing past the ray ends
        assert_eq!(canvas.pixel(5, 10), Some(Rgb([0, 0, 0])));
        assert_eq!(canvas.pixel(10, 3), Some(Rgb([0, 0, 0])));
        // Unset bucket draws nothing
        assert_eq!(canvas.pixel(10, 15), Some(Rgb([0, 0, 0])));
    }

    #[test]
    fn test_ray_flag() {
        assert!(!Canvas::new(4, 4).shows_rays());
        assert!(Canvas::new(4, 4).with_rays(true).shows_rays());
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut canvas = Canvas::new(16, 16);
        canvas.draw_estimate(Point2D::new(8.0, 8.0));
        canvas.save(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (16, 16));
        assert_eq!(*loaded.get_pixel(8, 8), ESTIMATE);
    }
}
