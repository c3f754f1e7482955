//! Ray-cast scanner.
//!
//! Converts the visible edges around an observer into a full-circle range
//! vector, one range per angular bucket, then applies Gaussian range noise.
//!
//! # Algorithm
//!
//! For each edge the angular bounds are turned into bucket indices:
//!
//! ```text
//! id_start = ceil((angle_start + π) / angle_increment)
//! id_end   = floor((angle_end + π) / angle_increment)
//! ```
//!
//! An edge with `id_start == id_end + 1` falls between two rays and is
//! skipped. An edge with `id_start > id_end` crosses the ±π seam; its end
//! index is lifted by `ray_num` so both cases become one walk over a circular
//! index space. Every bucket on the walk gets the exact distance from the
//! observer to the edge along the bucket's ray. When edges overlap the
//! last one written wins.
//!
//! A scanner with a [`ScanWindow`] only reports buckets inside the window
//! around the sensor heading; the rest stay [`UNSET_RANGE`].

use super::{RangeVector, ScanWindow, UNSET_RANGE};
use crate::core::math::ray_count;
use crate::core::{NoiseGenerator, Point2D};
use crate::geometry::{Edge, Environment, VisualVolume};
use std::f64::consts::PI;

/// Tolerance (in buckets) so bounds that land exactly on a ray keep it.
const BUCKET_EPSILON: f64 = 1e-9;

/// Range scanner at a fixed angular resolution, full circle unless windowed.
#[derive(Debug, Clone)]
pub struct RayCastScanner {
    angle_increment: f64,
    ray_num: usize,
    noise_stddev: f64,
    window: Option<ScanWindow>,
}

impl RayCastScanner {
    /// Create a scanner with the given ray spacing and range noise.
    pub fn new(angle_increment: f64, noise_stddev: f64) -> Self {
        Self {
            angle_increment,
            ray_num: ray_count(angle_increment),
            noise_stddev,
            window: None,
        }
    }

    /// Restrict oriented scans to `window` (`None` = full circle).
    pub fn with_window(mut self, window: Option<ScanWindow>) -> Self {
        self.window = window;
        self
    }

    /// Field of view, if limited.
    pub fn window(&self) -> Option<ScanWindow> {
        self.window
    }

    /// Angular spacing between rays (radians).
    pub fn angle_increment(&self) -> f64 {
        self.angle_increment
    }

    /// Number of rays per scan.
    pub fn ray_num(&self) -> usize {
        self.ray_num
    }

    /// Standard deviation of the range noise.
    pub fn noise_stddev(&self) -> f64 {
        self.noise_stddev
    }

    /// Inclusive bucket walk `[first, last]` covered by `edge`.
    ///
    /// `last` may exceed `ray_num` for edges crossing the seam; reduce each
    /// index modulo `ray_num`. Returns `None` when the edge covers no ray.
    pub fn bucket_span(&self, edge: &Edge) -> Option<(i64, i64)> {
        let first =
            ((edge.angle_start + PI) / self.angle_increment - BUCKET_EPSILON).ceil() as i64;
        let mut last =
            ((edge.angle_end + PI) / self.angle_increment + BUCKET_EPSILON).floor() as i64;

        if first == last + 1 {
            return None;
        }
        if first > last {
            last += self.ray_num as i64;
        }
        Some((first, last))
    }

    /// Exact ranges from `observer` to `edges`, without noise.
    pub fn cast(&self, edges: &[Edge], observer: Point2D) -> RangeVector {
        let mut ranges = RangeVector::new(self.angle_increment);
        if ranges.is_empty() {
            return ranges;
        }
        let ray_num = ranges.len() as i64;

        for edge in edges {
            let Some((first, last)) = self.bucket_span(edge) else {
                continue;
            };
            for k in first..=last {
                let i = k.rem_euclid(ray_num) as usize;
                if let Some(range) = edge.range_at(observer, ranges.angle_of(i)) {
                    ranges.ranges_mut()[i] = range;
                }
            }
        }

        ranges
    }

    /// Add independent zero-mean Gaussian noise to every bucket.
    pub fn perturb(&self, ranges: &mut RangeVector, noise: &mut NoiseGenerator) {
        for r in ranges.ranges_mut() {
            *r += noise.gaussian(self.noise_stddev);
        }
    }

    /// Unset every bucket outside the window around `heading`.
    ///
    /// No-op for a full-circle scanner.
    pub fn apply_window(&self, ranges: &mut RangeVector, heading: f64) {
        let Some(window) = self.window else {
            return;
        };
        for i in 0..ranges.len() {
            if !window.contains(heading, ranges.angle_of(i)) {
                ranges.ranges_mut()[i] = UNSET_RANGE;
            }
        }
    }

    /// Noisy full-circle scan of `edges` seen from `observer`.
    pub fn scan(
        &self,
        edges: &[Edge],
        observer: Point2D,
        noise: &mut NoiseGenerator,
    ) -> RangeVector {
        let mut ranges = self.cast(edges, observer);
        self.perturb(&mut ranges, noise);
        ranges
    }

    /// Noisy scan of `edges` from a sensor facing `heading`, cut to the window.
    pub fn scan_oriented(
        &self,
        edges: &[Edge],
        observer: Point2D,
        heading: f64,
        noise: &mut NoiseGenerator,
    ) -> RangeVector {
        let mut ranges = self.scan(edges, observer, noise);
        self.apply_window(&mut ranges, heading);
        ranges
    }

    /// Visibility computation followed by a noisy scan facing `heading`.
    pub fn scan_environment_oriented(
        &self,
        environment: &Environment,
        observer: Point2D,
        heading: f64,
        noise: &mut NoiseGenerator,
    ) -> RangeVector {
        let volume = VisualVolume::compute(environment, observer);
        self.scan_oriented(volume.edges(), observer, heading, noise)
    }

    /// Visibility computation followed by a noisy full-circle scan.
    pub fn scan_environment(
        &self,
        environment: &Environment,
        observer: Point2D,
        noise: &mut NoiseGenerator,
    ) -> RangeVector {
        let volume = VisualVolume::compute(environment, observer);
        self.scan(volume.edges(), observer, noise)
    }
}
