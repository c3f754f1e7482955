//! Limited field of view for the range sensor.

use crate::core::math::angle_diff;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Slack (radians) so a bucket lying exactly on a window bound stays inside.
const ANGLE_EPSILON: f64 = 1e-9;

/// Angular window measured from the sensor heading.
///
/// Bounds are relative to the heading and lie in [-π, π]. The default is the
/// forward half plane, ±90° around the heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanWindow {
    /// Lower bound relative to the heading (radians)
    #[serde(default = "default_angle_min")]
    pub angle_min: f64,
    /// Upper bound relative to the heading (radians)
    #[serde(default = "default_angle_max")]
    pub angle_max: f64,
}

fn default_angle_min() -> f64 {
    -FRAC_PI_2
}
fn default_angle_max() -> f64 {
    FRAC_PI_2
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            angle_min: default_angle_min(),
            angle_max: default_angle_max(),
        }
    }
}

impl ScanWindow {
    /// Window from explicit bounds.
    pub fn new(angle_min: f64, angle_max: f64) -> Self {
        Self {
            angle_min,
            angle_max,
        }
    }

    /// Window of total width `fov` centred on the heading.
    pub fn symmetric(fov: f64) -> Self {
        Self::new(-fov / 2.0, fov / 2.0)
    }

    /// Total angular width (radians).
    pub fn width(&self) -> f64 {
        self.angle_max - self.angle_min
    }

    /// True if the absolute direction `angle` is inside the window when the
    /// sensor faces `heading`.
    #[inline]
    pub fn contains(&self, heading: f64, angle: f64) -> bool {
        let relative = angle_diff(heading, angle);
        // angle_diff never returns -π, so a bound at -π has to match +π too
        let wrapped = if relative >= PI - ANGLE_EPSILON {
            relative - 2.0 * PI
        } else {
            relative
        };
        let inside =
            |r: f64| r >= self.angle_min - ANGLE_EPSILON && r <= self.angle_max + ANGLE_EPSILON;
        inside(relative) || inside(wrapped)
    }

    /// Reject empty or out-of-range windows.
    pub fn validate(&self) -> Result<()> {
        if !(self.angle_min >= -PI && self.angle_max <= PI && self.angle_min < self.angle_max) {
            return Err(Error::InvalidParameter(format!(
                "scan window must satisfy -π <= angle_min < angle_max <= π, got [{}, {}]",
                self.angle_min, self.angle_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_forward_half_plane() {
        let window = ScanWindow::default();
        assert_relative_eq!(window.width(), PI);

        assert!(window.contains(0.0, 0.0));
        assert!(window.contains(0.0, FRAC_PI_2));
        assert!(window.contains(0.0, -FRAC_PI_2));
        assert!(!window.contains(0.0, PI));
        assert!(!window.contains(0.0, 2.0));
    }

    #[test]
    fn test_follows_heading_across_seam() {
        let window = ScanWindow::symmetric(PI / 3.0);

        // Facing -X: the window straddles ±π
        assert!(window.contains(PI, PI - 0.5));
        assert!(window.contains(PI, -PI + 0.5));
        assert!(!window.contains(PI, 0.0));
        assert!(!window.contains(PI, PI - 0.6));
    }

    #[test]
    fn test_full_circle_window() {
        let window = ScanWindow::new(-PI, PI);
        for i in 0..36 {
            let angle = -PI + i as f64 * PI / 18.0;
            assert!(window.contains(1.0, angle), "{} outside", angle);
        }
    }

    #[test]
    fn test_validate() {
        assert!(ScanWindow::default().validate().is_ok());
        assert!(ScanWindow::new(-PI, PI).validate().is_ok());
        assert!(ScanWindow::new(0.5, 0.5).validate().is_err());
        assert!(ScanWindow::new(-4.0, 0.0).validate().is_err());
        assert!(ScanWindow::new(1.0, -1.0).validate().is_err());
    }
}
