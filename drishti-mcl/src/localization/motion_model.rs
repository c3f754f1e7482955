//! Displacement motion model for the particle filter.
//!
//! Every particle receives the same commanded displacement plus its own
//! zero-mean Gaussian noise, drawn independently per axis. The noise scales
//! with the size of the command on that axis:
//!
//! ```text
//! σ_axis = stddev_ratio · |m_axis| + stddev_floor
//! ```
//!
//! so a stationary observer still diffuses slightly and long moves spread
//! the population proportionally.

use crate::core::{NoiseGenerator, Point2D};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the displacement motion model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionModelConfig {
    /// Noise standard deviation per unit of commanded displacement.
    /// Typical: 0.05-0.2
    #[serde(default = "default_stddev_ratio")]
    pub stddev_ratio: f64,

    /// Noise standard deviation applied even for zero displacement (pixels).
    #[serde(default = "default_stddev_floor")]
    pub stddev_floor: f64,
}

fn default_stddev_ratio() -> f64 {
    0.1
}
fn default_stddev_floor() -> f64 {
    0.5
}

impl Default for MotionModelConfig {
    fn default() -> Self {
        Self {
            stddev_ratio: default_stddev_ratio(),
            stddev_floor: default_stddev_floor(),
        }
    }
}

impl MotionModelConfig {
    /// Exact motion, no noise.
    pub fn noiseless() -> Self {
        Self {
            stddev_ratio: 0.0,
            stddev_floor: 0.0,
        }
    }

    /// Reject negative noise parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.stddev_ratio >= 0.0 && self.stddev_floor >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "motion noise must be non-negative, got ratio {} floor {}",
                self.stddev_ratio, self.stddev_floor
            )));
        }
        Ok(())
    }
}

/// Samples noisy displacements for particles.
#[derive(Debug, Clone)]
pub struct MotionModel {
    config: MotionModelConfig,
}

impl MotionModel {
    /// Create a new motion model.
    pub fn new(config: MotionModelConfig) -> Self {
        Self { config }
    }

    /// Noise standard deviation for a commanded displacement on one axis.
    #[inline]
    pub fn stddev_for(&self, commanded: f64) -> f64 {
        self.config.stddev_ratio * commanded.abs() + self.config.stddev_floor
    }

    /// Draw one noisy realisation of `displacement`.
    pub fn sample(&self, displacement: Point2D, noise: &mut NoiseGenerator) -> Point2D {
        Point2D::new(
            displacement.x + noise.gaussian(self.stddev_for(displacement.x)),
            displacement.y + noise.gaussian(self.stddev_for(displacement.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_noiseless_is_exact() {
        let model = MotionModel::new(MotionModelConfig::noiseless());
        let mut noise = NoiseGenerator::new(1);
        let moved = model.sample(Point2D::new(12.0, -3.0), &mut noise);
        assert_eq!(moved, Point2D::new(12.0, -3.0));
    }

    #[test]
    fn test_stddev_scales_with_command() {
        let model = MotionModel::new(MotionModelConfig::default());
        assert_relative_eq!(model.stddev_for(0.0), 0.5);
        assert_relative_eq!(model.stddev_for(-20.0), 2.5);
    }

    #[test]
    fn test_sample_mean_matches_command() {
        let model = MotionModel::new(MotionModelConfig::default());
        let mut noise = NoiseGenerator::new(42);
        let command = Point2D::new(10.0, 0.0);

        let n = 5000;
        let mut sum = Point2D::ZERO;
        let mut sq_y = 0.0;
        for _ in 0..n {
            let d = model.sample(command, &mut noise);
            sum += d;
            sq_y += d.y * d.y;
        }
        let mean = sum * (1.0 / n as f64);

        assert!((mean.x - 10.0).abs() < 0.1, "mean x {}", mean.x);
        assert!(mean.y.abs() < 0.05, "mean y {}", mean.y);
        // Y axis only carries the floor noise
        assert!(((sq_y / n as f64).sqrt() - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_validate() {
        assert!(MotionModelConfig::default().validate().is_ok());
        assert!(MotionModelConfig::noiseless().validate().is_ok());
        let bad = MotionModelConfig {
            stddev_ratio: -0.1,
            stddev_floor: 0.5,
        };
        assert!(bad.validate().is_err());
    }
}
