//! Configuration for DrishtiMCL
//!
//! All structures deserialize from YAML and every field has a default, so a
//! scenario file only needs to spell out what differs from the reference
//! 1200×900 simulation map.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! ScenarioConfig
//! ├── MapConfig                      # Static world
//! │   ├── width, height              # Raster size (pixels)
//! │   ├── boundary                   # Free floor rectangle
//! │   └── obstacles                  # Polygons as [[x, y], ...]
//! ├── FilterConfig                   # Particle filter
//! │   ├── angle_increment            # Ray spacing (radians)
//! │   ├── num_particles, num_threads
//! │   ├── sensor_noise_stddev        # Range noise (pixels)
//! │   ├── scan_window                # Optional field of view
//! │   ├── MotionModelConfig          # Motion noise
//! │   ├── InitRegion                 # Rejection-sampling box
//! │   └── max_init_attempts, seed
//! ├── start, heading                 # True observer start pose
//! ├── moves                          # Scripted displacement commands
//! ├── render                         # Optional PNG frame directory
//! └── render_rays                    # Draw the observed ray fan
//! ```
//!
//! # Default Values
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | angle_increment | π/1800 (0.1°) |
//! | num_particles | 500 |
//! | sensor_noise_stddev | 7.0 px |
//! | scan_window | none (full circle) |
//! | init_region | [38, 1167) × [38, 867) |
//! | num_threads | 8 |

use crate::core::Point2D;
use crate::error::{Error, Result};
use crate::geometry::{Environment, MapBoundary, Obstacle};
use crate::localization::MotionModelConfig;
use crate::scan::ScanWindow;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

// ============================================================================
// Filter
// ============================================================================

/// Box that initial particles are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitRegion {
    /// Inclusive lower corner
    #[serde(default = "default_init_min")]
    pub min: Point2D,
    /// Exclusive upper corner
    #[serde(default = "default_init_max")]
    pub max: Point2D,
}

fn default_init_min() -> Point2D {
    Point2D::new(38.0, 38.0)
}
fn default_init_max() -> Point2D {
    Point2D::new(1167.0, 867.0)
}

impl Default for InitRegion {
    fn default() -> Self {
        Self {
            min: default_init_min(),
            max: default_init_max(),
        }
    }
}

impl InitRegion {
    /// Create a region from two corners.
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// True if the region has positive area.
    pub fn is_valid(&self) -> bool {
        self.max.x > self.min.x && self.max.y > self.min.y
    }
}

/// Particle filter configuration. Fixed for the lifetime of a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Angular spacing between simulated lidar rays (radians)
    #[serde(default = "default_angle_increment")]
    pub angle_increment: f64,

    /// Population size
    #[serde(default = "default_num_particles")]
    pub num_particles: usize,

    /// Standard deviation of the range noise added to every scan (pixels)
    #[serde(default = "default_sensor_noise_stddev")]
    pub sensor_noise_stddev: f64,

    /// Field of view around the observer heading (none = full circle)
    #[serde(default)]
    pub scan_window: Option<ScanWindow>,

    /// Motion noise
    #[serde(default)]
    pub motion: MotionModelConfig,

    /// Rejection-sampling box for the initial population
    #[serde(default)]
    pub init_region: InitRegion,

    /// Samples drawn before initialization gives up
    #[serde(default = "default_max_init_attempts")]
    pub max_init_attempts: usize,

    /// Worker threads used to weight particles
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,

    /// Random seed (0 = entropy)
    #[serde(default)]
    pub seed: u64,
}

fn default_angle_increment() -> f64 {
    PI / 1800.0
}
fn default_num_particles() -> usize {
    500
}
fn default_sensor_noise_stddev() -> f64 {
    7.0
}
fn default_max_init_attempts() -> usize {
    1_000_000
}
fn default_num_threads() -> usize {
    8
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            angle_increment: default_angle_increment(),
            num_particles: default_num_particles(),
            sensor_noise_stddev: default_sensor_noise_stddev(),
            scan_window: None,
            motion: MotionModelConfig::default(),
            init_region: InitRegion::default(),
            max_init_attempts: default_max_init_attempts(),
            num_threads: default_num_threads(),
            seed: 0,
        }
    }
}

impl FilterConfig {
    /// Noise-free configuration, useful for checking scan agreement exactly.
    pub fn noiseless() -> Self {
        Self {
            sensor_noise_stddev: 0.0,
            motion: MotionModelConfig::noiseless(),
            ..Default::default()
        }
    }

    /// Reject parameter combinations the filter cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.angle_increment > 0.0 && self.angle_increment <= PI) {
            return Err(Error::InvalidParameter(format!(
                "angle_increment must be in (0, π], got {}",
                self.angle_increment
            )));
        }
        if self.num_particles == 0 {
            return Err(Error::InvalidParameter(
                "num_particles must be positive".to_string(),
            ));
        }
        if !(self.sensor_noise_stddev >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sensor_noise_stddev must be non-negative, got {}",
                self.sensor_noise_stddev
            )));
        }
        if let Some(window) = &self.scan_window {
            window.validate()?;
        }
        self.motion.validate()?;
        if !self.init_region.is_valid() {
            return Err(Error::InvalidParameter(format!(
                "init_region is empty: {:?}",
                self.init_region
            )));
        }
        if self.max_init_attempts < self.num_particles {
            return Err(Error::InvalidParameter(format!(
                "max_init_attempts ({}) is below num_particles ({})",
                self.max_init_attempts, self.num_particles
            )));
        }
        if self.num_threads == 0 {
            return Err(Error::InvalidParameter(
                "num_threads must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Map and scenario
// ============================================================================

/// Static map description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Raster width (pixels)
    #[serde(default = "default_map_width")]
    pub width: u32,

    /// Raster height (pixels)
    #[serde(default = "default_map_height")]
    pub height: u32,

    /// Boundary and obstacles
    #[serde(flatten)]
    pub environment: Environment,
}

fn default_map_width() -> u32 {
    1200
}
fn default_map_height() -> u32 {
    900
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: default_map_width(),
            height: default_map_height(),
            environment: Environment::default(),
        }
    }
}

/// A scripted localization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// World description
    #[serde(default)]
    pub map: MapConfig,

    /// Filter parameters
    #[serde(default)]
    pub filter: FilterConfig,

    /// True observer start position
    #[serde(default = "default_start")]
    pub start: Point2D,

    /// Observer heading (radians, same frame as ray angles)
    #[serde(default)]
    pub heading: f64,

    /// Displacement commands, one per filter step
    #[serde(default)]
    pub moves: Vec<Point2D>,

    /// Directory for per-step PNG frames (none = no rendering)
    #[serde(default)]
    pub render: Option<PathBuf>,

    /// Draw the observed scan as a ray fan on rendered frames
    #[serde(default)]
    pub render_rays: bool,
}

fn default_start() -> Point2D {
    Point2D::new(600.0, 450.0)
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            filter: FilterConfig::default(),
            start: default_start(),
            heading: 0.0,
            moves: Vec::new(),
            render: None,
            render_rays: false,
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read scenario {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a scenario from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ScenarioConfig = serde_yaml::from_str(content)?;
        config.filter.validate()?;
        Ok(config)
    }

    /// Built-in demo: furnished room, observer walking a rectangular loop.
    pub fn demo() -> Self {
        let obstacles = vec![
            Obstacle::rectangle(Point2D::new(200.0, 150.0), Point2D::new(380.0, 260.0)),
            Obstacle::rectangle(Point2D::new(820.0, 600.0), Point2D::new(1000.0, 760.0)),
            Obstacle::new(vec![
                Point2D::new(560.0, 620.0),
                Point2D::new(700.0, 700.0),
                Point2D::new(600.0, 780.0),
            ]),
            Obstacle::new(vec![
                Point2D::new(850.0, 150.0),
                Point2D::new(1000.0, 180.0),
                Point2D::new(950.0, 320.0),
                Point2D::new(880.0, 280.0),
            ]),
        ];

        let mut moves = Vec::new();
        for (dx, dy, steps) in [(6.0, 0.0, 30), (0.0, 6.0, 20), (-6.0, 0.0, 30), (0.0, -6.0, 20)] {
            moves.extend(std::iter::repeat_n(Point2D::new(dx, dy), steps));
        }

        Self {
            map: MapConfig {
                environment: Environment::new(MapBoundary::default(), obstacles),
                ..Default::default()
            },
            filter: FilterConfig {
                angle_increment: PI / 360.0,
                num_particles: 300,
                seed: 42,
                ..Default::default()
            },
            start: Point2D::new(450.0, 400.0),
            heading: 0.0,
            moves,
            render: None,
            render_rays: false,
        }
    }
}
