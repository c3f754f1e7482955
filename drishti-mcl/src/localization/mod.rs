//! Localization module.
//!
//! Provides Monte Carlo Localization (MCL) of a 2D observer on a known
//! polygonal map, scored by simulated lidar scans.
//!
//! # Components
//!
//! - [`MotionModel`]: commanded displacement plus magnitude-scaled noise
//! - [`scan_weight`]: inverse mean-absolute-difference scan agreement
//! - [`low_variance_resample`]: systematic resampling
//! - [`ParticleFilter`]: full MCL step with parallel weighting
//!
//! # Example
//!
//! ```ignore
//! use drishti_mcl::{FilterConfig, OccupancyRaster, ParticleFilter};
//!
//! let occupancy = OccupancyRaster::from_environment(1200, 900, &environment);
//! let mut filter = ParticleFilter::new(FilterConfig::default(), occupancy)?;
//!
//! // Predict step with the commanded displacement
//! filter.particle_update(5.0, 0.0);
//!
//! // Update step against the true observer position
//! filter.filtering(&environment, observer, None);
//!
//! let position = filter.estimate();
//! ```

mod motion_model;
mod particle_filter;
mod resampling;
mod sensor_model;

pub use motion_model::{MotionModel, MotionModelConfig};
pub use particle_filter::{FilterState, Particle, ParticleFilter};
pub use resampling::{low_variance_indices, low_variance_resample};
pub use sensor_model::{BLOCKED_WEIGHT, scan_weight};
