//! DrishtiMCL - Monte Carlo localization against polygonal maps
//!
//! Localizes a 2D observer inside a known map made of a rectangular floor and
//! polygonal obstacles. Scans are simulated exactly: a visibility sweep finds
//! the wall seen in every direction, a ray caster turns that into a
//! full-circle range vector, and a particle filter scores each hypothesis by
//! how well its predicted scan agrees with the observed one.
//!
//! # Architecture
//!
//! The crate is organized into 6 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      bin/                           │  ← Executables
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      sim/                           │  ← Harness
//! │        (context, scenario runner, canvas)           │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  localization/                      │  ← Particle filter
//! │     (motion model, weighting, resampling, MCL)      │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     scan/                           │  ← Sensor simulation
//! │            (range vector, ray caster)               │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                geometry/ + map/                     │  ← World model
//! │   (obstacles, boundary, visibility, occupancy)      │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │             (point, math, noise)                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Filter step
//!
//! 1. Scan from the true observer position (visibility + ray cast + noise)
//! 2. Weight particles in parallel: `1 / (MAD + 1)`, or `1e-4` when blocked
//! 3. Normalize, record the weighted mean estimate
//! 4. Low-variance resampling
//!
//! # Example
//!
//! ```ignore
//! use drishti_mcl::{Environment, FilterConfig, OccupancyRaster, ParticleFilter, Point2D};
//!
//! let environment = Environment::default();
//! let occupancy = OccupancyRaster::from_environment(1200, 900, &environment);
//! let mut filter = ParticleFilter::new(FilterConfig::default(), occupancy)?;
//!
//! filter.particle_update(5.0, 0.0);
//! filter.filtering(&environment, Point2D::new(605.0, 450.0), None);
//! println!("{:?}", filter.estimate());
//! ```

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;
pub mod error;

// ============================================================================
// Layer 2: World model (depends on core)
// ============================================================================
pub mod geometry;
pub mod map;

// ============================================================================
// Layer 3: Sensor simulation (depends on core, geometry)
// ============================================================================
pub mod scan;

// ============================================================================
// Layer 4: Localization (depends on all lower layers)
// ============================================================================
pub mod config;
pub mod localization;

// ============================================================================
// Layer 5: Simulation harness
// ============================================================================
pub mod sim;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use crate::core::math;
pub use crate::core::{NoiseGenerator, Point2D};
pub use error::{Error, Result};

// Configuration
pub use config::{FilterConfig, InitRegion, MapConfig, ScenarioConfig};

// World model
pub use geometry::{Edge, Environment, MapBoundary, Obstacle, Segment, VisualVolume};
pub use map::OccupancyRaster;

// Sensor simulation
pub use scan::{RangeVector, RayCastScanner, ScanWindow, UNSET_RANGE};

// Localization
pub use localization::{
    BLOCKED_WEIGHT, FilterState, MotionModel, MotionModelConfig, Particle, ParticleFilter,
    low_variance_indices, low_variance_resample, scan_weight,
};

// Simulation
pub use sim::{Canvas, Scenario, ScenarioReport, SimulationContext, StepReport};
