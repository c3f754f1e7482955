//! Core foundation layer.
//!
//! This is the bottom layer of the localization stack with no internal
//! dependencies. All other layers depend on core.
//!
//! # Contents
//!
//! - [`math`]: Angle normalization and angular arithmetic
//! - [`point`]: 2D point type in map pixel coordinates
//! - [`noise`]: Seeded Gaussian/uniform noise generator

pub mod math;
pub mod noise;
pub mod point;

pub use noise::NoiseGenerator;
pub use point::Point2D;
