//! Simulated range scans.
//!
//! - [`RangeVector`]: one range per angular bucket around the full circle
//! - [`RayCastScanner`]: turns visible edges into a range vector and applies
//!   sensor noise
//! - [`ScanWindow`]: optional field of view relative to the sensor heading

mod range;
mod scanner;
mod window;

pub use range::{RangeVector, UNSET_RANGE};
pub use scanner::RayCastScanner;
pub use window::ScanWindow;
