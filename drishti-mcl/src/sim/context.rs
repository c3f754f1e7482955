//! Simulation context: the ground truth a filter step runs against.

use crate::core::math::normalize_angle;
use crate::core::Point2D;
use crate::geometry::Environment;
use crate::localization::{FilterState, ParticleFilter};
use crate::map::OccupancyRaster;

use super::Canvas;

/// True observer pose plus an optional render surface.
///
/// Passed by reference into each step so the harness keeps no global state.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    observer: Point2D,
    heading: f64,
    canvas: Option<Canvas>,
}

impl SimulationContext {
    /// Context without rendering.
    pub fn new(observer: Point2D) -> Self {
        Self {
            observer,
            heading: 0.0,
            canvas: None,
        }
    }

    /// Context that renders every step onto `canvas`.
    pub fn with_canvas(observer: Point2D, canvas: Canvas) -> Self {
        Self {
            observer,
            heading: 0.0,
            canvas: Some(canvas),
        }
    }

    /// True observer position.
    pub fn observer(&self) -> Point2D {
        self.observer
    }

    /// Observer heading (radians).
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Turn the observer to face `heading`.
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = normalize_angle(heading);
    }

    /// Render surface, if any.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Move the observer by `displacement` unless the destination is blocked.
    ///
    /// Returns whether the move was applied.
    pub fn try_move(&mut self, displacement: Point2D, occupancy: &OccupancyRaster) -> bool {
        let target = self.observer + displacement;
        if !occupancy.is_free(target) {
            log::debug!(
                "Rejected move to ({:.1}, {:.1}): blocked",
                target.x,
                target.y
            );
            return false;
        }
        self.observer = target;
        true
    }

    /// Run one filter step against this context's observer pose.
    pub fn step(&mut self, filter: &mut ParticleFilter, environment: &Environment) -> FilterState {
        filter.set_heading(self.heading);
        filter
            .filtering(environment, self.observer, self.canvas.as_mut())
            .clone()
    }
}
