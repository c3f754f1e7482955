//! Scripted localization scenarios.
//!
//! A scenario replays a list of displacement commands. Each step moves the
//! true observer (moves into blocked cells are refused), propagates the
//! particles with the displacement that actually happened, runs one filter
//! step and records the position error.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::ScenarioConfig;
use crate::core::Point2D;
use crate::error::Result;
use crate::geometry::Environment;
use crate::localization::ParticleFilter;
use crate::map::OccupancyRaster;

use super::{Canvas, SimulationContext};

/// Outcome of one scenario step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// True observer position after the move
    pub observer: Point2D,
    /// Filter estimate for this step
    pub estimate: Point2D,
    /// Distance between estimate and observer (pixels)
    pub error: f64,
    /// Effective particle count
    pub neff: f64,
    /// Whether the commanded move was refused
    pub rejected: bool,
    /// Wall time of the filter step
    pub elapsed: Duration,
}

/// Summary of a scenario run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioReport {
    /// Per-step results, in order
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    /// Position error after the last step.
    pub fn final_error(&self) -> Option<f64> {
        self.steps.last().map(|s| s.error)
    }

    /// Mean position error over all steps.
    pub fn mean_error(&self) -> Option<f64> {
        if self.steps.is_empty() {
            return None;
        }
        Some(self.steps.iter().map(|s| s.error).sum::<f64>() / self.steps.len() as f64)
    }

    /// Mean wall time of a filter step.
    pub fn mean_step_time(&self) -> Duration {
        if self.steps.is_empty() {
            return Duration::ZERO;
        }
        self.steps.iter().map(|s| s.elapsed).sum::<Duration>() / self.steps.len() as u32
    }

    /// Number of refused moves.
    pub fn rejected_moves(&self) -> usize {
        self.steps.iter().filter(|s| s.rejected).count()
    }
}

/// A ready-to-run scenario: world, filter and ground truth.
#[derive(Debug)]
pub struct Scenario {
    environment: Environment,
    occupancy: OccupancyRaster,
    filter: ParticleFilter,
    context: SimulationContext,
    moves: Vec<Point2D>,
    render_dir: Option<PathBuf>,
}

impl Scenario {
    /// Rasterize the map and build the filter.
    pub fn new(config: ScenarioConfig) -> Result<Self> {
        let ScenarioConfig {
            map,
            filter,
            start,
            heading,
            moves,
            render,
            render_rays,
        } = config;

        let occupancy = OccupancyRaster::from_environment(map.width, map.height, &map.environment);
        log::info!(
            "Scenario map {}x{}: {} obstacles, {} wall segments, {} moves",
            map.width,
            map.height,
            map.environment.obstacles.len(),
            map.environment.segment_count(),
            moves.len()
        );
        let mut context = match &render {
            Some(_) => SimulationContext::with_canvas(
                start,
                Canvas::new(map.width, map.height).with_rays(render_rays),
            ),
            None => SimulationContext::new(start),
        };
        context.set_heading(heading);
        if !occupancy.is_free(start) {
            log::warn!("Observer starts in a blocked cell at ({:.1}, {:.1})", start.x, start.y);
        }

        let filter = ParticleFilter::new(filter, occupancy.clone())?;

        Ok(Self {
            environment: map.environment,
            occupancy,
            filter,
            context,
            moves,
            render_dir: render,
        })
    }

    /// The particle filter being driven.
    pub fn filter(&self) -> &ParticleFilter {
        &self.filter
    }

    /// Current ground truth.
    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    /// Number of scripted moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True if the script has no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Run every scripted move, or the first `max_steps` of them.
    pub fn run(&mut self, max_steps: Option<usize>) -> Result<ScenarioReport> {
        if let Some(dir) = &self.render_dir {
            std::fs::create_dir_all(dir)?;
        }

        let steps = max_steps.map_or(self.moves.len(), |n| n.min(self.moves.len()));
        let mut report = ScenarioReport {
            steps: Vec::with_capacity(steps),
        };

        for index in 0..steps {
            let step = self.step(index)?;
            log::info!(
                "Step {}/{}: observer ({:.1}, {:.1}), estimate ({:.1}, {:.1}), error {:.1} px, neff {:.1}",
                index + 1,
                steps,
                step.observer.x,
                step.observer.y,
                step.estimate.x,
                step.estimate.y,
                step.error,
                step.neff
            );
            report.steps.push(step);
        }

        if let (Some(final_error), Some(mean_error)) = (report.final_error(), report.mean_error()) {
            log::info!(
                "Scenario finished: {} steps, final error {:.1} px, mean error {:.1} px, {:.1} ms/step, {} moves refused",
                report.steps.len(),
                final_error,
                mean_error,
                report.mean_step_time().as_secs_f64() * 1000.0,
                report.rejected_moves()
            );
        }

        Ok(report)
    }

    fn step(&mut self, index: usize) -> Result<StepReport> {
        let command = self.moves[index];
        let rejected = !self.context.try_move(command, &self.occupancy);
        let applied = if rejected { Point2D::ZERO } else { command };

        self.filter.particle_update(applied.x, applied.y);

        let started = Instant::now();
        let state = self.context.step(&mut self.filter, &self.environment);
        let elapsed = started.elapsed();

        if let (Some(dir), Some(canvas)) = (&self.render_dir, self.context.canvas()) {
            canvas.save(dir.join(format!("frame_{:04}.png", index)))?;
        }

        let observer = self.context.observer();
        Ok(StepReport {
            observer,
            estimate: state.estimate,
            error: state.estimate.distance(&observer),
            neff: state.neff,
            rejected,
            elapsed,
        })
    }
}
