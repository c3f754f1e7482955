//! Simulation harness.
//!
//! Everything around the filter that a headless run needs: the ground-truth
//! context, the diagnostic canvas and scripted scenarios.

mod canvas;
mod context;
mod scenario;

pub use canvas::Canvas;
pub use context::SimulationContext;
pub use scenario::{Scenario, ScenarioReport, StepReport};
