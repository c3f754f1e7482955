//! drishti-sim: headless localization scenario runner
//!
//! Replays a scripted observer trajectory through the particle filter and
//! reports the position error per step.
//!
//! # Usage
//!
//! ```bash
//! # Built-in demo room
//! cargo run --release --bin drishti-sim
//!
//! # Scenario file, with PNG frames written per step
//! cargo run --release --bin drishti-sim -- --scenario scenarios/l_room.yaml --output frames
//!
//! # Overrides
//! cargo run --release --bin drishti-sim -- --seed 7 --particles 1000 --steps 20
//!
//! # Forward-facing 180° lidar, facing +Y, with the ray fan drawn on frames
//! cargo run --release --bin drishti-sim -- --fov 180 --heading 90 --rays --output frames
//! ```

use clap::Parser;
use drishti_mcl::{Result, ScanWindow, Scenario, ScenarioConfig};
use std::path::PathBuf;

/// Particle filter localization simulator
#[derive(Parser, Debug)]
#[command(name = "drishti-sim", author, version, about, long_about = None)]
struct Args {
    /// Scenario YAML file (built-in demo when omitted)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Random seed override (0 = entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Particle count override
    #[arg(short, long)]
    particles: Option<usize>,

    /// Directory for per-step PNG frames
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of steps to run
    #[arg(long)]
    steps: Option<usize>,

    /// Limit the lidar to a field of view centred on the heading (degrees)
    #[arg(long)]
    fov: Option<f64>,

    /// Observer heading override (degrees)
    #[arg(long)]
    heading: Option<f64>,

    /// Draw the observed ray fan on rendered frames
    #[arg(long)]
    rays: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.scenario {
        Some(path) => {
            log::info!("Loading scenario from {}", path.display());
            ScenarioConfig::load(path)?
        }
        None => {
            log::info!("No scenario given, running built-in demo");
            ScenarioConfig::demo()
        }
    };

    if let Some(seed) = args.seed {
        config.filter.seed = seed;
    }
    if let Some(particles) = args.particles {
        config.filter.num_particles = particles;
    }
    if args.output.is_some() {
        config.render = args.output.clone();
    }
    if let Some(fov) = args.fov {
        config.filter.scan_window = Some(ScanWindow::symmetric(fov.to_radians()));
    }
    if let Some(heading) = args.heading {
        config.heading = heading.to_radians();
    }
    if args.rays {
        config.render_rays = true;
    }
    config.filter.validate()?;

    let mut scenario = Scenario::new(config)?;
    let report = scenario.run(args.steps)?;

    match (report.final_error(), report.mean_error()) {
        (Some(final_error), Some(mean_error)) => println!(
            "steps: {}  final error: {:.2} px  mean error: {:.2} px  step time: {:.1} ms",
            report.steps.len(),
            final_error,
            mean_error,
            report.mean_step_time().as_secs_f64() * 1000.0
        ),
        _ => println!("no steps run"),
    }

    Ok(())
}
