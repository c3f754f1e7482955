//! Particle filter (Monte Carlo Localization) implementation.
//!
//! Localizes a 2D observer on a known polygonal map by comparing simulated
//! range scans. Scans cover the full circle unless the configuration limits
//! them to a window around the observer heading, which is known and shared
//! by every particle. Each step:
//!
//! 1. Scan the environment from the true observer position
//! 2. Weight every particle in parallel by how well its predicted scan agrees
//! 3. Normalize the weights and record the weighted mean as the estimate
//! 4. Rebuild the population with low-variance resampling
//! 5. Optionally render the result

use rayon::prelude::*;

use crate::config::FilterConfig;
use crate::core::{NoiseGenerator, Point2D};
use crate::error::{Error, Result};
use crate::geometry::{Environment, VisualVolume};
use crate::map::OccupancyRaster;
use crate::scan::{RangeVector, RayCastScanner, ScanWindow};
use crate::sim::Canvas;

use super::motion_model::MotionModel;
use super::resampling::low_variance_indices;
use super::sensor_model::{BLOCKED_WEIGHT, scan_weight};

/// A single particle representing a possible observer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Hypothesized position (map pixels).
    pub position: Point2D,
    /// Normalized weight the particle carried when it was last selected.
    pub weight: f64,
}

impl Particle {
    /// Create a new particle with unit weight.
    pub fn new(position: Point2D) -> Self {
        Self {
            position,
            weight: 1.0,
        }
    }

    /// Create a new particle with specified weight.
    pub fn with_weight(position: Point2D, weight: f64) -> Self {
        Self { position, weight }
    }
}

/// State of the particle filter for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Total number of filter steps.
    pub iterations: u64,
    /// Weighted mean position before resampling.
    pub estimate: Point2D,
    /// Effective number of particles.
    pub neff: f64,
    /// Largest normalized weight.
    pub max_weight: f64,
    /// Particles standing in blocked cells this step.
    pub blocked: usize,
}

/// Monte Carlo Localization particle filter.
pub struct ParticleFilter {
    config: FilterConfig,
    occupancy: OccupancyRaster,
    scanner: RayCastScanner,
    motion_model: MotionModel,
    particles: Vec<Particle>,
    noise: NoiseGenerator,
    pool: rayon::ThreadPool,
    heading: f64,
    state: FilterState,
}

impl std::fmt::Debug for ParticleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleFilter")
            .field("config", &self.config)
            .field("particles", &self.particles.len())
            .field("ray_num", &self.scanner.ray_num())
            .field("heading", &self.heading)
            .field("state", &self.state)
            .finish()
    }
}

impl ParticleFilter {
    /// Create a filter and draw its initial population from free space.
    pub fn new(config: FilterConfig, occupancy: OccupancyRaster) -> Result<Self> {
        let mut filter = Self::build(config, occupancy, Vec::new())?;
        filter.particle_initialize()?;
        Ok(filter)
    }

    /// Create a filter with a caller-supplied population.
    ///
    /// The population size becomes the configured particle count.
    pub fn with_particles(
        mut config: FilterConfig,
        occupancy: OccupancyRaster,
        positions: Vec<Point2D>,
    ) -> Result<Self> {
        if positions.is_empty() {
            return Err(Error::InvalidParameter(
                "particle population must not be empty".to_string(),
            ));
        }
        config.num_particles = positions.len();
        config.max_init_attempts = config.max_init_attempts.max(positions.len());

        let weight = 1.0 / positions.len() as f64;
        let particles = positions
            .into_iter()
            .map(|p| Particle::with_weight(p, weight))
            .collect();
        Self::build(config, occupancy, particles)
    }

    fn build(
        config: FilterConfig,
        occupancy: OccupancyRaster,
        particles: Vec<Particle>,
    ) -> Result<Self> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .thread_name(|i| format!("drishti-weight-{}", i))
            .build()?;
        let scanner = RayCastScanner::new(config.angle_increment, config.sensor_noise_stddev)
            .with_window(config.scan_window);

        log::info!(
            "Particle filter: {} particles, {} rays, {} threads, map {}x{}",
            config.num_particles,
            scanner.ray_num(),
            config.num_threads,
            occupancy.width(),
            occupancy.height()
        );

        Ok(Self {
            noise: NoiseGenerator::new(config.seed),
            motion_model: MotionModel::new(config.motion),
            config,
            occupancy,
            scanner,
            particles,
            pool,
            heading: 0.0,
            state: FilterState::default(),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Get the occupancy raster particles are checked against.
    pub fn occupancy(&self) -> &OccupancyRaster {
        &self.occupancy
    }

    /// Get current particles (for visualization).
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Get current filter state (for diagnostics).
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Get the number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Number of rays in every scan.
    pub fn ray_num(&self) -> usize {
        self.scanner.ray_num()
    }

    /// Field of view of the simulated sensor (`None` = full circle).
    pub fn scan_window(&self) -> Option<ScanWindow> {
        self.scanner.window()
    }

    /// Observer heading the scan window is centred on.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Set the observer heading used by the following steps.
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
    }

    /// Replace the population with positions sampled uniformly from the
    /// traversable part of the init region.
    ///
    /// Fails when the attempt cap is reached first; the old population is
    /// kept in that case.
    pub fn particle_initialize(&mut self) -> Result<()> {
        let n = self.config.num_particles;
        let region = self.config.init_region;
        let mut particles = Vec::with_capacity(n);
        let mut attempts = 0;

        while particles.len() < n {
            if attempts >= self.config.max_init_attempts {
                log::warn!(
                    "Initialization gave up after {} attempts with {} of {} particles",
                    attempts,
                    particles.len(),
                    n
                );
                return Err(Error::InitializationFailed {
                    requested: n,
                    found: particles.len(),
                    attempts,
                });
            }
            attempts += 1;

            let candidate = Point2D::new(
                self.noise.uniform_range(region.min.x, region.max.x),
                self.noise.uniform_range(region.min.y, region.max.y),
            );
            if self.occupancy.is_free(candidate) {
                particles.push(Particle::with_weight(candidate, 1.0 / n as f64));
            }
        }

        log::debug!("Initialized {} particles in {} attempts", n, attempts);
        self.particles = particles;
        self.state = FilterState::default();
        Ok(())
    }

    /// Prediction step: move every particle by the commanded displacement
    /// plus independent per-axis noise.
    pub fn particle_update(&mut self, mx: f64, my: f64) {
        let command = Point2D::new(mx, my);
        for particle in &mut self.particles {
            particle.position += self.motion_model.sample(command, &mut self.noise);
        }
    }

    /// Noisy scan of `environment` as seen from `position` at the current
    /// heading.
    pub fn expected_scan(
        &self,
        environment: &Environment,
        position: Point2D,
        noise: &mut NoiseGenerator,
    ) -> RangeVector {
        self.scanner.scan_environment_oriented(environment, position, self.heading, noise)
    }

    /// Unnormalized weight of every particle against the `actual` scan.
    ///
    /// Particles in blocked cells get a fixed floor weight without a scan.
    /// Each particle draws its scan noise from its own generator forked off
    /// the filter's, so results do not depend on thread scheduling.
    pub fn compute_weights(
        &mut self,
        environment: &Environment,
        actual: &RangeVector,
    ) -> Vec<f64> {
        let noises: Vec<NoiseGenerator> =
            (0..self.particles.len()).map(|_| self.noise.fork()).collect();

        let scanner = &self.scanner;
        let occupancy = &self.occupancy;
        let particles = &self.particles;
        let heading = self.heading;

        self.pool.install(|| {
            particles
                .par_iter()
                .zip(noises.into_par_iter())
                .map(|(particle, mut noise)| {
                    if !occupancy.is_free(particle.position) {
                        return BLOCKED_WEIGHT;
                    }
                    let predicted = scanner.scan_environment_oriented(
                        environment,
                        particle.position,
                        heading,
                        &mut noise,
                    );
                    scan_weight(actual, &predicted)
                })
                .collect()
        })
    }

    /// Run one full filter step against the true `observer` position.
    pub fn filtering(
        &mut self,
        environment: &Environment,
        observer: Point2D,
        canvas: Option<&mut Canvas>,
    ) -> &FilterState {
        let volume = VisualVolume::compute(environment, observer);
        let actual = self.scanner.scan_oriented(
            volume.edges(),
            observer,
            self.heading,
            &mut self.noise,
        );

        let mut weights = self.compute_weights(environment, &actual);

        // Every weight is at least BLOCKED_WEIGHT
        let sum: f64 = weights.iter().sum();
        debug_assert!(sum > 0.0);
        for w in &mut weights {
            *w /= sum;
        }

        let blocked = self
            .particles
            .iter()
            .filter(|p| !self.occupancy.is_free(p.position))
            .count();
        let estimate = self
            .particles
            .iter()
            .zip(&weights)
            .fold(Point2D::ZERO, |acc, (p, &w)| acc + p.position * w);
        let sum_sq: f64 = weights.iter().map(|w| w * w).sum();

        self.state.iterations += 1;
        self.state.estimate = estimate;
        self.state.neff = if sum_sq > 0.0 { 1.0 / sum_sq } else { 0.0 };
        self.state.max_weight = weights.iter().copied().fold(0.0, f64::max);
        self.state.blocked = blocked;

        if blocked == self.particles.len() {
            log::warn!("All {} particles are in blocked cells", blocked);
        }

        self.resample(&weights);

        if let Some(canvas) = canvas {
            canvas.draw_environment(environment);
            canvas.draw_visual_volume(&volume);
            if canvas.shows_rays() {
                canvas.draw_rays(&actual, observer);
            }
            canvas.draw_particles(&self.particles);
            canvas.draw_estimate(estimate);
        }

        log::debug!(
            "Step {}: estimate ({:.1}, {:.1}), neff {:.1}, max weight {:.4}, blocked {}",
            self.state.iterations,
            estimate.x,
            estimate.y,
            self.state.neff,
            self.state.max_weight,
            blocked
        );

        &self.state
    }

    /// Low-variance resampling; copies keep the weight they were drawn with.
    fn resample(&mut self, weights: &[f64]) {
        let n = self.particles.len();
        if n == 0 {
            return;
        }
        let r = self.noise.uniform_range(0.0, 1.0 / n as f64);
        let resampled: Vec<Particle> = low_variance_indices(weights, r)
            .into_iter()
            .map(|i| Particle::with_weight(self.particles[i].position, weights[i]))
            .collect();
        self.particles = resampled;
    }

    /// Current position estimate.
    ///
    /// The weighted mean from the last step, or the plain population mean
    /// before the first step.
    pub fn estimate(&self) -> Point2D {
        if self.state.iterations > 0 {
            return self.state.estimate;
        }
        if self.particles.is_empty() {
            return Point2D::ZERO;
        }
        let sum = self
            .particles
            .iter()
            .fold(Point2D::ZERO, |acc, p| acc + p.position);
        sum * (1.0 / self.particles.len() as f64)
    }
}
