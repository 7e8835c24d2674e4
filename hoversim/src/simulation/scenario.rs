//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - tuning (`SimulationConfig`, preset plus overrides)
//! - the camera and viewport the input adapter maps pointer events with
//! - bodies spawned once on a jittered ring, seeded for reproducibility
//!
//! The result is a stopped [`FrameLoop`] and the [`InputAdapter`] that feeds it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use tracing::info;

use crate::configuration::config::{ScenarioConfig, SpawnConfig};
use crate::error::ConfigError;
use crate::input::adapter::{Camera, InputAdapter, Viewport};
use crate::simulation::engine::SimulationContext;
use crate::simulation::params::SimulationConfig;
use crate::simulation::scheduler::FrameLoop;
use crate::simulation::states::{random_unit, Body, Bounds, NVec2, System};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: SimulationConfig,
    pub spawn: SpawnConfig,
    pub camera: Camera,
    pub viewport: Viewport,
    pub seed: u64,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let config = cfg.simulation_config()?;
        cfg.spawn.validate()?;
        cfg.view.validate()?;

        Ok(Self {
            config,
            spawn: cfg.spawn,
            camera: Camera {
                fov_degrees: cfg.view.fov_degrees,
                distance: cfg.view.camera_distance,
            },
            viewport: Viewport::sized(cfg.view.width, cfg.view.height),
            seed: cfg.seed,
        })
    }

    /// Spawn the bodies and wire up a stopped frame loop plus its input adapter.
    pub fn instantiate(&self) -> Result<(FrameLoop, InputAdapter), ConfigError> {
        let adapter = InputAdapter::new(self.camera, self.viewport);
        let bounds = adapter.bounds();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let bodies = spawn_bodies(&self.spawn, bounds, self.config.drift_strength, &mut rng);
        info!(
            bodies = bodies.len(),
            half_width = bounds.half_width,
            half_height = bounds.half_height,
            seed = self.seed,
            "scenario built"
        );

        // separate stream for the runtime guards
        let system = System::new(bodies, rng.gen());
        let ctx = SimulationContext::new(system, self.config.clone(), bounds)?;
        Ok((FrameLoop::new(ctx), adapter))
    }
}

/// Place `spawn.count` bodies evenly around a ring with angular and radial
/// jitter, so they start spread out rather than clustered.
pub fn spawn_bodies<R: Rng + ?Sized>(
    spawn: &SpawnConfig,
    bounds: Bounds,
    drift_strength: f64,
    rng: &mut R,
) -> Vec<Body> {
    let ring = bounds.half_width.min(bounds.half_height);

    (0..spawn.count)
        .map(|i| {
            let angle = i as f64 / spawn.count as f64 * TAU
                + rng.gen_range(-spawn.angle_jitter..=spawn.angle_jitter);
            let radius = ring * rng.gen_range(spawn.radial_min..=spawn.radial_max);
            let x = NVec2::new(angle.cos(), angle.sin()) * radius;

            let size = spawn.size * (1.0 + rng.gen_range(-spawn.size_jitter..=spawn.size_jitter));

            let mut body = Body::new(i, x, size);
            body.half_extents = NVec2::new(size * spawn.aspect, size);
            body.drift = random_unit(rng) * drift_strength * rng.gen_range(0.5..=1.0);
            body.depth = rng.gen_range(spawn.depth_min..=spawn.depth_max);
            body.rotation = rng.gen_range(-0.3..=0.3);
            body.phase = rng.gen_range(0.0..TAU);
            body.float_speed = rng.gen_range(spawn.float_speed_min..=spawn.float_speed_max);
            body
        })
        .collect()
}
