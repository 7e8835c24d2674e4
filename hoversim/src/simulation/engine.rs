//! Simulation context and the single step entry point
//!
//! `SimulationContext` owns everything one hero visual needs between frames:
//! the Body Store, the active force set, the interaction machine, and the
//! latest pointer and bounds. [`step`] advances it by one frame.

use tracing::debug;

use crate::error::ConfigError;
use crate::simulation::collision::{resolve_collisions, CollisionParams};
use crate::simulation::forces::{FieldInput, ForceSet};
use crate::simulation::integrator::{
    apply_damping, apply_deltas, clamp_dt, euler_step, follow_pointer, limit_speed,
};
use crate::simulation::interaction::Interaction;
use crate::simulation::params::SimulationConfig;
use crate::simulation::readout::{read_out, Frame};
use crate::simulation::states::{Bounds, NVec2, PointerSample, System};

pub struct SimulationContext {
    pub system: System,
    config: SimulationConfig,
    forces: ForceSet,
    collision: CollisionParams,
    interaction: Interaction,
    pointer: PointerSample,
    bounds: Bounds,
    deltas: Vec<NVec2>, // reused per-frame buffer
}

/// What happened during one step, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub dt: f64,
    pub contacts: usize,
    pub clamped: usize,
}

impl SimulationContext {
    pub fn new(system: System, config: SimulationConfig, bounds: Bounds) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = system.bodies.len();
        Ok(Self {
            system,
            forces: ForceSet::from_config(&config),
            collision: CollisionParams::from_config(&config),
            interaction: Interaction::new(config.pick_padding, config.release_damping),
            config,
            pointer: PointerSample::inactive(),
            bounds,
            deltas: vec![NVec2::zeros(); n],
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pointer(&self) -> PointerSample {
        self.pointer
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Replace the pointer sample read by the next step.
    pub fn set_pointer(&mut self, pointer: PointerSample) {
        self.pointer = pointer;
    }

    /// Only future containment changes; bodies and drag state are untouched.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            debug!(half_width = bounds.half_width, half_height = bounds.half_height, "bounds resized");
        }
        self.bounds = bounds;
    }

    /// Pointer down at the current pointer sample.
    pub fn press(&mut self) {
        let pointer = self.pointer;
        self.interaction.press(&mut self.system, &pointer);
    }

    /// Pointer up; a dragged body is tossed with damped velocity.
    pub fn release(&mut self) {
        let pointer = self.pointer;
        self.interaction.release(&mut self.system, &pointer);
    }

    pub fn frame(&self) -> Frame {
        read_out(&self.system, &self.config, &self.interaction)
    }
}

/// Advance `ctx` by one frame of `dt_raw` seconds.
///
/// Order: hover update, field terms for free bodies, pointer follow for the
/// dragged body, pairwise collisions, damping, speed ceiling, Euler step.
pub fn step(ctx: &mut SimulationContext, dt_raw: f64) -> StepReport {
    let dt = clamp_dt(dt_raw);
    let pointer = ctx.pointer;

    ctx.interaction.update(&mut ctx.system, &pointer);

    ctx.deltas.resize(ctx.system.bodies.len(), NVec2::zeros());

    let input = FieldInput {
        pointer,
        bounds: ctx.bounds,
        dt,
    };
    ctx.forces.accumulate(&input, &mut ctx.system, &mut ctx.deltas);
    apply_deltas(&mut ctx.system, &ctx.deltas);

    follow_pointer(&mut ctx.system, pointer.position(), ctx.config.drag_follow_gain);

    let contacts = resolve_collisions(&mut ctx.system, &ctx.collision);

    apply_damping(&mut ctx.system, ctx.config.damping);
    let clamped = limit_speed(&mut ctx.system, ctx.config.max_speed);
    if clamped > 0 {
        debug!(clamped, "speed ceiling hit");
    }

    euler_step(&mut ctx.system, dt);

    StepReport { dt, contacts, clamped }
}
