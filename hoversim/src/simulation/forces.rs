//! Per-body velocity contributors for the floating-body field
//!
//! Defines the [`VelocityTerm`] trait and the three per-body terms:
//! drift, pointer repulsion and soft boundary containment. Pairwise
//! collision resolution moves positions as well and lives in `collision`.

use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{Bounds, NVec2, PointerSample, System};

/// Degeneracy guard. Repulsion compares squared distance against it, collisions
/// compare plain distance; at or below it no direction is computed.
pub const DISTANCE_EPSILON: f64 = 1e-3;

/// Everything a term may read besides the bodies themselves.
#[derive(Debug, Clone, Copy)]
pub struct FieldInput {
    pub pointer: PointerSample,
    pub bounds: Bounds,
    pub dt: f64,
}

/// Collection of velocity terms (drift, repulsion, containment)
/// Each term implements [`VelocityTerm`] and their contributions are summed
/// into a single velocity delta per body
pub struct ForceSet {
    terms: Vec<Box<dyn VelocityTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a term; terms are evaluated in insertion order
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: VelocityTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Drift, repulsion and containment, in that order.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new()
            .with(Drift)
            .with(PointerRepulsion {
                radius: config.repulsion_radius,
                strength: config.repulsion_strength,
            })
            .with(SoftBoundary {
                strength: config.boundary_strength,
            })
    }

    /// Compute the velocity delta for this frame for every body in `sys`
    /// - `out[i]` is zeroed, then every term adds into it
    pub fn accumulate(&self, input: &FieldInput, sys: &mut System, out: &mut [NVec2]) {
        for dv in out.iter_mut() {
            *dv = NVec2::zeros();
        }
        for term in &self.terms {
            term.contribute(input, sys, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for velocity sources operating on [`System`]
/// Implementations add into `out[i]` for each body they affect. The system is
/// mutable only so terms can draw from its RNG.
pub trait VelocityTerm {
    fn contribute(&self, input: &FieldInput, sys: &mut System, out: &mut [NVec2]);
}

/// Constant per-body bias, applied every frame to every body not being dragged
pub struct Drift;

impl VelocityTerm for Drift {
    fn contribute(&self, _input: &FieldInput, sys: &mut System, out: &mut [NVec2]) {
        for (b, dv) in sys.bodies.iter().zip(out.iter_mut()) {
            if !b.dragged {
                *dv += b.drift;
            }
        }
    }
}

/// Radial push away from an active pointer, falling off linearly to zero at `radius`
pub struct PointerRepulsion {
    pub radius: f64,
    pub strength: f64,
}

impl VelocityTerm for PointerRepulsion {
    fn contribute(&self, input: &FieldInput, sys: &mut System, out: &mut [NVec2]) {
        if !input.pointer.active {
            return;
        }
        let p = input.pointer.position();

        for i in 0..sys.bodies.len() {
            if sys.bodies[i].dragged {
                continue;
            }
            let d = sys.bodies[i].x - p;
            let d2 = d.norm_squared();
            if d2 >= self.radius * self.radius {
                continue;
            }

            out[i] += if d2 > DISTANCE_EPSILON {
                repulsion_delta(d, self.radius, self.strength, input.dt)
            } else {
                // pointer sits on the body, no usable direction
                sys.random_unit() * self.strength * input.dt
            };
        }
    }
}

/// Velocity delta for a body at offset `d` from the pointer.
///
/// Zero at or beyond `radius`. Callers must handle `|d|² <= DISTANCE_EPSILON`
/// themselves; this returns zero there instead of normalizing.
pub fn repulsion_delta(d: NVec2, radius: f64, strength: f64, dt: f64) -> NVec2 {
    let d2 = d.norm_squared();
    if d2 >= radius * radius || d2 <= DISTANCE_EPSILON {
        return NVec2::zeros();
    }
    let dist = d2.sqrt();
    let falloff = 1.0 - dist / radius;
    (d / dist) * falloff * strength * dt
}

/// Restoring nudge per axis once a body's edge passes the bounds.
/// Not a reflection: bodies may overshoot before being pulled back.
pub struct SoftBoundary {
    pub strength: f64,
}

impl VelocityTerm for SoftBoundary {
    fn contribute(&self, input: &FieldInput, sys: &mut System, out: &mut [NVec2]) {
        let limit = input.bounds.as_vec();
        let push = self.strength * input.dt;

        for (b, dv) in sys.bodies.iter().zip(out.iter_mut()) {
            if b.dragged {
                continue;
            }
            for axis in 0..2 {
                let x = b.x[axis];
                let h = b.half_extents[axis];
                if x > 0.0 && x + h > limit[axis] {
                    dv[axis] -= push;
                } else if x < 0.0 && x - h < -limit[axis] {
                    dv[axis] += push;
                }
            }
        }
    }
}
