//! Core state types for the floating-body simulation.
//!
//! Defines the Body Store and the small value types that flow into a step:
//! - `Body` / `System` using `NVec2` for all physics
//! - `Bounds` for the soft containment box
//! - `PointerSample` for the latest pointer position in world space
//!
//! The system owns its RNG so the degeneracy guards stay reproducible per seed.

use nalgebra::{Vector2, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub id: usize,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub half_extents: NVec2, // collision half size, fixed for the body's lifetime
    pub drift: NVec2, // per-frame velocity bias
    pub depth: f64, // parallax only, never read by physics
    pub rotation: f64, // cosmetic
    pub spin: f64, // cosmetic angular velocity
    pub phase: f64, // float offset phase
    pub float_speed: f64, // float offset angular frequency
    pub hovered: bool,
    pub dragged: bool,
}

impl Body {
    /// Body at rest at `x` with square half extents `extent`.
    pub fn new(id: usize, x: NVec2, extent: f64) -> Self {
        Self {
            id,
            x,
            v: NVec2::zeros(),
            half_extents: NVec2::new(extent, extent),
            drift: NVec2::zeros(),
            depth: 0.0,
            rotation: 0.0,
            spin: 0.0,
            phase: 0.0,
            float_speed: 0.0,
            hovered: false,
            dragged: false,
        }
    }

    /// Radius used by pairwise collision and picking: the larger half extent.
    pub fn extent(&self) -> f64 {
        self.half_extents.x.max(self.half_extents.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>,
    pub t: f64, // accumulated clamped time
    rng: StdRng,
}

impl System {
    pub fn new(bodies: Vec<Body>, seed: u64) -> Self {
        Self {
            bodies,
            t: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random unit vector, never degenerate.
    pub fn random_unit(&mut self) -> NVec2 {
        random_unit(&mut self.rng)
    }
}

pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> NVec2 {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    NVec2::new(angle.cos(), angle.sin())
}

/// Containment half size in world units, recomputed on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_width: f64,
    pub half_height: f64,
}

impl Bounds {
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self { half_width, half_height }
    }

    pub fn as_vec(&self) -> NVec2 {
        NVec2::new(self.half_width, self.half_height)
    }
}

/// Pointer position in world space. `active` is false once the pointer has
/// left the interaction surface; the last coordinates are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

impl PointerSample {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, active: true }
    }

    pub fn inactive() -> Self {
        Self { x: 0.0, y: 0.0, active: false }
    }

    pub fn position(&self) -> NVec2 {
        NVec2::new(self.x, self.y)
    }
}

impl Default for PointerSample {
    fn default() -> Self {
        Self::inactive()
    }
}
