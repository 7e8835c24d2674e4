//! Fixed-order explicit Euler integration for the floating-body system
//!
//! All forces are bounded and damping removes energy every frame, so a single
//! explicit Euler step with a clamped dt is stable here.

use tracing::warn;

use super::states::{NVec2, System};

/// Largest dt a single step will integrate, seconds. Longer gaps (a
/// backgrounded tab) are truncated instead of replayed.
pub const MAX_DT: f64 = 0.05;

/// Clamp a raw frame time into `[0, MAX_DT]`. Non-finite input integrates nothing.
pub fn clamp_dt(dt_raw: f64) -> f64 {
    if dt_raw.is_finite() {
        dt_raw.clamp(0.0, MAX_DT)
    } else {
        0.0
    }
}

/// Add the accumulated field deltas to every free body
/// Dragged bodies are skipped: their velocity comes from [`follow_pointer`]
pub fn apply_deltas(sys: &mut System, deltas: &[NVec2]) {
    for (b, dv) in sys.bodies.iter_mut().zip(deltas.iter()) {
        if !b.dragged {
            b.v += *dv;
        }
    }
}

pub fn apply_damping(sys: &mut System, damping: f64) {
    for b in sys.bodies.iter_mut() {
        if !b.dragged {
            b.v *= damping;
            b.spin *= damping;
        }
    }
}

/// Overwrite the dragged body's velocity so it closes on `target`
/// v = (target - x) * gain
pub fn follow_pointer(sys: &mut System, target: NVec2, gain: f64) {
    for b in sys.bodies.iter_mut().filter(|b| b.dragged) {
        b.v = (target - b.x) * gain;
    }
}

/// Clamp speeds to `max_speed` and zero anything non-finite.
/// Returns the number of bodies that needed clamping.
pub fn limit_speed(sys: &mut System, max_speed: f64) -> usize {
    let mut clamped = 0;
    for b in sys.bodies.iter_mut() {
        if !b.v.iter().all(|c| c.is_finite()) {
            warn!(body = b.id, "non-finite velocity reset");
            b.v = NVec2::zeros();
            clamped += 1;
            continue;
        }
        let speed = b.v.norm();
        if speed > max_speed {
            b.v *= max_speed / speed;
            clamped += 1;
        }
        if !b.spin.is_finite() {
            b.spin = 0.0;
        }
    }
    clamped
}

/// Advance positions and cosmetic rotation by one step, and the system clock
/// x_n+1 = x_n + dt v_n+1
pub fn euler_step(sys: &mut System, dt: f64) {
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
        b.rotation += dt * b.spin;
    }
    sys.t += dt;
}
