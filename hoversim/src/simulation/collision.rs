//! Pairwise collision resolution between floating bodies
//!
//! Bodies are treated as circles of radius [`Body::extent`] grown by the
//! configured softness. Every unordered pair is visited once (the body count is
//! small, so there is no broad phase). A resolved contact:
//! - moves both bodies apart along the contact normal by a share of the overlap,
//! - exchanges an equal and opposite impulse along the normal when approaching,
//! - kicks cosmetic spin from the tangential relative velocity.
//!
//! A dragged body acts as an immovable mover: it pushes others but is never
//! pushed or slowed itself, since its velocity is owned by the pointer.
//!
//! [`Body::extent`]: crate::simulation::states::Body::extent

use crate::simulation::forces::DISTANCE_EPSILON;
use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{NVec2, System};

/// Separation applied to each of two coincident bodies, world units.
pub const COINCIDENT_NUDGE: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct CollisionParams {
    pub softness: f64,
    pub restitution: f64,
    pub separation_rate: f64,
    pub spin_transfer: f64,
}

impl CollisionParams {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            softness: config.collision_softness,
            restitution: config.restitution,
            separation_rate: config.separation_rate,
            spin_transfer: config.spin_transfer,
        }
    }
}

/// Resolve every overlapping pair in place, returning the number of contacts.
pub fn resolve_collisions(sys: &mut System, params: &CollisionParams) -> usize {
    let n = sys.bodies.len();
    let mut contacts = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let (bi, bj) = (&sys.bodies[i], &sys.bodies[j]);
            let reach = bi.extent() + bj.extent() + params.softness;

            // r points from i to j
            let r = bj.x - bi.x;
            let dist = r.norm();
            if reach - dist <= 0.0 {
                continue;
            }
            contacts += 1;

            // share of the correction each body takes; the dragged one takes none
            let wi = if bi.dragged { 0.0 } else { 1.0 };
            let wj = if bj.dragged { 0.0 } else { 1.0 };
            let total = wi + wj;
            if total == 0.0 {
                continue;
            }
            let (wi, wj) = (wi / total, wj / total);

            if dist <= DISTANCE_EPSILON {
                separate_coincident(sys, i, j, wi, wj);
                continue;
            }

            let normal = r / dist;
            let correction = normal * (reach - dist) * params.separation_rate;

            let rel = sys.bodies[i].v - sys.bodies[j].v;
            let approach = rel.dot(&normal);
            let tangent = NVec2::new(-normal.y, normal.x);
            let slide = rel.dot(&tangent);

            {
                let bi = &mut sys.bodies[i];
                bi.x -= correction * wi;
                bi.spin += slide * params.spin_transfer;
            }
            {
                let bj = &mut sys.bodies[j];
                bj.x += correction * wj;
                bj.spin -= slide * params.spin_transfer;
            }

            if approach > 0.0 {
                // equal masses share the impulse; against a dragged body the
                // free one takes all of it
                let impulse = normal * (1.0 + params.restitution) * approach;
                sys.bodies[i].v -= impulse * wi;
                sys.bodies[j].v += impulse * wj;
            }
        }
    }
    contacts
}

/// Two bodies on the same spot: push them apart along a random direction.
fn separate_coincident(sys: &mut System, i: usize, j: usize, wi: f64, wj: f64) {
    let u = sys.random_unit();
    let step = u * (2.0 * COINCIDENT_NUDGE);

    sys.bodies[i].x -= step * wi;
    sys.bodies[i].v -= step * wi;
    sys.bodies[j].x += step * wj;
    sys.bodies[j].v += step * wj;
}
