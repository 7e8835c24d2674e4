//! Per-frame transforms handed to the render layer.
//!
//! The float offset is computed here and never written back into the Body
//! Store, so it cannot leak into collision or boundary math.

use crate::simulation::interaction::Interaction;
use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{Body, NVec3, System};

#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub id: usize,
    pub position: NVec3, // x, y with float offset, depth
    pub rotation: f64,
    pub scale: f64,
}

/// Everything the render layer needs for one frame, in body order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub transforms: Vec<Readout>,
    pub hovered: Option<usize>, // body ids, not indices
    pub dragged: Option<usize>,
}

/// Cosmetic vertical bob for `body` at simulation time `t`.
pub fn float_offset(body: &Body, t: f64, amplitude: f64) -> f64 {
    amplitude * (t * body.float_speed + body.phase).sin()
}

pub fn read_out(sys: &System, config: &SimulationConfig, interaction: &Interaction) -> Frame {
    let transforms = sys
        .bodies
        .iter()
        .map(|b| {
            // a held body sits still under the pointer
            let bob = if b.dragged {
                0.0
            } else {
                float_offset(b, sys.t, config.float_amplitude)
            };
            Readout {
                id: b.id,
                position: NVec3::new(b.x.x, b.x.y + bob, b.depth),
                rotation: b.rotation,
                scale: if b.hovered || b.dragged { config.hover_scale } else { 1.0 },
            }
        })
        .collect();

    let id_of = |i: usize| sys.bodies.get(i).map(|b| b.id);
    Frame {
        transforms,
        hovered: interaction.hovered().and_then(id_of),
        dragged: interaction.dragged().and_then(id_of),
    }
}
