//! Tuning parameters for the simulation
//!
//! `SimulationConfig` is immutable per instance and holds:
//! - damping and the drag/release gains,
//! - repulsion, boundary and drift strengths,
//! - collision softness, restitution and cosmetic spin transfer,
//! - hover/float cosmetics read at output time only
//!
//! The two hero visuals differ only in these numbers, see [`SimulationConfig::cards`]
//! and [`SimulationConfig::cubes`]. None of them carry correctness semantics.

use crate::error::ConfigError;
use crate::simulation::integrator::MAX_DT;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub damping: f64, // per-frame velocity multiplier, (0, 1]
    pub repulsion_radius: f64, // pointer influence radius
    pub repulsion_strength: f64, // peak repulsion, velocity per second
    pub boundary_margin: f64, // overshoot past the bounds still counted as contained
    pub boundary_strength: f64, // restoring velocity per second
    pub drift_strength: f64, // max drift magnitude assigned at spawn
    pub collision_softness: f64, // extra clearance between bodies
    pub drag_follow_gain: f64, // pointer distance -> dragged velocity
    pub release_damping: f64, // velocity scale on release
    pub restitution: f64, // collision impulse bounce
    pub separation_rate: f64, // share of overlap corrected per frame
    pub spin_transfer: f64, // tangential velocity -> spin
    pub max_speed: f64, // velocity ceiling before integration
    pub pick_padding: f64, // hit test reach beyond the body extent
    pub hover_scale: f64,
    pub float_amplitude: f64,
}

impl SimulationConfig {
    /// Card cluster: larger, flatter bodies with a wider repulsion field.
    pub fn cards() -> Self {
        Self {
            damping: 0.96,
            repulsion_radius: 2.5,
            repulsion_strength: 24.0,
            boundary_margin: 0.4,
            boundary_strength: 5.0,
            drift_strength: 0.004,
            collision_softness: 0.15,
            drag_follow_gain: 8.0,
            release_damping: 0.5,
            restitution: 0.2,
            separation_rate: 0.4,
            spin_transfer: 0.2,
            max_speed: 16.0,
            pick_padding: 0.1,
            hover_scale: 1.05,
            float_amplitude: 0.06,
        }
    }

    /// Cube cluster: snappier repulsion and more spin.
    pub fn cubes() -> Self {
        Self {
            damping: 0.95,
            repulsion_radius: 2.0,
            repulsion_strength: 30.0,
            boundary_margin: 0.3,
            boundary_strength: 6.0,
            drift_strength: 0.005,
            collision_softness: 0.1,
            drag_follow_gain: 10.0,
            release_damping: 0.5,
            restitution: 0.3,
            separation_rate: 0.5,
            spin_transfer: 0.3,
            max_speed: 20.0,
            pick_padding: 0.15,
            hover_scale: 1.1,
            float_amplitude: 0.08,
        }
    }

    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "cards" => Ok(Self::cards()),
            "cubes" => Ok(Self::cubes()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Reject values that would make the step non-convergent or divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("damping", self.damping)?;
        unit_interval("release_damping", self.release_damping)?;

        positive("repulsion_radius", self.repulsion_radius)?;
        positive("drag_follow_gain", self.drag_follow_gain)?;
        positive("max_speed", self.max_speed)?;

        for (field, value) in [
            ("repulsion_strength", self.repulsion_strength),
            ("boundary_margin", self.boundary_margin),
            ("boundary_strength", self.boundary_strength),
            ("drift_strength", self.drift_strength),
            ("collision_softness", self.collision_softness),
            ("restitution", self.restitution),
            ("spin_transfer", self.spin_transfer),
            ("pick_padding", self.pick_padding),
            ("float_amplitude", self.float_amplitude),
        ] {
            non_negative(field, value)?;
        }

        if !(self.separation_rate > 0.0 && self.separation_rate <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "separation_rate",
                value: self.separation_rate,
            });
        }
        positive("hover_scale", self.hover_scale)?;

        // Follow must not overshoot the pointer even at the dt ceiling
        if self.drag_follow_gain * MAX_DT >= 1.0 {
            return Err(ConfigError::DragGainTooHigh {
                gain: self.drag_follow_gain,
                limit: 1.0 / MAX_DT,
            });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::cubes()
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
