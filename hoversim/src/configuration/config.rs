//! Configuration types for loading hero scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - `preset`                – which hero visual's constants to start from
//! - [`SimulationOverrides`] – per-field overrides on top of the preset
//! - [`SpawnConfig`]         – how many bodies and how they are scattered
//! - [`ViewConfig`]          – camera and initial viewport used for bounds
//!
//! Every section is optional; an empty file is the default `cubes` scenario.
//!
//! # YAML format
//!
//! ```yaml
//! preset: "cards"           # or "cubes"
//! seed: 7                   # reproducible spawn and degeneracy guards
//!
//! simulation:
//!   damping: 0.94
//!   repulsion_radius: 3.0
//!
//! spawn:
//!   count: 6
//!   size: 0.6
//!   aspect: 0.7             # half width / half height
//!   radial_min: 0.3         # fraction of the smaller bound
//!   radial_max: 0.8
//!
//! view:
//!   fov_degrees: 45.0
//!   camera_distance: 10.0
//!   width: 1280.0
//!   height: 720.0
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::simulation::params::SimulationConfig;

/// Optional overrides for every [`SimulationConfig`] field
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationOverrides {
    pub damping: Option<f64>,
    pub repulsion_radius: Option<f64>,
    pub repulsion_strength: Option<f64>,
    pub boundary_margin: Option<f64>,
    pub boundary_strength: Option<f64>,
    pub drift_strength: Option<f64>,
    pub collision_softness: Option<f64>,
    pub drag_follow_gain: Option<f64>,
    pub release_damping: Option<f64>,
    pub restitution: Option<f64>,
    pub separation_rate: Option<f64>,
    pub spin_transfer: Option<f64>,
    pub max_speed: Option<f64>,
    pub pick_padding: Option<f64>,
    pub hover_scale: Option<f64>,
    pub float_amplitude: Option<f64>,
}

impl SimulationOverrides {
    pub fn apply(&self, base: SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            damping: self.damping.unwrap_or(base.damping),
            repulsion_radius: self.repulsion_radius.unwrap_or(base.repulsion_radius),
            repulsion_strength: self.repulsion_strength.unwrap_or(base.repulsion_strength),
            boundary_margin: self.boundary_margin.unwrap_or(base.boundary_margin),
            boundary_strength: self.boundary_strength.unwrap_or(base.boundary_strength),
            drift_strength: self.drift_strength.unwrap_or(base.drift_strength),
            collision_softness: self.collision_softness.unwrap_or(base.collision_softness),
            drag_follow_gain: self.drag_follow_gain.unwrap_or(base.drag_follow_gain),
            release_damping: self.release_damping.unwrap_or(base.release_damping),
            restitution: self.restitution.unwrap_or(base.restitution),
            separation_rate: self.separation_rate.unwrap_or(base.separation_rate),
            spin_transfer: self.spin_transfer.unwrap_or(base.spin_transfer),
            max_speed: self.max_speed.unwrap_or(base.max_speed),
            pick_padding: self.pick_padding.unwrap_or(base.pick_padding),
            hover_scale: self.hover_scale.unwrap_or(base.hover_scale),
            float_amplitude: self.float_amplitude.unwrap_or(base.float_amplitude),
        }
    }
}

/// Spawn distribution: bodies sit on a jittered ring inside the bounds
#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    pub count: usize, // number of bodies, fixed for the run
    pub size: f64, // half height of a body in world units
    pub size_jitter: f64, // relative size variation, [0, 1)
    pub aspect: f64, // half width / half height
    pub radial_min: f64, // ring inner radius as a fraction of the smaller bound
    pub radial_max: f64, // ring outer radius, same units
    pub angle_jitter: f64, // radians either side of the even spacing
    pub depth_min: f64, // parallax depth range
    pub depth_max: f64,
    pub float_speed_min: f64, // cosmetic bob frequency range, rad/s
    pub float_speed_max: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 8,
            size: 0.45,
            size_jitter: 0.2,
            aspect: 1.0,
            radial_min: 0.25,
            radial_max: 0.75,
            angle_jitter: 0.35,
            depth_min: -1.0,
            depth_max: 1.0,
            float_speed_min: 0.6,
            float_speed_max: 1.4,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ConfigError::Spawn(format!("size must be positive, got {}", self.size)));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(ConfigError::Spawn(format!("aspect must be positive, got {}", self.aspect)));
        }
        if !(0.0..1.0).contains(&self.size_jitter) {
            return Err(ConfigError::Spawn(format!("size_jitter must be in [0, 1), got {}", self.size_jitter)));
        }
        let ranges = [
            ("radial_min", self.radial_min),
            ("radial_max", self.radial_max),
            ("depth_min", self.depth_min),
            ("depth_max", self.depth_max),
            ("float_speed_min", self.float_speed_min),
            ("float_speed_max", self.float_speed_max),
        ];
        if let Some((field, value)) = ranges.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Spawn(format!("{} must be finite, got {}", field, value)));
        }
        if !(0.0 <= self.radial_min && self.radial_min <= self.radial_max) {
            return Err(ConfigError::Spawn(format!(
                "radial band [{}, {}] is empty or negative",
                self.radial_min, self.radial_max
            )));
        }
        if self.depth_min > self.depth_max || self.float_speed_min > self.float_speed_max {
            return Err(ConfigError::Spawn("depth and float speed ranges must be ordered".into()));
        }
        if !(self.angle_jitter.is_finite() && self.angle_jitter >= 0.0) {
            return Err(ConfigError::Spawn(format!("angle_jitter must be non-negative, got {}", self.angle_jitter)));
        }
        Ok(())
    }
}

/// Camera and initial container size
#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub fov_degrees: f64,
    pub camera_distance: f64,
    pub width: f64, // initial viewport size, client pixels
    pub height: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            camera_distance: 10.0,
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::View(format!("fov_degrees must be in (0, 180), got {}", self.fov_degrees)));
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "camera_distance",
                value: self.camera_distance,
            });
        }
        Ok(())
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub preset: String,
    pub seed: u64,
    pub simulation: SimulationOverrides,
    pub spawn: SpawnConfig,
    pub view: ViewConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            preset: "cubes".to_string(),
            seed: 42,
            simulation: SimulationOverrides::default(),
            spawn: SpawnConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null, not as an empty map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Preset plus overrides, validated.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        let config = self.simulation.apply(SimulationConfig::preset(&self.preset)?);
        config.validate()?;
        Ok(config)
    }
}
