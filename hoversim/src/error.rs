//! Error types for configuration and scenario loading.
//!
//! The per-frame path never fails; only building a simulation can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value must lie in (0, 1]
    #[error("{field} must be in (0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// Drag follow would overshoot the pointer at the largest allowed dt
    #[error("drag_follow_gain {gain} must stay below {limit}")]
    DragGainTooHigh { gain: f64, limit: f64 },

    #[error("unknown preset `{0}`, expected `cards` or `cubes`")]
    UnknownPreset(String),

    #[error("invalid spawn settings: {0}")]
    Spawn(String),

    #[error("invalid view settings: {0}")]
    View(String),

    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
