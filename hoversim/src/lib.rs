pub mod simulation;
pub mod configuration;
pub mod input;
pub mod error;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, Bounds, PointerSample, NVec2, NVec3};
pub use simulation::params::SimulationConfig;
pub use simulation::forces::{VelocityTerm, ForceSet, Drift, PointerRepulsion, SoftBoundary, repulsion_delta};
pub use simulation::collision::{resolve_collisions, CollisionParams};
pub use simulation::interaction::{Interaction, InteractionState};
pub use simulation::engine::{step, SimulationContext, StepReport};
pub use simulation::readout::{Frame, Readout};
pub use simulation::scheduler::FrameLoop;
pub use simulation::scenario::{Scenario, spawn_bodies};

pub use input::adapter::{InputAdapter, InputSignal, PointerEvent, TouchPoint, Viewport, Camera};

pub use configuration::config::{ScenarioConfig, SimulationOverrides, SpawnConfig, ViewConfig};

pub use error::ConfigError;

#[cfg(feature = "viewer")]
pub use visualization::hoversim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_step, run_headless, HeadlessSummary};
