pub mod states;
pub mod params;
pub mod forces;
pub mod collision;
pub mod interaction;
pub mod integrator;
pub mod readout;
pub mod engine;
pub mod scheduler;
pub mod scenario;
