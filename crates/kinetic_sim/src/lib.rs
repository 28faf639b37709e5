pub mod pipeline;
pub mod simulation;

pub use pipeline::{SimulationPlugin, SimulationSet};
pub use simulation::ParticleSimulation;
