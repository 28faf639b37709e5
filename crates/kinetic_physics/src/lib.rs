pub mod collision;
pub mod forces;
pub mod grid;
pub mod particle;
pub mod statistics;

pub use collision::{ContactOutcome, pair_mut, resolve_collision_elastic};
pub use grid::SpatialGrid;
pub use particle::{ParticleFactory, Population, generate_population};
pub use statistics::{SimulationStats, calculate_statistics};
