use serde::{Deserialize, Serialize};

use crate::vector::Vector2;

/// Monotonically assigned particle identifier, never reused within a run
pub type ParticleId = u64;

/// A rigid disk. Identity, radius and mass are fixed at creation;
/// position, velocity and free path change every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    id: ParticleId,
    pub position: Vector2,
    pub velocity: Vector2,
    radius: f64,
    mass: f64,
    /// Distance travelled since the last velocity-affecting collision
    pub free_path_distance: f64,
}

impl Particle {
    /// Unchecked constructor. Radius and mass are assumed positive;
    /// `ParticleFactory::create` is the validating entry point.
    pub fn new(
        id: ParticleId,
        position: Vector2,
        velocity: Vector2,
        radius: f64,
        mass: f64,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            mass,
            free_path_distance: 0.0,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_sq()
    }

    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }
}
