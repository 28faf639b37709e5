use serde::{Deserialize, Serialize};

use crate::constants::MAX_PREALLOCATED_PARTICLES;
use crate::error::{SimError, SimResult};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of particles placed at start-up
    pub particle_count: u32,
    /// Radius shared by every particle
    pub particle_radius: f64,
    /// Domain width
    pub width: f64,
    /// Domain height
    pub height: f64,
    /// Speed given to every particle in a random direction at start-up
    pub initial_speed: f64,
    /// Random seed for deterministic placement
    pub seed: u64,
    /// Fixed step advanced once per rendered frame (seconds)
    pub time_step: f64,
    /// Pointer drag radius in screen units (divided by camera zoom)
    pub interaction_radius: f64,
    /// Consecutive rejected placement samples tolerated per particle
    pub max_placement_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 10_000,
            particle_radius: 1.0,
            width: 1000.0,
            height: 1000.0,
            initial_speed: 10.0,
            seed: 42,
            time_step: 1.0 / 60.0,
            interaction_radius: 30.0,
            max_placement_attempts: 1_000,
        }
    }
}

impl SimConfig {
    /// Check radius, domain extent and time step. The particle count is not checked,
    /// so an engine can be built empty and filled by hand.
    pub fn validate_domain(&self) -> SimResult<()> {
        validate_radius(self.particle_radius)?;
        validate_extent(self.width, self.height, self.particle_radius)?;
        if !self.time_step.is_finite() || self.time_step < 0.0 {
            return Err(SimError::InvalidTimeStep(self.time_step));
        }
        Ok(())
    }

    /// Full check used before generating a population.
    pub fn validate(&self) -> SimResult<()> {
        self.validate_domain()?;
        if self.particle_count == 0 {
            return Err(SimError::EmptyPopulation);
        }
        let capacity = self.packing_capacity();
        let requested = self.particle_count as usize;
        if requested > capacity {
            return Err(SimError::TooManyParticles {
                requested,
                capacity,
            });
        }
        Ok(())
    }

    /// Area bound `width * height / (pi r^2)` on how many disjoint disks fit in the domain.
    /// Random placement jams well before reaching it.
    pub fn packing_capacity(&self) -> usize {
        let disk_area = std::f64::consts::PI * self.particle_radius * self.particle_radius;
        let bound = (self.width * self.height / disk_area).floor();
        if bound.is_nan() || bound <= 0.0 {
            0
        } else {
            // saturating cast: an overflowed area or underflowed disk is unbounded
            bound as usize
        }
    }

    /// Particle storage to reserve before placement
    pub fn initial_capacity(&self) -> usize {
        (self.particle_count as usize)
            .min(self.packing_capacity())
            .min(MAX_PREALLOCATED_PARTICLES)
    }
}

pub fn validate_radius(radius: f64) -> SimResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SimError::InvalidRadius(radius));
    }
    Ok(())
}

pub fn validate_mass(mass: f64) -> SimResult<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(SimError::InvalidMass(mass));
    }
    Ok(())
}

/// The domain must be finite and strictly wider and taller than one particle diameter,
/// otherwise no position satisfies `radius <= p <= extent - radius` with room to sample.
pub fn validate_extent(width: f64, height: f64, radius: f64) -> SimResult<()> {
    let diameter = radius * 2.0;
    let ok = |extent: f64| extent.is_finite() && extent > diameter;
    if !ok(width) || !ok(height) {
        return Err(SimError::InvalidDomain {
            width,
            height,
            radius,
        });
    }
    Ok(())
}
