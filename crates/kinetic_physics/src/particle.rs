use kinetic_core::config::{validate_mass, validate_radius};
use kinetic_core::{
    DEFAULT_MASS, GRID_CELL_RADIUS_FACTOR, Particle, ParticleId, SimConfig, SimError, SimResult,
    Vector2,
};
use rand::Rng;

use crate::grid::SpatialGrid;

/// Hands out particles with fresh, strictly increasing ids.
///
/// Owned by whoever owns the population, so two simulations never share a counter.
#[derive(Debug, Clone, Default)]
pub struct ParticleFactory {
    next_id: ParticleId,
}

impl ParticleFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next created particle will receive
    pub fn next_id(&self) -> ParticleId {
        self.next_id
    }

    /// Create a particle after validating radius and mass (`None` means unit mass).
    /// A rejected request does not consume an id.
    pub fn create(
        &mut self,
        position: Vector2,
        velocity: Vector2,
        radius: f64,
        mass: Option<f64>,
    ) -> SimResult<Particle> {
        let mass = mass.unwrap_or(DEFAULT_MASS);
        validate_radius(radius)?;
        validate_mass(mass)?;

        let id = self.next_id;
        self.next_id += 1;
        Ok(Particle::new(id, position, velocity, radius, mass))
    }
}

/// Result of initial placement
#[derive(Debug, Clone)]
pub struct Population {
    pub particles: Vec<Particle>,
    /// Samples thrown away because they overlapped an already placed particle
    pub rejected_samples: u64,
}

/// Fill the domain with `config.particle_count` non-overlapping particles moving at
/// `config.initial_speed` in uniformly random directions.
///
/// Positions are rejection-sampled; a sample closer than one diameter to any placed
/// particle is discarded. After `config.max_placement_attempts` consecutive rejections
/// placement stops with `SimError::PlacementFailed`.
pub fn generate_population(
    config: &SimConfig,
    factory: &mut ParticleFactory,
    rng: &mut impl Rng,
) -> SimResult<Population> {
    config.validate()?;

    let radius = config.particle_radius;
    let requested = config.particle_count as usize;
    let min_dist_sq = (radius * 2.0) * (radius * 2.0);

    // Placed particles are indexed as we go so each sample only checks its neighbourhood
    let mut grid = SpatialGrid::new(
        config.width,
        config.height,
        radius * GRID_CELL_RADIUS_FACTOR,
    );
    let mut particles: Vec<Particle> = Vec::with_capacity(config.initial_capacity());
    let mut candidates = Vec::new();
    let mut rejected_samples = 0u64;

    while particles.len() < requested {
        let mut rejected = 0u32;
        let position = loop {
            let sample = Vector2::new(
                rng.gen_range(radius..config.width - radius),
                rng.gen_range(radius..config.height - radius),
            );
            grid.potential_colliders_into(sample, &mut candidates);
            let overlaps = candidates
                .iter()
                .any(|&i| Vector2::distance_sq(sample, particles[i].position) < min_dist_sq);
            if !overlaps {
                break sample;
            }

            rejected += 1;
            rejected_samples += 1;
            if rejected >= config.max_placement_attempts {
                return Err(SimError::PlacementFailed {
                    placed: particles.len(),
                    requested,
                    attempts: rejected,
                });
            }
        };

        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let velocity = Vector2::new(angle.cos(), angle.sin()) * config.initial_speed;

        let particle = factory.create(position, velocity, radius, None)?;
        grid.insert(particles.len(), particle.position);
        particles.push(particle);
    }

    Ok(Population {
        particles,
        rejected_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config(count: u32) -> SimConfig {
        SimConfig {
            particle_count: count,
            particle_radius: 1.0,
            width: 100.0,
            height: 80.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_factory_ids_increase() -> SimResult<()> {
        let mut factory = ParticleFactory::new();
        let a = factory.create(Vector2::ZERO, Vector2::ZERO, 1.0, None)?;
        let b = factory.create(Vector2::ZERO, Vector2::ZERO, 1.0, Some(3.0))?;
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);
        assert_eq!(a.mass(), DEFAULT_MASS);
        assert_eq!(b.mass(), 3.0);
        assert_eq!(factory.next_id(), 2);
        Ok(())
    }

    #[test]
    fn test_factory_rejects_bad_inputs_without_burning_ids() {
        let mut factory = ParticleFactory::new();
        assert_eq!(
            factory.create(Vector2::ZERO, Vector2::ZERO, -1.0, None),
            Err(SimError::InvalidRadius(-1.0))
        );
        assert_eq!(
            factory.create(Vector2::ZERO, Vector2::ZERO, 1.0, Some(0.0)),
            Err(SimError::InvalidMass(0.0))
        );
        assert_eq!(factory.next_id(), 0);
    }

    #[test]
    fn test_population_is_inside_and_non_overlapping() -> SimResult<()> {
        let config = small_config(300);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let population = generate_population(&config, &mut ParticleFactory::new(), &mut rng)?;
        let particles = &population.particles;
        assert_eq!(particles.len(), 300);

        for (i, a) in particles.iter().enumerate() {
            assert!(a.position.x >= 1.0 && a.position.x <= 99.0);
            assert!(a.position.y >= 1.0 && a.position.y <= 79.0);
            assert!((a.speed() - config.initial_speed).abs() < 1e-9);
            for b in &particles[i + 1..] {
                assert!(Vector2::distance(a.position, b.position) >= 2.0);
            }
        }
        Ok(())
    }

    #[test]
    fn test_population_is_deterministic_per_seed() -> SimResult<()> {
        let config = small_config(50);
        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            generate_population(&config, &mut ParticleFactory::new(), &mut rng)
        };
        assert_eq!(run()?.particles, run()?.particles);
        Ok(())
    }

    #[test]
    fn test_impossible_count_is_rejected_up_front() {
        let config = SimConfig {
            particle_count: u32::MAX,
            ..SimConfig::default()
        };
        let mut factory = ParticleFactory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate_population(&config, &mut factory, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::TooManyParticles { .. }));
        assert_eq!(factory.next_id(), 0);
    }

    #[test]
    fn test_overfull_domain_fails_instead_of_spinning() {
        // under the area bound of 31, but no packing of 10x10 fits more than 25 disks
        let config = SimConfig {
            particle_count: 30,
            particle_radius: 1.0,
            width: 10.0,
            height: 10.0,
            max_placement_attempts: 500,
            ..SimConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate_population(&config, &mut ParticleFactory::new(), &mut rng).unwrap_err();
        match err {
            SimError::PlacementFailed {
                placed,
                requested,
                attempts,
            } => {
                assert!(placed < requested);
                assert_eq!(requested, 30);
                assert_eq!(attempts, 500);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
