use bevy::prelude::*;
use kinetic_core::config::validate_extent;
use kinetic_core::{GRID_CELL_RADIUS_FACTOR, Particle, ParticleId, SimConfig, SimResult, Vector2};
use kinetic_physics::forces::apply_velocity_delta_near_point;
use kinetic_physics::{
    ContactOutcome, ParticleFactory, SimulationStats, SpatialGrid, calculate_statistics,
    generate_population, pair_mut, resolve_collision_elastic,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The simulation engine, tracked as a Bevy Resource.
///
/// Owns the particle arena and the grid over it. Every mutating call takes
/// `&mut self`, so a step always runs to completion before anything can read
/// `particles()`; readers (renderer, statistics) only ever see between-step state.
#[derive(Resource)]
pub struct ParticleSimulation {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    grid: SpatialGrid,
    /// Always `GRID_CELL_RADIUS_FACTOR * particle_radius`
    grid_cell_size: f64,
    particle_radius: f64,
    factory: ParticleFactory,
    /// Scratch buffer reused by every neighbourhood query
    candidates: Vec<usize>,
    /// Whether `tick` advances
    pub paused: bool,
    elapsed: f64,
    step_count: u64,
    last_step_collisions: usize,
    config: SimConfig,
}

impl ParticleSimulation {
    /// Build the engine and fill it with `config.particle_count` non-overlapping particles.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut sim = Self::empty(config)?;

        let mut rng = ChaCha8Rng::seed_from_u64(sim.config.seed);
        let population = generate_population(&sim.config, &mut sim.factory, &mut rng)?;
        info!(
            "Placed {} particles in {:.0}x{:.0} ({} rejected samples)",
            population.particles.len(),
            sim.width,
            sim.height,
            population.rejected_samples
        );
        sim.particles = population.particles;
        Ok(sim)
    }

    /// Engine with a validated domain and no particles; fill it with `spawn`.
    pub fn empty(config: SimConfig) -> SimResult<Self> {
        config.validate_domain()?;

        let grid_cell_size = config.particle_radius * GRID_CELL_RADIUS_FACTOR;
        let grid = SpatialGrid::new(config.width, config.height, grid_cell_size);
        log_grid(&grid);

        Ok(Self {
            width: config.width,
            height: config.height,
            particles: Vec::with_capacity(config.initial_capacity()),
            grid,
            grid_cell_size,
            particle_radius: config.particle_radius,
            factory: ParticleFactory::new(),
            candidates: Vec::new(),
            paused: false,
            elapsed: 0.0,
            step_count: 0,
            last_step_collisions: 0,
            config,
        })
    }

    /// Add one particle with the engine's radius (`None` mass means unit mass).
    /// No overlap check is made.
    pub fn spawn(
        &mut self,
        position: Vector2,
        velocity: Vector2,
        mass: Option<f64>,
    ) -> SimResult<ParticleId> {
        let particle = self
            .factory
            .create(position, velocity, self.particle_radius, mass)?;
        let id = particle.id();
        self.particles.push(particle);
        Ok(id)
    }

    /// Advance one fixed `config.time_step` unless paused. Returns whether a step ran.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.update(self.config.time_step);
        true
    }

    /// Advance by `dt` seconds, ignoring `paused`.
    ///
    /// Stages run in a fixed order and each relies on the previous one:
    /// integrate, reflect off the walls, rebuild the grid, resolve contacts.
    pub fn update(&mut self, dt: f64) {
        self.integrate(dt);
        self.reflect_boundaries();
        self.rebuild_grid();
        self.last_step_collisions = self.resolve_collisions();

        self.elapsed += dt;
        self.step_count += 1;
        trace!(
            "Step {}: {} contacts resolved",
            self.step_count, self.last_step_collisions
        );
    }

    fn integrate(&mut self, dt: f64) {
        for p in &mut self.particles {
            let displacement = p.velocity * dt;
            p.position += displacement;
            p.free_path_distance += displacement.magnitude();
        }
    }

    /// Clamp each axis independently and flip that axis' velocity;
    /// a corner hit flips both.
    fn reflect_boundaries(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            let r = p.radius();

            if p.position.x - r < 0.0 {
                p.position.x = r;
                p.velocity.x = -p.velocity.x;
            } else if p.position.x + r > width {
                p.position.x = width - r;
                p.velocity.x = -p.velocity.x;
            }

            if p.position.y - r < 0.0 {
                p.position.y = r;
                p.velocity.y = -p.velocity.y;
            } else if p.position.y + r > height {
                p.position.y = height - r;
                p.velocity.y = -p.velocity.y;
            }
        }
    }

    fn rebuild_grid(&mut self) {
        self.grid.clear();
        for (i, p) in self.particles.iter().enumerate() {
            self.grid.insert(i, p.position);
        }
    }

    /// Sweep every particle's neighbourhood. Returns the number of velocity-resolved pairs.
    ///
    /// Sequential: a pair's positional correction is visible to the
    /// next query, and the id guard in `resolve_collision_elastic` relies on a
    /// single writer per pair.
    fn resolve_collisions(&mut self) -> usize {
        let mut candidates = std::mem::take(&mut self.candidates);
        let mut resolved = 0;

        for i in 0..self.particles.len() {
            self.grid
                .potential_colliders_into(self.particles[i].position, &mut candidates);
            for &j in &candidates {
                let Some((p1, p2)) = pair_mut(&mut self.particles, i, j) else {
                    continue;
                };
                if resolve_collision_elastic(p1, p2) == ContactOutcome::Resolved {
                    resolved += 1;
                }
            }
        }

        self.candidates = candidates;
        resolved
    }

    /// Pointer drag: add `delta` to the velocity of every particle within `radius`
    /// of `point`. Returns the number of particles affected.
    pub fn apply_force_near_point(&mut self, point: Vector2, radius: f64, delta: Vector2) -> usize {
        apply_velocity_delta_near_point(&mut self.particles, point, radius, delta)
    }

    /// Change the domain bounds, re-tile the grid at the same cell size and pull
    /// every particle back inside. Velocities are left alone.
    pub fn resize(&mut self, width: f64, height: f64) -> SimResult<()> {
        validate_extent(width, height, self.particle_radius)?;
        info!(
            "Simulation resizing: {:.0}x{:.0} -> {:.0}x{:.0}",
            self.width, self.height, width, height
        );

        self.width = width;
        self.height = height;
        self.grid.resize(width, height, self.grid_cell_size);
        log_grid(&self.grid);

        for p in &mut self.particles {
            let r = p.radius();
            p.position.x = p.position.x.clamp(r, width - r);
            p.position.y = p.position.y.clamp(r, height - r);
        }
        Ok(())
    }

    /// Flip `paused` and return the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        info!(
            "Simulation {}",
            if self.paused { "paused" } else { "resumed" }
        );
        self.paused
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current particle snapshot
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn statistics(&self) -> SimulationStats {
        calculate_statistics(&self.particles)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particle_radius(&self) -> f64 {
        self.particle_radius
    }

    pub fn grid_cell_size(&self) -> f64 {
        self.grid_cell_size
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Simulated seconds since construction
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Pairs whose velocities were exchanged during the last `update`
    pub fn last_step_collisions(&self) -> usize {
        self.last_step_collisions
    }
}

fn log_grid(grid: &SpatialGrid) {
    info!(
        "Grid resized: {}x{} cells, cell size {:.2}x{:.2}",
        grid.cols(),
        grid.rows(),
        grid.cell_width(),
        grid.cell_height()
    );
}
