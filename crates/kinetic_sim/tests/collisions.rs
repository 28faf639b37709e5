//! End-to-end checks of the step pipeline through `ParticleSimulation`.

use kinetic_core::{SimConfig, SimResult, Vector2};
use kinetic_physics::calculate_statistics;
use kinetic_sim::ParticleSimulation;

const DT: f64 = 1.0 / 60.0;

fn empty_box(width: f64, height: f64) -> SimResult<ParticleSimulation> {
    ParticleSimulation::empty(SimConfig {
        particle_count: 0,
        particle_radius: 1.0,
        width,
        height,
        ..SimConfig::default()
    })
}

#[test]
fn test_head_on_pair_exchanges_velocity_in_one_update() -> SimResult<()> {
    let mut sim = empty_box(100.0, 100.0)?;
    sim.spawn(Vector2::new(10.0, 10.0), Vector2::new(1.0, 0.0), None)?;
    sim.spawn(Vector2::new(10.5, 10.0), Vector2::new(-1.0, 0.0), None)?;

    sim.update(DT);

    let p = sim.particles();
    let separation = Vector2::distance(p[0].position, p[1].position);
    assert!(separation >= 2.0 - 1e-9, "separation {separation}");
    assert!((p[0].velocity.x + 1.0).abs() < 1e-9);
    assert!((p[1].velocity.x - 1.0).abs() < 1e-9);
    assert!(p[0].velocity.y.abs() < 1e-9 && p[1].velocity.y.abs() < 1e-9);
    assert_eq!(p[0].free_path_distance, 0.0);
    assert_eq!(p[1].free_path_distance, 0.0);
    // both particles surface each other, but the pair is resolved once
    assert_eq!(sim.last_step_collisions(), 1);
    Ok(())
}

#[test]
fn test_slow_particles_stay_inside_walls() -> SimResult<()> {
    let mut sim = empty_box(30.0, 20.0)?;
    // speed * dt < radius for every particle
    sim.spawn(Vector2::new(1.1, 10.0), Vector2::new(-30.0, 0.0), None)?;
    sim.spawn(Vector2::new(15.0, 18.9), Vector2::new(0.0, 30.0), None)?;
    sim.spawn(Vector2::new(15.0, 5.0), Vector2::new(12.0, -9.0), None)?;

    sim.update(DT);

    let p = sim.particles();
    for particle in p {
        assert!(particle.position.x >= 1.0 && particle.position.x <= 29.0);
        assert!(particle.position.y >= 1.0 && particle.position.y <= 19.0);
    }
    // left wall: only x flips
    assert_eq!(p[0].velocity, Vector2::new(30.0, 0.0));
    // top wall: only y flips
    assert_eq!(p[1].velocity, Vector2::new(0.0, -30.0));
    // nowhere near a wall
    assert_eq!(p[2].velocity, Vector2::new(12.0, -9.0));
    Ok(())
}

#[test]
fn test_dense_gas_conserves_energy() -> SimResult<()> {
    let config = SimConfig {
        particle_count: 400,
        particle_radius: 1.0,
        width: 80.0,
        height: 80.0,
        initial_speed: 10.0,
        seed: 3,
        ..SimConfig::default()
    };
    let mut sim = ParticleSimulation::new(config)?;
    let before = calculate_statistics(sim.particles());

    let mut contacts = 0;
    for _ in 0..240 {
        sim.update(DT);
        contacts += sim.last_step_collisions();
    }
    let after = sim.statistics();

    assert!(contacts > 0);
    // equal masses: the exchange rule conserves kinetic energy exactly,
    // and wall reflection only flips signs
    let drift = (after.total_kinetic_energy - before.total_kinetic_energy).abs()
        / before.total_kinetic_energy;
    assert!(drift < 1e-9, "relative energy drift {drift}");
    assert_eq!(after.particle_count, 400);
    Ok(())
}

#[test]
fn test_each_pair_resolved_at_most_once_per_step() -> SimResult<()> {
    let mut sim = empty_box(100.0, 100.0)?;
    // three independent approaching pairs in the same neighbourhood band
    for k in 0..3 {
        let y = 20.0 + k as f64 * 2.5;
        sim.spawn(Vector2::new(40.0, y), Vector2::new(2.0, 0.0), None)?;
        sim.spawn(Vector2::new(41.5, y), Vector2::new(-2.0, 0.0), None)?;
    }
    sim.update(DT);
    assert_eq!(sim.last_step_collisions(), 3);
    for pair in sim.particles().chunks(2) {
        assert!((pair[0].velocity.x + 2.0).abs() < 1e-9);
        assert!((pair[1].velocity.x - 2.0).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_drag_kick_is_between_steps() -> SimResult<()> {
    let mut sim = empty_box(100.0, 100.0)?;
    sim.spawn(Vector2::new(50.0, 50.0), Vector2::ZERO, None)?;
    sim.apply_force_near_point(Vector2::new(49.0, 50.0), 30.0, Vector2::new(6.0, 0.0));
    sim.update(0.5);
    assert!((sim.particles()[0].position.x - 53.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_statistics_on_empty_engine() -> SimResult<()> {
    let sim = empty_box(100.0, 100.0)?;
    let stats = sim.statistics();
    assert_eq!(stats.particle_count, 0);
    assert_eq!(stats.total_kinetic_energy, 0.0);
    assert_eq!(stats.total_momentum, Vector2::ZERO);
    assert!(!stats.average_speed.is_nan());
    Ok(())
}
