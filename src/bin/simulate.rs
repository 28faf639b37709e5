//! Headless run: step a gas without a window and print its statistics.
//!
//! Usage: `simulate [steps] [particles] [seed]`

use kinetic_core::SimConfig;
use kinetic_physics::SimulationStats;
use kinetic_sim::ParticleSimulation;

const REPORT_EVERY: u64 = 60;

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("argument {} is not a valid number: {raw:?}", index)),
        None => Ok(default),
    }
}

/// `[steps] [particles] [seed]`, each falling back to its default when absent
fn parse_args(args: &[String], defaults: &SimConfig) -> Result<(u64, u32, u64), String> {
    Ok((
        parse_arg(args, 1, 600u64)?,
        parse_arg(args, 2, defaults.particle_count)?,
        parse_arg(args, 3, defaults.seed)?,
    ))
}

fn report(step: u64, elapsed: f64, stats: &SimulationStats, contacts: usize) {
    println!(
        "step {:>6}  t={:>8.3}s  KE={:>14.6}  <KE>={:>10.6}  p=({:+.3e}, {:+.3e})  <v>={:>8.4}  c_s={:>8.4}  contacts={}",
        step,
        elapsed,
        stats.total_kinetic_energy,
        stats.average_kinetic_energy,
        stats.total_momentum.x,
        stats.total_momentum.y,
        stats.average_speed,
        stats.speed_of_sound,
        contacts,
    );
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let defaults = SimConfig::default();

    let (steps, particle_count, seed) = match parse_args(&args, &defaults) {
        Ok(values) => values,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: simulate [steps] [particles] [seed]");
            std::process::exit(2);
        }
    };

    let config = SimConfig {
        particle_count,
        seed,
        ..defaults
    };
    eprintln!(
        "Simulating {} particles for {} steps (seed {})...",
        particle_count, steps, seed
    );

    let mut sim = match ParticleSimulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Failed to set up simulation: {err}");
            std::process::exit(1);
        }
    };

    let initial = sim.statistics();
    report(0, 0.0, &initial, 0);

    let mut total_contacts = 0usize;
    for step in 1..=steps {
        sim.tick();
        total_contacts += sim.last_step_collisions();
        if step % REPORT_EVERY == 0 || step == steps {
            report(step, sim.elapsed(), &sim.statistics(), sim.last_step_collisions());
        }
    }

    let last = sim.statistics();
    let drift = if initial.total_kinetic_energy > 0.0 {
        (last.total_kinetic_energy - initial.total_kinetic_energy).abs()
            / initial.total_kinetic_energy
    } else {
        0.0
    };

    println!();
    println!("contacts resolved: {}", total_contacts);
    println!("relative energy drift: {:.3e}", drift);
}
