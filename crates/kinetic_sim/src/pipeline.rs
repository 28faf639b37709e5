use bevy::prelude::*;

use super::simulation::ParticleSimulation;

/// Frame ordering: input handlers run before the step, readers after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Pointer force and pause toggles, applied between steps
    Input,
    /// The single `tick` per frame
    Step,
}

/// Bevy plugin for the simulation pipeline
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, (SimulationSet::Input, SimulationSet::Step).chain())
            .add_systems(Update, simulation_tick.in_set(SimulationSet::Step));
    }
}

/// Main simulation tick: one fixed step per rendered frame, independent of wall-clock delta
fn simulation_tick(mut sim: ResMut<ParticleSimulation>) {
    sim.tick();
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::{SimConfig, Vector2};

    #[test]
    fn test_plugin_steps_once_per_update() {
        let config = SimConfig {
            particle_count: 0,
            width: 100.0,
            height: 100.0,
            ..SimConfig::default()
        };
        let mut sim = ParticleSimulation::empty(config).expect("valid domain");
        sim.spawn(Vector2::new(50.0, 50.0), Vector2::new(60.0, 0.0), None)
            .expect("valid particle");

        let mut app = App::new();
        app.insert_resource(sim).add_plugins(SimulationPlugin);
        app.update();
        app.update();

        let sim = app.world().resource::<ParticleSimulation>();
        assert_eq!(sim.step_count(), 2);
        // 2 steps of 1/60 s at 60 units/s
        assert!((sim.particles()[0].position.x - 52.0).abs() < 1e-9);
    }
}
