use bevy::prelude::*;
use kinetic_core::SimConfig;
use kinetic_render::KineticRenderPlugin;
use kinetic_sim::{ParticleSimulation, SimulationPlugin};

fn main() {
    let config = SimConfig::default();

    let sim = match ParticleSimulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Failed to set up simulation: {err}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kinetic: Elastic Disk Gas".into(),
                resolution: (1280.0, 1000.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)))
        .insert_resource(sim)
        .add_plugins(SimulationPlugin)
        .add_plugins(KineticRenderPlugin)
        .run();
}
