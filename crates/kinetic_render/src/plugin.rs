use bevy::prelude::*;
use kinetic_sim::SimulationSet;

use super::camera;
use super::input;
use super::particles;
use super::ui;

/// Presentation for the simulation: camera, disks, input and HUD
pub struct KineticRenderPlugin;

impl Plugin for KineticRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ui::StatsThrottle>()
            .init_resource::<input::DragState>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    ui::spawn_hud,
                    particles::spawn_particle_visuals,
                ),
            )
            .add_systems(Update, camera::pan_zoom_system.before(SimulationSet::Input))
            .add_systems(
                Update,
                (input::pause_toggle_system, input::drag_force_system)
                    .chain()
                    .in_set(SimulationSet::Input),
            )
            .add_systems(
                Update,
                (
                    particles::update_particle_visuals,
                    particles::draw_domain_border,
                    ui::update_hud,
                )
                    .after(SimulationSet::Step),
            );
    }
}
