use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use kinetic_core::Vector2;
use kinetic_sim::ParticleSimulation;

use super::camera::{PanZoomCamera, screen_delta_to_world, screen_to_world};

/// Cursor position seen on the previous frame, for per-frame drag deltas
#[derive(Resource, Default)]
pub struct DragState {
    pub last_cursor: Option<Vec2>,
}

/// Left-drag: kick particles under the cursor by this frame's cursor movement
pub fn drag_force_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Transform, &PanZoomCamera)>,
    mut drag: ResMut<DragState>,
    mut sim: ResMut<ParticleSimulation>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position();
    let previous = std::mem::replace(&mut drag.last_cursor, cursor);

    if !mouse_button.pressed(MouseButton::Left) || sim.paused {
        return;
    }
    let (Some(cursor), Some(previous)) = (cursor, previous) else {
        return;
    };
    let screen_delta = cursor - previous;
    if screen_delta == Vec2::ZERO {
        return;
    }
    let Ok((transform, cam)) = cameras.get_single() else {
        return;
    };

    let world = screen_to_world(cursor, window.size(), transform.translation.truncate(), cam.zoom);
    let world_delta = screen_delta_to_world(screen_delta, cam.zoom);
    let radius = sim.config().interaction_radius / cam.zoom as f64;

    let touched = sim.apply_force_near_point(
        Vector2::new(world.x as f64, world.y as f64),
        radius,
        Vector2::new(world_delta.x as f64, world_delta.y as f64),
    );
    trace!(
        "Drag at ({:.1}, {:.1}) r={:.1} touched {} particles",
        world.x, world.y, radius, touched
    );
}

/// Space toggles pause
pub fn pause_toggle_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<ParticleSimulation>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        sim.toggle_pause();
    }
}
