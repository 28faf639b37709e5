use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use kinetic_sim::ParticleSimulation;

pub const MIN_ZOOM: f32 = 0.05;
pub const MAX_ZOOM: f32 = 20.0;
/// Zoom factor per scroll notch
pub const ZOOM_STEP: f32 = 1.1;

/// Orthographic 2D camera looking at the simulation domain.
/// `zoom` is screen pixels per world unit; the projection scale is its inverse.
#[derive(Component, Debug, Clone, Copy)]
pub struct PanZoomCamera {
    pub zoom: f32,
}

impl Default for PanZoomCamera {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

/// Window coordinates (origin top-left, y down) to world coordinates (y up).
pub fn screen_to_world(screen: Vec2, window_size: Vec2, camera_pos: Vec2, zoom: f32) -> Vec2 {
    let offset = screen - window_size * 0.5;
    Vec2::new(camera_pos.x + offset.x / zoom, camera_pos.y - offset.y / zoom)
}

pub fn world_to_screen(world: Vec2, window_size: Vec2, camera_pos: Vec2, zoom: f32) -> Vec2 {
    let relative = (world - camera_pos) * zoom;
    Vec2::new(
        relative.x + window_size.x * 0.5,
        window_size.y * 0.5 - relative.y,
    )
}

/// A cursor movement in window pixels expressed in world units
pub fn screen_delta_to_world(delta: Vec2, zoom: f32) -> Vec2 {
    Vec2::new(delta.x / zoom, -delta.y / zoom)
}

/// Zoom by `ZOOM_STEP^amount`, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
/// With a cursor the world point under it stays put. Returns the new camera position and zoom.
pub fn zoom_at(
    camera_pos: Vec2,
    zoom: f32,
    amount: f32,
    cursor: Option<Vec2>,
    window_size: Vec2,
) -> (Vec2, f32) {
    let new_zoom = (zoom * ZOOM_STEP.powf(amount)).clamp(MIN_ZOOM, MAX_ZOOM);
    if new_zoom == zoom {
        return (camera_pos, zoom);
    }

    match cursor {
        Some(cursor) => {
            let before = screen_to_world(cursor, window_size, camera_pos, zoom);
            let after = screen_to_world(cursor, window_size, camera_pos, new_zoom);
            (camera_pos + before - after, new_zoom)
        }
        None => (camera_pos, new_zoom),
    }
}

/// Spawn the 2D camera centred on the domain
pub fn spawn_camera(mut commands: Commands, sim: Res<ParticleSimulation>) {
    let centre = Vec2::new(sim.width() as f32 * 0.5, sim.height() as f32 * 0.5);
    info!("Camera spawned at ({:.0}, {:.0})", centre.x, centre.y);

    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_xyz(centre.x, centre.y, 0.0),
        PanZoomCamera::default(),
    ));
}

/// Right-drag pans, scroll zooms at the cursor
pub fn pan_zoom_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut query: Query<(&mut Transform, &mut OrthographicProjection, &mut PanZoomCamera)>,
) {
    let Ok((mut transform, mut projection, mut cam)) = query.get_single_mut() else {
        return;
    };

    if mouse_button.pressed(MouseButton::Right) && mouse_motion.delta != Vec2::ZERO {
        let world_delta = screen_delta_to_world(mouse_motion.delta, cam.zoom);
        transform.translation.x -= world_delta.x;
        transform.translation.y -= world_delta.y;
    }

    let scroll = mouse_scroll.delta.y;
    if scroll == 0.0 {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };

    let (pos, zoom) = zoom_at(
        transform.translation.truncate(),
        cam.zoom,
        scroll.signum(),
        window.cursor_position(),
        window.size(),
    );
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
    cam.zoom = zoom;
    projection.scale = 1.0 / zoom;
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_screen_centre_is_camera_position() {
        let world = screen_to_world(Vec2::new(400.0, 300.0), WINDOW, Vec2::new(50.0, 70.0), 3.0);
        assert_eq!(world, Vec2::new(50.0, 70.0));
    }

    #[test]
    fn test_screen_y_points_down() {
        let world = screen_to_world(Vec2::new(400.0, 310.0), WINDOW, Vec2::ZERO, 2.0);
        assert_eq!(world, Vec2::new(0.0, -5.0));
        assert_eq!(screen_delta_to_world(Vec2::new(4.0, 4.0), 2.0), Vec2::new(2.0, -2.0));
    }

    #[test]
    fn test_world_screen_round_trip() {
        let cam = Vec2::new(120.0, -40.0);
        let screen = Vec2::new(13.0, 577.0);
        let world = screen_to_world(screen, WINDOW, cam, 0.75);
        let back = world_to_screen(world, WINDOW, cam, 0.75);
        assert!((back - screen).length() < 1e-3);
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let cam = Vec2::new(500.0, 500.0);
        let cursor = Vec2::new(100.0, 450.0);
        let before = screen_to_world(cursor, WINDOW, cam, 1.0);
        let (new_cam, zoom) = zoom_at(cam, 1.0, 1.0, Some(cursor), WINDOW);
        assert!((zoom - ZOOM_STEP).abs() < 1e-6);
        let after = screen_to_world(cursor, WINDOW, new_cam, zoom);
        assert!((after - before).length() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let (pos, zoom) = zoom_at(Vec2::ZERO, MAX_ZOOM, 1.0, Some(Vec2::ZERO), WINDOW);
        assert_eq!((pos, zoom), (Vec2::ZERO, MAX_ZOOM));
        let (_, zoom) = zoom_at(Vec2::ZERO, 0.051, -5.0, None, WINDOW);
        assert_eq!(zoom, MIN_ZOOM);
    }
}
