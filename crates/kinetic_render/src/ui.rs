use bevy::prelude::*;
use kinetic_core::HISTOGRAM_BINS;
use kinetic_physics::SimulationStats;
use kinetic_sim::ParticleSimulation;

/// Marker for the statistics text
#[derive(Component)]
pub struct HudText;

/// Marker for the "PAUSED" banner
#[derive(Component)]
pub struct PauseIndicator;

/// One bar of the speed histogram
#[derive(Component)]
pub struct HistogramBar {
    pub bin: usize,
}

/// Statistics are recomputed every this many frames
pub const STATS_INTERVAL_FRAMES: u32 = 10;

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct StatsThrottle {
    pub frame: u32,
}

/// Spawn the HUD overlay
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Kinetic"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgba(0.8, 0.8, 0.8, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));

    commands.spawn((
        Text::new("PAUSED"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.8, 0.2)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        Visibility::Hidden,
        PauseIndicator,
    ));

    // Histogram panel, bottom right; bars grow from the bottom edge
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(30.0),
                right: Val::Px(30.0),
                width: Val::Px(320.0),
                height: Val::Px(160.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::FlexEnd,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|panel| {
            for bin in 0..HISTOGRAM_BINS {
                panel.spawn((
                    Node {
                        width: Val::Percent(100.0 / HISTOGRAM_BINS as f32),
                        height: Val::Percent(0.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.97, 0.63, 0.27)),
                    HistogramBar { bin },
                ));
            }
        });
}

/// Render the statistics block shown in the HUD
pub fn format_hud(stats: &SimulationStats, elapsed: f64, contacts: usize) -> String {
    format!(
        "Total Time: {:.2} s\n\
         Average KE: {:.8} m*units^2/s^2\n\
         Total KE: {:.8} m*units^2/s^2\n\
         Total Momentum DX: {:+.1} m*units/s\n\
         Total Momentum DY: {:+.1} m*units/s\n\
         Average Velocity: {:.3} units/s\n\
         Expected Speed of Sound: {:.3} units/s\n\
         Particles: {} | Contacts last step: {}\n\
         Velocity Distribution: 0 .. {:.0} units/s\n\
         \n\
         [LMB drag] Push  [RMB drag] Pan  [Scroll] Zoom  [Space] Pause",
        elapsed,
        stats.average_kinetic_energy,
        stats.total_kinetic_energy,
        stats.total_momentum.x,
        stats.total_momentum.y,
        stats.average_speed,
        stats.speed_of_sound,
        stats.particle_count,
        contacts,
        stats.max_speed_for_histogram,
    )
}

/// Bar heights in percent of the tallest bin
pub fn bar_heights(histogram: &[u32]) -> Vec<f32> {
    let max_count = histogram.iter().copied().max().unwrap_or(0).max(1) as f32;
    histogram
        .iter()
        .map(|&count| count as f32 / max_count * 100.0)
        .collect()
}

/// Update HUD text and histogram every `STATS_INTERVAL_FRAMES` frames; pause banner every frame
pub fn update_hud(
    sim: Res<ParticleSimulation>,
    mut throttle: ResMut<StatsThrottle>,
    mut hud_query: Query<&mut Text, With<HudText>>,
    mut bar_query: Query<(&mut Node, &HistogramBar)>,
    mut pause_query: Query<&mut Visibility, With<PauseIndicator>>,
) {
    if let Ok(mut visibility) = pause_query.get_single_mut() {
        let wanted = if sim.paused {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }

    let frame = throttle.frame;
    throttle.frame = throttle.frame.wrapping_add(1);
    if frame % STATS_INTERVAL_FRAMES != 0 {
        return;
    }

    let stats = sim.statistics();

    if let Ok(mut text) = hud_query.get_single_mut() {
        **text = format_hud(&stats, sim.elapsed(), sim.last_step_collisions());
    }

    let heights = bar_heights(&stats.velocity_histogram);
    for (mut node, bar) in bar_query.iter_mut() {
        let height = heights.get(bar.bin).copied().unwrap_or(0.0);
        node.height = Val::Percent(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::Vector2;

    #[test]
    fn test_bar_heights_scale_to_tallest() {
        assert_eq!(bar_heights(&[0, 2, 4]), vec![0.0, 50.0, 100.0]);
        assert_eq!(bar_heights(&[0, 0]), vec![0.0, 0.0]);
        assert!(bar_heights(&[]).is_empty());
    }

    #[test]
    fn test_hud_shows_signed_momentum() {
        let stats = SimulationStats {
            total_momentum: Vector2::new(3.04, -1.26),
            particle_count: 12,
            ..SimulationStats::empty()
        };
        let text = format_hud(&stats, 1.5, 4);
        assert!(text.contains("Total Time: 1.50 s"));
        assert!(text.contains("DX: +3.0"));
        assert!(text.contains("DY: -1.3"));
        assert!(text.contains("Particles: 12 | Contacts last step: 4"));
    }
}
