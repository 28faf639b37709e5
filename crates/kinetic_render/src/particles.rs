use bevy::prelude::*;
use kinetic_sim::ParticleSimulation;

/// Links a disk entity to its slot in the simulation's particle slice
#[derive(Component)]
pub struct ParticleDisk {
    pub index: usize,
}

/// Number of shared colour materials particles are bucketed into
pub const SPEED_BANDS: usize = 8;

/// Shared materials, slowest band first
#[derive(Resource)]
pub struct SpeedPalette {
    pub materials: Vec<Handle<ColorMaterial>>,
    /// Speed mapped to the top band
    pub reference_speed: f64,
}

impl SpeedPalette {
    pub fn band_for(&self, speed: f64) -> usize {
        speed_band(speed, self.reference_speed, self.materials.len())
    }
}

/// `floor(speed / reference * bands)` clamped into `[0, bands - 1]`
pub fn speed_band(speed: f64, reference: f64, bands: usize) -> usize {
    if bands == 0 || reference <= 0.0 || !speed.is_finite() {
        return 0;
    }
    let band = (speed / reference * bands as f64).floor();
    if band > 0.0 {
        (band as usize).min(bands - 1)
    } else {
        0
    }
}

/// Cold blue for slow particles through to warm orange for fast ones
pub fn band_color(band: usize, bands: usize) -> Color {
    let t = band as f32 / bands.saturating_sub(1).max(1) as f32;
    Color::srgb(0.2 + 0.77 * t, 0.4 + 0.23 * t, 1.0 - 0.73 * t)
}

/// Spawn one disk per particle, sharing a single mesh and the band materials
pub fn spawn_particle_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim: Res<ParticleSimulation>,
) {
    let mesh = meshes.add(Circle::new(sim.particle_radius() as f32));

    let palette = SpeedPalette {
        materials: (0..SPEED_BANDS)
            .map(|band| materials.add(band_color(band, SPEED_BANDS)))
            .collect(),
        reference_speed: 2.0 * sim.config().initial_speed,
    };

    for (index, p) in sim.particles().iter().enumerate() {
        let material = palette.materials[palette.band_for(p.speed())].clone();
        commands.spawn((
            Mesh2d(mesh.clone()),
            MeshMaterial2d(material),
            Transform::from_xyz(p.position.x as f32, p.position.y as f32, 0.0),
            ParticleDisk { index },
        ));
    }

    info!("Spawned {} particle disks", sim.particles().len());
    commands.insert_resource(palette);
}

/// Copy positions from the snapshot and re-band colours
pub fn update_particle_visuals(
    sim: Res<ParticleSimulation>,
    palette: Res<SpeedPalette>,
    mut query: Query<(
        &mut Transform,
        &mut MeshMaterial2d<ColorMaterial>,
        &ParticleDisk,
    )>,
) {
    for (mut transform, mut material, disk) in query.iter_mut() {
        let Some(p) = sim.particles().get(disk.index) else {
            continue;
        };
        transform.translation.x = p.position.x as f32;
        transform.translation.y = p.position.y as f32;

        let band = &palette.materials[palette.band_for(p.speed())];
        if material.0 != *band {
            material.0 = band.clone();
        }
    }
}

/// Corners of the domain outline, counter-clockwise from the origin
pub fn domain_corners(width: f64, height: f64) -> [Vec2; 4] {
    let (w, h) = (width as f32, height as f32);
    [
        Vec2::ZERO,
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        Vec2::new(0.0, h),
    ]
}

/// Outline the walls so they stay visible while panning and zooming
pub fn draw_domain_border(mut gizmos: Gizmos, sim: Res<ParticleSimulation>) {
    let corners = domain_corners(sim.width(), sim.height());
    let color = Color::srgba(0.6, 0.6, 0.7, 0.8);
    for i in 0..corners.len() {
        gizmos.line_2d(corners[i], corners[(i + 1) % corners.len()], color);
    }
}
