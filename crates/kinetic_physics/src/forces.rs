use kinetic_core::{FORCE_COINCIDENCE_SQ, FORCE_STRENGTH, Particle, Vector2};

/// Add `delta * FORCE_STRENGTH` straight onto the velocity of every particle within
/// `radius` of `center`. An instantaneous kick, not an acceleration.
///
/// Full linear scan; called at most once per rendered frame.
/// Returns how many particles were affected.
pub fn apply_velocity_delta_near_point(
    particles: &mut [Particle],
    center: Vector2,
    radius: f64,
    delta: Vector2,
) -> usize {
    let radius_sq = radius * radius;
    let kick = delta * FORCE_STRENGTH;
    let mut touched = 0;

    for p in particles.iter_mut() {
        let dist_sq = Vector2::distance_sq(p.position, center);
        if dist_sq < radius_sq && dist_sq > FORCE_COINCIDENCE_SQ {
            p.velocity += kick;
            touched += 1;
        }
    }

    touched
}
