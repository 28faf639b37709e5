use kinetic_core::{MIN_SEPARATION_SQ, Particle, Vector2};

/// What `resolve_collision_elastic` did to a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Wrong id order, not touching, or coincident centres. Nothing changed.
    Skipped,
    /// Overlap removed, but the pair was already separating so velocities are untouched
    Depenetrated,
    /// Overlap removed and normal velocities exchanged
    Resolved,
}

/// Resolve one overlapping pair.
///
/// Only acts when `p1.id() < p2.id()`, so a pair surfaced by both particles'
/// neighbourhood queries is handled once per sweep. Positional correction splits
/// the penetration evenly, and the velocity response is a unit-restitution
/// exchange along the contact normal. Both ignore `mass`: every particle
/// responds as if it had the same mass.
pub fn resolve_collision_elastic(p1: &mut Particle, p2: &mut Particle) -> ContactOutcome {
    if p1.id() >= p2.id() {
        return ContactOutcome::Skipped;
    }

    let min_dist = p1.radius() + p2.radius();
    let dist_sq = Vector2::distance_sq(p1.position, p2.position);
    if dist_sq >= min_dist * min_dist || dist_sq < MIN_SEPARATION_SQ {
        return ContactOutcome::Skipped;
    }

    let dist = dist_sq.sqrt();
    let overlap = min_dist - dist;
    let normal = (p2.position - p1.position) * (1.0 / dist);

    let correction = normal * (overlap * 0.5);
    p1.position -= correction;
    p2.position += correction;

    let vel_along_normal = (p2.velocity - p1.velocity).dot(normal);
    if vel_along_normal > 0.0 {
        return ContactOutcome::Depenetrated;
    }

    let impulse = normal * -vel_along_normal;
    p1.velocity -= impulse;
    p2.velocity += impulse;

    p1.free_path_distance = 0.0;
    p2.free_path_distance = 0.0;
    ContactOutcome::Resolved
}

/// Two distinct mutable borrows out of one slice, in the requested order.
/// `None` when `i == j` or either index is out of range.
pub fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> Option<(&mut Particle, &mut Particle)> {
    if i == j || i >= particles.len() || j >= particles.len() {
        return None;
    }
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = particles.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
