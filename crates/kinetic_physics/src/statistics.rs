use kinetic_core::{ADIABATIC_INDEX, HISTOGRAM_BINS, Particle, Vector2};
use serde::{Deserialize, Serialize};

/// Aggregate kinetic snapshot, rebuilt from scratch on every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub particle_count: usize,
    pub total_kinetic_energy: f64,
    pub average_kinetic_energy: f64,
    /// Vector sum of m * v
    pub total_momentum: Vector2,
    pub average_speed: f64,
    pub speed_of_sound: f64,
    /// `HISTOGRAM_BINS` counts of particle speed over `[0, max_speed_for_histogram]`
    pub velocity_histogram: Vec<u32>,
    pub max_speed_for_histogram: f64,
}

impl SimulationStats {
    /// Report for an empty snapshot: zeros everywhere and an all-zero histogram
    pub fn empty() -> Self {
        Self {
            particle_count: 0,
            total_kinetic_energy: 0.0,
            average_kinetic_energy: 0.0,
            total_momentum: Vector2::ZERO,
            average_speed: 0.0,
            speed_of_sound: 0.0,
            velocity_histogram: vec![0; HISTOGRAM_BINS],
            max_speed_for_histogram: 0.0,
        }
    }

    /// Samples that landed in a bin (the top sample may have been dropped)
    pub fn histogram_total(&self) -> u32 {
        self.velocity_histogram.iter().sum()
    }

    pub fn bin_width(&self) -> f64 {
        self.max_speed_for_histogram / self.velocity_histogram.len().max(1) as f64
    }
}

/// Kinetic-theory estimate `sqrt(gamma) * sqrt(pi / 2) * mean speed`
pub fn speed_of_sound(average_speed: f64) -> f64 {
    ADIABATIC_INDEX.sqrt() * (std::f64::consts::PI / 2.0).sqrt() * average_speed
}

pub fn calculate_statistics(particles: &[Particle]) -> SimulationStats {
    if particles.is_empty() {
        return SimulationStats::empty();
    }

    let mut total_ke = 0.0f64;
    let mut momentum = Vector2::ZERO;
    let mut speed_sum = 0.0f64;
    let mut speeds = Vec::with_capacity(particles.len());

    for p in particles {
        let speed = p.speed();
        total_ke += p.kinetic_energy();
        momentum += p.momentum();
        speed_sum += speed;
        speeds.push(speed);
    }

    let n = particles.len() as f64;
    let average_speed = speed_sum / n;
    let (velocity_histogram, max_speed_for_histogram) = speed_histogram(&speeds, HISTOGRAM_BINS);

    SimulationStats {
        particle_count: particles.len(),
        total_kinetic_energy: total_ke,
        average_kinetic_energy: total_ke / n,
        total_momentum: momentum,
        average_speed,
        speed_of_sound: speed_of_sound(average_speed),
        velocity_histogram,
        max_speed_for_histogram,
    }
}

/// Bin `speeds` into `bins` equal bins over `[0, max]`, returning the counts and `max`.
///
/// Bin index is `floor(speed / (max / bins))`. The fastest sample normally maps to
/// index `bins` and is dropped rather than folded into the last bin, so the counts
/// can sum to one less than the sample count. When every speed is zero all samples
/// go into bin 0. Non-finite speeds are ignored.
pub fn speed_histogram(speeds: &[f64], bins: usize) -> (Vec<u32>, f64) {
    let mut histogram = vec![0u32; bins];
    if bins == 0 || speeds.is_empty() {
        return (histogram, 0.0);
    }

    let max_speed = speeds
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(0.0f64, f64::max);

    if max_speed <= 0.0 {
        histogram[0] = speeds.iter().filter(|s| s.is_finite()).count() as u32;
        return (histogram, 0.0);
    }

    let bin_width = max_speed / bins as f64;
    for &speed in speeds {
        let scaled = (speed / bin_width).floor();
        if !scaled.is_finite() || scaled < 0.0 {
            continue;
        }
        let index = scaled as usize;
        if index >= bins {
            continue;
        }
        histogram[index] += 1;
    }

    (histogram, max_speed)
}
