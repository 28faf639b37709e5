use thiserror::Error;

/// Result alias used by every fallible constructor in the workspace.
pub type SimResult<T> = std::result::Result<T, SimError>;

/// Construction-time failures. The per-step path never produces one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("particle radius must be finite and > 0, got {0}")]
    InvalidRadius(f64),

    #[error("particle mass must be finite and > 0, got {0}")]
    InvalidMass(f64),

    #[error("particle count must be > 0")]
    EmptyPopulation,

    #[error("domain {width}x{height} cannot hold particles of radius {radius}")]
    InvalidDomain { width: f64, height: f64, radius: f64 },

    /// More disks requested than the domain area can hold without overlap.
    #[error("{requested} particles cannot fit without overlap; the domain holds at most {capacity}")]
    TooManyParticles { requested: usize, capacity: usize },

    #[error("time step must be finite and >= 0, got {0}")]
    InvalidTimeStep(f64),

    /// Rejection sampling gave up; reduce the count or enlarge the domain.
    #[error(
        "placed {placed} of {requested} particles before giving up after {attempts} rejected samples"
    )]
    PlacementFailed {
        placed: usize,
        requested: usize,
        attempts: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_informative() {
        let msg = SimError::InvalidRadius(-2.0).to_string();
        assert!(msg.contains("radius"));
        assert!(msg.contains("-2"));

        let msg = SimError::PlacementFailed {
            placed: 3,
            requested: 10,
            attempts: 1000,
        }
        .to_string();
        assert!(msg.contains("3 of 10"));
    }
}
