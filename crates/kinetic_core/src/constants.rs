// Simulation-scaled units: lengths in domain units, time in seconds,
// mass in multiples of the default particle mass.

/// Mass assigned when a particle is created without an explicit mass
pub const DEFAULT_MASS: f64 = 1.0;

/// Grid cell size as a multiple of the particle radius.
/// Must stay >= 2 so every overlapping pair lands in adjacent cells.
pub const GRID_CELL_RADIUS_FACTOR: f64 = 4.0;

/// Squared separation below which two particles are treated as coincident
/// and left unresolved (no usable contact normal)
pub const MIN_SEPARATION_SQ: f64 = 0.01;

/// Squared distance below which a particle sitting on the force point is skipped
pub const FORCE_COINCIDENCE_SQ: f64 = 1e-6;

/// Scale applied to the pointer velocity delta before it is added to particles
pub const FORCE_STRENGTH: f64 = 1.0;

/// Number of bins in the speed histogram
pub const HISTOGRAM_BINS: usize = 100;

/// Adiabatic index used by the speed-of-sound estimate (2D monatomic gas)
pub const ADIABATIC_INDEX: f64 = 2.0;

/// Upper bound on grid buckets. Larger domains get coarser cells instead.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Upper bound on particle storage reserved up front; beyond it the arena grows on push
pub const MAX_PREALLOCATED_PARTICLES: usize = 1 << 16;
