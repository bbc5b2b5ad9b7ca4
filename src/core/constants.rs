//! Physical constants and numeric tolerances

/// Mean Earth radius for the spherical model (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per kilometer
pub const METERS_PER_KM: f64 = 1000.0;

/// Relative tolerance for treating two bearing slopes as parallel
pub const PARALLEL_SLOPE_REL_TOLERANCE: f64 = 1e-9;

/// Absolute floor for the parallel-slope test, catches slopes near zero
pub const PARALLEL_SLOPE_ABS_TOLERANCE: f64 = 1e-12;

/// Sines below this magnitude are treated as zero in degeneracy checks
pub const DEGENERATE_SINE_TOLERANCE: f64 = 1e-12;
