//! Flat-earth approximation of the bearing intersection
//!
//! Latitude and longitude are treated as planar Cartesian coordinates `(x, y)`
//! and each bearing as the angle of a line through its station. The two line
//! equations `y - y1 = tan(θ1)(x - x1)` and `y - y2 = tan(θ2)(x - x2)` are
//! solved as a 2×2 linear system.
//!
//! Only valid for short inter-station baselines. Nothing here corrects for
//! curvature or for the shrinking of longitude degrees away from the
//! equator; use [`compute_intersection`](crate::algorithms::great_circle::compute_intersection)
//! whenever accuracy matters.

use nalgebra::{Matrix2, Vector2};

use crate::core::{
    Coordinate, GeodesicPoint, IntersectionResult, PARALLEL_SLOPE_ABS_TOLERANCE,
    PARALLEL_SLOPE_REL_TOLERANCE,
};
use crate::validation::error::{GeoError, GeoResult};

fn slopes_are_close(tan1: f64, tan2: f64) -> bool {
    let scale = tan1.abs().max(tan2.abs());
    (tan1 - tan2).abs() <= (PARALLEL_SLOPE_REL_TOLERANCE * scale).max(PARALLEL_SLOPE_ABS_TOLERANCE)
}

/// Planar intersection of the two bearing lines.
///
/// Missing bearings or identical points give `Ok(None)`, the same as the
/// great-circle method. Parallel bearings are an explicit error so that the
/// caller can skip the pair.
pub fn compute_stanfield_intersection(
    p1: &GeodesicPoint,
    p2: &GeodesicPoint,
) -> GeoResult<IntersectionResult> {
    let (theta1, theta2) = match (p1.bearing(), p2.bearing()) {
        (Some(b1), Some(b2)) => (b1.to_radians(), b2.to_radians()),
        _ => return Ok(None),
    };
    if p1 == p2 {
        return Ok(None);
    }

    let x1 = p1.latitude().to_radians();
    let y1 = p1.longitude().to_radians();
    let x2 = p2.latitude().to_radians();
    let y2 = p2.longitude().to_radians();

    let tan1 = theta1.tan();
    let tan2 = theta2.tan();

    if slopes_are_close(tan1, tan2) {
        return Err(GeoError::ParallelBearings { tan1, tan2 });
    }

    // Rows: -tan(θi)·x + y = yi - tan(θi)·xi
    let system = Matrix2::new(-tan1, 1.0, -tan2, 1.0);
    let rhs = Vector2::new(y1 - tan1 * x1, y2 - tan2 * x2);

    let solution = system
        .lu()
        .solve(&rhs)
        .ok_or(GeoError::ParallelBearings { tan1, tan2 })?;

    let latitude = solution[0].to_degrees();
    let longitude = solution[1].to_degrees();
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(GeoError::ParallelBearings { tan1, tan2 });
    }

    Ok(Some(Coordinate::new(latitude, longitude)))
}
