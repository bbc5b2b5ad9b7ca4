//! Intersection of two bearing rays on a spherical Earth
//!
//! Each station contributes a great circle through its location along its
//! bearing. The crossing is found by solving the spherical triangle formed
//! by the two stations and the candidate point: the side between the
//! stations comes from the haversine central angle, the two base angles from
//! the difference between each station's bearing and the great-circle
//! azimuth to the other station. The crossing is then projected forward
//! from the first station.
//!
//! Degenerate geometry (missing bearing, identical points, coincident
//! stations, a station on a pole, collinear or diverging rays) yields `None`
//! rather than an error.

use std::f64::consts::PI;

use crate::algorithms::angle::{clamp_unit, wrap_pi};
use crate::algorithms::distance::{central_angle_rad, project_rad};
use crate::core::{Coordinate, GeodesicPoint, IntersectionResult, DEGENERATE_SINE_TOLERANCE};

/// Compute where the bearing rays of `p1` and `p2` cross.
pub fn compute_intersection(p1: &GeodesicPoint, p2: &GeodesicPoint) -> IntersectionResult {
    let (brng1, brng2) = match (p1.bearing(), p2.bearing()) {
        (Some(b1), Some(b2)) => (b1.to_radians(), b2.to_radians()),
        _ => return None,
    };
    if p1 == p2 {
        return None;
    }

    let lat1 = p1.latitude().to_radians();
    let lon1 = p1.longitude().to_radians();
    let lat2 = p2.latitude().to_radians();
    let lon2 = p2.longitude().to_radians();

    let delta_12 = central_angle_rad(lat1, lon1, lat2, lon2);
    // Coincident or antipodal stations: no baseline to solve on
    if delta_12.sin().abs() < DEGENERATE_SINE_TOLERANCE {
        return None;
    }
    // Azimuth is undefined at a pole
    if lat1.cos().abs() < DEGENERATE_SINE_TOLERANCE || lat2.cos().abs() < DEGENERATE_SINE_TOLERANCE {
        return None;
    }

    let (theta_12, theta_21) = station_azimuths(lat1, lon1, lat2, lon2, delta_12);

    let omega_1 = wrap_pi(brng1 - theta_12);
    let omega_2 = wrap_pi(theta_21 - brng2);

    let (sin_w1, sin_w2) = (omega_1.sin(), omega_2.sin());
    if sin_w1.abs() < DEGENERATE_SINE_TOLERANCE && sin_w2.abs() < DEGENERATE_SINE_TOLERANCE {
        // Rays run along the same great circle
        return None;
    }
    if sin_w1 * sin_w2 < 0.0 {
        // Rays diverge
        return None;
    }

    let omega_1 = omega_1.abs();
    let omega_2 = omega_2.abs();

    let omega_3 = clamp_unit(
        -omega_1.cos() * omega_2.cos() + omega_1.sin() * omega_2.sin() * delta_12.cos(),
    )
    .acos();

    let delta_13 = (delta_12.sin() * omega_1.sin() * omega_2.sin())
        .atan2(omega_2.cos() + omega_1.cos() * omega_3.cos());

    let (lat3, lon3) = project_rad(lat1, lon1, brng1, delta_13);
    let crossing = Coordinate::new(lat3.to_degrees(), lon3.to_degrees());

    if crossing.latitude.is_finite() && crossing.longitude.is_finite() {
        Some(crossing)
    } else {
        None
    }
}

/// Great-circle azimuths p1→p2 and p2→p1 (radians, `[0, 2π)`).
///
/// `acos` only covers half a turn; the sign of `sin(lon2 - lon1)` decides
/// which half each azimuth lies in.
fn station_azimuths(lat1: f64, lon1: f64, lat2: f64, lon2: f64, delta_12: f64) -> (f64, f64) {
    let theta_a = clamp_unit(
        (lat2.sin() - lat1.sin() * delta_12.cos()) / (delta_12.sin() * lat1.cos()),
    )
    .acos();
    let theta_b = clamp_unit(
        (lat1.sin() - lat2.sin() * delta_12.cos()) / (delta_12.sin() * lat2.cos()),
    )
    .acos();

    if (lon2 - lon1).sin() > 0.0 {
        (theta_a, 2.0 * PI - theta_b)
    } else {
        (2.0 * PI - theta_a, theta_b)
    }
}
