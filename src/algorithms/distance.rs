//! Great-circle distance, azimuth and forward projection on a spherical Earth

use std::f64::consts::PI;

use crate::algorithms::angle::{clamp_unit, wrap_bearing_deg, wrap_pi};
use crate::core::{Coordinate, DistanceUnit, GeodesicPoint, EARTH_RADIUS_M, METERS_PER_KM};

/// Haversine term `a` for two points given in radians, clamped to `[0, 1]`
fn haversine_term(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    a.clamp(0.0, 1.0)
}

/// Central angle between two points (radians). Bearings are ignored.
pub fn central_angle(p1: &GeodesicPoint, p2: &GeodesicPoint) -> f64 {
    central_angle_rad(
        p1.latitude().to_radians(),
        p1.longitude().to_radians(),
        p2.latitude().to_radians(),
        p2.longitude().to_radians(),
    )
}

/// Central angle from radian inputs, `2·asin(√a)` form
pub(crate) fn central_angle_rad(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    2.0 * clamp_unit(haversine_term(lat1, lon1, lat2, lon2).sqrt()).asin()
}

/// Great-circle distance between two points.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_M`].
/// Symmetric, zero for coincident locations, and independent of bearing.
pub fn haversine_distance(p1: &GeodesicPoint, p2: &GeodesicPoint, unit: DistanceUnit) -> f64 {
    let a = haversine_term(
        p1.latitude().to_radians(),
        p1.longitude().to_radians(),
        p2.latitude().to_radians(),
        p2.longitude().to_radians(),
    );
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    let meters = EARTH_RADIUS_M * c;

    match unit {
        DistanceUnit::Meters => meters,
        DistanceUnit::Kilometers => meters / METERS_PER_KM,
    }
}

/// Haversine distance between two plain coordinates (kilometers)
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    haversine_distance(&(*a).into(), &(*b).into(), DistanceUnit::Kilometers)
}

/// Initial great-circle bearing from `p1` towards `p2` (degrees in `[0, 360)`)
pub fn initial_bearing(p1: &GeodesicPoint, p2: &GeodesicPoint) -> f64 {
    let lat1 = p1.latitude().to_radians();
    let lat2 = p2.latitude().to_radians();
    let dlon = (p2.longitude() - p1.longitude()).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    wrap_bearing_deg(y.atan2(x).to_degrees())
}

/// Direct spherical projection in radians.
///
/// Returns the latitude and longitude reached after travelling the angular
/// distance `delta` from `(lat1, lon1)` on initial bearing `theta`. The
/// longitude is wrapped into `(-π, π]`.
pub(crate) fn project_rad(lat1: f64, lon1: f64, theta: f64, delta: f64) -> (f64, f64) {
    let lat2 = clamp_unit(lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let dlon = (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
    let lon2 = wrap_pi(lon1 + dlon);
    (lat2, if lon2 == -PI { PI } else { lon2 })
}

/// Point reached from `origin` travelling `distance_m` on `bearing_deg`
pub fn destination_point(origin: &GeodesicPoint, bearing_deg: f64, distance_m: f64) -> Coordinate {
    let (lat, lon) = project_rad(
        origin.latitude().to_radians(),
        origin.longitude().to_radians(),
        bearing_deg.to_radians(),
        distance_m / EARTH_RADIUS_M,
    );
    Coordinate::new(lat.to_degrees(), lon.to_degrees())
}
