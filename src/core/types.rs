//! Core data types for bearing triangulation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A station location, optionally directed by a bearing.
///
/// Equality is structural over latitude, longitude and bearing. Latitude and
/// longitude are fixed at construction; the bearing may be attached later to
/// turn a plain location into a ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodesicPoint {
    latitude: f64,
    longitude: f64,
    bearing: Option<f64>,
}

impl GeodesicPoint {
    /// Create an undirected point (degrees)
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            bearing: None,
        }
    }

    /// Create a point carrying a bearing (degrees clockwise from true north)
    pub fn with_bearing(latitude: f64, longitude: f64, bearing: f64) -> Self {
        Self {
            latitude,
            longitude,
            bearing: Some(bearing),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    /// Attach or replace the bearing
    pub fn set_bearing(&mut self, bearing: f64) {
        self.bearing = Some(bearing);
    }

    /// Location without the bearing
    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl From<Coordinate> for GeodesicPoint {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate.latitude, coordinate.longitude)
    }
}

impl fmt::Display for GeodesicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GeodesicPoint(latitude={}, longitude={}, bearing=",
            self.latitude, self.longitude
        )?;
        match self.bearing {
            Some(bearing) => write!(f, "{})", bearing),
            None => write!(f, "None)"),
        }
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Bit-exact identity key, used to group by value; `-0.0` folds to `0.0`
    pub(crate) fn identity_key(&self) -> (u64, u64) {
        ((self.latitude + 0.0).to_bits(), (self.longitude + 0.0).to_bits())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Crossing of two bearing rays; `None` when the geometry is degenerate
pub type IntersectionResult = Option<Coordinate>;

/// Representative point of a cluster of intersection candidates
pub type Centroid = Coordinate;

/// Unit selector for distance results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Meters,
    #[default]
    Kilometers,
}

impl DistanceUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
        }
    }

    /// Express a distance given in kilometers in this unit
    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Meters => km * crate::core::constants::METERS_PER_KM,
            DistanceUnit::Kilometers => km,
        }
    }
}

/// Ground-truth emitter matched to a centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub emitter: Coordinate,
    pub centroid: Centroid,
    /// Haversine distance (kilometers)
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_bearing() {
        let point = GeodesicPoint::new(51.8853, 0.2545);
        assert_eq!(
            point.to_string(),
            "GeodesicPoint(latitude=51.8853, longitude=0.2545, bearing=None)"
        );
    }

    #[test]
    fn test_display_with_bearing() {
        let point = GeodesicPoint::with_bearing(51.8853, 0.2545, 108.55);
        assert_eq!(
            point.to_string(),
            "GeodesicPoint(latitude=51.8853, longitude=0.2545, bearing=108.55)"
        );
    }

    #[test]
    fn test_bearing_assignment() {
        let mut point = GeodesicPoint::new(51.8853, 0.2545);
        assert_eq!(point.bearing(), None);
        point.set_bearing(108.55);
        assert_eq!(point.bearing(), Some(108.55));
        assert_eq!(point.latitude(), 51.8853);
    }

    #[test]
    fn test_structural_equality() {
        let a = GeodesicPoint::with_bearing(10.0, 20.0, 45.0);
        let b = GeodesicPoint::with_bearing(10.0, 20.0, 45.0);
        let c = GeodesicPoint::with_bearing(10.0, 20.0, 46.0);
        let d = GeodesicPoint::new(10.0, 20.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_distance_unit_conversion() {
        assert_eq!(DistanceUnit::Kilometers.from_km(1.5), 1.5);
        assert_eq!(DistanceUnit::Meters.from_km(1.5), 1500.0);
    }

    #[test]
    fn test_distance_unit_serde() {
        let unit: DistanceUnit = serde_json::from_str("\"meters\"").unwrap();
        assert_eq!(unit, DistanceUnit::Meters);
        assert_eq!(DistanceUnit::default(), DistanceUnit::Kilometers);
    }
}
