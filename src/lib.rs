//! Bearing Triangulation
//!
//! Locates radio emitters from angle-of-arrival observations reported by
//! groups of receiving stations. Bearings from every station pair in a
//! group are intersected on the sphere, the candidate cloud is clipped to
//! a region of interest, and externally computed cluster centroids are
//! scored against ground truth.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Centroid, Coordinate, DistanceRecord, DistanceUnit, GeodesicPoint, IntersectionResult, EARTH_RADIUS_M};
pub use algorithms::{
    compute_intersection, compute_stanfield_intersection, generate_intersections, haversine_distance,
    nearest_per_centroid, normalize_arrival_angle, GenerationResult, IntersectionMethod,
    PairwiseIntersectionGenerator, Region,
};
pub use processing::{load_observations, ClusterLabel, ClusterLabeler, Observation, ScenarioSimulator, Station};
pub use validation::{ConfigError, ErrorReport, GeoError, GeoResult, InputError};
pub use utils::{ConfigurationManager, TriangulationConfig};
pub use api::{JsonFormatter, ReportFormat, RunReport, TextFormatter};
