//! Geodesic triangulation algorithms

pub mod angle;
pub mod distance;
pub mod great_circle;
pub mod planar;
pub mod pairwise;
pub mod centroid_match;

pub use angle::normalize_arrival_angle;
pub use distance::{destination_point, haversine_distance, haversine_km, initial_bearing};
pub use great_circle::compute_intersection;
pub use planar::compute_stanfield_intersection;
pub use pairwise::{generate_intersections, GenerationResult, IntersectionMethod, PairwiseIntersectionGenerator, Region};
pub use centroid_match::nearest_per_centroid;
