//! Observation ingestion, clustering seam and scenario simulation

pub mod observations;
pub mod clustering;
pub mod simulation;

pub use observations::{load_observations, ground_truth, station_roster, to_geodesic_points, Observation, Station};
pub use clustering::{centroids_from_labels, cluster_centroids, ClusterLabel, ClusterLabeler};
pub use simulation::ScenarioSimulator;
