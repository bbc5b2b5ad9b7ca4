//! Triangulation error metrics against ground truth

use serde::{Deserialize, Serialize};

use crate::algorithms::centroid_match::nearest_per_centroid;
use crate::core::{Centroid, Coordinate, DistanceRecord};

/// Per-centroid distances to the nearest emitter plus summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub records: Vec<DistanceRecord>,
    /// Mean of the distance column (km); the reported triangulation error
    pub mean_distance_km: Option<f64>,
    pub min_distance_km: Option<f64>,
    pub max_distance_km: Option<f64>,
    /// Root mean square of the distance column (km)
    pub rms_distance_km: Option<f64>,
}

impl ErrorReport {
    pub fn from_records(records: Vec<DistanceRecord>) -> Self {
        if records.is_empty() {
            return Self {
                records,
                mean_distance_km: None,
                min_distance_km: None,
                max_distance_km: None,
                rms_distance_km: None,
            };
        }

        let count = records.len() as f64;
        let sum: f64 = records.iter().map(|r| r.distance_km).sum();
        let sum_sq: f64 = records.iter().map(|r| r.distance_km * r.distance_km).sum();
        let min = records.iter().map(|r| r.distance_km).fold(f64::INFINITY, f64::min);
        let max = records.iter().map(|r| r.distance_km).fold(f64::NEG_INFINITY, f64::max);

        Self {
            records,
            mean_distance_km: Some(sum / count),
            min_distance_km: Some(min),
            max_distance_km: Some(max),
            rms_distance_km: Some((sum_sq / count).sqrt()),
        }
    }

    /// Match centroids to emitters and summarize
    pub fn evaluate(emitters: &[Coordinate], centroids: &[Centroid]) -> Self {
        Self::from_records(nearest_per_centroid(emitters, centroids))
    }

    pub fn centroid_count(&self) -> usize {
        self.records.len()
    }
}
