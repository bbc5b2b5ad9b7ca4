//! Seam for the external density-based clustering step
//!
//! Clustering algorithms are not implemented here. A [`ClusterLabeler`]
//! assigns one label per intersection point; centroids are the per-cluster
//! mean location with noise excluded.

use std::collections::BTreeMap;

use crate::core::{Centroid, Coordinate};
use crate::validation::error::{GeoError, GeoResult};

/// Label assigned to a point by a clustering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClusterLabel {
    Noise,
    Cluster(usize),
}

impl ClusterLabel {
    /// Map the conventional integer labels (`-1` for noise)
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            ClusterLabel::Noise
        } else {
            ClusterLabel::Cluster(raw as usize)
        }
    }
}

/// Clustering collaborator: one label per input point, in input order
pub trait ClusterLabeler {
    fn label(&self, points: &[Coordinate]) -> Vec<ClusterLabel>;
}

/// Mean latitude/longitude per cluster, ordered by cluster id
pub fn centroids_from_labels(points: &[Coordinate], labels: &[ClusterLabel]) -> GeoResult<Vec<Centroid>> {
    if points.len() != labels.len() {
        return Err(GeoError::LabelMismatch {
            points: points.len(),
            labels: labels.len(),
        });
    }

    let mut sums: BTreeMap<usize, (f64, f64, usize)> = BTreeMap::new();
    for (point, label) in points.iter().zip(labels) {
        if let ClusterLabel::Cluster(id) = label {
            let entry = sums.entry(*id).or_insert((0.0, 0.0, 0));
            entry.0 += point.latitude;
            entry.1 += point.longitude;
            entry.2 += 1;
        }
    }

    Ok(sums
        .into_values()
        .map(|(lat_sum, lon_sum, count)| Coordinate::new(lat_sum / count as f64, lon_sum / count as f64))
        .collect())
}

/// Label `points` with `labeler` and reduce to centroids
pub fn cluster_centroids<L: ClusterLabeler + ?Sized>(labeler: &L, points: &[Coordinate]) -> GeoResult<Vec<Centroid>> {
    let labels = labeler.label(points);
    centroids_from_labels(points, &labels)
}
