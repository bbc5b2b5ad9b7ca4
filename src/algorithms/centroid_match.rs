//! Matching cluster centroids against known emitter locations

use std::collections::HashMap;

use crate::algorithms::distance::haversine_km;
use crate::core::{Centroid, Coordinate, DistanceRecord};

/// For every distinct centroid, the closest emitter and its distance (km).
///
/// Centroids are grouped by value; output follows first-seen centroid order.
/// When several emitters tie for the minimum the first one listed is kept,
/// callers should not rely on that choice.
pub fn nearest_per_centroid(emitters: &[Coordinate], centroids: &[Centroid]) -> Vec<DistanceRecord> {
    let mut best: Vec<DistanceRecord> = Vec::new();
    let mut index_by_centroid: HashMap<(u64, u64), usize> = HashMap::new();

    for centroid in centroids {
        for emitter in emitters {
            let distance_km = haversine_km(emitter, centroid);
            let record = DistanceRecord {
                emitter: *emitter,
                centroid: *centroid,
                distance_km,
            };

            match index_by_centroid.get(&centroid.identity_key()) {
                Some(&index) => {
                    if distance_km < best[index].distance_km {
                        best[index] = record;
                    }
                }
                None => {
                    index_by_centroid.insert(centroid.identity_key(), best.len());
                    best.push(record);
                }
            }
        }
    }

    best
}
