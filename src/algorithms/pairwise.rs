//! Pairwise intersection of bearings within each emission event
//!
//! Observations arrive as a flat sequence where every `group_size`
//! consecutive entries describe the same emission as seen by each station.
//! Every unordered pair inside a group is intersected; the surviving
//! crossings form the intersection cloud handed to clustering.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::algorithms::great_circle::compute_intersection;
use crate::algorithms::planar::compute_stanfield_intersection;
use crate::core::{Coordinate, GeodesicPoint};
use crate::validation::error::{GeoError, GeoResult};

/// Rectangular latitude/longitude region of interest (inclusive bounds).
///
/// `x` is longitude and `y` is latitude, the way the region is configured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Region {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> GeoResult<Self> {
        for (name, value) in [("min_x", min_x), ("max_x", max_x), ("min_y", min_y), ("max_y", max_y)] {
            if !value.is_finite() {
                return Err(GeoError::InvalidRegion {
                    reason: format!("{} is not finite ({})", name, value),
                });
            }
        }
        if min_x > max_x {
            return Err(GeoError::InvalidRegion {
                reason: format!("min_x {} exceeds max_x {}", min_x, max_x),
            });
        }
        if min_y > max_y {
            return Err(GeoError::InvalidRegion {
                reason: format!("min_y {} exceeds max_y {}", min_y, max_y),
            });
        }
        Ok(Self { min_x, max_x, min_y, max_y })
    }

    /// Build from `[min, max]` longitude and latitude axes
    pub fn from_axes(axis_x: [f64; 2], axis_y: [f64; 2]) -> GeoResult<Self> {
        Self::new(axis_x[0], axis_x[1], axis_y[0], axis_y[1])
    }

    /// Region covering the whole globe
    pub fn world() -> Self {
        Self {
            min_x: -180.0,
            max_x: 180.0,
            min_y: -90.0,
            max_y: 90.0,
        }
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        point.latitude >= self.min_y
            && point.latitude <= self.max_y
            && point.longitude >= self.min_x
            && point.longitude <= self.max_x
    }
}

/// Which intersector the generator applies to each pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionMethod {
    #[default]
    GreatCircle,
    /// Local-plane approximation, short baselines only
    Planar,
}

/// Intersection cloud plus bookkeeping for one generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub all_intersections: Vec<Coordinate>,
    /// Subset of `all_intersections` inside the region
    pub filtered_intersections: Vec<Coordinate>,
    pub groups_processed: usize,
    pub pairs_examined: usize,
    /// Pairs that produced no intersection or failed (planar)
    pub pairs_rejected: usize,
    /// Pairs the planar solver refused as parallel
    pub pairs_failed: usize,
    /// Trailing observations that did not fill a group
    pub dropped_observations: usize,
}

/// Number of candidate pairs examined for `n` observations in groups of `g`
pub fn candidate_pair_count(n: usize, g: usize) -> usize {
    if g == 0 {
        return 0;
    }
    (n / g) * (g * g.saturating_sub(1) / 2)
}

/// Generates pairwise intersections per event group
#[derive(Debug, Clone)]
pub struct PairwiseIntersectionGenerator {
    group_size: usize,
    region: Region,
    method: IntersectionMethod,
}

impl PairwiseIntersectionGenerator {
    pub fn new(group_size: usize, region: Region) -> GeoResult<Self> {
        if group_size == 0 {
            return Err(GeoError::InvalidGroupSize { size: group_size });
        }
        Ok(Self {
            group_size,
            region,
            method: IntersectionMethod::GreatCircle,
        })
    }

    pub fn with_method(mut self, method: IntersectionMethod) -> Self {
        self.method = method;
        self
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn method(&self) -> IntersectionMethod {
        self.method
    }

    /// Intersect a single pair with the configured method
    pub fn intersect_pair(&self, p1: &GeodesicPoint, p2: &GeodesicPoint) -> GeoResult<Option<Coordinate>> {
        match self.method {
            IntersectionMethod::GreatCircle => Ok(compute_intersection(p1, p2)),
            IntersectionMethod::Planar => compute_stanfield_intersection(p1, p2),
        }
    }

    /// Run every event group through the pairwise intersector
    pub fn generate(&self, observations: &[GeodesicPoint]) -> GenerationResult {
        let mut result = GenerationResult::default();

        let groups = observations.chunks_exact(self.group_size);
        result.dropped_observations = groups.remainder().len();
        if result.dropped_observations > 0 {
            warn!(
                "Dropping {} trailing observations: {} is not a multiple of group size {}",
                result.dropped_observations,
                observations.len(),
                self.group_size
            );
        }

        for group in groups {
            result.groups_processed += 1;
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    result.pairs_examined += 1;
                    match self.intersect_pair(&group[i], &group[j]) {
                        Ok(Some(point)) => result.all_intersections.push(point),
                        Ok(None) => result.pairs_rejected += 1,
                        Err(e) => {
                            debug!(
                                "Skipping pair ({}, {}) in group {}: {}",
                                i, j, result.groups_processed, e
                            );
                            result.pairs_rejected += 1;
                            result.pairs_failed += 1;
                        }
                    }
                }
            }
        }

        result.filtered_intersections = result
            .all_intersections
            .iter()
            .filter(|point| self.region.contains(point))
            .copied()
            .collect();

        info!(
            "Generated {} intersections from {} groups ({} pairs, {} rejected), {} inside region",
            result.all_intersections.len(),
            result.groups_processed,
            result.pairs_examined,
            result.pairs_rejected,
            result.filtered_intersections.len()
        );

        result
    }
}

/// Great-circle pairwise generation in one call
pub fn generate_intersections(
    observations: &[GeodesicPoint],
    group_size: usize,
    region: Region,
) -> GeoResult<GenerationResult> {
    Ok(PairwiseIntersectionGenerator::new(group_size, region)?.generate(observations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::distance::initial_bearing;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn aimed_group(stations: &[(f64, f64)], emitter: &GeodesicPoint) -> Vec<GeodesicPoint> {
        stations
            .iter()
            .map(|&(lat, lon)| {
                let mut station = GeodesicPoint::new(lat, lon);
                station.set_bearing(initial_bearing(&station, emitter));
                station
            })
            .collect()
    }

    fn stations() -> Vec<(f64, f64)> {
        vec![(40.0, -3.0), (41.0, -4.5), (39.5, -5.0), (40.8, -2.2)]
    }

    #[test]
    fn test_candidate_pair_count() {
        assert_eq!(candidate_pair_count(12, 4), 18);
        assert_eq!(candidate_pair_count(13, 4), 18);
        assert_eq!(candidate_pair_count(3, 4), 0);
        assert_eq!(candidate_pair_count(5, 1), 0);
        assert_eq!(candidate_pair_count(5, 0), 0);
    }

    #[test]
    fn test_zero_group_size_rejected() {
        let result = PairwiseIntersectionGenerator::new(0, Region::world());
        assert_eq!(result.unwrap_err(), GeoError::InvalidGroupSize { size: 0 });
    }

    #[test]
    fn test_region_validation() {
        assert!(Region::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(Region::new(0.0, 1.0, 2.0, 1.0).is_err());
        assert!(Region::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        let region = Region::from_axes([-5.0, -2.0], [39.0, 41.0]).unwrap();
        assert!(region.contains(&Coordinate::new(40.0, -3.0)));
        assert!(region.contains(&Coordinate::new(41.0, -5.0)));
        assert!(!region.contains(&Coordinate::new(40.0, -1.0)));
    }

    #[test]
    fn test_generate_counts_pairs_and_drops_remainder() {
        let emitter = GeodesicPoint::new(40.3, -3.7);
        let mut observations = Vec::new();
        for _ in 0..3 {
            observations.extend(aimed_group(&stations(), &emitter));
        }
        observations.push(GeodesicPoint::with_bearing(40.0, -3.0, 10.0));

        let generator = PairwiseIntersectionGenerator::new(4, Region::world()).unwrap();
        let result = generator.generate(&observations);

        assert_eq!(result.groups_processed, 3);
        assert_eq!(result.dropped_observations, 1);
        assert_eq!(result.pairs_examined, candidate_pair_count(observations.len(), 4));
        assert_eq!(
            result.all_intersections.len() + result.pairs_rejected,
            result.pairs_examined
        );
        for point in &result.all_intersections {
            assert!((point.latitude - 40.3).abs() < 1e-6);
            assert!((point.longitude + 3.7).abs() < 1e-6);
        }
    }

    #[test]
    fn test_filtered_is_subset_within_region() {
        let mut rng = StdRng::seed_from_u64(42);
        let observations: Vec<GeodesicPoint> = (0..60)
            .map(|_| {
                GeodesicPoint::with_bearing(
                    rng.gen_range(35.0..45.0),
                    rng.gen_range(-10.0..0.0),
                    rng.gen_range(0.0..180.0),
                )
            })
            .collect();
        let region = Region::from_axes([-6.0, -2.0], [38.0, 42.0]).unwrap();

        let result = generate_intersections(&observations, 3, region).unwrap();

        assert_eq!(result.pairs_examined, 60);
        for point in &result.filtered_intersections {
            assert!(region.contains(point));
            assert!(result.all_intersections.contains(point));
        }
        let inside = result
            .all_intersections
            .iter()
            .filter(|p| region.contains(p))
            .count();
        assert_eq!(inside, result.filtered_intersections.len());
    }

    #[test]
    fn test_planar_failures_do_not_abort_group() {
        // First two stations share a bearing, the third crosses both
        let observations = vec![
            GeodesicPoint::with_bearing(0.0, 0.0, 45.0),
            GeodesicPoint::with_bearing(0.0, 1.0, 45.0),
            GeodesicPoint::with_bearing(0.0, 2.0, 135.0),
        ];
        let generator = PairwiseIntersectionGenerator::new(3, Region::world())
            .unwrap()
            .with_method(IntersectionMethod::Planar);
        let result = generator.generate(&observations);

        assert_eq!(result.pairs_examined, 3);
        assert_eq!(result.pairs_failed, 1);
        assert_eq!(result.all_intersections.len(), 2);
    }

    #[test]
    fn test_method_serde_names() {
        let method: IntersectionMethod = serde_json::from_str("\"planar\"").unwrap();
        assert_eq!(method, IntersectionMethod::Planar);
        assert_eq!(IntersectionMethod::default(), IntersectionMethod::GreatCircle);
    }
}
