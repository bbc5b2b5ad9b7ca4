//! Synthetic bearing observations for a known emitter
//!
//! Each station's exact initial bearing to the emitter is perturbed with
//! Gaussian noise and reported as a raw arrival angle. Runs are
//! reproducible from the seed.

use rand::prelude::*;
use rand_distr::Normal;
use tracing::debug;

use crate::algorithms::angle::wrap_bearing_deg;
use crate::algorithms::distance::{destination_point, initial_bearing};
use crate::core::{Coordinate, GeodesicPoint};
use crate::processing::observations::{Observation, Station};
use crate::validation::error::{GeoError, GeoResult};

fn check_location(field: &'static str, value: f64, limit: f64) -> GeoResult<()> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(GeoError::InvalidCoordinate { field, value })
    }
}

pub struct ScenarioSimulator {
    stations: Vec<Station>,
    emitter: Coordinate,
    noise: Normal<f64>,
    rng: StdRng,
}

impl ScenarioSimulator {
    pub fn new(stations: Vec<Station>, emitter: Coordinate, noise_std_deg: f64, seed: u64) -> GeoResult<Self> {
        if stations.is_empty() {
            return Err(GeoError::NoStations);
        }
        if !(noise_std_deg.is_finite() && noise_std_deg >= 0.0) {
            return Err(GeoError::InvalidNoise { value: noise_std_deg });
        }
        check_location("emitter latitude", emitter.latitude, 90.0)?;
        check_location("emitter longitude", emitter.longitude, 180.0)?;
        for station in &stations {
            check_location("station latitude", station.latitude, 90.0)?;
            check_location("station longitude", station.longitude, 180.0)?;
        }

        let noise = Normal::new(0.0, noise_std_deg).map_err(|_| GeoError::InvalidNoise { value: noise_std_deg })?;

        Ok(Self {
            stations,
            emitter,
            noise,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// `count` stations spread over the arc west of `emitter` at `radius_m`.
    ///
    /// Seen from the stations the emitter lies between 30 and 150 degrees,
    /// so no arrival angle needs folding.
    pub fn western_arc(emitter: Coordinate, count: usize, radius_m: f64) -> Vec<Station> {
        let target: GeodesicPoint = emitter.into();
        (0..count)
            .map(|i| {
                let fraction = if count > 1 { i as f64 / (count - 1) as f64 } else { 0.5 };
                let location = destination_point(&target, 210.0 + 120.0 * fraction, radius_m);
                Station::new((i + 1).to_string(), location.latitude, location.longitude)
            })
            .collect()
    }

    /// Observations per event, one per station
    pub fn group_size(&self) -> usize {
        self.stations.len()
    }

    pub fn emitter(&self) -> Coordinate {
        self.emitter
    }

    /// Noise-free bearing from each station to the emitter (degrees)
    pub fn true_bearings(&self) -> Vec<f64> {
        let target: GeodesicPoint = self.emitter.into();
        self.stations
            .iter()
            .map(|station| initial_bearing(&station.location(), &target))
            .collect()
    }

    /// Generate `events` consecutive event groups
    pub fn generate(&mut self, events: usize) -> Vec<Observation> {
        let bearings = self.true_bearings();
        let mut observations = Vec::with_capacity(events * self.stations.len());

        for _ in 0..events {
            for (station, bearing) in self.stations.iter().zip(&bearings) {
                let noisy = wrap_bearing_deg(bearing + self.noise.sample(&mut self.rng));
                observations.push(Observation {
                    station_id: station.id.clone(),
                    station_latitude: station.latitude,
                    station_longitude: station.longitude,
                    arrival_angle: noisy,
                    emitter_latitude: Some(self.emitter.latitude),
                    emitter_longitude: Some(self.emitter.longitude),
                });
            }
        }

        debug!(
            "Simulated {} events across {} stations",
            events,
            self.stations.len()
        );
        observations
    }
}
