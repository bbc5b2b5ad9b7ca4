//! Station observation records and their conversion to directed points

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::algorithms::angle::normalize_arrival_angle;
use crate::core::{Coordinate, GeodesicPoint};
use crate::validation::error::{InputError, InputResult};

/// One station's report of one emission event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub station_id: String,
    pub station_latitude: f64,
    pub station_longitude: f64,
    /// Raw angle of arrival relative to north (degrees)
    pub arrival_angle: f64,
    /// Ground-truth emitter location, when the source provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitter_latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitter_longitude: Option<f64>,
}

impl Observation {
    /// Station location directed by the normalized arrival angle
    pub fn to_geodesic_point(&self) -> GeodesicPoint {
        GeodesicPoint::with_bearing(
            self.station_latitude,
            self.station_longitude,
            normalize_arrival_angle(self.arrival_angle),
        )
    }

    pub fn emitter(&self) -> Option<Coordinate> {
        match (self.emitter_latitude, self.emitter_longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

/// A receiving station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    pub fn location(&self) -> GeodesicPoint {
        GeodesicPoint::new(self.latitude, self.longitude)
    }
}

fn parse_field(raw: &str, line: usize, name: &str) -> InputResult<f64> {
    raw.trim().parse::<f64>().map_err(|e| InputError::Parse {
        line,
        message: format!("{} '{}': {}", name, raw.trim(), e),
    })
}

/// Parse headerless comma-separated rows.
///
/// Columns: station id, station latitude, station longitude, arrival angle,
/// and optionally emitter latitude, emitter longitude. Blank lines and
/// lines starting with `#` are skipped.
pub fn parse_observations_csv(text: &str) -> InputResult<Vec<Observation>> {
    let mut observations = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(InputError::Parse {
                line: line_number,
                message: format!("expected 4 or 6 fields, found {}", fields.len()),
            });
        }

        let (emitter_latitude, emitter_longitude) = if fields.len() == 6 {
            (
                Some(parse_field(fields[4], line_number, "emitter latitude")?),
                Some(parse_field(fields[5], line_number, "emitter longitude")?),
            )
        } else {
            (None, None)
        };

        observations.push(Observation {
            station_id: fields[0].trim().to_string(),
            station_latitude: parse_field(fields[1], line_number, "station latitude")?,
            station_longitude: parse_field(fields[2], line_number, "station longitude")?,
            arrival_angle: parse_field(fields[3], line_number, "arrival angle")?,
            emitter_latitude,
            emitter_longitude,
        });
    }

    if observations.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(observations)
}

/// Parse a JSON array of observation objects
pub fn parse_observations_json(text: &str) -> InputResult<Vec<Observation>> {
    let observations: Vec<Observation> = serde_json::from_str(text).map_err(|e| InputError::Parse {
        line: e.line(),
        message: e.to_string(),
    })?;
    if observations.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(observations)
}

/// Load observations, as JSON for `.json` files and comma-separated otherwise
pub fn load_observations<P: AsRef<Path>>(path: P) -> InputResult<Vec<Observation>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let observations = if is_json {
        parse_observations_json(&content)?
    } else {
        parse_observations_csv(&content)?
    };

    info!("Loaded {} observations from {}", observations.len(), path.display());
    Ok(observations)
}

/// Directed points in input order
pub fn to_geodesic_points(observations: &[Observation]) -> Vec<GeodesicPoint> {
    observations.iter().map(Observation::to_geodesic_point).collect()
}

/// Distinct emitter locations in first-seen order
pub fn ground_truth(observations: &[Observation]) -> Vec<Coordinate> {
    let mut seen = HashSet::new();
    let emitters: Vec<Coordinate> = observations
        .iter()
        .filter_map(Observation::emitter)
        .filter(|emitter| seen.insert(emitter.identity_key()))
        .collect();
    debug!("Found {} distinct emitter locations", emitters.len());
    emitters
}

/// Distinct stations in first-seen order
pub fn station_roster(observations: &[Observation]) -> Vec<Station> {
    let mut seen = HashSet::new();
    observations
        .iter()
        .filter(|obs| {
            seen.insert((
                obs.station_id.clone(),
                obs.station_latitude.to_bits(),
                obs.station_longitude.to_bits(),
            ))
        })
        .map(|obs| Station::new(obs.station_id.clone(), obs.station_latitude, obs.station_longitude))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
# station,lat,lon,angle,emitter_lat,emitter_lon
1,40.0,-3.0,200.0,40.3,-3.7
2,41.0,-4.5,135.0,40.3,-3.7

3,39.5,-5.0,60.0,40.3,-3.7
";

    #[test]
    fn test_parse_csv() {
        let observations = parse_observations_csv(SAMPLE_CSV).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].station_id, "1");
        assert_eq!(observations[0].arrival_angle, 200.0);
        assert_eq!(observations[2].emitter(), Some(Coordinate::new(40.3, -3.7)));
    }

    #[test]
    fn test_parse_csv_without_ground_truth() {
        let observations = parse_observations_csv("a,1.0,2.0,3.0\n").unwrap();
        assert_eq!(observations[0].emitter(), None);
    }

    #[test]
    fn test_parse_csv_reports_line() {
        let error = parse_observations_csv("1,40.0,-3.0,200.0\n2,41.0,oops,135.0\n").unwrap_err();
        match error {
            InputError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("station longitude"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_csv_field_count() {
        assert!(matches!(
            parse_observations_csv("1,2,3\n"),
            Err(InputError::Parse { line: 1, .. })
        ));
        assert!(matches!(parse_observations_csv("\n# only comments\n"), Err(InputError::Empty)));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[
            {"station_id": "A", "station_latitude": 40.0, "station_longitude": -3.0, "arrival_angle": 90.0},
            {"station_id": "B", "station_latitude": 41.0, "station_longitude": -4.0, "arrival_angle": 250.0,
             "emitter_latitude": 40.5, "emitter_longitude": -3.5}
        ]"#;
        let observations = parse_observations_json(json).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].emitter(), None);
        assert_eq!(observations[1].emitter(), Some(Coordinate::new(40.5, -3.5)));
    }

    #[test]
    fn test_geodesic_point_uses_normalized_angle() {
        let observations = parse_observations_csv(SAMPLE_CSV).unwrap();
        let points = to_geodesic_points(&observations);
        assert_eq!(points[0].bearing(), Some(20.0));
        assert_eq!(points[1].bearing(), Some(135.0));
        assert_eq!(points[0].latitude(), 40.0);
    }

    #[test]
    fn test_ground_truth_deduplicates() {
        let mut observations = parse_observations_csv(SAMPLE_CSV).unwrap();
        observations[2].emitter_latitude = Some(41.0);
        let emitters = ground_truth(&observations);
        assert_eq!(emitters, vec![Coordinate::new(40.3, -3.7), Coordinate::new(41.0, -3.7)]);
    }

    #[test]
    fn test_station_roster() {
        let mut observations = parse_observations_csv(SAMPLE_CSV).unwrap();
        observations.extend(parse_observations_csv(SAMPLE_CSV).unwrap());
        let roster = station_roster(&observations);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[1], Station::new("2", 41.0, -4.5));
    }

    #[test]
    fn test_load_observations_from_file() {
        let path = std::env::temp_dir().join("triangulation_observations_test.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let observations = load_observations(&path).unwrap();
        assert_eq!(observations.len(), 3);
        let _ = std::fs::remove_file(path);

        let missing = load_observations("does/not/exist.json");
        assert!(matches!(missing, Err(InputError::Io { .. })));
    }
}
