//! Error types for geometry, configuration and observation input

use std::path::PathBuf;
use thiserror::Error;

/// Result type for geometry operations
pub type GeoResult<T> = Result<T, GeoError>;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for observation input
pub type InputResult<T> = Result<T, InputError>;

/// Geometry and pipeline errors visible to callers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// The planar solver has no unique solution
    #[error("Azimuths are too similar to triangulate: tan1={tan1:.12}, tan2={tan2:.12}")]
    ParallelBearings { tan1: f64, tan2: f64 },

    #[error("Invalid group size {size}: must be at least 1")]
    InvalidGroupSize { size: usize },

    #[error("Invalid region: {reason}")]
    InvalidRegion { reason: String },

    #[error("Invalid {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },

    #[error("Invalid bearing noise {value}: standard deviation must be finite and non-negative")]
    InvalidNoise { value: f64 },

    #[error("At least one station is required")]
    NoStations,

    /// Clustering output does not line up with its input
    #[error("Label count {labels} does not match point count {points}")]
    LabelMismatch { points: usize, labels: usize },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Observation input errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("No observations in input")]
    Empty,
}

impl From<GeoError> for ConfigError {
    fn from(error: GeoError) -> Self {
        ConfigError::InvalidParameter {
            parameter: "geometry".to_string(),
            value: String::new(),
            reason: error.to_string(),
        }
    }
}
