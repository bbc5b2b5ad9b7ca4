//! Error types and triangulation quality metrics

pub mod error;
pub mod metrics;

pub use error::{ConfigError, GeoError, GeoResult, InputError};
pub use metrics::ErrorReport;
