//! Utility modules for configuration

pub mod config;

pub use config::{ConfigurationManager, TriangulationConfig, ValidationReport};
