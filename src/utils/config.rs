use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::algorithms::pairwise::{IntersectionMethod, PairwiseIntersectionGenerator, Region};
use crate::core::DistanceUnit;
use crate::validation::error::{ConfigError, ConfigResult};

/// Group sizes above this are accepted but flagged
const LARGE_GROUP_SIZE: usize = 32;

/// Triangulation run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangulationConfig {
    /// Observation file (JSON array or comma-separated rows)
    #[serde(default, alias = "csv_location")]
    pub observations_path: Option<String>,
    /// Receiving stations per emission event
    pub number_of_receptors: usize,
    /// Longitude bounds `[min, max]` of the region of interest
    pub axis_x: [f64; 2],
    /// Latitude bounds `[min, max]` of the region of interest
    pub axis_y: [f64; 2],
    /// Unit for reported distances
    #[serde(default)]
    pub distance_unit: DistanceUnit,
    /// Visualization request; accepted for compatibility, nothing is plotted
    #[serde(default)]
    pub plot_intersections: bool,
    #[serde(default)]
    pub intersection_method: IntersectionMethod,
    /// Enable debug logging
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            observations_path: None,
            number_of_receptors: 4,
            axis_x: [-180.0, 180.0],
            axis_y: [-90.0, 90.0],
            distance_unit: DistanceUnit::Kilometers,
            plot_intersections: false,
            intersection_method: IntersectionMethod::GreatCircle,
            debug_logging: false,
        }
    }
}

impl TriangulationConfig {
    /// Region of interest built from the configured axes
    pub fn region(&self) -> ConfigResult<Region> {
        Region::from_axes(self.axis_x, self.axis_y).map_err(|e| ConfigError::InvalidParameter {
            parameter: "axis_x/axis_y".to_string(),
            value: format!("{:?}/{:?}", self.axis_x, self.axis_y),
            reason: e.to_string(),
        })
    }

    /// Pairwise generator matching this configuration
    pub fn generator(&self) -> ConfigResult<PairwiseIntersectionGenerator> {
        let generator = PairwiseIntersectionGenerator::new(self.number_of_receptors, self.region()?)?;
        Ok(generator.with_method(self.intersection_method))
    }
}

/// Configuration validation result
#[derive(Debug)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

/// Loads, validates and adjusts the triangulation configuration
pub struct ConfigurationManager {
    config: TriangulationConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self {
            config: TriangulationConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Replace the configuration after validation
    pub fn update_config(&mut self, config: TriangulationConfig) -> ConfigResult<()> {
        Self::first_error(Self::validate_config(&config))?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: TriangulationConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;

        let validation = Self::validate_config(&config);
        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        Self::first_error(validation)?;

        info!(
            "Loaded configuration from {}: {} receptors, method {:?}",
            path.display(),
            config.number_of_receptors,
            config.intersection_method
        );

        self.config = config;
        self.config_file_path = Some(path.to_string_lossy().to_string());
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.config_file_path = Some(path.to_string_lossy().to_string());
        self.is_modified = false;
        Ok(())
    }

    /// Check if configuration has been modified since last load or save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn config_file_path(&self) -> Option<&str> {
        self.config_file_path.as_deref()
    }

    /// Update the receptor count, returning the previous value
    pub fn set_group_size(&mut self, group_size: usize) -> ConfigResult<usize> {
        if group_size == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "number_of_receptors".to_string(),
                value: group_size.to_string(),
                reason: "Group size must be positive".to_string(),
            });
        }

        let old_value = self.config.number_of_receptors;
        self.config.number_of_receptors = group_size;
        self.is_modified = true;
        Ok(old_value)
    }

    /// Update the region of interest, returning the new region
    pub fn set_region(&mut self, axis_x: [f64; 2], axis_y: [f64; 2]) -> ConfigResult<Region> {
        let mut candidate = self.config.clone();
        candidate.axis_x = axis_x;
        candidate.axis_y = axis_y;
        Self::first_error(Self::validate_config(&candidate))?;

        let region = candidate.region()?;
        self.config = candidate;
        self.is_modified = true;
        Ok(region)
    }

    pub fn set_intersection_method(&mut self, method: IntersectionMethod) -> IntersectionMethod {
        let old_value = self.config.intersection_method;
        self.config.intersection_method = method;
        self.is_modified = true;
        old_value
    }

    /// Validate a configuration without applying it
    pub fn validate_config(config: &TriangulationConfig) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if config.number_of_receptors == 0 {
            errors.push(ConfigError::InvalidParameter {
                parameter: "number_of_receptors".to_string(),
                value: config.number_of_receptors.to_string(),
                reason: "Group size must be positive".to_string(),
            });
        } else if config.number_of_receptors == 1 {
            warnings.push("Group size 1 yields no station pairs to intersect".to_string());
        } else if config.number_of_receptors > LARGE_GROUP_SIZE {
            warnings.push(format!(
                "Very large group size {} may not match a real station network",
                config.number_of_receptors
            ));
        }

        if let Err(e) = config.region() {
            errors.push(e);
        }

        for (name, axis, limit) in [("axis_x", config.axis_x, 180.0), ("axis_y", config.axis_y, 90.0)] {
            if axis.iter().any(|v| v.abs() > limit) {
                errors.push(ConfigError::InvalidParameter {
                    parameter: name.to_string(),
                    value: format!("{:?}", axis),
                    reason: format!("Bounds must lie within [-{}, {}] degrees", limit, limit),
                });
            }
        }

        if config.plot_intersections {
            warnings.push("plot_intersections is set but plotting is not supported".to_string());
        }

        if config.intersection_method == IntersectionMethod::Planar {
            warnings.push("Planar intersection is only accurate for short baselines".to_string());
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn first_error(report: ValidationReport) -> ConfigResult<()> {
        match report.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let report = ConfigurationManager::validate_config(&TriangulationConfig::default());
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_legacy_field_names_parse() {
        let json = r#"{
            "csv_location": "Data/simulation.csv",
            "number_of_receptors": 4,
            "axis_x": [-5.0, -2.0],
            "axis_y": [39.0, 41.5],
            "plot_intersections": false
        }"#;
        let config: TriangulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.observations_path.as_deref(), Some("Data/simulation.csv"));
        assert_eq!(config.distance_unit, DistanceUnit::Kilometers);
        assert_eq!(config.intersection_method, IntersectionMethod::GreatCircle);
        let region = config.region().unwrap();
        assert_eq!(region.min_x, -5.0);
        assert_eq!(region.max_y, 41.5);
    }

    #[test]
    fn test_invalid_group_size() {
        let config = TriangulationConfig {
            number_of_receptors: 0,
            ..TriangulationConfig::default()
        };
        let report = ConfigurationManager::validate_config(&config);
        assert!(!report.is_valid);

        let mut manager = ConfigurationManager::new();
        assert!(manager.set_group_size(0).is_err());
        assert_eq!(manager.set_group_size(6).unwrap(), 4);
        assert!(manager.is_modified());
    }

    #[test]
    fn test_invalid_region() {
        let mut manager = ConfigurationManager::new();
        assert!(manager.set_region([10.0, 5.0], [0.0, 1.0]).is_err());
        assert!(manager.set_region([0.0, 1.0], [-95.0, 1.0]).is_err());
        assert!(manager.set_region([0.0, f64::NAN], [0.0, 1.0]).is_err());
        assert!(!manager.is_modified());

        let region = manager.set_region([-5.0, -2.0], [39.0, 41.0]).unwrap();
        assert_eq!(region.min_y, 39.0);
    }

    #[test]
    fn test_warnings() {
        let config = TriangulationConfig {
            number_of_receptors: 1,
            plot_intersections: true,
            intersection_method: IntersectionMethod::Planar,
            ..TriangulationConfig::default()
        };
        let report = ConfigurationManager::validate_config(&config);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn test_update_config() {
        let mut manager = ConfigurationManager::new();
        let rejected = TriangulationConfig {
            axis_y: [10.0, -10.0],
            ..TriangulationConfig::default()
        };
        assert!(manager.update_config(rejected).is_err());
        assert!(!manager.is_modified());
        assert_eq!(manager.get_config(), &TriangulationConfig::default());

        let accepted = TriangulationConfig {
            number_of_receptors: 3,
            distance_unit: DistanceUnit::Meters,
            ..TriangulationConfig::default()
        };
        manager.update_config(accepted.clone()).unwrap();
        assert!(manager.is_modified());
        assert_eq!(manager.get_config(), &accepted);
    }

    #[test]
    fn test_generator_from_config() {
        let mut manager = ConfigurationManager::new();
        manager.set_intersection_method(IntersectionMethod::Planar);
        let generator = manager.get_config().generator().unwrap();
        assert_eq!(generator.group_size(), 4);
        assert_eq!(generator.method(), IntersectionMethod::Planar);
    }

    #[test]
    fn test_config_round_trip() {
        let path = std::env::temp_dir().join("triangulation_config_test.json");
        let mut manager = ConfigurationManager::new();
        manager.set_group_size(5).unwrap();
        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(loaded.get_config(), manager.get_config());
        assert!(loaded.config_file_path().is_some());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigurationManager::from_file("no/such/config.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
