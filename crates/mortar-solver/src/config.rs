//! Calculator configuration: map calibration, model constants and the
//! launch-point table. Every field has a default, so a JSON file only needs
//! to name what it overrides.

use std::fs;
use std::path::Path;

use mortar_models::{ElevationBand, DEFAULT_FLIGHT_TIME_DIVISOR};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::registry::LaunchPointRegistry;

/// Native pixel size of the reference map.
pub const REFERENCE_MAP_WIDTH: f64 = 1187.0;
pub const REFERENCE_MAP_HEIGHT: f64 = 573.0;
/// Share of the map width reached at the lowest elevation.
pub const DEFAULT_MAX_RANGE_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for MapDimensions {
    fn default() -> Self {
        Self {
            width: REFERENCE_MAP_WIDTH,
            height: REFERENCE_MAP_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub map: MapDimensions,
    pub max_range_factor: f64,
    pub elevation: ElevationBand,
    pub flight_time_divisor: f64,
    pub launch_points: LaunchPointRegistry,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            map: MapDimensions::default(),
            max_range_factor: DEFAULT_MAX_RANGE_FACTOR,
            elevation: ElevationBand::default(),
            flight_time_divisor: DEFAULT_FLIGHT_TIME_DIVISOR,
            launch_points: LaunchPointRegistry::reference(),
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl CalculatorConfig {
    /// Distance [map units] at which elevation bottoms out.
    pub fn max_range(&self) -> f64 {
        self.map.width * self.max_range_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.map.width) {
            return Err(ConfigError::MapDimension { axis: "width", value: self.map.width });
        }
        if !positive(self.map.height) {
            return Err(ConfigError::MapDimension { axis: "height", value: self.map.height });
        }
        if !positive(self.max_range_factor) {
            return Err(ConfigError::RangeFactor(self.max_range_factor));
        }
        self.elevation.validate()?;
        if !positive(self.flight_time_divisor) {
            return Err(mortar_models::ModelError::Divisor(self.flight_time_divisor).into());
        }
        self.launch_points.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            launch_points = config.launch_points.len(),
            max_range = config.max_range(),
            "loaded calculator config"
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_reference_map() {
        let config = CalculatorConfig::default();
        config.validate().unwrap();
        assert_relative_eq!(config.max_range(), 949.6, epsilon = 1e-9);
        assert_eq!(config.elevation, ElevationBand::default());
        assert_relative_eq!(config.flight_time_divisor, 200.0);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = CalculatorConfig::from_json_str(
            r#"{ "map": { "width": 2000 }, "elevation": { "max_deg": 80 } }"#,
        )
        .unwrap();
        assert_relative_eq!(config.map.width, 2000.0);
        assert_relative_eq!(config.map.height, REFERENCE_MAP_HEIGHT);
        assert_relative_eq!(config.max_range(), 1600.0);
        assert_relative_eq!(config.elevation.min_deg, 45.0);
        assert_relative_eq!(config.elevation.max_deg, 80.0);
        assert_eq!(config.launch_points, LaunchPointRegistry::reference());
    }

    #[test]
    fn custom_registry_from_json() {
        let config = CalculatorConfig::from_json_str(
            r#"{ "launch_points": [ { "id": "k5", "name": "K5", "x": 10, "y": 20 } ] }"#,
        )
        .unwrap();
        assert_eq!(config.launch_points.len(), 1);
        assert!(config.launch_points.find("k5").is_some());
        assert!(config.launch_points.find("b2").is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            CalculatorConfig::from_json_str(r#"{ "map": { "width": 0 } }"#),
            Err(ConfigError::MapDimension { axis: "width", .. })
        ));
        assert!(matches!(
            CalculatorConfig::from_json_str(r#"{ "max_range_factor": -0.5 }"#),
            Err(ConfigError::RangeFactor(_))
        ));
        assert!(matches!(
            CalculatorConfig::from_json_str(r#"{ "elevation": { "min_deg": 85, "max_deg": 45 } }"#),
            Err(ConfigError::Model(_))
        ));
        assert!(matches!(
            CalculatorConfig::from_json_str(r#"{ "flight_time_divisor": 0 }"#),
            Err(ConfigError::Model(_))
        ));
        assert!(matches!(
            CalculatorConfig::from_json_str(r#"{ "launch_points": [] }"#),
            Err(ConfigError::EmptyRegistry)
        ));
        assert!(matches!(
            CalculatorConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn json_output_reloads() {
        let config = CalculatorConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(CalculatorConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn shipped_reference_file_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/reference_map.json");
        assert_eq!(CalculatorConfig::from_path(path).unwrap(), CalculatorConfig::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CalculatorConfig::from_path("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
