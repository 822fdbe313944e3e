// Data-driven campus configuration.
//
// All tunable parameters of the campus map live in `CampusConfig`: the trunk
// road skeleton, the avatar's default start position, walk speed and its
// normalization constants, the orbit camera bounds and follow smoothing, and
// the storey height used by the scene crate. Nothing in the simulation uses a
// magic number; it reads from the config. The config is loaded once (JSON
// or `Default`) and never mutated at runtime.
//
// Parameters are grouped into nested sub-structs (`WalkParams`,
// `CameraParams`) so a partial JSON override file stays readable. Every
// struct is `#[serde(default)]`: a field missing from the file keeps its
// `Default` value.
//
// See also: `walk.rs` which reads `WalkParams` every tick, `camera.rs` for
// `CameraParams`, `path.rs` which plans over `trunk_road`.

use crate::types::Point2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Walk simulator speed and normalization constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParams {
    /// Progress gained per reference frame on a reference-length segment.
    pub speed: f32,
    /// Frame duration (ms) at which `speed` is specified. Real frame deltas
    /// are scaled by `delta_ms / reference_frame_ms`.
    pub reference_frame_ms: f32,
    /// Segment length (world units) at which `speed` is specified. Shorter
    /// segments advance proportionally faster so world speed is constant.
    pub reference_segment_length: f32,
    /// Floor for the segment-length divisor. Zero-length segments use this
    /// instead and complete on the next tick.
    pub min_segment_length: f32,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            speed: 0.003,
            reference_frame_ms: 16.0,
            reference_segment_length: 60.0,
            min_segment_length: 1.0,
        }
    }
}

/// Orbit camera bounds and follow behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Initial eye position `[x, y, z]`.
    pub initial_eye: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle bounds in radians, measured from straight up. The minimum
    /// stops the view going top-down, the maximum keeps it above ground.
    pub min_polar: f32,
    pub max_polar: f32,
    /// Fraction of remaining orbit velocity kept per frame is `1 - damping`.
    pub damping: f32,
    pub pan_speed: f32,
    /// Exponential smoothing factor for the look-at target while walking.
    pub follow_smoothing: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            initial_eye: [0.0, 60.0, 80.0],
            fov_degrees: 45.0,
            min_distance: 25.0,
            max_distance: 120.0,
            min_polar: PI / 6.0,
            max_polar: PI / 3.0,
            damping: 0.08,
            pan_speed: 0.8,
            follow_smoothing: 0.03,
        }
    }
}

/// Top-level campus configuration. Loaded from JSON, never mutated at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusConfig {
    /// Where the avatar stands when no navigation is active (the main gate).
    pub start_position: Point2,
    /// The fixed trunk road every path branches from, ordered from the gate.
    pub trunk_road: Vec<Point2>,
    /// Storey height in world units.
    pub floor_height: f32,
    pub walk: WalkParams,
    pub camera: CameraParams,
}

impl Default for CampusConfig {
    fn default() -> Self {
        let trunk_road = [42.0, 35.0, 28.0, 20.0, 12.0, 4.0, -4.0, -12.0, -20.0, -28.0, -36.0]
            .into_iter()
            .map(|z| Point2::new(0.0, z))
            .collect();
        Self {
            start_position: Point2::new(0.0, 42.0),
            trunk_road,
            floor_height: 1.6,
            walk: WalkParams::default(),
            camera: CameraParams::default(),
        }
    }
}

impl CampusConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the invariants the planner and camera rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trunk_road.is_empty() {
            return Err(ConfigError::Invalid("trunk road has no points".into()));
        }
        if self.walk.speed <= 0.0 || self.walk.reference_frame_ms <= 0.0 {
            return Err(ConfigError::Invalid("walk speed must be positive".into()));
        }
        if self.walk.min_segment_length <= 0.0 {
            return Err(ConfigError::Invalid(
                "min_segment_length must be positive".into(),
            ));
        }
        let cam = &self.camera;
        if cam.min_distance > cam.max_distance || cam.min_polar > cam.max_polar {
            return Err(ConfigError::Invalid("camera bounds are inverted".into()));
        }
        if self.floor_height <= 0.0 {
            return Err(ConfigError::Invalid("floor_height must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrips() {
        let config = CampusConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = CampusConfig::from_json_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn default_trunk_road_starts_at_gate() {
        let config = CampusConfig::default();
        assert_eq!(config.trunk_road.len(), 11);
        assert_eq!(config.trunk_road[0], config.start_position);
        assert_eq!(config.trunk_road[10], Point2::new(0.0, -36.0));
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "start_position": {"x": 0.0, "z": 10.0},
            "trunk_road": [{"x": 0.0, "z": 10.0}, {"x": 0.0, "z": -10.0}],
            "floor_height": 3.0,
            "walk": {
                "speed": 0.01,
                "reference_frame_ms": 16.0,
                "reference_segment_length": 60.0,
                "min_segment_length": 1.0
            },
            "camera": {
                "initial_eye": [0.0, 30.0, 40.0],
                "fov_degrees": 60.0,
                "min_distance": 10.0,
                "max_distance": 50.0,
                "min_polar": 0.5,
                "max_polar": 1.0,
                "damping": 0.1,
                "pan_speed": 1.0,
                "follow_smoothing": 0.05
            }
        }"#;
        let config = CampusConfig::from_json_str(json).unwrap();
        assert_eq!(config.trunk_road.len(), 2);
        assert_eq!(config.floor_height, 3.0);
        assert_eq!(config.camera.max_distance, 50.0);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = CampusConfig::from_json_str(r#"{"walk": {"speed": 0.012}}"#).unwrap();
        let defaults = CampusConfig::default();
        assert_eq!(config.walk.speed, 0.012);
        assert_eq!(config.walk.reference_frame_ms, defaults.walk.reference_frame_ms);
        assert_eq!(
            config.walk.reference_segment_length,
            defaults.walk.reference_segment_length
        );
        assert_eq!(config.camera, defaults.camera);
        assert_eq!(config.trunk_road, defaults.trunk_road);
        assert_eq!(config.floor_height, 1.6);
    }

    #[test]
    fn empty_object_is_the_default_config() {
        assert_eq!(
            CampusConfig::from_json_str("{}").unwrap(),
            CampusConfig::default()
        );
    }

    #[test]
    fn empty_trunk_road_is_invalid() {
        let config = CampusConfig {
            trunk_road: Vec::new(),
            ..CampusConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn inverted_camera_bounds_are_invalid() {
        let mut config = CampusConfig::default();
        config.camera.min_distance = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            CampusConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CampusConfig::from_json_file("/nonexistent/campus.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn config_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.json");
        std::fs::write(&path, serde_json::to_string(&CampusConfig::default()).unwrap()).unwrap();
        let config = CampusConfig::from_json_file(&path).unwrap();
        assert_eq!(config.walk.speed, 0.003);
    }
}
