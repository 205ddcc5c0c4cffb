//! Viewer configuration with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::CameraSettings;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// Parsed values that the viewer cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Camera, frame rate and scene detail.
    pub view: ViewConfig,
    /// Where planet textures live.
    pub assets: AssetConfig,
    /// Log filter and destination.
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Frames rendered per second.
    pub target_fps: u32,
    /// Planet shown at startup, by name or catalog index.
    pub start_planet: String,
    pub camera_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Initial camera elevation above the equator in radians.
    pub elevation: f64,
    /// Longitude segments of the planet sphere.
    pub sphere_segments: usize,
    /// Segments of the ring annulus.
    pub ring_segments: usize,
    /// Number of background stars.
    pub star_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding one texture image per planet.
    pub texture_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directives, e.g. "info" or "orrery3d=debug". `RUST_LOG` wins when set.
    pub level: String,
    /// Log destination. Nothing is logged without one since the terminal is in use.
    pub file: Option<PathBuf>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let camera = CameraSettings::default();
        Self {
            target_fps: 30,
            start_planet: "Mercury".to_string(),
            camera_distance: camera.distance,
            min_distance: camera.min_distance,
            max_distance: camera.max_distance,
            fov_degrees: camera.fov_degrees,
            elevation: camera.elevation,
            sphere_segments: 32,
            ring_segments: 48,
            star_count: 1500,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ViewConfig {
    /// Rejects camera values that would break clamping or projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [self.camera_distance, self.min_distance, self.max_distance];
        if distances.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera distances must be positive and finite, got {distances:?}"
            )));
        }
        if self.min_distance > self.max_distance {
            return Err(ConfigError::Invalid(format!(
                "min_distance {} exceeds max_distance {}",
                self.min_distance, self.max_distance
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must lie between 0 and 180, got {}",
                self.fov_degrees
            )));
        }
        if !self.elevation.is_finite() {
            return Err(ConfigError::Invalid("elevation must be finite".to_string()));
        }
        Ok(())
    }

    pub fn camera(&self) -> CameraSettings {
        CameraSettings {
            distance: self.camera_distance,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            fov_degrees: self.fov_degrees,
            elevation: self.elevation,
        }
    }
}

impl Config {
    /// Loads the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
        config.view.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes the config to `path` as pretty RON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;
        std::fs::write(path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_place_the_camera_twenty_units_out() {
        let config = Config::default();
        assert_eq!(config.view.camera_distance, 20.0);
        assert_eq!(config.view.min_distance, 5.0);
        assert_eq!(config.view.max_distance, 50.0);
        assert_eq!(config.view.start_planet, "Mercury");
        assert_eq!(config.assets.texture_dir, PathBuf::from("textures"));
        assert!(config.log.file.is_none());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("orrery.ron");
        let mut config = Config::default();
        config.view.target_fps = 12;
        config.view.star_count = 7;
        config.log.file = Some(PathBuf::from("/tmp/orrery.log"));
        config.save(&path).expect("save");

        let loaded = Config::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = Config::load(&dir.path().join("absent.ron")).expect("defaults");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("partial.ron");
        std::fs::write(&path, "(view: (target_fps: 60))").expect("write");
        let loaded = Config::load(&path).expect("load");
        assert_eq!(loaded.view.target_fps, 60);
        assert_eq!(loaded.view.camera_distance, 20.0);
        assert_eq!(loaded.log, LogConfig::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(view: (target_fps: \"fast\"))").expect("write");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn inverted_distance_limits_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("inverted.ron");
        std::fs::write(&path, "(view: (min_distance: 50.0, max_distance: 5.0))").expect("write");
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unusable_camera_values_are_rejected() {
        assert!(ViewConfig::default().validate().is_ok());
        let broken = [
            ViewConfig {
                fov_degrees: 180.0,
                ..ViewConfig::default()
            },
            ViewConfig {
                max_distance: f64::NAN,
                ..ViewConfig::default()
            },
            ViewConfig {
                camera_distance: -1.0,
                ..ViewConfig::default()
            },
        ];
        for view in broken {
            assert!(matches!(view.validate(), Err(ConfigError::Invalid(_))), "{view:?}");
        }
    }
}
