use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::TrackballCamera;
use crate::core::timer::AnimationTimer;
use crate::scene::Toggles;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Largest accepted window side in pixels
pub const MAX_WINDOW_SIDE: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Star Lighting Demo".to_string(),
            width: 600,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub tick_interval_ms: u64,
    pub initial_delay_ms: u64,
    pub start_animating: bool,
    /// Cap on frame advances per update after a stall
    pub max_ticks_per_update: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30,
            initial_delay_ms: 500,
            start_animating: true,
            max_ticks_per_update: 4,
        }
    }
}

impl AnimationConfig {
    /// Stopped timer with these settings
    pub fn timer(&self) -> AnimationTimer {
        AnimationTimer::new(
            Duration::from_millis(self.tick_interval_ms),
            Duration::from_millis(self.initial_delay_ms),
            self.max_ticks_per_update,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub center: [f32; 3],
    pub up: [f32; 3],
    /// Half-extent of the region kept in view around the center
    pub scale: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [5.0, 10.0, 30.0],
            center: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            scale: 15.0,
        }
    }
}

impl CameraConfig {
    pub fn camera(&self) -> TrackballCamera {
        TrackballCamera::new(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.center),
            Vec3::from_array(self.up),
            self.scale,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub toggles: Toggles,
}

impl AppConfig {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config file if given, built-in defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("Using built-in config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        if self.window.width > MAX_WINDOW_SIDE || self.window.height > MAX_WINDOW_SIDE {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} exceeds {} pixels per side",
                self.window.width, self.window.height, MAX_WINDOW_SIDE
            )));
        }
        if self.animation.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation.tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.camera.scale.is_nan() || self.camera.scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera.scale {} must be positive",
                self.camera.scale
            )));
        }
        let eye = Vec3::from_array(self.camera.eye);
        let center = Vec3::from_array(self.camera.center);
        if eye.distance(center) < f32::EPSILON {
            return Err(ConfigError::Invalid(
                "camera.eye and camera.center must differ".to_string(),
            ));
        }
        if Vec3::from_array(self.camera.up).cross(center - eye).length() < f32::EPSILON {
            return Err(ConfigError::Invalid(
                "camera.up must not be parallel to the view direction".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "Star Lighting Demo");
        assert_eq!((config.window.width, config.window.height), (600, 600));
        assert_eq!(config.animation.tick_interval_ms, 30);
        assert_eq!(config.animation.initial_delay_ms, 500);
        assert!(config.animation.start_animating);
        assert_eq!(config.camera.scale, 15.0);
        assert_eq!(config.toggles, Toggles::ALL_ON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: AppConfig =
            serde_json::from_str(r#"{"window": {"width": 800}, "toggles": {"purple": false}}"#)
                .unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(!config.toggles.purple);
        assert!(config.toggles.red);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.window.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.window.width = 70_000;
        config.window.height = 70_000;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.window.width = MAX_WINDOW_SIDE;
        config.window.height = MAX_WINDOW_SIDE;
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.animation.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.camera.scale = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.camera.eye = config.camera.center;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.camera.up = [0.0, 0.0, 1.0];
        config.camera.eye = [0.0, 0.0, 30.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/star-lights.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/star-lights.json"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("star-lights-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"animation": {"tick_interval_ms": 16}}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.animation.tick_interval_ms, 16);
        assert_eq!(config.animation.initial_delay_ms, 500);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let path = std::env::temp_dir().join(format!("star-lights-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }
}
