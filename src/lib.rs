pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod headless;
pub mod math;
pub mod scene;
pub mod star;
pub mod traits;
pub mod ui;

pub use camera::TrackballCamera;
pub use config::{AppConfig, ConfigError};
pub use scene::{SatelliteKind, SceneChoreographer, Toggle, ToggleEffect, Toggles};
pub use star::StarSolid;
pub use traits::{CameraController, RenderBackend};
