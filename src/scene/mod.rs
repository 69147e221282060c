pub mod choreographer;
pub mod satellite;
pub mod toggles;

pub use choreographer::SceneChoreographer;
pub use satellite::{AxisRotation, LightColors, Orbit, OrbitAngle, Satellite, SatelliteKind, SATELLITE_COUNT};
pub use toggles::{Toggle, ToggleEffect, Toggles};
