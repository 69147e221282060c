pub mod clock;
pub mod controller;
pub mod display_context;
pub mod gpu_context;
pub mod input_adapter;
pub mod lighting;
pub mod rasterizer;
pub mod recording;
pub mod surface_renderer;
pub mod timer;

pub use display_context::DisplayContext;
pub use rasterizer::SoftwareBackend;
pub use recording::{DrawCall, RecordingBackend};
