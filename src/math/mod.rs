mod color;
mod transform;

pub use color::Rgba;
pub use transform::{rotation_degrees, MatrixStack};
