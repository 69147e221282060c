pub mod backend;
pub mod camera;

pub use backend::*;
pub use camera::*;
