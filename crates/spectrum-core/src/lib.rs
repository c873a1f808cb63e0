pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod geometry;
pub mod playback;
pub mod primitive;
pub mod shader;
pub mod spectrum;
pub mod visualization;

pub use camera::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use controls::*;
pub use geometry::*;
pub use playback::*;
pub use primitive::*;
pub use shader::*;
pub use spectrum::*;
pub use visualization::*;
