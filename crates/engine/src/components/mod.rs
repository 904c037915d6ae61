mod follow_camera;
mod label;
mod resources;
mod transform;

pub use follow_camera::*;
pub use label::*;
pub use resources::*;
pub use transform::*;
