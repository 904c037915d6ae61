mod follow_camera;
mod rig;

pub use follow_camera::*;
pub use rig::*;
