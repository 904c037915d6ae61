mod camera_layer;
pub mod systems;

pub use camera_layer::CameraLayer;
