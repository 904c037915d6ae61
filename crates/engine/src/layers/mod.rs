pub mod camera;

pub use camera::CameraLayer;
