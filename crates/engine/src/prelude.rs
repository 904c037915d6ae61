pub use bevy_ecs::prelude::*;
pub use nalgebra::{Point3, UnitQuaternion, Vector2, Vector3};

pub use crate::components::*;
pub use crate::input::InputState;
pub use crate::layers::CameraLayer;
pub use crate::math::*;
pub use crate::physics::*;
pub use crate::rig::*;
pub use crate::{Layer, LayerContext, Result};
