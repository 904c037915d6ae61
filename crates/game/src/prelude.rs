pub use vantage_engine::prelude::*;

pub use crate::components::*;
pub use crate::systems::*;
