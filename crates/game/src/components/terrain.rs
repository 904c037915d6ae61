use crate::prelude::*;

/// Fractal noise settings of the sandbox ground
#[derive(Clone, Debug)]
pub struct TerrainConfig {
    pub seed: u32,
    /// Frequency of the first octave, per world unit
    pub noise_scale: f32,
    pub octaves: u32,
    pub lacunarity: f32,
    pub persistence: f32,
    /// Height of a full-strength sample
    pub amplitude: f32,
    pub base_height: f32,
    /// Sampling step of the heightfield raycast
    pub step: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            noise_scale: 0.02,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            amplitude: 6.0,
            base_height: 0.0,
            step: 0.5,
        }
    }
}

/// Marks the entity that describes the ground
#[derive(Component, Clone, Debug)]
pub struct Terrain {
    pub config: TerrainConfig,
}
