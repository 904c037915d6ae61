use crate::prelude::*;

use noise::{NoiseFn, Perlin};

/// Turn newly spawned terrain into the ground the rigs and pawns stand on
pub fn build_terrain_scene(mut commands: Commands, terrain: Query<&Terrain, Added<Terrain>>) {
    for terrain in terrain.iter() {
        log::info!(
            "Building terrain with seed {} and {} octaves",
            terrain.config.seed,
            terrain.config.octaves
        );
        commands.insert_resource(terrain_scene(&terrain.config));
    }
}

pub fn terrain_scene(config: &TerrainConfig) -> StaticScene {
    let noise = Perlin::new(config.seed);
    let sampler = config.clone();
    let field = Heightfield::new(move |x, z| terrain_height(&noise, x, z, &sampler))
        .with_step(config.step);

    StaticScene::new().with_collider(GROUND_LAYER, Collider::Heightfield(field))
}

/// Fractal Perlin height at world (x, z)
pub fn terrain_height(noise: &Perlin, x: f32, z: f32, config: &TerrainConfig) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = config.noise_scale;

    for _ in 0..config.octaves {
        let sample = noise.get([(x * frequency) as f64, (z * frequency) as f64]) as f32;

        value += sample * amplitude;

        frequency *= config.lacunarity;
        amplitude *= config.persistence;
    }

    config.base_height + value * config.amplitude
}
