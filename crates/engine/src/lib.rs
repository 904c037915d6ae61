pub use bevy_ecs::world::World;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::input::InputState;
pub type Result<T> = anyhow::Result<T>;

pub mod components;
pub mod input;
pub mod layers;
pub mod math;
pub mod physics;
pub mod prelude;
pub mod rig;

pub trait Layer: 'static {
    fn frame(&mut self, context: &LayerContext) -> Result<()>;
    fn detach(&mut self, context: &LayerContext);
}

pub trait LayerFactory: 'static {
    fn create(&self, context: &LayerContext) -> Box<dyn Layer>;
}

pub struct LayerContext {
    pub world: Arc<Mutex<World>>,
    pub delta_time: Duration,
}

impl LayerContext {
    /// Lock the shared world, recovering it if a previous holder panicked
    pub fn world(&self) -> MutexGuard<'_, World> {
        lock_world(&self.world)
    }
}

fn lock_world(world: &Mutex<World>) -> MutexGuard<'_, World> {
    world.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct ApplicationBuilder {
    layer_factories: Vec<Box<dyn LayerFactory>>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            layer_factories: Vec::new(),
        }
    }

    pub fn add_layer_factory(mut self, factory: impl LayerFactory) -> Self {
        self.layer_factories.push(Box::new(factory));
        self
    }

    pub fn add_layer<F>(mut self, factory_fn: F) -> Self
    where
        F: Fn(&LayerContext) -> Box<dyn Layer> + 'static,
    {
        self.layer_factories
            .push(Box::new(ClosureLayerFactory::new(factory_fn)));
        self
    }

    /// Build the application and create every layer in registration order.
    /// Layers run in that same order each frame.
    pub fn build(self) -> Application {
        let world = Arc::new(Mutex::new(World::new()));

        {
            let mut w = lock_world(&world);
            w.insert_resource(InputState::new());
        }

        let context = LayerContext {
            world: world.clone(),
            delta_time: Duration::ZERO,
        };

        let layers = self
            .layer_factories
            .iter()
            .map(|factory| factory.create(&context))
            .collect();

        Application {
            layers,
            world,
            frame_count: 0,
        }
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct ClosureLayerFactory<F> {
    factory_fn: F,
}

impl<F> ClosureLayerFactory<F> {
    fn new(factory_fn: F) -> Self {
        Self { factory_fn }
    }
}

impl<F> LayerFactory for ClosureLayerFactory<F>
where
    F: Fn(&LayerContext) -> Box<dyn Layer> + 'static,
{
    fn create(&self, context: &LayerContext) -> Box<dyn Layer> {
        (self.factory_fn)(context)
    }
}

/// Headless host that owns the world and drives its layers once per frame.
pub struct Application {
    layers: Vec<Box<dyn Layer>>,
    world: Arc<Mutex<World>>,
    frame_count: u64,
}

impl Application {
    /// Run every layer once with the given frame delta
    pub fn frame(&mut self, delta_time: Duration) -> Result<()> {
        let context = LayerContext {
            world: self.world.clone(),
            delta_time,
        };

        for layer in &mut self.layers {
            layer.frame(&context)?;
        }

        {
            let mut world = context.world();
            // Edges and deltas only live for the frame they were recorded in
            if let Some(mut input_state) = world.get_resource_mut::<InputState>() {
                input_state.reset_frame();
            }
            world.clear_trackers();
        }

        self.frame_count += 1;
        Ok(())
    }

    /// Run `frames` frames with a fixed delta
    pub fn run_fixed(&mut self, frames: u64, delta_time: Duration) -> Result<()> {
        for _ in 0..frames {
            self.frame(delta_time)?;
        }
        Ok(())
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn spawn<B: bevy_ecs::bundle::Bundle>(
        &mut self,
        label: impl Into<String>,
        bundle: B,
    ) -> bevy_ecs::entity::Entity {
        use crate::prelude::*;
        let bundle = (
            Tag {
                label: label.into(),
            },
            bundle,
        );
        lock_world(&self.world).spawn(bundle).id()
    }

    pub fn insert_resource<R: bevy_ecs::prelude::Resource>(&mut self, resource: R) {
        lock_world(&self.world).insert_resource(resource);
    }

    pub fn world(&self) -> MutexGuard<'_, World> {
        lock_world(&self.world)
    }

    /// Detach all layers, last registered first
    pub fn shutdown(&mut self) {
        let context = LayerContext {
            world: self.world.clone(),
            delta_time: Duration::ZERO,
        };

        for layer in self.layers.iter_mut().rev() {
            layer.detach(&context);
        }
        self.layers.clear();
    }
}
