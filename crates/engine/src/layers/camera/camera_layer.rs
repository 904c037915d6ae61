use crate::layers::camera::systems::{
    activate_camera_rigs, resolve_follow_cameras, update_camera_rigs,
};
use crate::prelude::*;

/// Runs every camera rig and follow camera once per frame
pub struct CameraLayer {
    schedule: Schedule,
}

impl CameraLayer {
    pub fn new(context: &LayerContext) -> Self {
        {
            let mut world = context.world();
            world.init_resource::<InputState>();
            world.insert_resource(Time(context.delta_time));
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                activate_camera_rigs,
                update_camera_rigs,
                resolve_follow_cameras,
            )
                .chain(),
        );

        Self { schedule }
    }
}

impl Layer for CameraLayer {
    fn frame(&mut self, context: &LayerContext) -> Result<()> {
        let mut world = context.world();
        world.insert_resource(Time(context.delta_time));

        self.schedule.run(&mut world);

        Ok(())
    }

    fn detach(&mut self, context: &LayerContext) {
        let mut world = context.world();
        let mut rigs = world.query::<&mut CameraRig>();
        for mut rig in rigs.iter_mut(&mut world) {
            rig.deactivate();
        }
    }
}
