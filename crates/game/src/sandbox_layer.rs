use crate::prelude::*;

/// Everything in the sandbox that is not the camera: scripted input,
/// terrain and the pawn the camera follows.
pub struct SandboxLayer {
    schedule: Schedule,
}

impl SandboxLayer {
    pub fn new(context: &LayerContext) -> Self {
        // Initialize resources
        {
            let mut world = context.world();
            world.init_resource::<InputScript>();
            world.insert_resource(Time(context.delta_time));
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                build_terrain_scene,
                play_input_script,
                patrol_pawns,
                report_camera_rigs,
            )
                .chain(),
        );
        Self { schedule }
    }
}

impl Layer for SandboxLayer {
    fn frame(&mut self, context: &LayerContext) -> Result<()> {
        let mut world = context.world();
        world.insert_resource(Time(context.delta_time));

        self.schedule.run(&mut world);

        Ok(())
    }

    fn detach(&mut self, context: &LayerContext) {
        let world = context.world();
        if let Some(script) = world.get_resource::<InputScript>() {
            if !script.is_finished() {
                log::warn!("Sandbox stopped before the input script finished");
            }
        }
    }
}
