use std::time::Duration;

use prelude::*;
use vantage_engine::ApplicationBuilder;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

mod components;
mod prelude;
mod sandbox_layer;
mod systems;

const FRAME: Duration = Duration::from_micros(16_667);
/// Frames run after the script finished, to let the rig settle
const SETTLE_FRAMES: u64 = 120;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_module("vantage", log::LevelFilter::Debug)
        .init();

    // Optional rig config file as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading rig config from {}", path);
            RigConfig::load(&path)?
        }
        None => RigConfig::default(),
    };

    let mut app = ApplicationBuilder::new()
        .add_layer(|context| Box::new(sandbox_layer::SandboxLayer::new(context)))
        .add_layer(|context| Box::new(CameraLayer::new(context)))
        .build();

    app.spawn(
        "Terrain",
        Terrain {
            config: TerrainConfig::default(),
        },
    );

    let pawn = app.spawn(
        "Pawn",
        (
            Pawn::new(
                vec![
                    Point3::new(20.0, 0.0, 0.0),
                    Point3::new(20.0, 0.0, 20.0),
                    Point3::new(-10.0, 0.0, 20.0),
                    Point3::new(-10.0, 0.0, -10.0),
                ],
                4.0,
            ),
            Transform::default(),
        ),
    );

    let camera = app.spawn(
        "Follow Camera",
        (
            FollowCamera::new(Vector3::new(0.0, 3.0, -5.0)),
            Transform::default(),
        ),
    );

    app.spawn(
        "Camera Rig",
        (
            CameraRig::new(config).with_camera(camera),
            Transform::default(),
        ),
    );

    let script = InputScript::new()
        .at(10, ScriptAction::Stick(Some(pawn)))
        // Panning takes over from the pawn
        .hold_key(120, 60, KeyCode::KeyW)
        .hold_key(150, 30, KeyCode::KeyD)
        .tap_key(200, KeyCode::KeyQ)
        .tap_key(215, KeyCode::KeyQ)
        .at(240, ScriptAction::Scroll(-5.0))
        .at(270, ScriptAction::Scroll(3.0))
        .drag(300, 40, MouseButton::Middle, (4.0, -2.0))
        .tap_key(360, KeyCode::KeyE)
        .at(400, ScriptAction::Stick(Some(pawn)))
        // Ignored while locked
        .at(480, ScriptAction::LockInput(true))
        .hold_key(490, 40, KeyCode::KeyS)
        .at(540, ScriptAction::LockInput(false));
    let frames = script.last_frame() + SETTLE_FRAMES;
    app.insert_resource(script);

    log::info!("Running sandbox for {} frames", frames);
    app.run_fixed(frames, FRAME)?;

    {
        let world = app.world();
        let mut rigs = world.try_query::<(&Tag, &CameraRig)>();
        if let Some(rigs) = rigs.as_mut() {
            for (tag, rig) in rigs.iter(&world) {
                if let Some(live) = rig.live_pose() {
                    log::info!(
                        "{} settled at {:?} facing {:?}",
                        tag.label,
                        live.position,
                        live.forward()
                    );
                }
            }
        }
    }

    app.shutdown();

    Ok(())
}
