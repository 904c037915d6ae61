use crate::prelude::*;

use std::collections::HashSet;

/// Activate every rig that has never been started.
///
/// A rig without an anchor gets a fresh one at its own origin. The rig's
/// camera is pointed at the anchor and seeds the desired offset.
pub fn activate_camera_rigs(
    mut commands: Commands,
    mut rigs: Query<(Entity, &mut CameraRig)>,
    mut cameras: Query<&mut FollowCamera>,
    transforms: Query<&Transform>,
    mut warned: Local<HashSet<Entity>>,
) {
    for (entity, mut rig) in rigs.iter_mut() {
        if rig.phase() != RigPhase::Uninitialized {
            continue;
        }

        let Some(mut camera) = rig.camera.and_then(|camera| cameras.get_mut(camera).ok()) else {
            if warned.insert(entity) {
                log::warn!("Camera rig {:?} has no follow camera, not activating", entity);
            }
            continue;
        };

        let anchor_pose = rig
            .anchor
            .and_then(|anchor| transforms.get(anchor).ok())
            .map(Transform::pose);

        let pose = match anchor_pose {
            Some(pose) => pose,
            None => {
                let origin = transforms
                    .get(entity)
                    .map(Transform::pose)
                    .unwrap_or_default();
                let anchor = commands
                    .spawn((
                        Tag {
                            label: "Camera Rig Anchor".to_string(),
                        },
                        Transform::from_pose(&origin),
                    ))
                    .id();
                log::debug!("Spawned anchor {:?} for camera rig {:?}", anchor, entity);
                rig.anchor = Some(anchor);
                origin
            }
        };

        camera.follow = rig.anchor;
        rig.activate(pose, None, &*camera);
    }
}

/// Tick every active rig and write its live pose into the anchor
pub fn update_camera_rigs(
    mut rigs: Query<&mut CameraRig>,
    mut cameras: Query<&mut FollowCamera>,
    mut transforms: Query<&mut Transform>,
    input: Res<InputState>,
    time: Res<Time>,
    scene: Option<Res<StaticScene>>,
) {
    let empty = StaticScene::new();
    let ground: &dyn SpatialQuery = match scene.as_deref() {
        Some(scene) => scene,
        None => &empty,
    };

    for mut rig in rigs.iter_mut() {
        if !rig.is_active() {
            continue;
        }
        let Some(mut camera) = rig.camera.and_then(|camera| cameras.get_mut(camera).ok()) else {
            continue;
        };

        let sticky_position = rig
            .sticky_target()
            .and_then(|sticky| transforms.get(sticky).ok())
            .map(|transform| transform.position);

        let frame = RigFrame {
            delta: time.delta_seconds(),
            input: &input,
            ground,
            sticky_position,
        };
        rig.tick(&frame, &mut *camera);

        if let (Some(anchor), Some(pose)) = (rig.anchor, rig.live_pose()) {
            if let Ok(mut transform) = transforms.get_mut(anchor) {
                transform.set_pose(&pose);
            }
        }
    }
}
