use crate::prelude::*;

/// Seconds between two rig reports
const REPORT_INTERVAL: f32 = 1.0;

/// Log where every rig is looking, once per report interval
pub fn report_camera_rigs(
    rigs: Query<(&Tag, &CameraRig)>,
    cameras: Query<&FollowCamera>,
    time: Res<Time>,
    mut elapsed: Local<f32>,
) {
    *elapsed += time.delta_seconds();
    if *elapsed < REPORT_INTERVAL {
        return;
    }
    *elapsed -= REPORT_INTERVAL;

    for (tag, rig) in rigs.iter() {
        let Some(snapshot) = rig.snapshot() else {
            log::info!("{}: {:?}", tag.label, rig.phase());
            continue;
        };
        let Some(live) = rig.live_pose() else {
            continue;
        };
        let offset = rig
            .camera
            .and_then(|camera| cameras.get(camera).ok())
            .map(|camera| camera.follow_offset);

        log::info!(
            "{}: {:?} live ({:.2}, {:.2}, {:.2}) target ({:.2}, {:.2}, {:.2}) yaw {:.1} offset {:?} sticky {:?}",
            tag.label,
            rig.phase(),
            live.position.x,
            live.position.y,
            live.position.z,
            snapshot.target_position.x,
            snapshot.target_position.y,
            snapshot.target_position.z,
            snapshot.target_rotation.y,
            offset,
            snapshot.sticky
        );
    }
}
