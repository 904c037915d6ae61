use crate::prelude::*;

/// Place each follow camera at its resolved eye pose
pub fn resolve_follow_cameras(
    mut cameras: Query<(&FollowCamera, &mut Transform)>,
    targets: Query<&Transform, Without<FollowCamera>>,
) {
    for (camera, mut transform) in cameras.iter_mut() {
        let Some(target) = camera.follow.and_then(|entity| targets.get(entity).ok()) else {
            continue;
        };

        let eye = camera.resolve(&target.pose());
        if transform.pose() != eye {
            transform.set_pose(&eye);
        }
    }
}
