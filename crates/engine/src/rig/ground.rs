use crate::prelude::*;

/// Drop the desired position onto the ground below it.
/// Nothing below leaves the position as it was.
pub(crate) fn snap_to_ground(state: &mut RigState, config: &RigConfig, ground: &dyn SpatialQuery) {
    let origin = state.desired_position + Vector3::y() * config.ground_probe_height;
    let ray = Ray::down(origin);

    if let Some(hit) = ground.raycast(&ray, config.ground_probe_distance, config.ground_mask) {
        state.desired_position = hit.point;
    }
}
