use crate::prelude::*;

/// Keep the desired position inside the camera area, if there is one
pub(crate) fn constrain_position(state: &mut RigState, area: Option<&BoxVolume>) {
    if let Some(area) = area {
        state.desired_position = area.clamp_point(&state.desired_position);
    }
}
