use crate::prelude::*;

/// Fold this frame's input into the desired position, yaw and offset.
///
/// Pan speed is a distance per frame, not per second.
pub(crate) fn accumulate_input(state: &mut RigState, config: &RigConfig, input: &InputState) {
    let bindings = &config.bindings;

    if input.was_key_just_pressed(bindings.yaw_decrease) {
        state.desired_rotation_euler.y -= config.rotation_step.abs();
    } else if input.was_key_just_pressed(bindings.yaw_increase) {
        state.desired_rotation_euler.y += config.rotation_step.abs();
    }

    if let Some(pan) = pan_delta(input, bindings) {
        if let Some(sticky) = state.sticky.take() {
            log::debug!("Manual panning released sticky target {:?}", sticky);
        }
        apply_pan(state, config, pan);
    }

    let scroll = input.scroll_delta();
    if scroll != 0.0 {
        apply_zoom(state, config, scroll);
    }
}

/// Pan input of the active mode, or `None` when neither mode is active.
/// Pointer dragging takes precedence over the keyboard.
fn pan_delta(input: &InputState, bindings: &KeyBindings) -> Option<Vector2<f32>> {
    if input.is_button_pressed(bindings.pan_button) {
        return Some(input.pointer_axis());
    }

    if bindings
        .movement_keys()
        .iter()
        .any(|key| input.is_key_pressed(*key))
    {
        return Some(keyboard_vector(input, bindings));
    }

    None
}

/// Keys mapped onto the pan axes. Forward gives -y so that, like dragging
/// the pointer, the target moves opposite to the axis sign.
fn keyboard_vector(input: &InputState, bindings: &KeyBindings) -> Vector2<f32> {
    let axis = |negative, positive| {
        let mut value = 0.0;
        if input.is_key_pressed(negative) {
            value -= 1.0;
        }
        if input.is_key_pressed(positive) {
            value += 1.0;
        }
        value
    };

    Vector2::new(
        axis(bindings.right, bindings.left),
        axis(bindings.forward, bindings.back),
    )
}

fn apply_pan(state: &mut RigState, config: &RigConfig, pan: Vector2<f32>) {
    if pan.x == 0.0 && pan.y == 0.0 {
        return;
    }

    // Relative to where the camera is now, not where it is heading
    let forward = flatten(&state.live.forward());
    let right = flatten(&state.live.right());

    state.desired_position -= pan.y * config.movement_speed * forward;
    state.desired_position -= pan.x * config.movement_speed * right;
}

fn apply_zoom(state: &mut RigState, config: &RigConfig, scroll: f32) {
    let distance = config
        .x_offset_limits
        .clamp(state.zoom_distance() - scroll * config.offset_speed);
    state.desired_offset.z = -distance;

    let t = config.x_offset_limits.normalize(distance);
    let height = config
        .y_offset_limits
        .denormalize(config.y_offset_curve.evaluate(t));
    state.desired_offset.y = config.y_offset_limits.clamp(height);
}

/// Horizontal part of `v`, normalized; zero when `v` is vertical
fn flatten(v: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x, 0.0, v.z)
        .try_normalize(1e-6)
        .unwrap_or_else(Vector3::zeros)
}
