use crate::prelude::*;

/// Feed this frame's scripted actions into the input state and the rigs
pub fn play_input_script(
    mut script: ResMut<InputScript>,
    mut input: ResMut<InputState>,
    mut rigs: Query<&mut CameraRig>,
) {
    for action in script.next_frame() {
        match action {
            ScriptAction::PressKey(key) => input.press_key(key),
            ScriptAction::ReleaseKey(key) => input.release_key(key),
            ScriptAction::PressButton(button) => input.press_button(button),
            ScriptAction::ReleaseButton(button) => input.release_button(button),
            ScriptAction::Drag(dx, dy) => input.add_mouse_delta(dx, dy),
            ScriptAction::Scroll(lines) => {
                input.add_scroll(winit::event::MouseScrollDelta::LineDelta(0.0, lines))
            }
            ScriptAction::Stick(sticky) => {
                log::info!("Script: stick rigs to {:?}", sticky);
                let update = CameraUpdate::new().stick_to(sticky);
                for mut rig in rigs.iter_mut() {
                    rig.apply_update(&update, |_| None);
                }
            }
            ScriptAction::LockInput(locked) => {
                log::info!("Script: {} rig input", if locked { "lock" } else { "unlock" });
                for mut rig in rigs.iter_mut() {
                    if locked {
                        rig.disable_input();
                    } else {
                        rig.enable_input();
                    }
                }
            }
        }
    }
}
