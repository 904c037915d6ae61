use crate::prelude::*;

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScriptAction {
    PressKey(KeyCode),
    ReleaseKey(KeyCode),
    PressButton(MouseButton),
    ReleaseButton(MouseButton),
    /// Pointer movement in screen pixels, y down
    Drag(f32, f32),
    /// Scroll lines, positive away from the user
    Scroll(f32),
    /// Stick every rig to an entity, or release it
    Stick(Option<Entity>),
    /// Lock or unlock rig input
    LockInput(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptedInput {
    pub frame: u64,
    pub action: ScriptAction,
}

/// Timeline of input replayed frame by frame, standing in for a window
#[derive(Resource, Default, Debug)]
pub struct InputScript {
    events: Vec<ScriptedInput>,
    cursor: usize,
    frame: u64,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, frame: u64, action: ScriptAction) -> Self {
        self.push(frame, action);
        self
    }

    /// Hold `key` from `start` for `frames` frames
    pub fn hold_key(self, start: u64, frames: u64, key: KeyCode) -> Self {
        self.at(start, ScriptAction::PressKey(key))
            .at(start + frames, ScriptAction::ReleaseKey(key))
    }

    /// Tap `key` for a single frame
    pub fn tap_key(self, frame: u64, key: KeyCode) -> Self {
        self.hold_key(frame, 1, key)
    }

    /// Drag with `button` held, moving by `delta` pixels every frame
    pub fn drag(mut self, start: u64, frames: u64, button: MouseButton, delta: (f32, f32)) -> Self {
        self.push(start, ScriptAction::PressButton(button));
        for frame in start..start + frames {
            self.push(frame, ScriptAction::Drag(delta.0, delta.1));
        }
        self.push(start + frames, ScriptAction::ReleaseButton(button));
        self
    }

    pub fn push(&mut self, frame: u64, action: ScriptAction) {
        let index = self.events.partition_point(|event| event.frame <= frame);
        self.events.insert(index, ScriptedInput { frame, action });
    }

    /// Actions due this frame, in insertion order. Advances to the next frame.
    pub fn next_frame(&mut self) -> Vec<ScriptAction> {
        let start = self.cursor;
        while self
            .events
            .get(self.cursor)
            .is_some_and(|event| event.frame <= self.frame)
        {
            self.cursor += 1;
        }
        self.frame += 1;
        self.events[start..self.cursor]
            .iter()
            .map(|event| event.action)
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    pub fn last_frame(&self) -> u64 {
        self.events.last().map_or(0, |event| event.frame)
    }
}
