use crate::prelude::*;

use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Pixels per scroll line when a device reports pixel deltas
const PIXELS_PER_LINE: f32 = 120.0;

/// Resource that tracks keyboard and mouse input state
#[derive(Resource, Default, Debug, Clone)]
pub struct InputState {
    /// Currently pressed keys
    pub keys_pressed: HashSet<KeyCode>,
    /// Keys that went down during the current frame
    pub keys_just_pressed: HashSet<KeyCode>,
    /// Currently pressed mouse buttons
    pub buttons_pressed: HashSet<MouseButton>,
    /// Mouse delta since last frame (x, y), screen space with y pointing down
    pub mouse_delta: (f32, f32),
    /// Scroll since last frame, in lines. Positive scrolls away from the user.
    pub scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key went down this frame
    pub fn was_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Pointer movement as an axis pair, y pointing up
    pub fn pointer_axis(&self) -> Vector2<f32> {
        Vector2::new(self.mouse_delta.0, -self.mouse_delta.1)
    }

    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Reset per-frame state (call once every layer has seen the frame)
    pub fn reset_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    /// Handle key press. Key repeat does not produce a new edge.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_pressed.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    /// Handle key release
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
    }

    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => self.press_key(key),
            ElementState::Released => self.release_key(key),
        }
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.buttons_pressed.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.buttons_pressed.remove(&button);
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => self.press_button(button),
            ElementState::Released => self.release_button(button),
        }
    }

    /// Add mouse delta movement
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    pub fn add_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
        };
    }
}
