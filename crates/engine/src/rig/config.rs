use crate::prelude::*;

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Layer the default ground mask selects
pub const GROUND_LAYER: u8 = 11;

/// A `[min, max]` pair
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[f32; 2]")]
pub struct OffsetLimits {
    pub min: f32,
    pub max: f32,
}

impl OffsetLimits {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        clamp_or_min(value, self.min, self.max)
    }

    /// Where `value` sits in the range, as 0..1
    pub fn normalize(&self, value: f32) -> f32 {
        inverse_lerp(self.min, self.max, value)
    }

    pub fn denormalize(&self, t: f32) -> f32 {
        t * (self.max - self.min) + self.min
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl From<[f32; 2]> for OffsetLimits {
    fn from([min, max]: [f32; 2]) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    /// Turns the rig by minus one rotation step
    pub yaw_decrease: KeyCode,
    /// Turns the rig by plus one rotation step
    pub yaw_increase: KeyCode,
    /// Held to pan by dragging the pointer
    pub pan_button: MouseButton,
}

impl KeyBindings {
    pub fn movement_keys(&self) -> [KeyCode; 4] {
        [self.forward, self.back, self.left, self.right]
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            yaw_decrease: KeyCode::KeyE,
            yaw_increase: KeyCode::KeyQ,
            pan_button: MouseButton::Middle,
        }
    }
}

/// Tunables of a camera rig. Fixed for the lifetime of the rig; only the
/// camera area can be changed afterwards, through the rig itself.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Smoothing rate of the live position and of the follow offset
    pub position_damping: f32,
    /// Smoothing rate of the live rotation
    pub rotation_damping: f32,
    /// Pan distance per frame at full input
    pub movement_speed: f32,
    /// Yaw change per key press, in degrees
    pub rotation_step: f32,
    /// Zoom distance per scroll line
    pub offset_speed: f32,
    /// Limits of the zoom distance (the absolute follow offset z)
    pub x_offset_limits: OffsetLimits,
    /// Limits of the follow offset height
    pub y_offset_limits: OffsetLimits,
    /// Maps normalized zoom distance to normalized height
    pub y_offset_curve: ResponseCurve,
    pub ground_mask: LayerMask,
    /// Initial camera area
    pub bounds: Option<BoxVolume>,
    /// Seconds after activation before input is processed
    pub controls_enable_delay: f32,
    /// Height above the desired position the ground probe starts from
    pub ground_probe_height: f32,
    pub ground_probe_distance: f32,
    pub bindings: KeyBindings,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            position_damping: 4.0,
            rotation_damping: 4.0,
            movement_speed: 0.5,
            rotation_step: 30.0,
            offset_speed: 0.3,
            x_offset_limits: OffsetLimits::new(3.0, 10.0),
            y_offset_limits: OffsetLimits::new(1.5, 10.0),
            y_offset_curve: ResponseCurve::default(),
            ground_mask: LayerMask::layer(GROUND_LAYER),
            bounds: None,
            controls_enable_delay: 1.0,
            ground_probe_height: 150.0,
            ground_probe_distance: 10_000.0,
            bindings: KeyBindings::default(),
        }
    }
}

impl RigConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str::<RigConfig>(text).context("parse rig config TOML")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("load {}", path.display()))
    }

    /// Log every setting that will make the rig behave oddly.
    /// Returns the number of problems found.
    pub fn check(&self) -> usize {
        let mut problems = 0;
        let mut warn = |message: String| {
            log::warn!("Camera rig config: {}", message);
            problems += 1;
        };

        if self.x_offset_limits.is_inverted() {
            warn(format!(
                "x_offset_limits min {} > max {}, zoom will stick to the minimum",
                self.x_offset_limits.min, self.x_offset_limits.max
            ));
        }
        if self.y_offset_limits.is_inverted() {
            warn(format!(
                "y_offset_limits min {} > max {}, height will stick to the minimum",
                self.y_offset_limits.min, self.y_offset_limits.max
            ));
        }
        if self.position_damping < 0.0 || self.rotation_damping < 0.0 {
            warn(format!(
                "negative damping (position {}, rotation {})",
                self.position_damping, self.rotation_damping
            ));
        }
        if !self.y_offset_curve.is_monotonic() {
            warn("y_offset_curve is not monotonic".to_string());
        }
        if self.controls_enable_delay < 0.0 {
            warn(format!(
                "controls_enable_delay {} is negative",
                self.controls_enable_delay
            ));
        }

        problems
    }
}
