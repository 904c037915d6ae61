use crate::prelude::*;

/// Something for the camera to follow: walks a closed loop of waypoints
#[derive(Component, Clone, Debug)]
pub struct Pawn {
    pub waypoints: Vec<Point3<f32>>,
    /// Units per second
    pub speed: f32,
    /// Index of the waypoint being walked to
    pub next: usize,
}

impl Pawn {
    pub fn new(waypoints: Vec<Point3<f32>>, speed: f32) -> Self {
        Self {
            waypoints,
            speed,
            next: 0,
        }
    }

    pub fn target(&self) -> Option<Point3<f32>> {
        self.waypoints.get(self.next).copied()
    }

    pub fn advance(&mut self) {
        if !self.waypoints.is_empty() {
            self.next = (self.next + 1) % self.waypoints.len();
        }
    }
}
