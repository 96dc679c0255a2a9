//! Drag-to-orbit camera controller with damping and auto-rotation.
//!
//! Follows the three.js `OrbitControls` conventions the gallery was tuned
//! with: drag deltas are scaled by the viewport height, rotation deltas decay
//! by the damping factor every update, and auto-rotation advances
//! `2π / 3600 · speed` radians per frame.

use crate::camera::Camera;
use crate::constants::{
    ORBIT_AUTO_ROTATE_SPEED, ORBIT_DAMPING_FACTOR, ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED,
};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    // Pending (azimuth, polar) rotation still to be applied.
    delta: Vec2,
    drag: Option<Vec2>,
    drag_travel: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            auto_rotate: true,
            auto_rotate_speed: ORBIT_AUTO_ROTATE_SPEED,
            min_polar: 0.0,
            max_polar: PI,
            delta: Vec2::ZERO,
            drag: None,
            drag_travel: 0.0,
        }
    }
}

impl OrbitControls {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Remaining (azimuth, polar) rotation to be eased in.
    pub fn pending_rotation(&self) -> Vec2 {
        self.delta
    }

    pub fn begin_drag(&mut self, pointer_px: Vec2) {
        self.drag = Some(pointer_px);
        self.drag_travel = 0.0;
    }

    /// Feed a pointer move while dragging. `viewport_height` is the
    /// element's CSS height.
    pub fn drag_to(&mut self, pointer_px: Vec2, viewport_height: f32) {
        let Some(last) = self.drag else {
            return;
        };
        let d = pointer_px - last;
        self.drag_travel += d.length();
        self.drag = Some(pointer_px);
        let h = viewport_height.max(1.0);
        self.rotate_left(TAU * d.x / h * self.rotate_speed);
        self.rotate_up(TAU * d.y / h * self.rotate_speed);
    }

    /// Finish a drag and report how far the pointer travelled, in pixels.
    pub fn end_drag(&mut self) -> f32 {
        self.drag = None;
        self.drag_travel
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.x -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.y -= angle;
    }

    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Apply one frame of rotation to `camera` and decay the pending delta.
    pub fn update(&mut self, camera: &mut Camera) {
        if self.auto_rotate && !self.is_dragging() {
            self.rotate_left(self.auto_rotation_angle());
        }

        let offset = camera.eye - self.target;
        let radius = offset.length().max(f32::EPSILON);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.delta.x * self.damping_factor;
        phi += self.delta.y * self.damping_factor;
        phi = phi
            .clamp(self.min_polar, self.max_polar)
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);

        let sin_phi = phi.sin();
        camera.eye = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
        camera.target = self.target;

        self.delta *= 1.0 - self.damping_factor;
    }
}
