//! Per-frame motion: eased layout transitions, floating, idle spin.

use crate::constants::{
    BACKGROUND_SPIN_X, BACKGROUND_SPIN_Y, FLOAT_AMPLITUDE, FLOAT_PHASE_STEP, FLOAT_SMOOTHING,
    INNER_SPIN_X, INNER_SPIN_Y,
};
use glam::{Vec2, Vec3};

/// Quadratic ease-in-out (GSAP's `power2.inOut`).
#[inline]
pub fn ease_power2_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Eased move between two anchor positions over a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
    duration: f32,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds and return the interpolated position.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.duration <= 0.0 {
            return self.to;
        }
        let k = ease_power2_in_out(self.elapsed / self.duration);
        self.from.lerp(self.to, k)
    }
}

/// Radial float offset of item `index` at `time_sec`; the per-index phase
/// keeps neighbours out of sync.
#[inline]
pub fn float_offset(time_sec: f32, index: usize) -> f32 {
    (time_sec + index as f32 * FLOAT_PHASE_STEP).sin() * FLOAT_AMPLITUDE
}

/// One smoothing step of `position` toward its floating `target`.
#[inline]
pub fn float_step(position: Vec3, target: Vec3) -> Vec3 {
    position.lerp(target, FLOAT_SMOOTHING)
}

/// Accumulated rotation of the three decorative spheres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShellRotation {
    /// Y rotation shared by the wireframe shell and every item.
    pub globe: f32,
    /// (x, y) Euler angles of the inner depth sphere.
    pub inner: Vec2,
    /// (x, y) Euler angles of the background sphere.
    pub background: Vec2,
}

impl ShellRotation {
    pub fn advance_globe(&mut self, speed: f32) {
        self.globe += speed;
    }

    /// Parallax drift of the inner and background spheres, applied in
    /// every interaction mode.
    pub fn advance_shells(&mut self, speed: f32) {
        self.background.x += speed * BACKGROUND_SPIN_X;
        self.background.y += speed * BACKGROUND_SPIN_Y;
        self.inner.x += speed * INNER_SPIN_X;
        self.inner.y += speed * INNER_SPIN_Y;
    }
}
