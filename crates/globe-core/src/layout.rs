//! Fibonacci (golden-angle) placement of items on the globe.

use crate::constants::{ROLL_JITTER, SCALE_JITTER_MAX, SCALE_JITTER_MIN};
use glam::{Mat3, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;

/// Angle between successive points: π(3 − √5).
#[inline]
pub fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// Unit-sphere position of point `i` out of `n`.
///
/// A single point sits on the north pole.
pub fn fibonacci_point(i: usize, n: usize) -> Vec3 {
    let y = if n <= 1 {
        1.0
    } else {
        1.0 - (i as f32 / (n - 1) as f32) * 2.0
    };
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle() * i as f32;
    Vec3::new(theta.cos() * r, y, theta.sin() * r)
}

/// Positions for `n` points on a sphere of the given radius.
pub fn fibonacci_sphere(n: usize, radius: f32) -> Vec<Vec3> {
    (0..n).map(|i| fibonacci_point(i, n) * radius).collect()
}

/// Orientation whose local +Z points from the centre through `position`.
///
/// Equivalent to looking at the centre and then flipping half a turn about
/// the local Y axis, with +Y kept as close to world up as possible.
pub fn outward_orientation(position: Vec3) -> Quat {
    let mut z = position.normalize_or_zero();
    if z == Vec3::ZERO {
        z = Vec3::Z;
    }
    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-12 {
        // At the poles world up is parallel to the normal; nudge it off axis.
        z = (z + Vec3::new(0.0, 0.0, 1e-4)).normalize();
        x = Vec3::Y.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Cosmetic per-item variation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jitter {
    pub roll: f32,
    pub scale: f32,
}

/// Deterministic jitter for item `index`; the same seed always yields the
/// same arrangement.
pub fn jitter_for(seed: u64, index: usize) -> Jitter {
    let mix = seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = StdRng::seed_from_u64(mix);
    Jitter {
        roll: rng.gen_range(-ROLL_JITTER..=ROLL_JITTER),
        scale: rng.gen_range(SCALE_JITTER_MIN..=SCALE_JITTER_MAX),
    }
}
