// Shared geometry and animation tuning for the globe gallery.

// Globe geometry
pub const SPHERE_RADIUS: f32 = 2.0;
pub const INNER_SPHERE_RATIO: f32 = 0.98; // depth sphere just inside the shell
pub const BACKGROUND_SPHERE_RATIO: f32 = 8.0;

// Item quads
pub const ITEM_WIDTH: f32 = 0.8;
pub const ITEM_DEFAULT_HEIGHT: f32 = 0.5; // used until the image aspect is known
pub const ROLL_JITTER: f32 = 0.1; // radians, either direction
pub const SCALE_JITTER_MIN: f32 = 0.9;
pub const SCALE_JITTER_MAX: f32 = 1.1;
pub const DEFAULT_JITTER_SEED: u64 = 42;

// Glow overlay behind each item
pub const GLOW_SCALE: f32 = 1.15;
pub const GLOW_INSET: f32 = 0.02; // pushed toward the centre so the image stays in front

// Hover highlight
pub const HIGHLIGHT_SCALE: f32 = 1.15;
pub const HIGHLIGHT_GLOW_OPACITY: f32 = 0.3;

// Idle rotation (radians per frame)
pub const ROTATION_SPEED: f32 = 0.001;
pub const BACKGROUND_SPIN_Y: f32 = 0.1;
pub const BACKGROUND_SPIN_X: f32 = 0.05;
pub const INNER_SPIN_Y: f32 = -0.3; // opposite direction for parallax
pub const INNER_SPIN_X: f32 = 0.1;

// Floating motion in orbit mode
pub const FLOAT_AMPLITUDE: f32 = 0.02;
pub const FLOAT_PHASE_STEP: f32 = 0.2;
pub const FLOAT_SMOOTHING: f32 = 0.1; // lerp factor per step

// Re-layout transition
pub const RELAYOUT_DURATION_SEC: f32 = 1.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.5;
pub const ORBIT_AUTO_ROTATE_SPEED: f32 = 0.5;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6;
