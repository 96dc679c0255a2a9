/// Page wiring and renderer tuning for the web front-end.
///
/// Geometry and motion constants shared with the host tests live in
/// `globe_core::constants`; this file only holds what the browser side needs.
// Container picked up automatically on module start
pub const DEFAULT_CONTAINER_ID: &str = "globe-gallery-container";

// Page selectors
pub const GALLERY_ITEM_SELECTOR: &str = ".gallery-item";
pub const CATEGORY_LABEL_SELECTOR: &str = ".gallery-category";
pub const TITLE_SELECTOR: &str = ".gallery-overlay span";
pub const FILTER_BUTTON_SELECTOR: &str = ".gallery-filter";
pub const THEME_TOGGLE_SELECTOR: &str = ".theme-toggle";
pub const DARK_THEME_CLASS: &str = "dark-theme";

// Container data attributes
pub const ATTR_SPHERE_RADIUS: &str = "data-sphere-radius";
pub const ATTR_ORBIT: &str = "data-orbit";
pub const ATTR_ROTATION_SPEED: &str = "data-rotation-speed";
pub const ATTR_READY: &str = "data-globe-ready";

// The page flips the body class after its own click handler; give it time
pub const THEME_REREAD_DELAY_MS: i32 = 100;

// Frame time clamp so a backgrounded tab does not jump tweens to the end
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Tessellation of the decorative spheres
pub const SPHERE_SEGMENTS: u32 = 32;
pub const SPHERE_RINGS: u32 = 32;
pub const SHELL_SEGMENTS: u32 = 64;
pub const SHELL_RINGS: u32 = 64;

// Longest texture edge uploaded per item
pub const MAX_TEXTURE_DIM: u32 = 1024;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const SUN_INTENSITY: f32 = 0.8;
pub const SUN_POSITION: [f32; 3] = [5.0, 8.0, 5.0];
pub const ACCENT_LIGHT_INTENSITY: f32 = 1.2;
pub const ACCENT_LIGHT_RANGE: f32 = 15.0;
pub const ACCENT_LIGHT_A: [f32; 3] = [5.0, 2.0, 3.0];
pub const ACCENT_LIGHT_B: [f32; 3] = [-5.0, -2.0, 3.0];

// Per-draw uniform slots reserved up front (items * 2 + spheres)
pub const INITIAL_DRAW_SLOTS: usize = 64;
// WebGPU's minimum dynamic uniform offset alignment
pub const UNIFORM_ALIGN: u64 = 256;
