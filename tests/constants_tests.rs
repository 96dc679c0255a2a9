// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use globe_core::{CAMERA_FAR, CAMERA_Z, SPHERE_RADIUS};

#[test]
#[allow(clippy::assertions_on_constants)]
fn selectors_are_class_selectors() {
    for sel in [
        GALLERY_ITEM_SELECTOR,
        CATEGORY_LABEL_SELECTOR,
        FILTER_BUTTON_SELECTOR,
        THEME_TOGGLE_SELECTOR,
    ] {
        assert!(sel.starts_with('.'), "{sel}");
    }
    assert!(!DARK_THEME_CLASS.starts_with('.'));
    assert!(!DEFAULT_CONTAINER_ID.starts_with('#'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn container_attributes_are_data_attributes() {
    for attr in [
        ATTR_SPHERE_RADIUS,
        ATTR_ORBIT,
        ATTR_ROTATION_SPEED,
        ATTR_READY,
    ] {
        assert!(attr.starts_with("data-"), "{attr}");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive() {
    assert!(THEME_REREAD_DELAY_MS > 0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tessellation_is_usable() {
    assert!(SPHERE_SEGMENTS >= 3 && SPHERE_RINGS >= 2);
    assert!(SHELL_SEGMENTS >= 3 && SHELL_RINGS >= 2);
    assert!(MAX_TEXTURE_DIM >= 256);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lights_sit_outside_the_globe() {
    for p in [SUN_POSITION, ACCENT_LIGHT_A, ACCENT_LIGHT_B] {
        let d = glam::Vec3::from_array(p).length();
        assert!(d > SPHERE_RADIUS, "{p:?}");
        assert!(d < CAMERA_FAR);
    }
    assert!(ACCENT_LIGHT_RANGE > CAMERA_Z);
    assert!(AMBIENT_INTENSITY + SUN_INTENSITY <= 1.5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn uniform_alignment_is_webgpu_minimum() {
    assert!(UNIFORM_ALIGN.is_power_of_two());
    assert!(UNIFORM_ALIGN >= 256);
    assert!(INITIAL_DRAW_SLOTS > 0);
}
