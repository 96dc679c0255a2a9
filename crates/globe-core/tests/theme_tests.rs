use globe_core::{hex_rgb, Theme};

#[test]
fn hex_rgb_unpacks_channels() {
    assert_eq!(hex_rgb(0xFF0000), [1.0, 0.0, 0.0]);
    assert_eq!(hex_rgb(0x00FF00), [0.0, 1.0, 0.0]);
    assert_eq!(hex_rgb(0x0000FF), [0.0, 0.0, 1.0]);
    assert_eq!(hex_rgb(0x000000), [0.0; 3]);
}

#[test]
fn dark_flag_selects_theme() {
    assert_eq!(Theme::from_dark_flag(true), Theme::Dark);
    assert_eq!(Theme::from_dark_flag(false), Theme::Light);
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn accent_switches_with_theme() {
    assert_eq!(Theme::Dark.palette().accent, hex_rgb(0xDDA15E));
    assert_eq!(Theme::Light.palette().accent, hex_rgb(0x2C6E49));
}

#[test]
fn dark_palette_is_darker_than_light() {
    let luma = |c: [f32; 3]| c[0] + c[1] + c[2];
    let (dark, light) = (Theme::Dark.palette(), Theme::Light.palette());
    assert!(luma(dark.shell) < luma(light.shell));
    assert!(luma(dark.inner) < luma(light.inner));
    assert!(luma(dark.background) < luma(light.background));
}
