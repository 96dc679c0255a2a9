/// Page colour scheme, read from the `dark-theme` body class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Scene colours for one theme, as 0..1 RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub shell: [f32; 3],
    pub inner: [f32; 3],
    pub background: [f32; 3],
    /// Point lights and glow overlays.
    pub accent: [f32; 3],
}

// Opacities do not change with the theme.
pub const SHELL_OPACITY: f32 = 0.15;
pub const INNER_OPACITY: f32 = 0.05;
pub const BACKGROUND_OPACITY: f32 = 0.7;

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                shell: hex_rgb(0x1A1A1A),
                inner: hex_rgb(0x111111),
                background: hex_rgb(0x111111),
                accent: hex_rgb(0xDDA15E),
            },
            Theme::Light => Palette {
                shell: hex_rgb(0xF5F5F5),
                inner: hex_rgb(0xF0F0F0),
                background: hex_rgb(0xEEEEEE),
                accent: hex_rgb(0x2C6E49),
            },
        }
    }
}

#[inline]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}
