use crate::constants::{GLOW_INSET, GLOW_SCALE, ITEM_DEFAULT_HEIGHT, ITEM_WIDTH};
use glam::{Mat4, Quat, Vec2, Vec3};

/// One gallery entry as scraped from the page, before it joins a [`crate::Gallery`].
///
/// `S` is the back-reference to the originating page element. The gallery
/// never owns or destroys what it points at.
#[derive(Clone, Debug)]
pub struct ItemEntry<S> {
    pub image_source: String,
    pub title: String,
    /// Filter key (`data-category`).
    pub category: String,
    /// Human readable category label shown on the card.
    pub label: String,
    pub source: S,
}

/// Transform and appearance of an item's textured quad.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemMesh {
    /// Rest position on the sphere; moved only by layout transitions.
    pub anchor: Vec3,
    /// Displayed position (anchor plus floating offset).
    pub position: Vec3,
    /// Local +Z points away from the globe centre.
    pub orientation: Quat,
    pub roll: f32,
    pub scale: f32,
    pub size: Vec2,
    pub visible: bool,
    pub glow_opacity: f32,
}

impl ItemMesh {
    pub fn new(position: Vec3, orientation: Quat, size: Vec2) -> Self {
        Self {
            anchor: position,
            position,
            orientation,
            roll: 0.0,
            scale: 1.0,
            size,
            visible: true,
            glow_opacity: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        self.orientation * Quat::from_rotation_z(self.roll)
    }

    /// Unit direction from the globe centre through the anchor.
    pub fn outward(&self) -> Vec3 {
        self.anchor.normalize_or_zero()
    }

    /// World transform of the quad, excluding its width/height.
    pub fn transform(&self, globe_spin: f32) -> Mat4 {
        Mat4::from_rotation_y(globe_spin)
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(self.scale),
                self.rotation(),
                self.position,
            )
    }

    /// World transform of the unit quad, width/height included.
    pub fn model_matrix(&self, globe_spin: f32) -> Mat4 {
        self.transform(globe_spin) * Mat4::from_scale(self.size.extend(1.0))
    }

    /// Glow plane sitting just behind the image, slightly larger.
    pub fn glow_matrix(&self, globe_spin: f32) -> Mat4 {
        let position = self.position - self.position.normalize_or_zero() * GLOW_INSET;
        Mat4::from_rotation_y(globe_spin)
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(self.scale * GLOW_SCALE),
                self.rotation(),
                position,
            )
            * Mat4::from_scale(self.size.extend(1.0))
    }
}

/// Quad size preserving the image aspect ratio at a fixed width.
pub fn quad_size(aspect: f32) -> Vec2 {
    if aspect.is_finite() && aspect > 0.0 {
        Vec2::new(ITEM_WIDTH, ITEM_WIDTH / aspect)
    } else {
        Vec2::new(ITEM_WIDTH, ITEM_DEFAULT_HEIGHT)
    }
}

/// Texture extent for an image of `width` x `height`, shrunk to fit within
/// `max_dim` on the longer edge with the aspect kept.
pub fn texture_extent(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dim || longest == 0 {
        return (width, height);
    }
    let k = max_dim as f64 / longest as f64;
    (
        ((width as f64 * k).round() as u32).max(1),
        ((height as f64 * k).round() as u32).max(1),
    )
}

/// One displayed image.
#[derive(Clone, Debug)]
pub struct GalleryItem<S> {
    pub image_source: String,
    pub title: String,
    pub category: String,
    pub label: String,
    pub source: S,
    pub mesh: Option<ItemMesh>,
    pub visible: bool,
    /// Baseline scale cached the first time the item is highlighted.
    pub original_scale: Option<f32>,
}

impl<S> From<ItemEntry<S>> for GalleryItem<S> {
    fn from(entry: ItemEntry<S>) -> Self {
        Self {
            image_source: entry.image_source,
            title: entry.title,
            category: entry.category,
            label: entry.label,
            source: entry.source,
            mesh: None,
            visible: true,
            original_scale: None,
        }
    }
}

impl<S> GalleryItem<S> {
    /// Visible and textured: the only items the picker considers.
    pub fn is_pickable(&self) -> bool {
        self.visible && self.mesh.as_ref().is_some_and(|m| m.visible)
    }

    pub fn baseline_scale(&self) -> f32 {
        self.original_scale.unwrap_or(1.0)
    }

    pub fn matches_filter(&self, key: &str) -> bool {
        key == "all" || self.category == key
    }
}
