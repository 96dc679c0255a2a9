// Shared fixtures for the integration tests.

#![allow(dead_code)]
use globe_core::*;

pub fn entry(index: usize, category: &str) -> ItemEntry<usize> {
    ItemEntry {
        image_source: format!("images/item-{index}.jpg"),
        title: format!("Item {index}"),
        category: category.to_string(),
        label: category.to_uppercase(),
        source: index,
    }
}

pub fn manual_config() -> GalleryConfig {
    GalleryConfig {
        orbit: false,
        ..GalleryConfig::default()
    }
}

/// Gallery with one entry per category and every texture resolved.
pub fn loaded_gallery(categories: &[&str], config: GalleryConfig) -> Gallery<usize> {
    let entries = categories
        .iter()
        .enumerate()
        .map(|(i, c)| entry(i, c))
        .collect();
    let mut gallery = Gallery::new(entries, config, 16.0 / 9.0);
    for i in 0..gallery.len() {
        gallery.install_mesh(i, 800, 500).unwrap();
    }
    gallery
}

pub fn approx_vec(a: glam::Vec3, b: glam::Vec3) -> bool {
    (a - b).length() < 1e-4
}
