use crate::constants::{HIGHLIGHT_GLOW_OPACITY, HIGHLIGHT_SCALE};
use crate::item::GalleryItem;

/// Cursor shown over the gallery container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Auto,
    Pointer,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Auto => "auto",
            Cursor::Pointer => "pointer",
        }
    }
}

/// Tracks the single item currently under the pointer.
#[derive(Clone, Debug, Default)]
pub struct Highlighter {
    intersected: Option<usize>,
}

impl Highlighter {
    pub fn current(&self) -> Option<usize> {
        self.intersected
    }

    /// Move the highlight to `hit`. The previous item is always restored
    /// before the new one is emphasized.
    ///
    /// Returns the cursor to apply when it has to change.
    pub fn update<S>(
        &mut self,
        items: &mut [GalleryItem<S>],
        hit: Option<usize>,
    ) -> Option<Cursor> {
        match hit {
            Some(i) if self.intersected == Some(i) => None,
            Some(i) => {
                if let Some(prev) = self.intersected.take() {
                    if let Some(item) = items.get_mut(prev) {
                        restore(item);
                    }
                }
                let Some(item) = items.get_mut(i) else {
                    return Some(Cursor::Auto);
                };
                emphasize(item);
                self.intersected = Some(i);
                log::debug!("[hover] item {} '{}'", i, item.title);
                Some(Cursor::Pointer)
            }
            None => {
                let prev = self.intersected.take()?;
                if let Some(item) = items.get_mut(prev) {
                    restore(item);
                }
                Some(Cursor::Auto)
            }
        }
    }
}

fn restore<S>(item: &mut GalleryItem<S>) {
    let baseline = item.baseline_scale();
    if let Some(mesh) = item.mesh.as_mut() {
        mesh.scale = baseline;
        mesh.glow_opacity = 0.0;
    }
}

fn emphasize<S>(item: &mut GalleryItem<S>) {
    let Some(mesh) = item.mesh.as_mut() else {
        return;
    };
    let original = *item.original_scale.get_or_insert(mesh.scale);
    mesh.scale = original * HIGHLIGHT_SCALE;
    mesh.glow_opacity = HIGHLIGHT_GLOW_OPACITY;
}
