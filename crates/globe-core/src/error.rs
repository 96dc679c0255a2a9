use thiserror::Error;

/// Failures reported by [`crate::Gallery`] operations.
///
/// None of these are fatal to the page; callers log them and carry on with
/// the affected item left out.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GalleryError {
    #[error("no gallery item at index {0}")]
    ItemOutOfRange(usize),
    #[error("gallery item {0} already has a mesh")]
    MeshAlreadyInstalled(usize),
    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },
}
