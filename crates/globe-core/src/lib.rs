//! Platform-free core of the globe gallery.
//!
//! Everything here is plain Rust over `glam` so the layout, picking and
//! animation rules can be exercised on the host. The web front-end owns the
//! DOM handles and GPU resources and drives a [`Gallery`] once per frame.

pub mod camera;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod highlight;
pub mod item;
pub mod layout;
pub mod motion;
pub mod orbit;
pub mod picking;
pub mod theme;

pub use camera::*;
pub use constants::*;
pub use error::*;
pub use gallery::*;
pub use highlight::*;
pub use item::*;
pub use layout::*;
pub use motion::*;
pub use orbit::*;
pub use picking::*;
pub use theme::*;
