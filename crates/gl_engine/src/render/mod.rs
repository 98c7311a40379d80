//! Rendering: the GL function seam, resource wrappers and the triangle scene

pub mod gl;
pub mod resources;
pub mod triangle;

pub use resources::{Disposable, GlError, GlResult};
pub use triangle::TriangleScene;
