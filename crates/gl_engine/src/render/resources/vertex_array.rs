//! Vertex array objects

use std::rc::Rc;

use super::{Disposable, GlObject, GlResult};
use crate::render::gl::{GlApi, GlHandle, GlObjectKind, NULL_HANDLE};

/// A GL vertex array object
///
/// A core-profile context refuses to draw without one bound, so every scene
/// owns at least one.
#[derive(Debug)]
pub struct GlVertexArray {
    object: GlObject,
}

impl GlVertexArray {
    /// Create an unbound vertex array
    pub fn new(gl: Rc<dyn GlApi>) -> GlResult<Self> {
        let object = GlObject::create(gl, GlObjectKind::VertexArray, |gl| {
            gl.create_vertex_array()
        })?;
        Ok(Self { object })
    }

    /// Driver name, zero once disposed
    pub fn handle(&self) -> GlHandle {
        self.object.handle()
    }

    /// Always [`GlObjectKind::VertexArray`]
    pub fn kind(&self) -> GlObjectKind {
        self.object.kind()
    }

    /// Whether the vertex array is live with a non-zero name
    pub fn is_valid(&self) -> bool {
        self.object.handle() != NULL_HANDLE
    }

    /// Whether this is the context's bound vertex array
    pub fn is_bound(&self) -> bool {
        self.object
            .query(false, |gl, handle| gl.bound_vertex_array() == handle)
    }

    /// Bind this vertex array
    pub fn bind(&mut self) {
        if self.is_bound() {
            return;
        }
        self.object.with_live(|gl, handle| gl.bind_vertex_array(handle));
    }

    /// Clear the binding if this vertex array holds it
    pub fn unbind(&mut self) {
        if !self.is_bound() {
            return;
        }
        self.object
            .with_live(|gl, _| gl.bind_vertex_array(NULL_HANDLE));
    }
}

impl Disposable for GlVertexArray {
    fn is_disposed(&self) -> bool {
        self.object.is_disposed()
    }

    fn dispose(&mut self) {
        self.object
            .release(|gl, handle| gl.delete_vertex_array(handle));
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        self.dispose();
    }
}
