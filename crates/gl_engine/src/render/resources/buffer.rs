//! GPU data buffers

use std::rc::Rc;

use bytemuck::Pod;

use super::{Disposable, GlObject, GlResult};
use crate::render::gl::{BufferTarget, BufferUsage, GlApi, GlHandle, GlObjectKind, NULL_HANDLE};

/// A GL buffer object bound to a fixed target
///
/// Binding is idempotent: [`bind`](Self::bind) and [`unbind`](Self::unbind)
/// check the current binding first and skip the driver call when the buffer
/// is already in the requested state.
#[derive(Debug)]
pub struct GlBuffer {
    object: GlObject,
    target: BufferTarget,
    size_bytes: Option<usize>,
    usage: Option<BufferUsage>,
}

impl GlBuffer {
    /// Create a buffer for `target`
    pub fn new(gl: Rc<dyn GlApi>, target: BufferTarget) -> GlResult<Self> {
        let object = GlObject::create(gl, GlObjectKind::Buffer, |gl| gl.create_buffer())?;
        Ok(Self {
            object,
            target,
            size_bytes: None,
            usage: None,
        })
    }

    /// Driver name, zero once disposed
    pub fn handle(&self) -> GlHandle {
        self.object.handle()
    }

    /// Always [`GlObjectKind::Buffer`]
    pub fn kind(&self) -> GlObjectKind {
        self.object.kind()
    }

    /// Target this buffer binds to
    pub const fn target(&self) -> BufferTarget {
        self.target
    }

    /// Whether the buffer is live with a non-zero name
    pub fn is_valid(&self) -> bool {
        self.object.handle() != NULL_HANDLE
    }

    /// Whether this buffer is the current binding of its target
    pub fn is_bound(&self) -> bool {
        let target = self.target;
        self.object
            .query(false, |gl, handle| gl.bound_buffer(target) == handle)
    }

    /// Size of the last upload in bytes
    pub const fn size_bytes(&self) -> Option<usize> {
        self.size_bytes
    }

    /// Usage hint of the last upload
    pub const fn usage(&self) -> Option<BufferUsage> {
        self.usage
    }

    /// Make this buffer the current binding of its target
    pub fn bind(&mut self) {
        if self.is_bound() {
            return;
        }
        let target = self.target;
        self.object.with_live(|gl, handle| gl.bind_buffer(target, handle));
    }

    /// Clear the binding of its target if this buffer holds it
    pub fn unbind(&mut self) {
        if !self.is_bound() {
            return;
        }
        let target = self.target;
        self.object.with_live(|gl, _| gl.bind_buffer(target, NULL_HANDLE));
    }

    /// Bind the buffer and replace its contents with `data`
    ///
    /// The buffer is left bound.
    pub fn upload<T: Pod>(&mut self, data: &[T], usage: BufferUsage) {
        if self.object.is_disposed() {
            return;
        }
        self.bind();
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let target = self.target;
        self.object.with_live(|gl, _| gl.buffer_data(target, bytes, usage));
        self.size_bytes = Some(bytes.len());
        self.usage = Some(usage);
    }
}

impl Disposable for GlBuffer {
    fn is_disposed(&self) -> bool {
        self.object.is_disposed()
    }

    fn dispose(&mut self) {
        if self.object.release(|gl, handle| gl.delete_buffer(handle)) {
            self.size_bytes = None;
            self.usage = None;
        }
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        self.dispose();
    }
}
