//! RAII wrappers for driver-owned GL objects
//!
//! Each wrapper owns exactly one GL object name for its whole life and
//! releases it exactly once, either through [`Disposable::dispose`] or when
//! dropped. Wrappers are move-only; the name is never duplicated.
//!
//! ## Live / disposed
//! Every wrapper embeds a `GlObject`, a two-state machine (*live* with a
//! handle, or *disposed*). All operations go through it:
//!
//! - mutators run only while live; on a disposed object they return without
//!   touching the driver
//! - queries answer `false`, zero or an empty string once disposed
//! - `GlObject::release` moves live → disposed and hands the old handle to
//!   the release callback; a second call finds nothing to release
//!
//! Misuse after disposal is therefore never an error. The only hard failure
//! is creation, surfaced as [`GlError::CreationFailed`].

mod buffer;
mod program;
mod shader;
mod vertex_array;

pub use buffer::GlBuffer;
pub use program::{GlShaderProgram, ShaderPipeline};
pub use shader::GlShader;
pub use vertex_array::GlVertexArray;

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::render::gl::{GlApi, GlHandle, GlObjectKind, NULL_HANDLE};

/// GL resource errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlError {
    /// The driver could not allocate an object name
    #[error("failed to create OpenGL {kind}: {reason}")]
    CreationFailed {
        /// Which kind of object was requested
        kind: GlObjectKind,
        /// Driver-supplied reason
        reason: String,
    },
}

/// Result alias for GL resource operations
pub type GlResult<T> = Result<T, GlError>;

/// Objects that own a releasable resource
pub trait Disposable {
    /// Whether the resource has been released
    fn is_disposed(&self) -> bool;

    /// Release the resource; does nothing when already released
    fn dispose(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    Live(GlHandle),
    Disposed,
}

/// Shared core of every wrapper: the GL function table, the object kind and
/// the live/disposed state
pub(crate) struct GlObject {
    gl: Rc<dyn GlApi>,
    kind: GlObjectKind,
    name: GlHandle,
    state: ObjectState,
}

impl GlObject {
    /// Allocate a driver object with `create`
    ///
    /// A zero name is treated as a failed allocation.
    pub(crate) fn create(
        gl: Rc<dyn GlApi>,
        kind: GlObjectKind,
        create: impl FnOnce(&dyn GlApi) -> Result<GlHandle, String>,
    ) -> GlResult<Self> {
        let handle = create(gl.as_ref())
            .map_err(|reason| GlError::CreationFailed { kind, reason })?;
        if handle == NULL_HANDLE {
            return Err(GlError::CreationFailed {
                kind,
                reason: "driver returned the null object name".to_string(),
            });
        }
        log::trace!("created {kind} {handle}");
        Ok(Self {
            gl,
            kind,
            name: handle,
            state: ObjectState::Live(handle),
        })
    }

    pub(crate) fn kind(&self) -> GlObjectKind {
        self.kind
    }

    /// Name assigned at creation, kept after disposal
    pub(crate) const fn name(&self) -> GlHandle {
        self.name
    }

    /// Current handle, zero once disposed
    pub(crate) fn handle(&self) -> GlHandle {
        self.live().unwrap_or(NULL_HANDLE)
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.state == ObjectState::Disposed
    }

    /// Handle while live
    pub(crate) fn live(&self) -> Option<GlHandle> {
        match self.state {
            ObjectState::Live(handle) => Some(handle),
            ObjectState::Disposed => None,
        }
    }

    /// Run `op` against the live handle; skipped once disposed
    pub(crate) fn with_live(&self, op: impl FnOnce(&dyn GlApi, GlHandle)) {
        if let Some(handle) = self.live() {
            op(self.gl.as_ref(), handle);
        }
    }

    /// Answer `query` for the live handle, `default` once disposed
    pub(crate) fn query<T>(&self, default: T, query: impl FnOnce(&dyn GlApi, GlHandle) -> T) -> T {
        match self.live() {
            Some(handle) => query(self.gl.as_ref(), handle),
            None => default,
        }
    }

    /// Move to the disposed state, releasing the handle through `release`
    ///
    /// Returns whether a handle was released by this call.
    pub(crate) fn release(&mut self, release: impl FnOnce(&dyn GlApi, GlHandle)) -> bool {
        let ObjectState::Live(handle) = self.state else {
            return false;
        };
        release(self.gl.as_ref(), handle);
        self.state = ObjectState::Disposed;
        log::trace!("released {} {handle}", self.kind);
        true
    }
}

impl fmt::Debug for GlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlObject")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
