//! Single shader stages

use std::rc::Rc;

use super::{Disposable, GlObject, GlResult};
use crate::render::gl::{GlApi, GlHandle, GlObjectKind, ShaderStage, NULL_HANDLE};

/// A GL shader object for one pipeline stage
///
/// Compile failures are not errors. Call [`compile`](Self::compile), then
/// inspect [`is_compiled`](Self::is_compiled) and [`info_log`](Self::info_log).
/// Compiling without uploaded source, or compiling again after a new upload,
/// is allowed; the status always reflects the latest attempt.
#[derive(Debug)]
pub struct GlShader {
    object: GlObject,
    stage: ShaderStage,
}

impl GlShader {
    /// Create an empty shader object for `stage`
    pub fn new(gl: Rc<dyn GlApi>, stage: ShaderStage) -> GlResult<Self> {
        let object = GlObject::create(gl, GlObjectKind::Shader, |gl| gl.create_shader(stage))?;
        Ok(Self { object, stage })
    }

    /// Driver name, zero once disposed
    pub fn handle(&self) -> GlHandle {
        self.object.handle()
    }

    /// Name assigned at creation
    ///
    /// Unlike [`handle`](Self::handle) this survives disposal, so a program
    /// can still recognize a stage that was disposed while attached.
    pub const fn name(&self) -> GlHandle {
        self.object.name()
    }

    /// Always [`GlObjectKind::Shader`]
    pub fn kind(&self) -> GlObjectKind {
        self.object.kind()
    }

    /// Pipeline stage
    pub const fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Whether the shader is live with a non-zero name
    pub fn is_valid(&self) -> bool {
        self.object.handle() != NULL_HANDLE
    }

    /// Whether the last compile attempt succeeded
    pub fn is_compiled(&self) -> bool {
        self.object
            .query(false, |gl, handle| gl.shader_compile_status(handle))
    }

    /// Diagnostics from the last compile attempt, empty once disposed
    pub fn info_log(&self) -> String {
        self.object
            .query(String::new(), |gl, handle| gl.shader_info_log(handle))
    }

    /// Replace the shader's source text
    pub fn upload_source(&mut self, source: &str) {
        self.object
            .with_live(|gl, handle| gl.shader_source(handle, source));
    }

    /// Attempt to compile the current source
    pub fn compile(&mut self) {
        self.object.with_live(|gl, handle| gl.compile_shader(handle));
    }
}

impl Disposable for GlShader {
    fn is_disposed(&self) -> bool {
        self.object.is_disposed()
    }

    fn dispose(&mut self) {
        self.object.release(|gl, handle| gl.delete_shader(handle));
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        self.dispose();
    }
}
