//! Linked shader programs
//!
//! A program refers to its shader stages, it does not own them. The attached
//! set records stage names in attach order, keyed by the name each stage got
//! at creation so a stage disposed while attached can still be detached.
//! Detaching or disposing the program never disposes a stage. [`ShaderPipeline`] is the owning bundle
//! for the common vertex + fragment case.

use std::rc::Rc;

use super::{Disposable, GlObject, GlResult, GlShader};
use crate::render::gl::{GlApi, GlHandle, GlObjectKind, ShaderStage, NULL_HANDLE};

/// A GL program object
#[derive(Debug)]
pub struct GlShaderProgram {
    object: GlObject,
    attached: Vec<GlHandle>,
}

impl GlShaderProgram {
    /// Create an empty program
    pub fn new(gl: Rc<dyn GlApi>) -> GlResult<Self> {
        let object = GlObject::create(gl, GlObjectKind::ShaderProgram, |gl| gl.create_program())?;
        Ok(Self {
            object,
            attached: Vec::new(),
        })
    }

    /// Build a program from vertex and fragment source
    ///
    /// Creates both stages and the program, uploads and compiles the sources,
    /// attaches the stages and links. Only object creation can fail here;
    /// compile and link results are left for the caller to inspect on the
    /// returned pipeline.
    pub fn from_sources(
        gl: &Rc<dyn GlApi>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> GlResult<ShaderPipeline> {
        let mut vertex = GlShader::new(Rc::clone(gl), ShaderStage::Vertex)?;
        let mut fragment = GlShader::new(Rc::clone(gl), ShaderStage::Fragment)?;
        let mut program = Self::new(Rc::clone(gl))?;

        vertex.upload_source(vertex_source);
        fragment.upload_source(fragment_source);
        vertex.compile();
        fragment.compile();

        program.attach_shader(&vertex);
        program.attach_shader(&fragment);
        program.link();

        Ok(ShaderPipeline {
            program,
            vertex,
            fragment,
        })
    }

    /// Driver name, zero once disposed
    pub fn handle(&self) -> GlHandle {
        self.object.handle()
    }

    /// Always [`GlObjectKind::ShaderProgram`]
    pub fn kind(&self) -> GlObjectKind {
        self.object.kind()
    }

    /// Whether the program is live with a non-zero name
    pub fn is_valid(&self) -> bool {
        self.object.handle() != NULL_HANDLE
    }

    /// Whether the last link attempt succeeded
    pub fn is_linked(&self) -> bool {
        self.object
            .query(false, |gl, handle| gl.program_link_status(handle))
    }

    /// Whether this program is the context's current program
    pub fn is_active(&self) -> bool {
        self.object
            .query(false, |gl, handle| gl.current_program() == handle)
    }

    /// Whether `shader` is in the attached set
    pub fn has_attached_shader(&self, shader: &GlShader) -> bool {
        self.attached.contains(&shader.name())
    }

    /// Names of attached stages, in attach order
    pub fn attached_shaders(&self) -> &[GlHandle] {
        &self.attached
    }

    /// Diagnostics from the last link attempt, empty once disposed
    pub fn info_log(&self) -> String {
        self.object
            .query(String::new(), |gl, handle| gl.program_info_log(handle))
    }

    /// Attach `shader`; already-attached and disposed shaders are ignored
    pub fn attach_shader(&mut self, shader: &GlShader) {
        if self.object.is_disposed() || shader.is_disposed() || self.has_attached_shader(shader) {
            return;
        }
        let shader_handle = shader.handle();
        self.object
            .with_live(|gl, handle| gl.attach_shader(handle, shader_handle));
        self.attached.push(shader.name());
    }

    /// Detach `shader` if it is attached
    ///
    /// A stage disposed while attached is only dropped from the set; its
    /// driver name is already gone.
    pub fn detach_shader(&mut self, shader: &GlShader) {
        if !self.has_attached_shader(shader) {
            return;
        }
        if !shader.is_disposed() {
            let shader_handle = shader.handle();
            self.object
                .with_live(|gl, handle| gl.detach_shader(handle, shader_handle));
        }
        let name = shader.name();
        self.attached.retain(|&n| n != name);
    }

    /// Attempt to link the attached stages
    pub fn link(&mut self) {
        self.object.with_live(|gl, handle| gl.link_program(handle));
    }

    /// Make this the current program
    ///
    /// The driver refuses programs that failed to link; in that case nothing
    /// changes and draws using it produce no output.
    pub fn activate(&mut self) {
        if self.is_active() {
            return;
        }
        self.object.with_live(|gl, handle| gl.use_program(handle));
    }

    /// Clear the current program if it is this one
    pub fn deactivate(&mut self) {
        if !self.is_active() {
            return;
        }
        self.object.with_live(|gl, _| gl.use_program(NULL_HANDLE));
    }
}

impl Disposable for GlShaderProgram {
    fn is_disposed(&self) -> bool {
        self.object.is_disposed()
    }

    fn dispose(&mut self) {
        if self.object.release(|gl, handle| gl.delete_program(handle)) {
            self.attached.clear();
        }
    }
}

impl Drop for GlShaderProgram {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// A program together with the vertex and fragment stages it was built from
#[derive(Debug)]
pub struct ShaderPipeline {
    /// Linked (or failed-to-link) program
    pub program: GlShaderProgram,
    /// Vertex stage
    pub vertex: GlShader,
    /// Fragment stage
    pub fragment: GlShader,
}

impl ShaderPipeline {
    /// Whether both stages compiled and the program linked
    pub fn is_ready(&self) -> bool {
        self.vertex.is_compiled() && self.fragment.is_compiled() && self.program.is_linked()
    }
}

impl Disposable for ShaderPipeline {
    fn is_disposed(&self) -> bool {
        self.program.is_disposed() && self.vertex.is_disposed() && self.fragment.is_disposed()
    }

    /// Program first, then stages in reverse creation order
    fn dispose(&mut self) {
        self.program.dispose();
        self.fragment.dispose();
        self.vertex.dispose();
    }
}
