//! OpenGL function seam
//!
//! Every GL call the engine makes goes through the [`GlApi`] trait. The real
//! implementation ([`GlowApi`]) forwards to a `glow` context loaded from the
//! window's function loader; tests substitute a recording mock.
//!
//! Handles cross this boundary as plain [`GlHandle`] integers. Zero is the
//! "no object" sentinel everywhere: binding zero unbinds, a query that
//! returns zero means nothing is bound, and a disposed wrapper reports zero.
//!
//! # Threading
//! The GL context is current on exactly one thread. Nothing here is `Send`
//! or `Sync`; wrappers share the function table through `Rc<dyn GlApi>`.

mod glow_backend;

pub use glow_backend::GlowApi;

use std::fmt;

use bitflags::bitflags;

/// Opaque driver-assigned object name
pub type GlHandle = u32;

/// The "no object" handle
pub const NULL_HANDLE: GlHandle = 0;

/// Buffer binding targets used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (`GL_ARRAY_BUFFER`)
    Array,
    /// Index data (`GL_ELEMENT_ARRAY_BUFFER`)
    ElementArray,
}

impl BufferTarget {
    /// GL enum for binding to this target
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Array => glow::ARRAY_BUFFER,
            Self::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }

    /// GL enum for querying the buffer currently bound to this target
    pub const fn binding_query(self) -> u32 {
        match self {
            Self::Array => glow::ARRAY_BUFFER_BINDING,
            Self::ElementArray => glow::ELEMENT_ARRAY_BUFFER_BINDING,
        }
    }
}

/// Usage hint passed along with buffer data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Written once, drawn many times
    StaticDraw,
    /// Rewritten occasionally
    DynamicDraw,
    /// Rewritten every frame
    StreamDraw,
}

impl BufferUsage {
    /// GL enum for this usage hint
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::StaticDraw => glow::STATIC_DRAW,
            Self::DynamicDraw => glow::DYNAMIC_DRAW,
            Self::StreamDraw => glow::STREAM_DRAW,
        }
    }
}

/// Programmable pipeline stage of a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl ShaderStage {
    /// GL enum for creating a shader of this stage
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Kinds of driver objects the engine wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlObjectKind {
    /// Data buffer
    Buffer,
    /// Single shader stage
    Shader,
    /// Linked shader program
    ShaderProgram,
    /// Vertex array object
    VertexArray,
}

impl fmt::Display for GlObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Buffer => "buffer",
            Self::Shader => "shader",
            Self::ShaderProgram => "shader program",
            Self::VertexArray => "vertex array",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Framebuffer planes cleared at the start of a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color attachment
        const COLOR = glow::COLOR_BUFFER_BIT;
        /// Depth attachment
        const DEPTH = glow::DEPTH_BUFFER_BIT;
    }
}

/// The subset of OpenGL the engine needs
///
/// Methods mirror single GL entry points. Creation methods return the
/// driver's error text on failure; everything else is fire-and-forget, the
/// same way GL itself reports problems only through later queries.
pub trait GlApi {
    // -- buffers ---------------------------------------------------------

    /// `glGenBuffers` for a single name
    fn create_buffer(&self) -> Result<GlHandle, String>;
    /// `glDeleteBuffers` for a single name
    fn delete_buffer(&self, buffer: GlHandle);
    /// `glBindBuffer`; zero unbinds
    fn bind_buffer(&self, target: BufferTarget, buffer: GlHandle);
    /// Buffer currently bound to `target`, zero when none
    fn bound_buffer(&self, target: BufferTarget) -> GlHandle;
    /// `glBufferData` on whatever is bound to `target`
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    // -- shader stages ---------------------------------------------------

    /// `glCreateShader`
    fn create_shader(&self, stage: ShaderStage) -> Result<GlHandle, String>;
    /// `glDeleteShader`
    fn delete_shader(&self, shader: GlHandle);
    /// `glShaderSource` with a single string
    fn shader_source(&self, shader: GlHandle, source: &str);
    /// `glCompileShader`
    fn compile_shader(&self, shader: GlHandle);
    /// `GL_COMPILE_STATUS` of the last compile attempt
    fn shader_compile_status(&self, shader: GlHandle) -> bool;
    /// Info log of the last compile attempt
    fn shader_info_log(&self, shader: GlHandle) -> String;

    // -- programs --------------------------------------------------------

    /// `glCreateProgram`
    fn create_program(&self) -> Result<GlHandle, String>;
    /// `glDeleteProgram`
    fn delete_program(&self, program: GlHandle);
    /// `glAttachShader`
    fn attach_shader(&self, program: GlHandle, shader: GlHandle);
    /// `glDetachShader`
    fn detach_shader(&self, program: GlHandle, shader: GlHandle);
    /// `glLinkProgram`
    fn link_program(&self, program: GlHandle);
    /// `GL_LINK_STATUS` of the last link attempt
    fn program_link_status(&self, program: GlHandle) -> bool;
    /// Info log of the last link attempt
    fn program_info_log(&self, program: GlHandle) -> String;
    /// `glUseProgram`; zero clears the active program
    fn use_program(&self, program: GlHandle);
    /// `GL_CURRENT_PROGRAM`
    fn current_program(&self) -> GlHandle;

    // -- vertex arrays ---------------------------------------------------

    /// `glGenVertexArrays` for a single name
    fn create_vertex_array(&self) -> Result<GlHandle, String>;
    /// `glDeleteVertexArrays` for a single name
    fn delete_vertex_array(&self, vertex_array: GlHandle);
    /// `glBindVertexArray`; zero unbinds
    fn bind_vertex_array(&self, vertex_array: GlHandle);
    /// `GL_VERTEX_ARRAY_BINDING`
    fn bound_vertex_array(&self) -> GlHandle;

    // -- drawing ---------------------------------------------------------

    /// `glViewport`
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// `glClearColor`
    fn clear_color(&self, color: [f32; 4]);
    /// `glClear`
    fn clear(&self, flags: ClearFlags);
    /// `glEnableVertexAttribArray`
    fn enable_vertex_attrib_array(&self, index: u32);
    /// `glDisableVertexAttribArray`
    fn disable_vertex_attrib_array(&self, index: u32);
    /// `glVertexAttribPointer` for non-normalized float attributes sourced
    /// from the buffer bound to [`BufferTarget::Array`]
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);
    /// `glDrawElements(GL_TRIANGLES, count, GL_UNSIGNED_INT, offset)`
    fn draw_triangles_u32(&self, index_count: i32, offset: i32);

    // -- context info ----------------------------------------------------

    /// Human-readable version and renderer strings
    fn describe(&self) -> String;
}
