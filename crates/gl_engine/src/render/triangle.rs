//! The single colored triangle drawn every frame

use std::rc::Rc;

use super::gl::{BufferTarget, BufferUsage, ClearFlags, GlApi};
use super::resources::{Disposable, GlBuffer, GlResult, GlShaderProgram, GlVertexArray, ShaderPipeline};
use crate::foundation::logging::Logger;

/// Vertex positions in normalized device coordinates
pub const TRIANGLE_POSITIONS: [[f32; 3]; 3] = [
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [0.0, 0.5, 0.0],
];

/// Per-vertex RGB colors: green, blue, red
pub const TRIANGLE_COLORS: [[f32; 3]; 3] = [
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
];

/// Draw order
pub const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

/// Vertex stage: position at location 0, color at location 1
pub const VERTEX_SHADER_SOURCE: &str = include_str!("../../resources/shaders/triangle.vert");

/// Fragment stage: interpolated vertex color, opaque
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("../../resources/shaders/triangle.frag");

/// Attribute location of positions
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Attribute location of colors
pub const COLOR_ATTRIBUTE: u32 = 1;

const COMPONENTS: i32 = 3;
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const STRIDE: i32 = COMPONENTS * std::mem::size_of::<f32>() as i32;
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const INDEX_COUNT: i32 = TRIANGLE_INDICES.len() as i32;

/// GPU resources for one triangle and the commands to draw it
///
/// Created once per game session. Compile and link problems are logged and
/// leave the scene drawable but empty: the program cannot become current, so
/// draws produce nothing.
pub struct TriangleScene {
    gl: Rc<dyn GlApi>,
    vertex_array: GlVertexArray,
    positions: GlBuffer,
    colors: GlBuffer,
    indices: GlBuffer,
    shaders: ShaderPipeline,
}

impl TriangleScene {
    /// Create and upload every resource
    ///
    /// Objects created before a failure are released on the way out.
    pub fn create(gl: &Rc<dyn GlApi>, logger: &Logger) -> GlResult<Self> {
        let mut vertex_array = GlVertexArray::new(Rc::clone(gl))?;
        vertex_array.bind();

        let mut positions = GlBuffer::new(Rc::clone(gl), BufferTarget::Array)?;
        let mut colors = GlBuffer::new(Rc::clone(gl), BufferTarget::Array)?;
        let mut indices = GlBuffer::new(Rc::clone(gl), BufferTarget::ElementArray)?;
        positions.upload(&TRIANGLE_POSITIONS, BufferUsage::StaticDraw);
        colors.upload(&TRIANGLE_COLORS, BufferUsage::StaticDraw);
        indices.upload(&TRIANGLE_INDICES, BufferUsage::StaticDraw);

        let shaders = GlShaderProgram::from_sources(gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)?;
        report_pipeline(&shaders, logger);

        logger.debug(format!(
            "Triangle resources created ({} + {} + {} bytes)",
            positions.size_bytes().unwrap_or(0),
            colors.size_bytes().unwrap_or(0),
            indices.size_bytes().unwrap_or(0)
        ));

        Ok(Self {
            gl: Rc::clone(gl),
            vertex_array,
            positions,
            colors,
            indices,
            shaders,
        })
    }

    /// Whether the shaders compiled and linked
    pub fn is_ready(&self) -> bool {
        self.shaders.is_ready()
    }

    /// Shader stages and program
    pub const fn shaders(&self) -> &ShaderPipeline {
        &self.shaders
    }

    /// Clear the framebuffer and draw the triangle
    ///
    /// The viewport covers the whole framebuffer. Does nothing once disposed.
    pub fn draw(&mut self, framebuffer_size: (i32, i32), clear_color: [f32; 4]) {
        if self.is_disposed() {
            return;
        }
        let gl = Rc::clone(&self.gl);
        let (width, height) = framebuffer_size;

        gl.viewport(0, 0, width, height);
        gl.clear_color(clear_color);
        gl.clear(ClearFlags::COLOR | ClearFlags::DEPTH);

        self.vertex_array.bind();
        self.shaders.program.activate();
        gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
        gl.enable_vertex_attrib_array(COLOR_ATTRIBUTE);

        self.positions.bind();
        gl.vertex_attrib_pointer_f32(POSITION_ATTRIBUTE, COMPONENTS, STRIDE, 0);
        self.colors.bind();
        gl.vertex_attrib_pointer_f32(COLOR_ATTRIBUTE, COMPONENTS, STRIDE, 0);
        self.indices.bind();

        gl.draw_triangles_u32(INDEX_COUNT, 0);

        gl.disable_vertex_attrib_array(COLOR_ATTRIBUTE);
        gl.disable_vertex_attrib_array(POSITION_ATTRIBUTE);
        self.shaders.program.deactivate();
    }
}

fn report_pipeline(shaders: &ShaderPipeline, logger: &Logger) {
    let stages = [
        ("vertex shader", shaders.vertex.is_compiled(), shaders.vertex.info_log()),
        ("fragment shader", shaders.fragment.is_compiled(), shaders.fragment.info_log()),
        ("shader program", shaders.program.is_linked(), shaders.program.info_log()),
    ];
    for (name, ok, log) in stages {
        let log = log.trim();
        if ok {
            if !log.is_empty() {
                logger.debug(format!("{name}: {log}"));
            }
        } else {
            logger.warn(format!("{name} failed: {log}"));
        }
    }
}

impl Disposable for TriangleScene {
    fn is_disposed(&self) -> bool {
        self.vertex_array.is_disposed()
    }

    /// Releases in reverse creation order
    fn dispose(&mut self) {
        self.shaders.dispose();
        self.indices.dispose();
        self.colors.dispose();
        self.positions.dispose();
        self.vertex_array.dispose();
    }
}

impl Drop for TriangleScene {
    fn drop(&mut self) {
        self.dispose();
    }
}
