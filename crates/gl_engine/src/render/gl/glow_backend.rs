//! [`GlApi`] over a `glow` context
//!
//! This is the only module in the crate that issues raw GL calls. Every call
//! assumes the context the functions were loaded from is current on the
//! calling thread; the window backend guarantees that by making the context
//! current before any resource is created and before every frame.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::num::NonZeroU32;

use glow::HasContext;

use super::{BufferTarget, BufferUsage, ClearFlags, GlApi, GlHandle, ShaderStage, NULL_HANDLE};

/// OpenGL function table loaded through a window system's loader
pub struct GlowApi {
    gl: glow::Context,
}

impl GlowApi {
    /// Load GL entry points through `loader`
    ///
    /// # Safety
    /// The context the loader resolves symbols for must be current on this
    /// thread, and must stay alive for as long as this value is used.
    pub unsafe fn from_loader<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        Self {
            gl: glow::Context::from_loader_function(loader),
        }
    }
}

fn to_handle(name: NonZeroU32) -> GlHandle {
    name.get()
}

fn buffer(handle: GlHandle) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(handle).map(glow::NativeBuffer)
}

fn shader(handle: GlHandle) -> Option<glow::NativeShader> {
    NonZeroU32::new(handle).map(glow::NativeShader)
}

fn program(handle: GlHandle) -> Option<glow::NativeProgram> {
    NonZeroU32::new(handle).map(glow::NativeProgram)
}

fn vertex_array(handle: GlHandle) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(handle).map(glow::NativeVertexArray)
}

/// Integer state queries come back signed; negative values are never names
fn query_handle(value: i32) -> GlHandle {
    GlHandle::try_from(value).unwrap_or(NULL_HANDLE)
}

impl GlApi for GlowApi {
    fn create_buffer(&self) -> Result<GlHandle, String> {
        unsafe { self.gl.create_buffer() }.map(|b| to_handle(b.0))
    }

    fn delete_buffer(&self, handle: GlHandle) {
        if let Some(b) = buffer(handle) {
            unsafe { self.gl.delete_buffer(b) };
        }
    }

    fn bind_buffer(&self, target: BufferTarget, handle: GlHandle) {
        unsafe { self.gl.bind_buffer(target.gl_enum(), buffer(handle)) };
    }

    fn bound_buffer(&self, target: BufferTarget) -> GlHandle {
        query_handle(unsafe { self.gl.get_parameter_i32(target.binding_query()) })
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe { self.gl.buffer_data_u8_slice(target.gl_enum(), data, usage.gl_enum()) };
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<GlHandle, String> {
        unsafe { self.gl.create_shader(stage.gl_enum()) }.map(|s| to_handle(s.0))
    }

    fn delete_shader(&self, handle: GlHandle) {
        if let Some(s) = shader(handle) {
            unsafe { self.gl.delete_shader(s) };
        }
    }

    fn shader_source(&self, handle: GlHandle, source: &str) {
        if let Some(s) = shader(handle) {
            unsafe { self.gl.shader_source(s, source) };
        }
    }

    fn compile_shader(&self, handle: GlHandle) {
        if let Some(s) = shader(handle) {
            unsafe { self.gl.compile_shader(s) };
        }
    }

    fn shader_compile_status(&self, handle: GlHandle) -> bool {
        shader(handle).is_some_and(|s| unsafe { self.gl.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, handle: GlHandle) -> String {
        shader(handle)
            .map(|s| unsafe { self.gl.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn create_program(&self) -> Result<GlHandle, String> {
        unsafe { self.gl.create_program() }.map(|p| to_handle(p.0))
    }

    fn delete_program(&self, handle: GlHandle) {
        if let Some(p) = program(handle) {
            unsafe { self.gl.delete_program(p) };
        }
    }

    fn attach_shader(&self, program_handle: GlHandle, shader_handle: GlHandle) {
        if let (Some(p), Some(s)) = (program(program_handle), shader(shader_handle)) {
            unsafe { self.gl.attach_shader(p, s) };
        }
    }

    fn detach_shader(&self, program_handle: GlHandle, shader_handle: GlHandle) {
        if let (Some(p), Some(s)) = (program(program_handle), shader(shader_handle)) {
            unsafe { self.gl.detach_shader(p, s) };
        }
    }

    fn link_program(&self, handle: GlHandle) {
        if let Some(p) = program(handle) {
            unsafe { self.gl.link_program(p) };
        }
    }

    fn program_link_status(&self, handle: GlHandle) -> bool {
        program(handle).is_some_and(|p| unsafe { self.gl.get_program_link_status(p) })
    }

    fn program_info_log(&self, handle: GlHandle) -> String {
        program(handle)
            .map(|p| unsafe { self.gl.get_program_info_log(p) })
            .unwrap_or_default()
    }

    fn use_program(&self, handle: GlHandle) {
        unsafe { self.gl.use_program(program(handle)) };
    }

    fn current_program(&self) -> GlHandle {
        query_handle(unsafe { self.gl.get_parameter_i32(glow::CURRENT_PROGRAM) })
    }

    fn create_vertex_array(&self) -> Result<GlHandle, String> {
        unsafe { self.gl.create_vertex_array() }.map(|v| to_handle(v.0))
    }

    fn delete_vertex_array(&self, handle: GlHandle) {
        if let Some(v) = vertex_array(handle) {
            unsafe { self.gl.delete_vertex_array(v) };
        }
    }

    fn bind_vertex_array(&self, handle: GlHandle) {
        unsafe { self.gl.bind_vertex_array(vertex_array(handle)) };
    }

    fn bound_vertex_array(&self) -> GlHandle {
        query_handle(unsafe { self.gl.get_parameter_i32(glow::VERTEX_ARRAY_BINDING) })
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) };
    }

    fn clear_color(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe { self.gl.clear_color(r, g, b, a) };
    }

    fn clear(&self, flags: ClearFlags) {
        unsafe { self.gl.clear(flags.bits()) };
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) };
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) };
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, stride, offset);
        }
    }

    fn draw_triangles_u32(&self, index_count: i32, offset: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, offset);
        }
    }

    fn describe(&self) -> String {
        let (version, renderer) = unsafe {
            (
                self.gl.get_parameter_string(glow::VERSION),
                self.gl.get_parameter_string(glow::RENDERER),
            )
        };
        format!("OpenGL {version} ({renderer})")
    }
}
