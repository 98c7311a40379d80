//! Recording in-memory GL implementation

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::render::gl::{BufferTarget, BufferUsage, ClearFlags, GlApi, GlHandle, GlObjectKind, ShaderStage, NULL_HANDLE};

#[derive(Debug, Clone)]
struct MockShader {
    stage: ShaderStage,
    source: Option<String>,
    compiled: bool,
    info_log: String,
}

#[derive(Debug, Clone, Default)]
struct MockProgram {
    attached: Vec<GlHandle>,
    linked: bool,
    info_log: String,
}

/// One `glVertexAttribPointer` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttributePointer {
    pub components: i32,
    pub stride: i32,
    pub offset: i32,
    /// Array buffer bound when the pointer was set
    pub buffer: GlHandle,
}

/// One draw that would have produced output
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DrawCall {
    pub program: GlHandle,
    pub vertex_array: GlHandle,
    pub element_buffer: GlHandle,
    pub index_count: i32,
    pub enabled_attributes: Vec<u32>,
}

#[derive(Debug, Default)]
struct MockState {
    next_handle: GlHandle,
    buffers: HashMap<GlHandle, Option<(usize, BufferUsage)>>,
    shaders: HashMap<GlHandle, MockShader>,
    programs: HashMap<GlHandle, MockProgram>,
    vertex_arrays: HashSet<GlHandle>,

    bound_buffers: HashMap<BufferTarget, GlHandle>,
    current_program: GlHandle,
    bound_vertex_array: GlHandle,
    enabled_attributes: BTreeSet<u32>,
    attribute_pointers: HashMap<u32, AttributePointer>,

    viewport: Option<(i32, i32, i32, i32)>,
    clear_color: Option<[f32; 4]>,
    clears: Vec<ClearFlags>,
    draws: Vec<DrawCall>,
    rejected_draws: usize,
    errors: usize,

    calls: Vec<&'static str>,
    deletions: Vec<(GlObjectKind, GlHandle)>,
    failing_kinds: HashSet<GlObjectKind>,
    failing_stages: HashSet<ShaderStage>,
}

impl MockState {
    fn allocate(&mut self, kind: GlObjectKind) -> Result<GlHandle, String> {
        if self.failing_kinds.contains(&kind) {
            return Err(format!("mock refused to create {kind}"));
        }
        self.next_handle += 1;
        Ok(self.next_handle)
    }
}

/// GL double that models object tables, bindings and status queries
///
/// Every [`GlApi`] call is recorded by name. Invalid operations the real
/// driver would flag (using an unlinked program, drawing without a program,
/// vertex array or index buffer) leave state untouched and bump a counter.
#[derive(Debug)]
pub(crate) struct MockGl {
    state: RefCell<MockState>,
}

impl MockGl {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MockState::default()),
        }
    }

    /// Make every later creation of `kind` fail
    pub fn fail_creation_of(&self, kind: GlObjectKind) {
        self.state.borrow_mut().failing_kinds.insert(kind);
    }

    /// Make every later compile of a `stage` shader fail
    pub fn fail_compilation_of(&self, stage: ShaderStage) {
        self.state.borrow_mut().failing_stages.insert(stage);
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.state.borrow().calls.iter().filter(|&&c| c == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.borrow().calls.len()
    }

    /// Bytes last uploaded into `buffer`
    pub fn buffer_size(&self, buffer: GlHandle) -> Option<usize> {
        self.state
            .borrow()
            .buffers
            .get(&buffer)
            .copied()
            .flatten()
            .map(|(size, _)| size)
    }

    pub fn deletions_of(&self, kind: GlObjectKind, handle: GlHandle) -> usize {
        self.state
            .borrow()
            .deletions
            .iter()
            .filter(|&&d| d == (kind, handle))
            .count()
    }

    pub fn deletion_order(&self) -> Vec<(GlObjectKind, GlHandle)> {
        self.state.borrow().deletions.clone()
    }

    /// Objects created and not yet deleted, across all kinds
    pub fn live_objects(&self) -> usize {
        let state = self.state.borrow();
        state.buffers.len() + state.shaders.len() + state.programs.len() + state.vertex_arrays.len()
    }

    pub fn draw_calls(&self) -> Vec<DrawCall> {
        self.state.borrow().draws.clone()
    }

    pub fn rejected_draws(&self) -> usize {
        self.state.borrow().rejected_draws
    }

    pub fn error_count(&self) -> usize {
        self.state.borrow().errors
    }

    pub fn last_viewport(&self) -> Option<(i32, i32, i32, i32)> {
        self.state.borrow().viewport
    }

    pub fn last_clear(&self) -> Option<ClearFlags> {
        self.state.borrow().clears.last().copied()
    }

    pub fn last_clear_color(&self) -> Option<[f32; 4]> {
        self.state.borrow().clear_color
    }

    pub fn enabled_attributes(&self) -> Vec<u32> {
        self.state.borrow().enabled_attributes.iter().copied().collect()
    }

    pub fn attribute_pointer(&self, index: u32) -> Option<AttributePointer> {
        self.state.borrow().attribute_pointers.get(&index).copied()
    }

    fn record(&self, name: &'static str) -> std::cell::RefMut<'_, MockState> {
        let mut state = self.state.borrow_mut();
        state.calls.push(name);
        state
    }
}

impl GlApi for MockGl {
    fn create_buffer(&self) -> Result<GlHandle, String> {
        let mut state = self.record("create_buffer");
        let handle = state.allocate(GlObjectKind::Buffer)?;
        state.buffers.insert(handle, None);
        Ok(handle)
    }

    fn delete_buffer(&self, buffer: GlHandle) {
        let mut state = self.record("delete_buffer");
        if state.buffers.remove(&buffer).is_some() {
            state.bound_buffers.retain(|_, bound| *bound != buffer);
            state.deletions.push((GlObjectKind::Buffer, buffer));
        }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: GlHandle) {
        let mut state = self.record("bind_buffer");
        if buffer != NULL_HANDLE && !state.buffers.contains_key(&buffer) {
            state.errors += 1;
            return;
        }
        state.bound_buffers.insert(target, buffer);
    }

    fn bound_buffer(&self, target: BufferTarget) -> GlHandle {
        let state = self.record("bound_buffer");
        state.bound_buffers.get(&target).copied().unwrap_or(NULL_HANDLE)
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let mut guard = self.record("buffer_data");
        let state = &mut *guard;
        let bound = state.bound_buffers.get(&target).copied().unwrap_or(NULL_HANDLE);
        match state.buffers.get_mut(&bound) {
            Some(slot) => *slot = Some((data.len(), usage)),
            None => state.errors += 1,
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<GlHandle, String> {
        let mut state = self.record("create_shader");
        let handle = state.allocate(GlObjectKind::Shader)?;
        state.shaders.insert(
            handle,
            MockShader {
                stage,
                source: None,
                compiled: false,
                info_log: String::new(),
            },
        );
        Ok(handle)
    }

    fn delete_shader(&self, shader: GlHandle) {
        let mut state = self.record("delete_shader");
        if state.shaders.remove(&shader).is_some() {
            state.deletions.push((GlObjectKind::Shader, shader));
        }
    }

    fn shader_source(&self, shader: GlHandle, source: &str) {
        let mut state = self.record("shader_source");
        if let Some(entry) = state.shaders.get_mut(&shader) {
            entry.source = Some(source.to_string());
        }
    }

    fn compile_shader(&self, shader: GlHandle) {
        let mut state = self.record("compile_shader");
        let failing = state.failing_stages.clone();
        let Some(entry) = state.shaders.get_mut(&shader) else {
            return;
        };
        let has_source = entry.source.as_deref().is_some_and(|s| !s.trim().is_empty());
        let (compiled, info_log) = if !has_source {
            (false, "0:0(0): error: no shader source".to_string())
        } else if failing.contains(&entry.stage) {
            (false, format!("0:1(1): error: {} stage rejected", entry.stage))
        } else {
            (true, String::new())
        };
        entry.compiled = compiled;
        entry.info_log = info_log;
    }

    fn shader_compile_status(&self, shader: GlHandle) -> bool {
        let state = self.record("shader_compile_status");
        state.shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: GlHandle) -> String {
        let state = self.record("shader_info_log");
        state
            .shaders
            .get(&shader)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn create_program(&self) -> Result<GlHandle, String> {
        let mut state = self.record("create_program");
        let handle = state.allocate(GlObjectKind::ShaderProgram)?;
        state.programs.insert(handle, MockProgram::default());
        Ok(handle)
    }

    fn delete_program(&self, program: GlHandle) {
        let mut state = self.record("delete_program");
        if state.programs.remove(&program).is_some() {
            if state.current_program == program {
                state.current_program = NULL_HANDLE;
            }
            state.deletions.push((GlObjectKind::ShaderProgram, program));
        }
    }

    fn attach_shader(&self, program: GlHandle, shader: GlHandle) {
        let mut guard = self.record("attach_shader");
        let state = &mut *guard;
        if !state.shaders.contains_key(&shader) {
            state.errors += 1;
            return;
        }
        match state.programs.get_mut(&program) {
            Some(entry) if !entry.attached.contains(&shader) => entry.attached.push(shader),
            _ => state.errors += 1,
        }
    }

    fn detach_shader(&self, program: GlHandle, shader: GlHandle) {
        let mut guard = self.record("detach_shader");
        let state = &mut *guard;
        match state.programs.get_mut(&program) {
            Some(entry) if entry.attached.contains(&shader) => entry.attached.retain(|&s| s != shader),
            _ => state.errors += 1,
        }
    }

    fn link_program(&self, program: GlHandle) {
        let mut state = self.record("link_program");
        let Some(attached) = state.programs.get(&program).map(|p| p.attached.clone()) else {
            return;
        };
        let stages: Vec<Option<&MockShader>> = attached.iter().map(|h| state.shaders.get(h)).collect();
        let all_compiled = stages.iter().all(|s| s.is_some_and(|s| s.compiled));
        let has_stage = |stage: ShaderStage| stages.iter().flatten().any(|s| s.stage == stage);

        let info_log = if !all_compiled {
            "error: linking with uncompiled shader".to_string()
        } else if !has_stage(ShaderStage::Vertex) {
            "error: no vertex shader attached".to_string()
        } else if !has_stage(ShaderStage::Fragment) {
            "error: no fragment shader attached".to_string()
        } else {
            String::new()
        };
        let linked = info_log.is_empty();

        if let Some(entry) = state.programs.get_mut(&program) {
            entry.linked = linked;
            entry.info_log = info_log;
        }
    }

    fn program_link_status(&self, program: GlHandle) -> bool {
        let state = self.record("program_link_status");
        state.programs.get(&program).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: GlHandle) -> String {
        let state = self.record("program_info_log");
        state
            .programs
            .get(&program)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: GlHandle) {
        let mut state = self.record("use_program");
        if program == NULL_HANDLE || state.programs.get(&program).is_some_and(|p| p.linked) {
            state.current_program = program;
        } else {
            state.errors += 1;
        }
    }

    fn current_program(&self) -> GlHandle {
        self.record("current_program").current_program
    }

    fn create_vertex_array(&self) -> Result<GlHandle, String> {
        let mut state = self.record("create_vertex_array");
        let handle = state.allocate(GlObjectKind::VertexArray)?;
        state.vertex_arrays.insert(handle);
        Ok(handle)
    }

    fn delete_vertex_array(&self, vertex_array: GlHandle) {
        let mut state = self.record("delete_vertex_array");
        if state.vertex_arrays.remove(&vertex_array) {
            if state.bound_vertex_array == vertex_array {
                state.bound_vertex_array = NULL_HANDLE;
            }
            state.deletions.push((GlObjectKind::VertexArray, vertex_array));
        }
    }

    fn bind_vertex_array(&self, vertex_array: GlHandle) {
        let mut state = self.record("bind_vertex_array");
        if vertex_array != NULL_HANDLE && !state.vertex_arrays.contains(&vertex_array) {
            state.errors += 1;
            return;
        }
        state.bound_vertex_array = vertex_array;
    }

    fn bound_vertex_array(&self) -> GlHandle {
        self.record("bound_vertex_array").bound_vertex_array
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record("viewport").viewport = Some((x, y, width, height));
    }

    fn clear_color(&self, color: [f32; 4]) {
        self.record("clear_color").clear_color = Some(color);
    }

    fn clear(&self, flags: ClearFlags) {
        self.record("clear").clears.push(flags);
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record("enable_vertex_attrib_array")
            .enabled_attributes
            .insert(index);
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record("disable_vertex_attrib_array")
            .enabled_attributes
            .remove(&index);
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        let mut state = self.record("vertex_attrib_pointer_f32");
        let buffer = state
            .bound_buffers
            .get(&BufferTarget::Array)
            .copied()
            .unwrap_or(NULL_HANDLE);
        if buffer == NULL_HANDLE || state.bound_vertex_array == NULL_HANDLE {
            state.errors += 1;
            return;
        }
        state.attribute_pointers.insert(
            index,
            AttributePointer {
                components,
                stride,
                offset,
                buffer,
            },
        );
    }

    fn draw_triangles_u32(&self, index_count: i32, _offset: i32) {
        let mut state = self.record("draw_triangles_u32");
        let element_buffer = state
            .bound_buffers
            .get(&BufferTarget::ElementArray)
            .copied()
            .unwrap_or(NULL_HANDLE);
        let program = state.current_program;
        let vertex_array = state.bound_vertex_array;
        if program == NULL_HANDLE || vertex_array == NULL_HANDLE || element_buffer == NULL_HANDLE {
            state.rejected_draws += 1;
            return;
        }
        let enabled_attributes = state.enabled_attributes.iter().copied().collect();
        state.draws.push(DrawCall {
            program,
            vertex_array,
            element_buffer,
            index_count,
            enabled_attributes,
        });
    }

    fn describe(&self) -> String {
        self.record("describe");
        "OpenGL 4.5 (mock)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_and_non_zero() {
        let gl = MockGl::new();
        let a = gl.create_buffer().unwrap();
        let b = gl.create_shader(ShaderStage::Vertex).unwrap();
        assert_ne!(a, NULL_HANDLE);
        assert_ne!(a, b);
    }

    #[test]
    fn test_link_requires_both_compiled_stages() {
        let gl = MockGl::new();
        let vertex = gl.create_shader(ShaderStage::Vertex).unwrap();
        let program = gl.create_program().unwrap();
        gl.shader_source(vertex, "void main() {}");
        gl.compile_shader(vertex);
        gl.attach_shader(program, vertex);
        gl.link_program(program);

        assert!(!gl.program_link_status(program));
        assert!(gl.program_info_log(program).contains("fragment"));
    }

    #[test]
    fn test_draw_without_program_is_rejected() {
        let gl = MockGl::new();
        gl.draw_triangles_u32(3, 0);
        assert!(gl.draw_calls().is_empty());
        assert_eq!(gl.rejected_draws(), 1);
    }

    #[test]
    fn test_using_unlinked_program_is_an_error() {
        let gl = MockGl::new();
        let program = gl.create_program().unwrap();
        gl.use_program(program);
        assert_eq!(gl.current_program(), NULL_HANDLE);
        assert_eq!(gl.error_count(), 1);
    }
}
