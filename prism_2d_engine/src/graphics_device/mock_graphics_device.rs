/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// The mock records every call, tracks which GPU objects are still alive and
/// emulates just enough of a GLSL driver to make build failures realistic:
/// - a stage fails to compile on unbalanced braces/parentheses, a missing
///   `main`, or an `#error` directive;
/// - a program fails to link when it lacks a stage, holds an uncompiled stage,
///   or a fragment `in` has no vertex `out` of the same name and type;
/// - active uniforms are the `uniform` declarations of the attached stages,
///   located in declaration order.

use std::cell::RefCell;
use std::collections::HashMap;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferKey, BufferKind, ChannelLayout, DrawCall, FilterMode, GraphicsDevice, ProgramKey,
    ShaderStage, StageKey, TextureDesc, TextureKey, UniformLocation, UniformValue,
    VertexArrayKey, VertexAttribute, WrapMode, mip_level_count,
};

// ============================================================================
// Recorded calls
// ============================================================================

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateStage(ShaderStage),
    CompileStage(StageKey),
    DeleteStage(StageKey),
    CreateProgram(ProgramKey),
    AttachStage { program: ProgramKey, stage: StageKey },
    LinkProgram(ProgramKey),
    UseProgram(ProgramKey),
    WriteUniform { location: UniformLocation, value: UniformValue },
    DeleteProgram(ProgramKey),
    CreateVertexArray(VertexArrayKey),
    BindVertexArray(Option<VertexArrayKey>),
    CreateBuffer { kind: BufferKind, len: usize },
    SetVertexAttribute(VertexAttribute),
    DeleteBuffer(BufferKey),
    DeleteVertexArray(VertexArrayKey),
    CreateTexture { slot: u32, width: u32, height: u32 },
    GenerateMipmaps(TextureKey),
    BindTexture { slot: u32, texture: TextureKey },
    DeleteTexture(TextureKey),
    SetViewport { x: i32, y: i32, width: u32, height: u32 },
    Clear([f32; 4]),
    Draw(DrawCall),
}

// ============================================================================
// Mock objects
// ============================================================================

/// Mock shader stage
#[derive(Debug, Clone)]
pub struct MockStage {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub info_log: String,
}

/// Mock program
#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    /// Snapshot of the attached stages (kind, source, compiled)
    pub attached: Vec<(ShaderStage, String, bool)>,
    pub linked: bool,
    pub info_log: String,
    /// Active uniform names; the index is the location
    pub uniforms: Vec<String>,
    /// Last value written per uniform name
    pub values: HashMap<String, UniformValue>,
}

/// Mock buffer
#[derive(Debug, Clone)]
pub struct MockBuffer {
    pub kind: BufferKind,
    pub len: usize,
}

/// Mock vertex-array object
#[derive(Debug, Clone, Default)]
pub struct MockVertexArray {
    pub vertex_buffer: Option<BufferKey>,
    pub index_buffer: Option<BufferKey>,
    pub attributes: Vec<VertexAttribute>,
}

/// Mock texture
#[derive(Debug, Clone)]
pub struct MockTexture {
    pub slot: u32,
    pub width: u32,
    pub height: u32,
    pub channels: ChannelLayout,
    pub wrap: WrapMode,
    pub filter: FilterMode,
    /// 1 after upload, the full chain after `generate_mipmaps`
    pub mip_levels: u32,
}

#[derive(Debug, Default)]
struct MockState {
    stages: SlotMap<StageKey, MockStage>,
    programs: SlotMap<ProgramKey, MockProgram>,
    buffers: SlotMap<BufferKey, MockBuffer>,
    vertex_arrays: SlotMap<VertexArrayKey, MockVertexArray>,
    textures: SlotMap<TextureKey, MockTexture>,
    current_program: Option<ProgramKey>,
    bound_vertex_array: Option<VertexArrayKey>,
    bound_textures: HashMap<u32, TextureKey>,
    calls: Vec<DeviceCall>,
    fail_allocations: bool,
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that records calls and tracks live objects without a GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    state: RefCell<MockState>,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `create_*` call fail with a backend error
    pub fn set_fail_allocations(&self, fail: bool) {
        self.state.borrow_mut().fail_allocations = fail;
    }

    /// All recorded calls, oldest first
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state.borrow().calls.clone()
    }

    /// Forget recorded calls (objects stay alive)
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Recorded draw submissions
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::Draw(draw) => Some(*draw),
                _ => None,
            })
            .collect()
    }

    pub fn live_stage_count(&self) -> usize {
        self.state.borrow().stages.len()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_vertex_array_count(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    pub fn live_texture_count(&self) -> usize {
        self.state.borrow().textures.len()
    }

    /// Program made current by the last `use_program`
    pub fn current_program(&self) -> Option<ProgramKey> {
        self.state.borrow().current_program
    }

    /// Snapshot of a live program
    pub fn program(&self, program: ProgramKey) -> Option<MockProgram> {
        self.state.borrow().programs.get(program).cloned()
    }

    /// Last value written to a uniform of a program
    pub fn uniform_value(&self, program: ProgramKey, name: &str) -> Option<UniformValue> {
        self.state
            .borrow()
            .programs
            .get(program)
            .and_then(|p| p.values.get(name).copied())
    }

    /// Snapshot of a live texture
    pub fn texture(&self, texture: TextureKey) -> Option<MockTexture> {
        self.state.borrow().textures.get(texture).cloned()
    }

    /// Texture currently bound to a slot
    pub fn bound_texture(&self, slot: u32) -> Option<TextureKey> {
        self.state.borrow().bound_textures.get(&slot).copied()
    }

    /// Snapshot of a live vertex-array object
    pub fn vertex_array(&self, vertex_array: VertexArrayKey) -> Option<MockVertexArray> {
        self.state.borrow().vertex_arrays.get(vertex_array).cloned()
    }

    /// Snapshot of a live buffer
    pub fn buffer(&self, buffer: BufferKey) -> Option<MockBuffer> {
        self.state.borrow().buffers.get(buffer).cloned()
    }

    fn record(&self, call: DeviceCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn check_allocation(&self, what: &str) -> Result<()> {
        if self.state.borrow().fail_allocations {
            return Err(Error::BackendError(format!("mock: {} allocation failed", what)));
        }
        Ok(())
    }
}

// ============================================================================
// Tiny GLSL checker
// ============================================================================

/// A top-level `in` / `out` / `uniform` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    qualifier: String,
    ty: String,
    name: String,
}

fn declarations(source: &str) -> Vec<Declaration> {
    let mut out = Vec::new();
    for raw in source.lines() {
        let line = raw.split("//").next().unwrap_or("").trim();
        let line = match line.strip_prefix("layout") {
            Some(rest) => match rest.find(')') {
                Some(end) => rest[end + 1..].trim(),
                None => continue,
            },
            None => line,
        };
        let mut tokens = line
            .split_whitespace()
            .filter(|t| !matches!(*t, "flat" | "smooth" | "lowp" | "mediump" | "highp"));
        let qualifier = match tokens.next() {
            Some(q @ ("in" | "out" | "uniform")) => q,
            _ => continue,
        };
        let (Some(ty), Some(name)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        let name = name.trim_end_matches(';');
        let name = name.split('[').next().unwrap_or(name);
        out.push(Declaration {
            qualifier: qualifier.to_string(),
            ty: ty.to_string(),
            name: name.to_string(),
        });
    }
    out
}

fn compile_diagnostic(source: &str) -> Option<String> {
    for (number, line) in source.lines().enumerate() {
        if let Some(message) = line.trim().strip_prefix("#error") {
            return Some(format!("0:{}(1): error: {}", number + 1, message.trim()));
        }
    }

    let mut braces = 0i32;
    let mut parens = 0i32;
    for (number, line) in source.lines().enumerate() {
        for c in line.split("//").next().unwrap_or("").chars() {
            match c {
                '{' => braces += 1,
                '}' => braces -= 1,
                '(' => parens += 1,
                ')' => parens -= 1,
                _ => {}
            }
            if braces < 0 || parens < 0 {
                return Some(format!("0:{}(1): error: syntax error, unexpected '{}'", number + 1, c));
            }
        }
    }
    if braces != 0 {
        return Some("0:0(0): error: syntax error, unexpected end of file, expecting '}'".to_string());
    }
    if parens != 0 {
        return Some("0:0(0): error: syntax error, unexpected end of file, expecting ')'".to_string());
    }

    if !source.contains("void main") {
        return Some("error: main function not defined".to_string());
    }
    None
}

fn link_diagnostic(attached: &[(ShaderStage, String, bool)]) -> Option<String> {
    let vertex = attached.iter().find(|(stage, _, _)| *stage == ShaderStage::Vertex);
    let fragment = attached.iter().find(|(stage, _, _)| *stage == ShaderStage::Fragment);
    let (Some(vertex), Some(fragment)) = (vertex, fragment) else {
        return Some("error: program lacks a vertex or fragment shader".to_string());
    };
    if !vertex.2 || !fragment.2 {
        return Some("error: linking with uncompiled/unspecialized shader".to_string());
    }

    let outputs: Vec<Declaration> = declarations(&vertex.1)
        .into_iter()
        .filter(|d| d.qualifier == "out")
        .collect();
    for input in declarations(&fragment.1).into_iter().filter(|d| d.qualifier == "in") {
        match outputs.iter().find(|o| o.name == input.name) {
            None => {
                return Some(format!(
                    "error: fragment shader input `{}' has no matching output in the previous stage",
                    input.name
                ));
            }
            Some(output) if output.ty != input.ty => {
                return Some(format!(
                    "error: `{}' declared as type `{}' but outputted from previous stage as type `{}'",
                    input.name, input.ty, output.ty
                ));
            }
            Some(_) => {}
        }
    }
    None
}

// ============================================================================
// GraphicsDevice implementation
// ============================================================================

impl GraphicsDevice for MockGraphicsDevice {
    fn create_stage(&self, stage: ShaderStage) -> Result<StageKey> {
        self.check_allocation("stage")?;
        self.record(DeviceCall::CreateStage(stage));
        Ok(self.state.borrow_mut().stages.insert(MockStage {
            stage,
            source: String::new(),
            compiled: false,
            info_log: String::new(),
        }))
    }

    fn compile_stage(&self, stage: StageKey, source: &str) -> bool {
        self.record(DeviceCall::CompileStage(stage));
        let mut state = self.state.borrow_mut();
        let Some(entry) = state.stages.get_mut(stage) else {
            return false;
        };
        entry.source = source.to_string();
        match compile_diagnostic(source) {
            Some(log) => {
                entry.compiled = false;
                entry.info_log = log;
            }
            None => {
                entry.compiled = true;
                entry.info_log.clear();
            }
        }
        entry.compiled
    }

    fn stage_info_log(&self, stage: StageKey) -> String {
        self.state
            .borrow()
            .stages
            .get(stage)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_stage(&self, stage: StageKey) {
        self.record(DeviceCall::DeleteStage(stage));
        self.state.borrow_mut().stages.remove(stage);
    }

    fn create_program(&self) -> Result<ProgramKey> {
        self.check_allocation("program")?;
        let key = self.state.borrow_mut().programs.insert(MockProgram::default());
        self.record(DeviceCall::CreateProgram(key));
        Ok(key)
    }

    fn attach_stage(&self, program: ProgramKey, stage: StageKey) {
        self.record(DeviceCall::AttachStage { program, stage });
        let mut state = self.state.borrow_mut();
        let Some(snapshot) = state
            .stages
            .get(stage)
            .map(|s| (s.stage, s.source.clone(), s.compiled))
        else {
            return;
        };
        if let Some(p) = state.programs.get_mut(program) {
            p.attached.push(snapshot);
        }
    }

    fn link_program(&self, program: ProgramKey) -> bool {
        self.record(DeviceCall::LinkProgram(program));
        let mut state = self.state.borrow_mut();
        let Some(p) = state.programs.get_mut(program) else {
            return false;
        };
        match link_diagnostic(&p.attached) {
            Some(log) => {
                p.linked = false;
                p.info_log = log;
                p.uniforms.clear();
            }
            None => {
                p.linked = true;
                p.info_log.clear();
                let mut uniforms: Vec<String> = Vec::new();
                for (_, source, _) in &p.attached {
                    for decl in declarations(source) {
                        if decl.qualifier == "uniform" && !uniforms.contains(&decl.name) {
                            uniforms.push(decl.name);
                        }
                    }
                }
                p.uniforms = uniforms;
            }
        }
        p.linked
    }

    fn program_info_log(&self, program: ProgramKey) -> String {
        self.state
            .borrow()
            .programs
            .get(program)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: ProgramKey) {
        self.record(DeviceCall::UseProgram(program));
        self.state.borrow_mut().current_program = Some(program);
    }

    fn uniform_location(&self, program: ProgramKey, name: &str) -> Option<UniformLocation> {
        let state = self.state.borrow();
        let p = state.programs.get(program)?;
        if !p.linked {
            return None;
        }
        p.uniforms
            .iter()
            .position(|u| u == name)
            .map(|index| UniformLocation(index as u32))
    }

    fn write_uniform(&self, location: UniformLocation, value: &UniformValue) {
        self.record(DeviceCall::WriteUniform { location, value: *value });
        let mut state = self.state.borrow_mut();
        let Some(current) = state.current_program else {
            return;
        };
        if let Some(p) = state.programs.get_mut(current) {
            if let Some(name) = p.uniforms.get(location.0 as usize).cloned() {
                p.values.insert(name, *value);
            }
        }
    }

    fn delete_program(&self, program: ProgramKey) {
        self.record(DeviceCall::DeleteProgram(program));
        let mut state = self.state.borrow_mut();
        state.programs.remove(program);
        if state.current_program == Some(program) {
            state.current_program = None;
        }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayKey> {
        self.check_allocation("vertex array")?;
        let key = self.state.borrow_mut().vertex_arrays.insert(MockVertexArray::default());
        self.record(DeviceCall::CreateVertexArray(key));
        Ok(key)
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayKey>) {
        self.record(DeviceCall::BindVertexArray(vertex_array));
        self.state.borrow_mut().bound_vertex_array = vertex_array;
    }

    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferKey> {
        self.check_allocation("buffer")?;
        self.record(DeviceCall::CreateBuffer { kind, len: data.len() });
        let mut state = self.state.borrow_mut();
        let key = state.buffers.insert(MockBuffer { kind, len: data.len() });
        if let Some(vao) = state.bound_vertex_array {
            if let Some(vao) = state.vertex_arrays.get_mut(vao) {
                match kind {
                    BufferKind::Vertex => vao.vertex_buffer = Some(key),
                    BufferKind::Index => vao.index_buffer = Some(key),
                }
            }
        }
        Ok(key)
    }

    fn set_vertex_attribute(&self, attribute: &VertexAttribute) {
        self.record(DeviceCall::SetVertexAttribute(*attribute));
        let mut state = self.state.borrow_mut();
        if let Some(vao) = state.bound_vertex_array {
            if let Some(vao) = state.vertex_arrays.get_mut(vao) {
                vao.attributes.push(*attribute);
            }
        }
    }

    fn delete_buffer(&self, buffer: BufferKey) {
        self.record(DeviceCall::DeleteBuffer(buffer));
        self.state.borrow_mut().buffers.remove(buffer);
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayKey) {
        self.record(DeviceCall::DeleteVertexArray(vertex_array));
        let mut state = self.state.borrow_mut();
        state.vertex_arrays.remove(vertex_array);
        if state.bound_vertex_array == Some(vertex_array) {
            state.bound_vertex_array = None;
        }
    }

    fn create_texture(&self, desc: &TextureDesc) -> Result<TextureKey> {
        self.check_allocation("texture")?;
        self.record(DeviceCall::CreateTexture {
            slot: desc.slot,
            width: desc.width,
            height: desc.height,
        });
        let mut state = self.state.borrow_mut();
        let key = state.textures.insert(MockTexture {
            slot: desc.slot,
            width: desc.width,
            height: desc.height,
            channels: desc.channels,
            wrap: desc.wrap,
            filter: desc.filter,
            mip_levels: 1,
        });
        state.bound_textures.insert(desc.slot, key);
        Ok(key)
    }

    fn generate_mipmaps(&self, texture: TextureKey) {
        self.record(DeviceCall::GenerateMipmaps(texture));
        if let Some(t) = self.state.borrow_mut().textures.get_mut(texture) {
            t.mip_levels = mip_level_count(t.width, t.height);
        }
    }

    fn bind_texture(&self, slot: u32, texture: TextureKey) {
        self.record(DeviceCall::BindTexture { slot, texture });
        self.state.borrow_mut().bound_textures.insert(slot, texture);
    }

    fn delete_texture(&self, texture: TextureKey) {
        self.record(DeviceCall::DeleteTexture(texture));
        let mut state = self.state.borrow_mut();
        state.textures.remove(texture);
        state.bound_textures.retain(|_, bound| *bound != texture);
    }

    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        self.record(DeviceCall::SetViewport { x, y, width, height });
    }

    fn clear(&self, color: [f32; 4]) {
        self.record(DeviceCall::Clear(color));
    }

    fn draw(&self, call: DrawCall) {
        self.record(DeviceCall::Draw(call));
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
