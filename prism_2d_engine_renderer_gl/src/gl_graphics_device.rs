/// GlGraphicsDevice - GraphicsDevice over an OpenGL 3.3+/4.x core context

use std::cell::RefCell;
use glow::HasContext;
use slotmap::{Key, SlotMap};

use prism_2d_engine::prism2d::device::{
    BufferKey, BufferKind, DrawCall, ProgramKey, ShaderStage, StageKey, TextureDesc, TextureKey,
    UniformLocation, UniformValue, VertexArrayKey, VertexAttribute,
};
use prism_2d_engine::prism2d::{GraphicsDevice, Result};
use prism_2d_engine::{engine_err, engine_info, engine_warn};

use crate::gl_conversions::{
    buffer_target, channels_to_gl, mag_filter_to_gl, min_filter_to_gl, stage_to_gl, texture_unit,
    wrap_to_gl,
};

/// OpenGL device
///
/// Engine keys map to GL object names through one slot map per object kind.
/// All calls go to the wrapped context, which must stay current on this
/// thread for the device's whole life.
pub struct GlGraphicsDevice {
    gl: glow::Context,
    stages: RefCell<SlotMap<StageKey, glow::Shader>>,
    programs: RefCell<SlotMap<ProgramKey, glow::Program>>,
    buffers: RefCell<SlotMap<BufferKey, glow::Buffer>>,
    vertex_arrays: RefCell<SlotMap<VertexArrayKey, glow::VertexArray>>,
    textures: RefCell<SlotMap<TextureKey, glow::Texture>>,
}

impl GlGraphicsDevice {
    /// Wrap a loaded context that is current on the calling thread
    pub fn new(gl: glow::Context) -> Self {
        // SAFETY: the caller guarantees the context is current
        let (version, renderer) = unsafe {
            (
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
            )
        };
        engine_info!("prism2d::gl", "OpenGL {} on {}", version, renderer);

        Self {
            gl,
            stages: RefCell::new(SlotMap::with_key()),
            programs: RefCell::new(SlotMap::with_key()),
            buffers: RefCell::new(SlotMap::with_key()),
            vertex_arrays: RefCell::new(SlotMap::with_key()),
            textures: RefCell::new(SlotMap::with_key()),
        }
    }

    fn stage(&self, key: StageKey) -> Option<glow::Shader> {
        lookup(&self.stages, key, "stage")
    }

    fn program(&self, key: ProgramKey) -> Option<glow::Program> {
        lookup(&self.programs, key, "program")
    }

    fn vertex_array(&self, key: VertexArrayKey) -> Option<glow::VertexArray> {
        lookup(&self.vertex_arrays, key, "vertex array")
    }

    fn texture(&self, key: TextureKey) -> Option<glow::Texture> {
        lookup(&self.textures, key, "texture")
    }
}

fn lookup<K: Key, V: Copy>(map: &RefCell<SlotMap<K, V>>, key: K, what: &str) -> Option<V> {
    let value = map.borrow().get(key).copied();
    if value.is_none() {
        engine_warn!("prism2d::gl", "Unknown {} key {:?}, call ignored", what, key);
    }
    value
}

impl GraphicsDevice for GlGraphicsDevice {
    // ===== SHADER STAGES =====

    fn create_stage(&self, stage: ShaderStage) -> Result<StageKey> {
        let shader = unsafe { self.gl.create_shader(stage_to_gl(stage)) }
            .map_err(|e| engine_err!("prism2d::gl", "Failed to create {} shader object: {}", stage, e))?;
        Ok(self.stages.borrow_mut().insert(shader))
    }

    fn compile_stage(&self, stage: StageKey, source: &str) -> bool {
        let Some(shader) = self.stage(stage) else {
            return false;
        };
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            self.gl.get_shader_compile_status(shader)
        }
    }

    fn stage_info_log(&self, stage: StageKey) -> String {
        self.stage(stage)
            .map(|shader| unsafe { self.gl.get_shader_info_log(shader) })
            .unwrap_or_default()
    }

    fn delete_stage(&self, stage: StageKey) {
        if let Some(shader) = self.stages.borrow_mut().remove(stage) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<ProgramKey> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| engine_err!("prism2d::gl", "Failed to create program object: {}", e))?;
        Ok(self.programs.borrow_mut().insert(program))
    }

    fn attach_stage(&self, program: ProgramKey, stage: StageKey) {
        if let (Some(program), Some(shader)) = (self.program(program), self.stage(stage)) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn link_program(&self, program: ProgramKey) -> bool {
        let Some(program) = self.program(program) else {
            return false;
        };
        unsafe {
            self.gl.link_program(program);
            self.gl.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: ProgramKey) -> String {
        self.program(program)
            .map(|program| unsafe { self.gl.get_program_info_log(program) })
            .unwrap_or_default()
    }

    fn use_program(&self, program: ProgramKey) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.use_program(Some(program)) };
        }
    }

    fn uniform_location(&self, program: ProgramKey, name: &str) -> Option<UniformLocation> {
        let program = self.program(program)?;
        unsafe { self.gl.get_uniform_location(program, name) }
            .map(|location| UniformLocation(location.0))
    }

    fn write_uniform(&self, location: UniformLocation, value: &UniformValue) {
        let location = glow::NativeUniformLocation(location.0);
        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(Some(&location), *v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(Some(&location), *v),
                UniformValue::Mat4(m) => {
                    self.gl.uniform_matrix_4_f32_slice(Some(&location), false, &m.to_cols_array())
                }
            }
        }
    }

    fn delete_program(&self, program: ProgramKey) {
        if let Some(program) = self.programs.borrow_mut().remove(program) {
            unsafe { self.gl.delete_program(program) };
        }
    }

    // ===== GEOMETRY =====

    fn create_vertex_array(&self) -> Result<VertexArrayKey> {
        let vertex_array = unsafe { self.gl.create_vertex_array() }
            .map_err(|e| engine_err!("prism2d::gl", "Failed to create vertex array: {}", e))?;
        Ok(self.vertex_arrays.borrow_mut().insert(vertex_array))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayKey>) {
        let vertex_array = match vertex_array {
            Some(key) => match self.vertex_array(key) {
                Some(vertex_array) => Some(vertex_array),
                None => return,
            },
            None => None,
        };
        unsafe { self.gl.bind_vertex_array(vertex_array) };
    }

    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferKey> {
        let target = buffer_target(kind);
        let buffer = unsafe { self.gl.create_buffer() }
            .map_err(|e| engine_err!("prism2d::gl", "Failed to create {:?} buffer: {}", kind, e))?;
        unsafe {
            self.gl.bind_buffer(target, Some(buffer));
            self.gl.buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
        }
        Ok(self.buffers.borrow_mut().insert(buffer))
    }

    fn set_vertex_attribute(&self, attribute: &VertexAttribute) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                attribute.index,
                attribute.component_count as i32,
                glow::FLOAT,
                false,
                attribute.stride as i32,
                attribute.byte_offset as i32,
            );
            self.gl.enable_vertex_attrib_array(attribute.index);
        }
    }

    fn delete_buffer(&self, buffer: BufferKey) {
        if let Some(buffer) = self.buffers.borrow_mut().remove(buffer) {
            unsafe { self.gl.delete_buffer(buffer) };
        }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayKey) {
        if let Some(vertex_array) = self.vertex_arrays.borrow_mut().remove(vertex_array) {
            unsafe { self.gl.delete_vertex_array(vertex_array) };
        }
    }

    // ===== TEXTURES =====

    fn create_texture(&self, desc: &TextureDesc) -> Result<TextureKey> {
        let texture = unsafe { self.gl.create_texture() }
            .map_err(|e| engine_err!("prism2d::gl", "Failed to create texture: {}", e))?;
        let format = channels_to_gl(desc.channels);
        unsafe {
            self.gl.active_texture(texture_unit(desc.slot));
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap_to_gl(desc.wrap));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap_to_gl(desc.wrap));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter_to_gl(desc.filter));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, mag_filter_to_gl(desc.filter));
            // RGB rows are not 4-byte aligned in general
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                desc.width as i32,
                desc.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(desc.pixels)),
            );
        }
        Ok(self.textures.borrow_mut().insert(texture))
    }

    fn generate_mipmaps(&self, texture: TextureKey) {
        if let Some(texture) = self.texture(texture) {
            unsafe {
                self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
                self.gl.generate_mipmap(glow::TEXTURE_2D);
            }
        }
    }

    fn bind_texture(&self, slot: u32, texture: TextureKey) {
        if let Some(texture) = self.texture(texture) {
            unsafe {
                self.gl.active_texture(texture_unit(slot));
                self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            }
        }
    }

    fn delete_texture(&self, texture: TextureKey) {
        if let Some(texture) = self.textures.borrow_mut().remove(texture) {
            unsafe { self.gl.delete_texture(texture) };
        }
    }

    // ===== FRAME =====

    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        unsafe { self.gl.viewport(x, y, width as i32, height as i32) };
    }

    fn clear(&self, color: [f32; 4]) {
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw(&self, call: DrawCall) {
        unsafe {
            match call {
                DrawCall::Arrays { first, count } => {
                    self.gl.draw_arrays(glow::TRIANGLES, first as i32, count as i32)
                }
                DrawCall::Indexed { count } => {
                    self.gl.draw_elements(glow::TRIANGLES, count as i32, glow::UNSIGNED_INT, 0)
                }
            }
        }
    }
}

impl Drop for GlGraphicsDevice {
    fn drop(&mut self) {
        let leaked = self.stages.borrow().len()
            + self.programs.borrow().len()
            + self.buffers.borrow().len()
            + self.vertex_arrays.borrow().len()
            + self.textures.borrow().len();
        if leaked > 0 {
            engine_warn!("prism2d::gl", "{} GL objects still alive when the device was dropped", leaked);
        }
    }
}
