/// GraphicsDevice trait - the GPU API seam
///
/// Methods mirror the immediate-mode GL calls the engine needs and take `&self`
/// like the API they wrap. Every call assumes the owning context is current on
/// the calling thread; that is not checked.

use crate::error::Result;
use crate::graphics_device::{
    BufferKey, BufferKind, DrawCall, ProgramKey, ShaderStage, StageKey, TextureDesc,
    TextureKey, UniformLocation, UniformValue, VertexArrayKey, VertexAttribute,
};

/// Main GPU device trait
///
/// Implemented by backend devices (`GlGraphicsDevice`) and by the recording
/// `MockGraphicsDevice` used in tests.
pub trait GraphicsDevice {
    // ===== SHADER STAGES =====

    /// Create an empty shader stage object
    fn create_stage(&self, stage: ShaderStage) -> Result<StageKey>;

    /// Set the stage source and compile it; returns the compile status
    fn compile_stage(&self, stage: StageKey, source: &str) -> bool;

    /// Compiler diagnostic of the last compilation
    fn stage_info_log(&self, stage: StageKey) -> String;

    /// Delete a stage object (deferred by the driver while attached)
    fn delete_stage(&self, stage: StageKey);

    // ===== PROGRAMS =====

    /// Create an empty program object
    fn create_program(&self) -> Result<ProgramKey>;

    /// Attach a compiled stage to a program
    fn attach_stage(&self, program: ProgramKey, stage: StageKey);

    /// Link the program; returns the link status
    fn link_program(&self, program: ProgramKey) -> bool;

    /// Linker diagnostic of the last link
    fn program_info_log(&self, program: ProgramKey) -> String;

    /// Make the program current for subsequent draws and uniform writes
    fn use_program(&self, program: ProgramKey);

    /// Location of a uniform by exact name, `None` if the program has no such active uniform
    fn uniform_location(&self, program: ProgramKey, name: &str) -> Option<UniformLocation>;

    /// Write a uniform of the current program
    fn write_uniform(&self, location: UniformLocation, value: &UniformValue);

    /// Delete a program object
    fn delete_program(&self, program: ProgramKey);

    // ===== GEOMETRY =====

    /// Create a vertex-array object
    fn create_vertex_array(&self) -> Result<VertexArrayKey>;

    /// Bind a vertex-array object (`None` unbinds)
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayKey>);

    /// Create a buffer, bind it to its target and upload `data` with static usage
    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferKey>;

    /// Describe and enable one float attribute of the bound vertex buffer
    fn set_vertex_attribute(&self, attribute: &VertexAttribute);

    /// Delete a buffer object
    fn delete_buffer(&self, buffer: BufferKey);

    /// Delete a vertex-array object
    fn delete_vertex_array(&self, vertex_array: VertexArrayKey);

    // ===== TEXTURES =====

    /// Create a texture on `desc.slot`, set wrap/filter and upload the base level
    fn create_texture(&self, desc: &TextureDesc) -> Result<TextureKey>;

    /// Generate the mip chain of a texture from its base level
    fn generate_mipmaps(&self, texture: TextureKey);

    /// Bind a texture to a texture unit slot
    fn bind_texture(&self, slot: u32, texture: TextureKey);

    /// Delete a texture object
    fn delete_texture(&self, texture: TextureKey);

    // ===== FRAME =====

    /// Set the viewport rectangle
    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32);

    /// Clear the color buffer
    fn clear(&self, color: [f32; 4]);

    /// Submit one triangle-list draw with the bound state
    fn draw(&self, call: DrawCall);
}
