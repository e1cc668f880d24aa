/// Shader module - source loading, stage compilation, linking and the program wrapper

pub mod source_loader;
pub mod stage_compiler;
pub mod program_linker;
pub mod shader_program;

pub use source_loader::*;
pub use stage_compiler::*;
pub use program_linker::*;
pub use shader_program::*;
