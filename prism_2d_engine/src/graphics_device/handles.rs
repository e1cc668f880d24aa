/// Opaque GPU object handles
///
/// Backends keep their native objects in slot maps keyed by these types, so
/// the core never sees a raw GL name and a deleted handle can't alias a new one.

slotmap::new_key_type! {
    /// A single compiled (or failed) shader stage object
    pub struct StageKey;

    /// A program object
    pub struct ProgramKey;

    /// A vertex or index buffer object
    pub struct BufferKey;

    /// A vertex-array object (attribute layout + buffer bindings)
    pub struct VertexArrayKey;

    /// A 2D texture object
    pub struct TextureKey;
}

/// Resolved uniform location inside the currently linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);
