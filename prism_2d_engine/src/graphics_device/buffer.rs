/// Buffer kinds, vertex attribute descriptors and draw calls

/// Buffer target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Vertex buffer (array buffer)
    Vertex,
    /// Index buffer (element array buffer)
    Index,
}

/// Vertex attribute description
///
/// All attributes are 32-bit floats, not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location in the vertex stage
    pub index: u32,
    /// Number of float components (1..=4)
    pub component_count: u32,
    /// Stride in bytes between consecutive vertices (0 = tightly packed)
    pub stride: u32,
    /// Offset in bytes from the start of the vertex
    pub byte_offset: u32,
}

impl VertexAttribute {
    /// Size of this attribute in bytes
    pub fn size_bytes(&self) -> u32 {
        self.component_count * std::mem::size_of::<f32>() as u32
    }
}

/// Vertex input layout
///
/// Must match the attribute declarations of the active vertex stage; that match
/// is the caller's contract and is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    /// Attributes, in application order
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Layout from explicit descriptors
    pub fn new(attributes: Vec<VertexAttribute>) -> Self {
        Self { attributes }
    }

    /// Tightly packed interleaved floats; attribute `i` gets location `i`
    ///
    /// `interleaved(&[3, 3, 2])` describes `position.xyz, color.rgb, uv.st`
    /// with a 32-byte stride.
    pub fn interleaved(component_counts: &[u32]) -> Self {
        let float_size = std::mem::size_of::<f32>() as u32;
        let stride = component_counts.iter().sum::<u32>() * float_size;
        let mut offset = 0;
        let attributes = component_counts
            .iter()
            .enumerate()
            .map(|(index, &component_count)| {
                let attribute = VertexAttribute {
                    index: index as u32,
                    component_count,
                    stride,
                    byte_offset: offset,
                };
                offset += component_count * float_size;
                attribute
            })
            .collect();
        Self { attributes }
    }

    /// Bytes per vertex
    ///
    /// Taken from the first non-zero stride. A stride of 0 means the
    /// attributes are tightly packed, which only describes a single-attribute
    /// layout; `GeometryBuffer::create` rejects anything else.
    pub fn vertex_size_bytes(&self) -> u32 {
        self.attributes
            .iter()
            .map(|a| a.stride)
            .find(|&stride| stride != 0)
            .unwrap_or_else(|| self.attributes.iter().map(VertexAttribute::size_bytes).sum())
    }

    /// Floats per vertex
    pub fn floats_per_vertex(&self) -> u32 {
        self.vertex_size_bytes() / std::mem::size_of::<f32>() as u32
    }
}

/// One draw submission (always triangle lists)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Non-indexed draw of `count` vertices starting at `first`
    Arrays { first: u32, count: u32 },
    /// Indexed draw of `count` 32-bit indices from the bound index buffer
    Indexed { count: u32 },
}
