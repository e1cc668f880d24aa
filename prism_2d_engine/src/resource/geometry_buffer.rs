/// GeometryBuffer - vertex array, vertex/index buffers and attribute layout

use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferKey, BufferKind, DrawCall, GraphicsDevice, VertexArrayKey, VertexLayout,
};
use crate::{engine_debug, engine_error};

/// Geometry uploaded once with static usage
///
/// Indexed when created with indices. The draw count is fixed at creation:
/// the index count when indexed, otherwise the number of whole vertices.
#[derive(Debug)]
pub struct GeometryBuffer {
    vertex_array: VertexArrayKey,
    vertex_buffer: BufferKey,
    index_buffer: Option<BufferKey>,
    layout: VertexLayout,
    draw_call: DrawCall,
}

impl GeometryBuffer {
    /// Upload `vertices` (and `indices`, if any) and apply `layout`
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if the layout is inconsistent or the vertex data
    ///   isn't a whole number of vertices
    /// - any allocation error from the device; objects created before the
    ///   failure are deleted
    pub fn create(
        device: &dyn GraphicsDevice,
        vertices: &[f32],
        indices: Option<&[u32]>,
        layout: VertexLayout,
    ) -> Result<GeometryBuffer> {
        validate(vertices, indices, &layout)?;

        let vertex_count = vertices.len() as u32 / layout.floats_per_vertex();
        let draw_call = match indices {
            Some(indices) => DrawCall::Indexed { count: indices.len() as u32 },
            None => DrawCall::Arrays { first: 0, count: vertex_count },
        };

        let vertex_array = device.create_vertex_array()?;
        device.bind_vertex_array(Some(vertex_array));

        let vertex_buffer = match device.create_buffer(BufferKind::Vertex, bytemuck::cast_slice(vertices)) {
            Ok(buffer) => buffer,
            Err(err) => {
                device.bind_vertex_array(None);
                device.delete_vertex_array(vertex_array);
                return Err(err);
            }
        };

        let index_buffer = match indices {
            Some(indices) => match device.create_buffer(BufferKind::Index, bytemuck::cast_slice(indices)) {
                Ok(buffer) => Some(buffer),
                Err(err) => {
                    device.bind_vertex_array(None);
                    device.delete_buffer(vertex_buffer);
                    device.delete_vertex_array(vertex_array);
                    return Err(err);
                }
            },
            None => None,
        };

        for attribute in &layout.attributes {
            device.set_vertex_attribute(attribute);
        }
        device.bind_vertex_array(None);

        engine_debug!("prism2d::resource", "Geometry uploaded: {} vertices, {:?}", vertex_count, draw_call);

        Ok(GeometryBuffer {
            vertex_array,
            vertex_buffer,
            index_buffer,
            layout,
            draw_call,
        })
    }

    /// Bind the vertex array for drawing
    pub fn bind(&self, device: &dyn GraphicsDevice) {
        device.bind_vertex_array(Some(self.vertex_array));
    }

    /// Bind and issue one triangle draw call
    pub fn draw(&self, device: &dyn GraphicsDevice) {
        self.bind(device);
        device.draw(self.draw_call);
    }

    /// The draw call issued by [`GeometryBuffer::draw`]
    pub fn draw_call(&self) -> DrawCall {
        self.draw_call
    }

    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn vertex_array(&self) -> VertexArrayKey {
        self.vertex_array
    }

    /// Delete the buffers, then the vertex array
    pub fn destroy(self, device: &dyn GraphicsDevice) {
        device.delete_buffer(self.vertex_buffer);
        if let Some(index_buffer) = self.index_buffer {
            device.delete_buffer(index_buffer);
        }
        device.delete_vertex_array(self.vertex_array);
    }
}

fn invalid(message: String) -> Error {
    engine_error!("prism2d::resource", "Invalid geometry: {}", message);
    Error::InvalidResource(message)
}

fn validate(vertices: &[f32], indices: Option<&[u32]>, layout: &VertexLayout) -> Result<()> {
    if layout.attributes.is_empty() {
        return Err(invalid("vertex layout has no attributes".to_string()));
    }

    for attribute in &layout.attributes {
        if !(1..=4).contains(&attribute.component_count) {
            return Err(invalid(format!(
                "attribute {} has {} components (expected 1..=4)",
                attribute.index, attribute.component_count
            )));
        }
    }

    // One interleaved stream: stride 0 is only meaningful for a lone attribute
    if layout.attributes.len() > 1 {
        let stride = layout.attributes[0].stride;
        if stride == 0 || layout.attributes.iter().any(|a| a.stride != stride) {
            return Err(invalid(format!(
                "{} attributes must share one non-zero interleaved stride",
                layout.attributes.len()
            )));
        }
    }

    let vertex_size = layout.vertex_size_bytes();
    if vertex_size == 0 || vertex_size % std::mem::size_of::<f32>() as u32 != 0 {
        return Err(invalid(format!("vertex size of {} bytes is not a whole number of floats", vertex_size)));
    }

    for attribute in &layout.attributes {
        match attribute.byte_offset.checked_add(attribute.size_bytes()) {
            Some(end) if end <= vertex_size => {}
            Some(end) => {
                return Err(invalid(format!(
                    "attribute {} ends at byte {} past the {}-byte vertex",
                    attribute.index, end, vertex_size
                )));
            }
            None => {
                return Err(invalid(format!(
                    "attribute {} offset {} overflows the vertex",
                    attribute.index, attribute.byte_offset
                )));
            }
        }
    }

    let floats_per_vertex = layout.floats_per_vertex() as usize;
    if vertices.is_empty() || vertices.len() % floats_per_vertex != 0 {
        return Err(invalid(format!(
            "{} floats is not a whole number of {}-float vertices",
            vertices.len(),
            floats_per_vertex
        )));
    }

    if let Some(indices) = indices {
        if indices.is_empty() {
            return Err(invalid("index data is empty".to_string()));
        }
        let vertex_count = (vertices.len() / floats_per_vertex) as u32;
        if let Some(&out_of_range) = indices.iter().find(|&&index| index >= vertex_count) {
            return Err(invalid(format!(
                "index {} out of range for {} vertices",
                out_of_range, vertex_count
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "geometry_buffer_tests.rs"]
mod tests;
