/// Engine enums to GL constants

use prism_2d_engine::prism2d::device::{BufferKind, ChannelLayout, FilterMode, ShaderStage, WrapMode};

pub(crate) fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

pub(crate) fn buffer_target(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Vertex => glow::ARRAY_BUFFER,
        BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

pub(crate) fn wrap_to_gl(wrap: WrapMode) -> i32 {
    (match wrap {
        WrapMode::Repeat => glow::REPEAT,
        WrapMode::MirroredRepeat => glow::MIRRORED_REPEAT,
        WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
    }) as i32
}

/// Magnification filter
pub(crate) fn mag_filter_to_gl(filter: FilterMode) -> i32 {
    (match filter {
        FilterMode::Nearest => glow::NEAREST,
        FilterMode::Linear => glow::LINEAR,
    }) as i32
}

/// Minification filter, sampling the mip chain
pub(crate) fn min_filter_to_gl(filter: FilterMode) -> i32 {
    (match filter {
        FilterMode::Nearest => glow::NEAREST_MIPMAP_NEAREST,
        FilterMode::Linear => glow::LINEAR_MIPMAP_LINEAR,
    }) as i32
}

/// Pixel format, also used as the internal format
pub(crate) fn channels_to_gl(channels: ChannelLayout) -> u32 {
    match channels {
        ChannelLayout::Rgb => glow::RGB,
        ChannelLayout::Rgba => glow::RGBA,
    }
}

/// Texture unit enum for a slot index
pub(crate) fn texture_unit(slot: u32) -> u32 {
    glow::TEXTURE0 + slot
}

#[cfg(test)]
#[path = "gl_conversions_tests.rs"]
mod tests;
