/// Texture parameters and texture descriptor

/// Channel layout of the pixel buffer (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// 3 bytes per pixel
    Rgb,
    /// 4 bytes per pixel
    Rgba,
}

impl ChannelLayout {
    /// Bytes per pixel
    pub fn channel_count(&self) -> u32 {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Layout for a decoded channel count, if supported
    pub fn from_channel_count(channels: u32) -> Option<Self> {
        match channels {
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

/// Texel filtering
///
/// Magnification uses the filter as-is; minification samples the mip chain
/// with the matching mipmap filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc<'a> {
    /// Tightly packed rows, first row at the bottom of the texture
    pub pixels: &'a [u8],
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel channel layout (must match `pixels`)
    pub channels: ChannelLayout,
    /// Wrap mode for both S and T
    pub wrap: WrapMode,
    /// Filter mode
    pub filter: FilterMode,
    /// Fixed texture unit slot
    pub slot: u32,
}

impl TextureDesc<'_> {
    /// Expected length of `pixels` in bytes
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels.channel_count() as usize
    }
}

/// Number of levels in a full mip chain for a `width` x `height` base level
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    u32::BITS - largest.leading_zeros()
}
