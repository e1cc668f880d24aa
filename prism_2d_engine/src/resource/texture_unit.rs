/// TextureUnit - one 2D texture bound to a fixed slot

use crate::error::{Error, Result};
use crate::graphics_device::{
    ChannelLayout, FilterMode, GraphicsDevice, TextureDesc, TextureKey, WrapMode,
};
use crate::resource::DecodedImage;
use crate::{engine_debug, engine_error};

/// A texture with its full mip chain, bound to one slot
#[derive(Debug, PartialEq, Eq)]
pub struct TextureUnit {
    texture: TextureKey,
    slot: u32,
    width: u32,
    height: u32,
    mip_levels: u32,
}

impl TextureUnit {
    /// Upload the base level described by `desc` and generate the mip chain
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for a zero dimension or when `pixels` doesn't hold
    ///   exactly `width * height * channels` bytes
    /// - any allocation error from the device
    pub fn create(device: &dyn GraphicsDevice, desc: &TextureDesc) -> Result<TextureUnit> {
        if desc.width == 0 || desc.height == 0 {
            let message = format!("texture size {}x{} has a zero dimension", desc.width, desc.height);
            engine_error!("prism2d::resource", "Invalid texture: {}", message);
            return Err(Error::InvalidResource(message));
        }
        if desc.pixels.len() != desc.expected_len() {
            let message = format!(
                "{}x{} {:?} texture needs {} bytes, got {}",
                desc.width,
                desc.height,
                desc.channels,
                desc.expected_len(),
                desc.pixels.len()
            );
            engine_error!("prism2d::resource", "Invalid texture: {}", message);
            return Err(Error::InvalidResource(message));
        }

        let texture = device.create_texture(desc)?;
        device.generate_mipmaps(texture);
        let mip_levels = crate::graphics_device::mip_level_count(desc.width, desc.height);

        engine_debug!("prism2d::resource", "Texture {}x{} on slot {} ({} mip levels)",
            desc.width, desc.height, desc.slot, mip_levels);

        Ok(TextureUnit {
            texture,
            slot: desc.slot,
            width: desc.width,
            height: desc.height,
            mip_levels,
        })
    }

    /// Create a texture from a decoded image
    ///
    /// 3 channels map to RGB and 4 to RGBA; any other count is
    /// `InvalidResource`.
    pub fn from_image(
        device: &dyn GraphicsDevice,
        image: &DecodedImage,
        wrap: WrapMode,
        filter: FilterMode,
        slot: u32,
    ) -> Result<TextureUnit> {
        let Some(channels) = ChannelLayout::from_channel_count(image.channels) else {
            let message = format!("unsupported channel count {}", image.channels);
            engine_error!("prism2d::resource", "Invalid texture: {}", message);
            return Err(Error::InvalidResource(message));
        };

        Self::create(device, &TextureDesc {
            pixels: &image.pixels,
            width: image.width,
            height: image.height,
            channels,
            wrap,
            filter,
            slot,
        })
    }

    /// Bind to the fixed slot
    pub fn bind(&self, device: &dyn GraphicsDevice) {
        device.bind_texture(self.slot, self.texture);
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Levels in the mip chain, base level included
    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    pub fn key(&self) -> TextureKey {
        self.texture
    }

    /// Delete the texture object
    pub fn destroy(self, device: &dyn GraphicsDevice) {
        device.delete_texture(self.texture);
    }
}

#[cfg(test)]
#[path = "texture_unit_tests.rs"]
mod tests;
