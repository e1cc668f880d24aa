//! ImageDecoder backed by the `image` crate

use std::path::Path;

use prism_2d_engine::prism2d::resource::{DecodeOptions, DecodedImage, ImageDecoder};
use prism_2d_engine::prism2d::{Error, Result};
use prism_2d_engine::{engine_debug, engine_error};

/// Decodes PNG and JPEG files to 8-bit RGB or RGBA
///
/// Images with an alpha channel decode to RGBA, everything else to RGB.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, path: &Path, options: DecodeOptions) -> Result<DecodedImage> {
        let image = image::open(path).map_err(|err| {
            engine_error!("prism2d::demo", "Failed to load texture {}: {}", path.display(), err);
            Error::ResourceUnavailable(format!("image {}: {}", path.display(), err))
        })?;

        let image = if options.flip_vertically { image.flipv() } else { image };
        let (width, height) = (image.width(), image.height());

        let (pixels, channels) = if image.color().has_alpha() {
            (image.into_rgba8().into_raw(), 4)
        } else {
            (image.into_rgb8().into_raw(), 3)
        };

        engine_debug!("prism2d::demo", "Decoded {} ({}x{}, {} channels)",
            path.display(), width, height, channels);

        Ok(DecodedImage { pixels, width, height, channels })
    }
}

#[cfg(test)]
#[path = "image_loader_tests.rs"]
mod tests;
