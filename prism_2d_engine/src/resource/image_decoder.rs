/// Image decoding seam
///
/// Decoding itself lives outside the core (the demo implements it with the
/// `image` crate); the core only defines what a decoder hands back.

use std::path::Path;
use crate::error::Result;

/// Per-call decoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reorder rows so the first row is the bottom of the image
    pub flip_vertically: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { flip_vertically: true }
    }
}

/// Decoded 8-bit image, rows tightly packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Channels per pixel as decoded (3 for RGB, 4 for RGBA)
    pub channels: u32,
}

/// Decodes image files into pixel buffers
pub trait ImageDecoder {
    /// Decode the file at `path`
    ///
    /// Missing or undecodable files are `ResourceUnavailable`.
    fn decode(&self, path: &Path, options: DecodeOptions) -> Result<DecodedImage>;
}
