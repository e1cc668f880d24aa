/// Unit tests for TextureUnit

use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{ChannelLayout, FilterMode, TextureDesc, WrapMode};
use crate::resource::{DecodedImage, TextureUnit};

fn desc(pixels: &[u8], width: u32, height: u32, channels: ChannelLayout) -> TextureDesc<'_> {
    TextureDesc {
        pixels,
        width,
        height,
        channels,
        wrap: WrapMode::Repeat,
        filter: FilterMode::Nearest,
        slot: 0,
    }
}

#[test]
fn test_two_by_two_rgba_has_two_levels() {
    let device = MockGraphicsDevice::new();
    let pixels = [255u8; 16];

    let texture = TextureUnit::create(&device, &desc(&pixels, 2, 2, ChannelLayout::Rgba)).unwrap();
    assert_eq!(texture.mip_levels(), 2);
    assert_eq!((texture.width(), texture.height()), (2, 2));

    let mock = device.texture(texture.key()).unwrap();
    assert_eq!(mock.mip_levels, 2);
    assert_eq!(mock.wrap, WrapMode::Repeat);
    assert_eq!(mock.filter, FilterMode::Nearest);
}

#[test]
fn test_non_square_mip_chain_follows_largest_side() {
    let device = MockGraphicsDevice::new();
    let pixels = vec![0u8; 512 * 64 * 3];

    let texture = TextureUnit::create(&device, &desc(&pixels, 512, 64, ChannelLayout::Rgb)).unwrap();
    assert_eq!(texture.mip_levels(), 10);
}

#[test]
fn test_rejects_wrong_pixel_length() {
    let device = MockGraphicsDevice::new();
    let pixels = [0u8; 12];

    let err = TextureUnit::create(&device, &desc(&pixels, 2, 2, ChannelLayout::Rgba)).unwrap_err();
    assert!(matches!(err, Error::InvalidResource(_)));
    assert_eq!(device.live_texture_count(), 0);
}

#[test]
fn test_rejects_zero_dimension() {
    let device = MockGraphicsDevice::new();
    let err = TextureUnit::create(&device, &desc(&[], 0, 4, ChannelLayout::Rgb)).unwrap_err();
    assert!(matches!(err, Error::InvalidResource(_)));
    assert!(device.calls().is_empty());
}

#[test]
fn test_bind_uses_fixed_slot() {
    let device = MockGraphicsDevice::new();
    let pixels = [0u8; 12];
    let mut second = desc(&pixels, 2, 2, ChannelLayout::Rgb);
    second.slot = 1;

    let first = TextureUnit::create(&device, &desc(&pixels, 2, 2, ChannelLayout::Rgb)).unwrap();
    let second = TextureUnit::create(&device, &second).unwrap();
    first.bind(&device);
    second.bind(&device);

    assert_eq!(device.bound_texture(0), Some(first.key()));
    assert_eq!(device.bound_texture(1), Some(second.key()));
}

#[test]
fn test_from_image_maps_channel_counts() {
    let device = MockGraphicsDevice::new();
    let rgb = DecodedImage { pixels: vec![0; 4 * 4 * 3], width: 4, height: 4, channels: 3 };
    let gray = DecodedImage { pixels: vec![0; 4 * 4], width: 4, height: 4, channels: 1 };

    let texture = TextureUnit::from_image(&device, &rgb, WrapMode::ClampToEdge, FilterMode::Linear, 0).unwrap();
    assert_eq!(device.texture(texture.key()).unwrap().channels, ChannelLayout::Rgb);
    assert_eq!(texture.mip_levels(), 3);

    let err = TextureUnit::from_image(&device, &gray, WrapMode::Repeat, FilterMode::Linear, 1).unwrap_err();
    assert!(matches!(err, Error::InvalidResource(_)));
}

#[test]
fn test_destroy_unbinds_slot() {
    let device = MockGraphicsDevice::new();
    let pixels = [0u8; 16];
    let texture = TextureUnit::create(&device, &desc(&pixels, 2, 2, ChannelLayout::Rgba)).unwrap();

    texture.destroy(&device);
    assert_eq!(device.live_texture_count(), 0);
    assert_eq!(device.bound_texture(0), None);
}
