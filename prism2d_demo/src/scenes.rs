//! Demo scenes: geometry, built-in shaders, textures and per-frame uniforms

use prism_2d_engine::glam::{Mat4, Vec3};
use prism_2d_engine::prism2d::device::{UniformValue, VertexAttribute, VertexLayout};
use prism_2d_engine::prism2d::frame::FrameInfo;
use prism_2d_engine::prism2d::resource::{
    DecodeOptions, DecodedImage, GeometryBuffer, ImageDecoder, RenderResources, TextureUnit,
};
use prism_2d_engine::prism2d::shader::ShaderProgram;
use prism_2d_engine::prism2d::{GraphicsDevice, Result};
use prism_2d_engine::engine_info;

use crate::config::{DemoConfig, SceneKind};

const TRIANGLE_VERTEX: &str = include_str!("../shaders/vert.glsl");
const TRIANGLE_FRAGMENT: &str = include_str!("../shaders/frag.glsl");
const COLOR_VERTEX: &str = include_str!("../shaders/color.vert");
const COLOR_FRAGMENT: &str = include_str!("../shaders/color.frag");
const TEXTURED_VERTEX: &str = include_str!("../shaders/textured.vert");
const TEXTURED_FRAGMENT: &str = include_str!("../shaders/textured.frag");

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Sampler uniform for each texture slot
const SAMPLERS: [&str; 2] = ["texture1", "texture2"];

/// Vertex data of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    pub vertices: Vec<f32>,
    pub indices: Option<Vec<u32>>,
    pub layout: VertexLayout,
}

pub fn geometry(scene: SceneKind) -> SceneGeometry {
    match scene {
        SceneKind::Triangle => SceneGeometry {
            vertices: vec![
                -0.5, -0.5, 0.0,
                 0.5, -0.5, 0.0,
                 0.0,  0.5, 0.0,
            ],
            indices: None,
            layout: VertexLayout::new(vec![
                VertexAttribute {
                    index: 0,
                    component_count: 3,
                    stride: 0,
                    byte_offset: 0,
                },
            ]),
        },
        SceneKind::Quad => SceneGeometry {
            vertices: vec![
                 0.5,  0.5, 0.0,   1.0, 0.0, 0.0,
                 0.5, -0.5, 0.0,   0.0, 1.0, 0.0,
                -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,
                -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,
            ],
            indices: Some(QUAD_INDICES.to_vec()),
            layout: VertexLayout::interleaved(&[3, 3]),
        },
        SceneKind::TexturedQuad | SceneKind::RotatingQuad => SceneGeometry {
            vertices: vec![
                 0.5,  0.5, 0.0,   1.0, 1.0, 1.0,   1.0, 1.0,
                 0.5, -0.5, 0.0,   1.0, 1.0, 1.0,   1.0, 0.0,
                -0.5, -0.5, 0.0,   1.0, 1.0, 1.0,   0.0, 0.0,
                -0.5,  0.5, 0.0,   1.0, 1.0, 1.0,   0.0, 1.0,
            ],
            indices: Some(QUAD_INDICES.to_vec()),
            layout: VertexLayout::interleaved(&[3, 3, 2]),
        },
    }
}

/// Vertex and fragment source compiled into the binary
pub fn builtin_shaders(scene: SceneKind) -> (&'static str, &'static str) {
    match scene {
        SceneKind::Triangle => (TRIANGLE_VERTEX, TRIANGLE_FRAGMENT),
        SceneKind::Quad => (COLOR_VERTEX, COLOR_FRAGMENT),
        SceneKind::TexturedQuad | SceneKind::RotatingQuad => (TEXTURED_VERTEX, TEXTURED_FRAGMENT),
    }
}

pub fn texture_count(scene: SceneKind) -> usize {
    match scene {
        SceneKind::Triangle | SceneKind::Quad => 0,
        SceneKind::TexturedQuad | SceneKind::RotatingQuad => SAMPLERS.len(),
    }
}

/// RGB checkerboard of `size` x `size` pixels with 8-pixel cells
pub fn checkerboard(size: u32, light: [u8; 3], dark: [u8; 3]) -> DecodedImage {
    let mut pixels = Vec::with_capacity((size * size * 3) as usize);
    for y in 0..size {
        for x in 0..size {
            let color = if (x / 8 + y / 8) % 2 == 0 { light } else { dark };
            pixels.extend_from_slice(&color);
        }
    }
    DecodedImage { pixels, width: size, height: size, channels: 3 }
}

fn fallback_texture(slot: usize) -> DecodedImage {
    match slot {
        0 => checkerboard(64, [222, 184, 135], [139, 90, 43]),
        _ => checkerboard(64, [255, 255, 255], [40, 40, 40]),
    }
}

/// Uniforms uploaded every frame
pub fn uniforms(scene: SceneKind, info: &FrameInfo) -> Vec<(&'static str, UniformValue)> {
    match scene {
        SceneKind::Triangle | SceneKind::Quad => Vec::new(),
        SceneKind::TexturedQuad => vec![
            ("transform", Mat4::IDENTITY.into()),
            ("mixValue", 0.2_f32.into()),
        ],
        SceneKind::RotatingQuad => {
            let transform = Mat4::from_translation(Vec3::new(0.5, -0.5, 0.0))
                * Mat4::from_rotation_z(info.elapsed);
            vec![
                ("transform", transform.into()),
                ("mixValue", 0.2_f32.into()),
            ]
        }
    }
}

/// Build everything `config.scene` draws
///
/// Objects created before a failure are destroyed before the error is
/// returned.
pub fn build(
    device: &dyn GraphicsDevice,
    config: &DemoConfig,
    decoder: &dyn ImageDecoder,
) -> Result<RenderResources> {
    let scene = config.scene;
    let program = match &config.shaders {
        Some(paths) => ShaderProgram::build(device, &paths.vertex, &paths.fragment)?,
        None => {
            let (vertex, fragment) = builtin_shaders(scene);
            ShaderProgram::build_from_sources(device, vertex, fragment)?
        }
    };

    let data = geometry(scene);
    let geometry = match GeometryBuffer::create(device, &data.vertices, data.indices.as_deref(), data.layout) {
        Ok(geometry) => geometry,
        Err(err) => {
            program.destroy(device);
            return Err(err);
        }
    };

    let mut textures = Vec::new();
    for slot in 0..texture_count(scene) {
        match load_texture(device, config, decoder, slot) {
            Ok(texture) => textures.push(texture),
            Err(err) => {
                RenderResources::new(program, geometry, textures).destroy(device);
                return Err(err);
            }
        }
    }

    // Sampler slots are fixed for the scene's lifetime
    program.activate(device);
    for (slot, sampler) in SAMPLERS.iter().enumerate().take(textures.len()) {
        program.set_int(device, sampler, slot as i32);
    }

    engine_info!("prism2d::demo", "Scene {:?} ready ({} textures)", scene, textures.len());
    Ok(RenderResources::new(program, geometry, textures))
}

fn load_texture(
    device: &dyn GraphicsDevice,
    config: &DemoConfig,
    decoder: &dyn ImageDecoder,
    slot: usize,
) -> Result<TextureUnit> {
    let image = match config.textures.get(slot) {
        Some(path) => decoder.decode(path, DecodeOptions { flip_vertically: config.flip_vertically })?,
        None => fallback_texture(slot),
    };
    TextureUnit::from_image(device, &image, config.wrap.into(), config.filter.into(), slot as u32)
}

#[cfg(test)]
#[path = "scenes_tests.rs"]
mod tests;
