/// Unit tests for FrameLoop

use std::time::{Duration, Instant};

use crate::error::Error;
use crate::frame::{fps_title, FrameLoop, FrameLoopConfig, FrameState, MockWindow, WindowContext};
use crate::graphics_device::mock_graphics_device::{DeviceCall, MockGraphicsDevice};
use crate::graphics_device::{
    ChannelLayout, DrawCall, FilterMode, TextureDesc, UniformValue, VertexLayout, WrapMode,
};
use crate::resource::{GeometryBuffer, RenderResources, TextureUnit};
use crate::shader::ShaderProgram;

const VERTEX: &str = "#version 410 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec2 aTexCoord;
out vec2 TexCoord;
uniform mat4 transform;
void main() {
    gl_Position = transform * vec4(aPos, 1.0);
    TexCoord = aTexCoord;
}
";

const FRAGMENT: &str = "#version 410 core
in vec2 TexCoord;
out vec4 FragColor;
uniform sampler2D texture1;
uniform sampler2D texture2;
void main() {
    FragColor = mix(texture(texture1, TexCoord), texture(texture2, TexCoord), 0.2);
}
";

const QUAD: [f32; 20] = [
     0.5,  0.5, 0.0, 1.0, 1.0,
     0.5, -0.5, 0.0, 1.0, 0.0,
    -0.5, -0.5, 0.0, 0.0, 0.0,
    -0.5,  0.5, 0.0, 0.0, 1.0,
];

fn texture(device: &MockGraphicsDevice, slot: u32) -> TextureUnit {
    let pixels = [200u8; 16];
    TextureUnit::create(device, &TextureDesc {
        pixels: &pixels,
        width: 2,
        height: 2,
        channels: ChannelLayout::Rgba,
        wrap: WrapMode::Repeat,
        filter: FilterMode::Nearest,
        slot,
    })
    .unwrap()
}

fn resources(device: &MockGraphicsDevice) -> RenderResources {
    let program = ShaderProgram::build_from_sources(device, VERTEX, FRAGMENT).unwrap();
    let geometry = GeometryBuffer::create(
        device,
        &QUAD,
        Some(&[0, 1, 3, 1, 2, 3]),
        VertexLayout::interleaved(&[3, 2]),
    )
    .unwrap();
    RenderResources::new(program, geometry, vec![texture(device, 0), texture(device, 1)])
}

#[test]
fn test_running_frame_sequence() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(800, 600);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());
    device.clear_calls();

    let state = frame_loop
        .run_frame(&mut window, &device, &resources, &[("texture2", UniformValue::Int(1))])
        .unwrap();
    assert_eq!(state, FrameState::Running);

    let calls = device.calls();
    let program = resources.program().key();
    let textures = resources.textures();
    assert_eq!(calls[0], DeviceCall::SetViewport { x: 0, y: 0, width: 800, height: 600 });
    assert_eq!(calls[1], DeviceCall::Clear([0.5, 0.7, 0.8, 1.0]));
    assert_eq!(calls[2], DeviceCall::UseProgram(program));
    assert!(matches!(calls[3], DeviceCall::WriteUniform { value: UniformValue::Int(1), .. }));
    assert_eq!(calls[4], DeviceCall::BindTexture { slot: 0, texture: textures[0].key() });
    assert_eq!(calls[5], DeviceCall::BindTexture { slot: 1, texture: textures[1].key() });
    assert_eq!(calls[6], DeviceCall::BindVertexArray(Some(resources.geometry().vertex_array())));
    assert_eq!(calls[7], DeviceCall::Draw(DrawCall::Indexed { count: 6 }));
    assert_eq!(calls.len(), 8);
    assert_eq!(window.swaps(), 1);
}

#[test]
fn test_viewport_set_once_until_resize() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(800, 600);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());

    let viewport_calls = |device: &MockGraphicsDevice| {
        device
            .calls()
            .into_iter()
            .filter(|c| matches!(c, DeviceCall::SetViewport { .. }))
            .count()
    };

    for _ in 0..3 {
        frame_loop.run_frame(&mut window, &device, &resources, &[]).unwrap();
    }
    assert_eq!(viewport_calls(&device), 1);

    window.resize(1024, 768);
    frame_loop.run_frame(&mut window, &device, &resources, &[]).unwrap();
    assert_eq!(viewport_calls(&device), 2);
    assert_eq!(frame_loop.viewport(), (1024, 768));
}

#[test]
fn test_close_stops_exactly_once_without_drawing() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(800, 600).close_after(3);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());

    let mut states = Vec::new();
    for _ in 0..5 {
        states.push(frame_loop.run_frame(&mut window, &device, &resources, &[]).unwrap());
    }

    assert_eq!(
        states,
        vec![
            FrameState::Running,
            FrameState::Running,
            FrameState::Stopped,
            FrameState::Stopped,
            FrameState::Stopped,
        ]
    );
    assert_eq!(device.draw_calls().len(), 2);
    assert_eq!(window.polls(), 3);
    assert_eq!(window.swaps(), 2);
    assert_eq!(frame_loop.stats().frames, 2);
}

#[test]
fn test_close_before_first_frame_draws_nothing() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(800, 600);
    window.request_close();
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());
    device.clear_calls();

    let stats = frame_loop.run(&mut window, &device, &resources, |_| Vec::new()).unwrap();
    assert_eq!(stats, Default::default());
    assert!(device.calls().is_empty());
}

#[test]
fn test_run_feeds_frame_info_to_uniform_callback() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(800, 600).close_after(4);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());

    let mut seen = Vec::new();
    let stats = frame_loop
        .run(&mut window, &device, &resources, |info| {
            seen.push(info.index);
            vec![("texture1", UniformValue::Int(0)), ("texture2", UniformValue::Int(1))]
        })
        .unwrap();

    // The closing poll happens after the callback for that frame
    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.draw_calls, 3);
    assert_eq!(
        device.uniform_value(resources.program().key(), "texture2"),
        Some(UniformValue::Int(1))
    );
}

#[test]
fn test_swap_failure_is_returned() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(800, 600);
    window.set_fail_swaps(true);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());

    let err = frame_loop.run_frame(&mut window, &device, &resources, &[]).unwrap_err();
    assert!(matches!(err, Error::BackendError(_)));
    assert_eq!(frame_loop.state(), FrameState::Running);
    assert_eq!(frame_loop.stats().frames, 0);
}

#[test]
fn test_custom_clear_color_and_zero_size_window() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(0, 0);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig {
        clear_color: [0.0, 0.0, 0.0, 1.0],
        viewport: (640, 480),
        title_fps: None,
    });
    device.clear_calls();

    frame_loop.run_frame(&mut window, &device, &resources, &[]).unwrap();
    let calls = device.calls();
    assert_eq!(calls[0], DeviceCall::SetViewport { x: 0, y: 0, width: 640, height: 480 });
    assert_eq!(calls[1], DeviceCall::Clear([0.0, 0.0, 0.0, 1.0]));
    assert_eq!(window.size(), (0, 0));
}

#[test]
fn test_fps_title_format() {
    assert_eq!(fps_title("Learn OpenGL", 59.6), "Learn OpenGL - 60 FPS");
    assert_eq!(fps_title("Quad", 0.0), "Quad - 0 FPS");
}

// ============================================================================
// FPS title
// ============================================================================

fn titled_loop(base: &str) -> FrameLoop {
    FrameLoop::new(FrameLoopConfig {
        title_fps: Some(base.to_string()),
        ..FrameLoopConfig::default()
    })
}

#[test]
fn test_fps_title_updates_once_per_interval() {
    let mut window = MockWindow::new(800, 600);
    let mut frame_loop = titled_loop("Learn OpenGL");
    let start = Instant::now();

    frame_loop.stats.frames = 1;
    frame_loop.update_fps_title(&mut window, start);
    frame_loop.stats.frames = 31;
    frame_loop.update_fps_title(&mut window, start + Duration::from_millis(500));
    assert!(window.titles().is_empty());

    frame_loop.stats.frames = 61;
    frame_loop.update_fps_title(&mut window, start + Duration::from_secs(1));
    assert_eq!(window.titles(), ["Learn OpenGL - 60 FPS".to_string()]);

    // A new interval starts at the last update
    frame_loop.stats.frames = 91;
    frame_loop.update_fps_title(&mut window, start + Duration::from_millis(1500));
    assert_eq!(window.titles().len(), 1);

    frame_loop.stats.frames = 91;
    frame_loop.update_fps_title(&mut window, start + Duration::from_secs(3));
    assert_eq!(
        window.titles(),
        ["Learn OpenGL - 60 FPS".to_string(), "Learn OpenGL - 15 FPS".to_string()]
    );
}

#[test]
fn test_fps_title_disabled_never_sets_title() {
    let mut window = MockWindow::new(800, 600);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());
    assert_eq!(frame_loop.config().title_fps, None);
    let start = Instant::now();

    for second in 0..4 {
        frame_loop.stats.frames += 60;
        frame_loop.update_fps_title(&mut window, start + Duration::from_secs(second));
    }
    assert!(window.titles().is_empty());
}

#[test]
fn test_running_frames_set_fps_title_after_a_second() {
    let device = MockGraphicsDevice::new();
    let resources = resources(&device);
    let mut window = MockWindow::new(800, 600);
    let mut frame_loop = titled_loop("T");

    for _ in 0..3 {
        frame_loop.run_frame(&mut window, &device, &resources, &[]).unwrap();
        std::thread::sleep(Duration::from_millis(600));
    }

    assert_eq!(frame_loop.config().title_fps.as_deref(), Some("T"));
    assert_eq!(window.titles().len(), 1);
    assert!(window.titles()[0].starts_with("T - "));
    assert!(window.titles()[0].ends_with(" FPS"));
}
