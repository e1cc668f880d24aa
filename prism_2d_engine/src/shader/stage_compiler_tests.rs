/// Unit tests for StageCompiler

use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{DeviceCall, MockGraphicsDevice};
use crate::graphics_device::ShaderStage;
use crate::shader::{ShaderSource, StageCompiler};

#[test]
fn test_compile_valid_stage() {
    let device = MockGraphicsDevice::new();
    let source = ShaderSource::new(ShaderStage::Vertex, "void main() { gl_Position = vec4(0.0); }");

    let compiled = StageCompiler::compile(&device, source).unwrap();
    assert_eq!(compiled.stage(), ShaderStage::Vertex);
    assert_eq!(device.live_stage_count(), 1);

    compiled.release(&device);
    assert_eq!(device.live_stage_count(), 0);
}

#[test]
fn test_compile_failure_carries_stage_and_log() {
    let device = MockGraphicsDevice::new();
    let source = ShaderSource::new(ShaderStage::Fragment, "void main() { FragColor = vec4(1.0);");

    let err = StageCompiler::compile(&device, source).unwrap_err();
    match &err {
        Error::StageCompileError { stage, log } => {
            assert_eq!(*stage, ShaderStage::Fragment);
            assert!(log.contains("syntax error"));
        }
        other => panic!("expected StageCompileError, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Fragment shader compile error:\n"));
}

#[test]
fn test_compile_failure_deletes_stage_object() {
    let device = MockGraphicsDevice::new();
    let source = ShaderSource::new(ShaderStage::Vertex, "in vec3 aPos;");

    assert!(StageCompiler::compile(&device, source).is_err());
    assert_eq!(device.live_stage_count(), 0);
    assert!(device
        .calls()
        .iter()
        .any(|call| matches!(call, DeviceCall::DeleteStage(_))));
}

#[test]
fn test_compile_propagates_allocation_failure() {
    let device = MockGraphicsDevice::new();
    device.set_fail_allocations(true);
    let source = ShaderSource::new(ShaderStage::Vertex, "void main() {}");

    let err = StageCompiler::compile(&device, source).unwrap_err();
    assert!(matches!(err, Error::BackendError(_)));
    assert!(device.calls().is_empty());
}
