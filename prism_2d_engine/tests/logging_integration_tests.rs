//! Integration tests for engine logging around resource failures
//!
//! Run with: cargo test --test logging_integration_tests


use std::sync::{Arc, Mutex};
use serial_test::serial;

use prism_2d_engine::prism2d::device::MockGraphicsDevice;
use prism_2d_engine::prism2d::frame::{FrameLoop, FrameLoopConfig, MockWindow};
use prism_2d_engine::prism2d::log::{LogEntry, LogSeverity, Logger};
use prism_2d_engine::prism2d::shader::ShaderProgram;
use prism_2d_engine::prism2d::Engine;
use scene_fixtures::*;

struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(LogEntry {
            severity: entry.severity,
            timestamp: entry.timestamp,
            source: entry.source.clone(),
            message: entry.message.clone(),
            file: entry.file,
            line: entry.line,
        });
    }
}

fn teardown() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Info);
}

#[test]
#[serial]
fn test_integration_compile_error_logged_with_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let device = MockGraphicsDevice::new();
    let broken = TEXTURED_FRAGMENT.replace("void main", "void mian");
    ShaderProgram::build_from_sources(&device, TEXTURED_VERTEX, &broken).unwrap_err();

    let entries = entries.lock().unwrap();
    let error = entries
        .iter()
        .find(|e| e.severity == LogSeverity::Error)
        .expect("compile error was not logged");
    assert_eq!(error.source, "prism2d::shader");
    assert!(error.message.starts_with("Fragment shader compile error:\n"));
    assert!(error.file.is_some());
    assert!(error.line.is_some());
    drop(entries);

    teardown();
}

#[test]
#[serial]
fn test_integration_stop_logged_once() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let device = MockGraphicsDevice::new();
    let resources = textured_quad(&device);
    let mut window = MockWindow::new(800, 600).close_after(2);
    let mut frame_loop = FrameLoop::new(FrameLoopConfig::default());
    frame_loop.run(&mut window, &device, &resources, |_| Vec::new()).unwrap();
    frame_loop.run_frame(&mut window, &device, &resources, &[]).unwrap();

    let stops = entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == "prism2d::frame" && e.message.contains("stopped"))
        .count();
    assert_eq!(stops, 1);

    teardown();
}

#[test]
#[serial]
fn test_integration_min_severity_hides_debug() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Warn);

    let device = MockGraphicsDevice::new();
    let _ = textured_quad(&device);

    assert!(entries
        .lock()
        .unwrap()
        .iter()
        .all(|e| e.severity >= LogSeverity::Warn));

    teardown();
}
