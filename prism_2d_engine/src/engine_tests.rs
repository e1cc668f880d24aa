//! Unit tests for the Engine logging facade
//!
//! IMPORTANT: the logger and the minimum severity are process-wide.
//! All tests are marked with #[serial] to run sequentially.

use crate::prism2d::Engine;
use crate::prism2d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<String>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        // Other tests log concurrently; keep only this module's source
        if entry.source != "prism2d::test" {
            return;
        }
        let mut entries = self.entries.lock().unwrap();
        entries.push(format!("{:?}: {}", entry.severity, entry.message));
    }
}

fn teardown() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Info);
}

// ============================================================================
// LOGGER REPLACEMENT
// ============================================================================

#[test]
#[serial]
fn test_set_logger_captures_messages() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "prism2d::test", "hello".to_string());
    Engine::log(LogSeverity::Warn, "prism2d::test", "careful".to_string());

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured, vec!["Info: hello".to_string(), "Warn: careful".to_string()]);

    teardown();
}

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "prism2d::test", "not captured".to_string());
    assert!(entries.lock().unwrap().is_empty());

    teardown();
}

// ============================================================================
// SEVERITY FILTER
// ============================================================================

#[test]
#[serial]
fn test_min_severity_filters_lower_levels() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Warn);

    Engine::log(LogSeverity::Debug, "prism2d::test", "dropped".to_string());
    Engine::log(LogSeverity::Info, "prism2d::test", "dropped".to_string());
    Engine::log(LogSeverity::Warn, "prism2d::test", "kept".to_string());
    Engine::log_detailed(LogSeverity::Error, "prism2d::test", "kept too".to_string(), file!(), line!());

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].ends_with("kept"));
    assert!(captured[1].ends_with("kept too"));

    teardown();
}

#[test]
#[serial]
fn test_enabled_tracks_min_severity() {
    Engine::set_min_severity(LogSeverity::Trace);
    assert!(Engine::enabled(LogSeverity::Trace));

    Engine::set_min_severity(LogSeverity::Error);
    assert!(!Engine::enabled(LogSeverity::Warn));
    assert!(Engine::enabled(LogSeverity::Error));
    assert_eq!(Engine::min_severity(), LogSeverity::Error);

    teardown();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Trace);

    crate::engine_trace!("prism2d::test", "t{}", 1);
    crate::engine_debug!("prism2d::test", "d{}", 2);
    crate::engine_info!("prism2d::test", "i{}", 3);
    crate::engine_warn!("prism2d::test", "w{}", 4);
    crate::engine_error!("prism2d::test", "e{}", 5);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(
        captured,
        vec![
            "Trace: t1".to_string(),
            "Debug: d2".to_string(),
            "Info: i3".to_string(),
            "Warn: w4".to_string(),
            "Error: e5".to_string(),
        ]
    );

    teardown();
}
