/// Prism2D Engine - process-wide logging facade
///
/// The engine keeps a single replaceable logger and a minimum severity.
/// GPU objects are never stored here: they belong to the application scope
/// and are destroyed explicitly in order (buffers, textures, program, context).

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Minimum severity that reaches the logger
static MIN_SEVERITY: RwLock<LogSeverity> = RwLock::new(LogSeverity::Info);

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Engine facade
///
/// # Example
///
/// ```no_run
/// use prism_2d_engine::prism2d::{Engine, log::LogSeverity};
///
/// Engine::set_min_severity(LogSeverity::Debug);
/// Engine::log(LogSeverity::Info, "app", "starting".to_string());
/// ```
pub struct Engine;

impl Engine {
    /// Set a custom logger
    ///
    /// Route every following record to `logger_impl` (file sink, test capture...)
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        Self::install(Box::new(logger_impl));
    }

    /// Go back to the console logger
    pub fn reset_logger() {
        Self::install(Box::new(DefaultLogger));
    }

    fn install(next: Box<dyn Logger>) {
        if let Ok(mut current) = logger().write() {
            *current = next;
        }
    }

    /// Drop records below `severity` (Info until changed)
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut min) = MIN_SEVERITY.write() {
            *min = severity;
        }
    }

    pub fn min_severity() -> LogSeverity {
        MIN_SEVERITY.read().map(|min| *min).unwrap_or(LogSeverity::Info)
    }

    /// Whether a record of this severity would reach the logger
    pub fn enabled(severity: LogSeverity) -> bool {
        severity >= Self::min_severity()
    }

    /// Entry point of the level macros
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None);
    }

    /// Entry point of `engine_error!`, `engine_err!` and `engine_bail!`
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some((file, line)));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        site: Option<(&'static str, u32)>,
    ) {
        if !Self::enabled(severity) {
            return;
        }
        let entry = LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_owned(),
            message,
            file: site.map(|(file, _)| file),
            line: site.map(|(_, line)| line),
        };
        if let Ok(current) = logger().read() {
            current.log(&entry);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
