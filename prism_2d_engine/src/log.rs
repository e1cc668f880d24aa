//! Engine logging
//!
//! Records flow through the `engine_*!` macros into `Engine::log`, which drops
//! anything below the configured minimum severity and hands the rest to the
//! installed [`Logger`]. `engine_error!` also records the call site.

use std::fmt::Display;
use std::time::SystemTime;
use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};

/// Destination for engine log records
///
/// The engine holds one of these at a time; swap it with
/// `Engine::set_logger` to redirect output (file sink, test capture...).
///
/// # Example
///
/// ```no_run
/// use prism_2d_engine::prism2d::log::{Logger, LogEntry};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{:?} {}", entry.severity, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Receive one record that passed the severity filter
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Subsystem tag, e.g. "prism2d::shader" or "prism2d::gl"
    pub source: String,
    pub message: String,
    /// Call site, filled in by `engine_error!` only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Record severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-frame chatter
    Trace,
    Debug,
    Info,
    Warn,
    /// Printed to stderr together with the call site
    Error,
}

impl LogSeverity {
    /// Parse a level name as written in config files (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        let severity = match name.to_ascii_lowercase().as_str() {
            "trace" => LogSeverity::Trace,
            "debug" => LogSeverity::Debug,
            "info" => LogSeverity::Info,
            "warn" | "warning" => LogSeverity::Warn,
            "error" => LogSeverity::Error,
            _ => return None,
        };
        Some(severity)
    }

    /// Fixed-width label used in console output
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    fn paint(self) -> ColoredString {
        let label = self.label();
        match self {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        }
    }
}

/// Console logger installed until the application picks another one
///
/// Lines look like `[time] [LEVEL] [source] message`, with ` (file:line)`
/// appended when the record carries a call site. Errors go to stderr,
/// everything else to stdout.
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry without color codes
    pub fn format_plain(entry: &LogEntry) -> String {
        Self::render(entry, entry.severity.label(), &entry.source)
    }

    fn render(entry: &LogEntry, severity: impl Display, source: impl Display) -> String {
        let local: DateTime<Local> = entry.timestamp.into();
        let mut line = format!(
            "[{}] [{}] [{}] {}",
            local.format("%Y-%m-%d %H:%M:%S%.3f"),
            severity,
            source,
            entry.message
        );
        if let (Some(file), Some(number)) = (entry.file, entry.line) {
            line.push_str(&format!(" ({}:{})", file, number));
        }
        line
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let line = Self::render(entry, entry.severity.paint(), entry.source.bright_blue());
        if entry.severity == LogSeverity::Error || entry.file.is_some() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::prism2d::Engine::log(
            $crate::prism2d::log::LogSeverity::$severity,
            $source,
            format!($($arg)*)
        )
    };
}

/// Trace-level record
///
/// ```no_run
/// prism_2d_engine::engine_trace!("prism2d::frame", "frame {} submitted", 12);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Trace, $source, $($arg)*) };
}

/// Debug-level record
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Debug, $source, $($arg)*) };
}

/// Info-level record
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Info, $source, $($arg)*) };
}

/// Warn-level record
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Warn, $source, $($arg)*) };
}

/// Log an ERROR message with file:line information
///
/// ```no_run
/// prism_2d_engine::engine_error!("prism2d::shader", "link failed: {}", "log");
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::prism2d::Engine::log_detailed(
            $crate::prism2d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR and evaluate to an `Error::BackendError` carrying the same message
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::prism2d::Engine::log_detailed(
            $crate::prism2d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::prism2d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return `Err(Error::BackendError)` from the enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
