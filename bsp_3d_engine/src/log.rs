//! Internal logging system for Bsp3D Engine
//!
//! Entries flow from the `engine_*!` macros through `Engine` to the
//! installed `Logger`. The default logger prints colored lines to stdout;
//! ERROR entries carry the file and line they were raised from.

use std::fmt::Display;
use std::time::SystemTime;
use chrono::{DateTime, Local};
use colored::Colorize;

/// Logger trait for custom logging implementations
///
/// Install an implementation with `Engine::set_logger` to send engine
/// output somewhere other than stdout (a file, a test capture buffer).
///
/// # Example
///
/// ```no_run
/// use bsp_3d_engine::bsp3d::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         use std::io::Write;
///         let _ = writeln!(&self.file, "{} {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// One log record as handed to a `Logger`
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Creation time
    pub timestamp: SystemTime,

    /// Source module (e.g., "bsp3d::BspTree", "bsp3d::Scene")
    pub source: String,

    /// Log message
    pub message: String,

    /// Raising file and line, set for ERROR entries
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-frame information (visible counts, draw stats)
    Trace,

    /// Partition edits, scene population
    Debug,

    Info,

    /// Refused or missed partition edits
    Warn,

    /// Error messages (with file:line details)
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the console logger
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Console logger with colored severity and source.
///
/// Line layout: `[timestamp] [SEVERITY] [source] message`, followed by
/// ` (file:line)` when the entry carries a location.
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry as a plain (uncolored) line.
    pub fn format_plain(entry: &LogEntry) -> String {
        Self::compose(entry, entry.severity.label(), &entry.source)
    }

    fn compose(entry: &LogEntry, severity: impl Display, source: impl Display) -> String {
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
        let label = entry.severity.label();
        let severity = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };
        println!("{}", Self::compose(entry, severity, entry.source.bright_blue()));
    }
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::bsp3d::Engine::log(
            $crate::bsp3d::log::LogSeverity::$severity,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a TRACE message (per-frame counters, filtered out by default)
///
/// # Example
///
/// ```ignore
/// engine_trace!("bsp3d::Scene", "{} objects visible", count);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Trace, $source, $($arg)*) };
}

/// Log a DEBUG message (tree construction, catalog population, removals)
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Debug, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Info, $source, $($arg)*) };
}

/// Log a WARN message (refused or missed partition edits)
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Warn, $source, $($arg)*) };
}

/// Log an ERROR message tagged with the calling file and line
///
/// # Example
///
/// ```ignore
/// engine_error!("bsp3d::Scene", "Frame aborted: {}", error);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::bsp3d::Engine::log_detailed(
            $crate::bsp3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
