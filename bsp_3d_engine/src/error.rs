//! Error types for the Bsp3D engine
//!
//! This module defines the error types used throughout the engine,
//! including configuration, partition membership, and command recording.

use std::fmt;

/// Result type for Bsp3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bsp3D engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configuration value is out of range (frustum, LOD thresholds, ...)
    InvalidConfig(String),

    /// The object is already resident in the partition
    DuplicateObject(String),

    /// The object key is unknown to the scene's object store
    ObjectNotFound(String),

    /// Malformed object (no render parts, non-finite position, ...)
    InvalidResource(String),

    /// Error reported by an external command list / GPU backend
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::DuplicateObject(msg) => write!(f, "Duplicate object: {}", msg),
            Error::ObjectNotFound(msg) => write!(f, "Object not found: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Log this error through the engine logger and hand it back.
    ///
    /// The entry carries the file and line of the call site (or of the
    /// closure the call sits in), not of this helper.
    #[track_caller]
    pub(crate) fn logged(self, source: &str) -> Self {
        let location = std::panic::Location::caller();
        crate::bsp3d::Engine::log_detailed(
            crate::bsp3d::log::LogSeverity::Error,
            source,
            self.to_string(),
            location.file(),
            location.line(),
        );
        self
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR and build an `Error::BackendError` from a format string.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("bsp3d::Recorder", "unit {} out of range", unit));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::bsp3d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
