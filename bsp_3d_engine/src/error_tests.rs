//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::bsp3d::Engine;
use crate::bsp3d::log::{Logger, LogEntry, LogSeverity};
use crate::error::{Error, Result};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("near must be > 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid config"));
    assert!(display.contains("near must be > 0"));
}

#[test]
fn test_duplicate_object_display() {
    let err = Error::DuplicateObject("key already resident".to_string());
    assert_eq!(format!("{}", err), "Duplicate object: key already resident");
}

#[test]
fn test_object_not_found_display() {
    let err = Error::ObjectNotFound("no position".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Object not found"));
    assert!(display.contains("no position"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("object has no parts".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("object has no parts"));
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("texture unit 9 out of range".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("texture unit 9"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidConfig("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug1 = format!("{:?}", Error::DuplicateObject("a".to_string()));
    assert!(debug1.contains("DuplicateObject"));

    let debug2 = format!("{:?}", Error::ObjectNotFound("b".to_string()));
    assert!(debug2.contains("ObjectNotFound"));
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::BackendError("test".to_string());
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::InvalidResource("test".to_string()));
}

// ============================================================================
// RESULT TYPE / PROPAGATION
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidConfig("far <= near".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert_eq!(outer(), Err(Error::InvalidConfig("far <= near".to_string())));
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("bsp3d::test", "unit {} out of range", 7);
    assert_eq!(err, Error::BackendError("unit 7 out of range".to_string()));
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!("bsp3d::test", "bailed with {}", flag);
        }
        Ok(1)
    }

    assert_eq!(fails(false), Ok(1));
    assert_eq!(fails(true), Err(Error::BackendError("bailed with true".to_string())));
}

#[test]
fn test_logged_returns_same_error() {
    let err = Error::ObjectNotFound("k".to_string()).logged("bsp3d::test");
    assert_eq!(err, Error::ObjectNotFound("k".to_string()));
}

// ============================================================================
// LOG LOCATION TESTS
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

#[test]
#[serial]
fn test_logged_reports_call_site() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });

    let expected_line = line!() + 1;
    let _ = Error::InvalidConfig("near > far".to_string()).logged("error_tests::location");
    let from_closure: Result<()> = Err(Error::InvalidResource("no parts".to_string()))
        .map_err(|e| e.logged("error_tests::location"));
    assert!(from_closure.is_err());

    let captured: Vec<LogEntry> = entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == "error_tests::location")
        .cloned()
        .collect();
    Engine::reset_logger();

    assert_eq!(captured.len(), 2);
    for entry in &captured {
        assert_eq!(entry.severity, LogSeverity::Error);
        let file = entry.file.unwrap();
        assert!(file.ends_with("error_tests.rs"), "logged at {}", file);
    }
    assert_eq!(captured[0].line, Some(expected_line));
    assert_eq!(captured[0].message, "Invalid config: near > far");
}
