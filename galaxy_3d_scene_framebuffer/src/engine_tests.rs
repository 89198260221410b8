//! Unit tests for the Engine logging facade
//!
//! LOGGER and MIN_SEVERITY are process globals, so every test is #[serial]
//! and restores the default logger before returning.

use crate::galaxy3d::Engine;
use crate::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
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
        // Other tests log concurrently through the same global logger
        if entry.source == "galaxy3d::engine_test" {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_captures_entries() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "galaxy3d::engine_test", "hello".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].message, "hello");
        assert!(captured[0].file.is_none());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_keeps_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(LogSeverity::Error, "galaxy3d::engine_test", "boom".to_string(), "x.rs", 9);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured[0].file, Some("x.rs"));
        assert_eq!(captured[0].line, Some(9));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_min_severity_filters_entries() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Warn);
    assert_eq!(Engine::min_severity(), LogSeverity::Warn);

    crate::engine_debug!("galaxy3d::engine_test", "dropped");
    crate::engine_info!("galaxy3d::engine_test", "dropped too");
    crate::engine_warn!("galaxy3d::engine_test", "kept {}", 1);
    crate::engine_error!("galaxy3d::engine_test", "kept {}", 2);

    {
        let captured = entries.lock().unwrap();
        let messages: Vec<&str> = captured.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["kept 1", "kept 2"]);
        assert!(captured[1].line.is_some());
    }

    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Trace);
}

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    crate::engine_trace!("galaxy3d::engine_test", "goes to stdout");
    assert!(entries.lock().unwrap().is_empty());
}
