//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering/labels, LogEntry and DefaultLogger formatting.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::SceneFramebuffer".to_string(),
        message: "Rebuilt 800x600".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Info.label(), "INFO ");
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Debug, None, None));
    assert!(line.contains("[DEBUG]"));
    assert!(line.contains("[galaxy3d::SceneFramebuffer]"));
    assert!(line.ends_with("Rebuilt 800x600"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("scene_framebuffer.rs"), Some(42)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(scene_framebuffer.rs:42)"));
}

#[test]
fn test_format_plain_ignores_partial_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Warn, Some("a.rs"), None));
    assert!(!line.contains("a.rs"));
}

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    // Just verify none of the color branches panic
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Debug, None, None));
    logger.log(&entry(LogSeverity::Info, None, None));
    logger.log(&entry(LogSeverity::Warn, None, None));
    logger.log(&entry(LogSeverity::Error, Some("scene_framebuffer.rs"), Some(7)));
}

#[test]
fn test_log_entry_clone() {
    let original = entry(LogSeverity::Warn, Some("test.rs"), Some(10));
    let copy = original.clone();
    assert_eq!(original.severity, copy.severity);
    assert_eq!(original.source, copy.source);
    assert_eq!(original.file, copy.file);
    assert_eq!(original.line, copy.line);
}

#[test]
fn test_custom_logger_trait_object() {
    use std::sync::{Arc, Mutex};

    struct Capture(Arc<Mutex<Vec<String>>>);
    impl Logger for Capture {
        fn log(&self, entry: &LogEntry) {
            self.0.lock().unwrap().push(entry.message.clone());
        }
    }

    let store = Arc::new(Mutex::new(Vec::new()));
    let logger: Box<dyn Logger> = Box::new(Capture(store.clone()));
    logger.log(&entry(LogSeverity::Info, None, None));
    assert_eq!(store.lock().unwrap().as_slice(), ["Rebuilt 800x600".to_string()]);
}
