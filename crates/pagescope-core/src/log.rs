//! # Log Record Domain Types
//!
//! A [`LogRecord`] is produced for every call the wrapped log sink observes.
//! The original sink receives the call first, untouched; the record is a
//! side-channel copy with a bounded message and, for error-severity entries,
//! a captured stack.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Default capacity of the log record buffer.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Default upper bound on a captured log message, in bytes.
///
/// Messages longer than the bound are truncated at a character boundary with
/// a `...` marker so a single oversized log call cannot bloat the buffer.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 2000;

// ── LogCategory ───────────────────────────────────────────────────────────────

/// Severity of an intercepted log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Info,
    Warning,
    Error,
    Debug,
}

impl LogCategory {
    /// Short uppercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LogCategory::Info => "INFO",
            LogCategory::Warning => "WARN",
            LogCategory::Error => "ERROR",
            LogCategory::Debug => "DEBUG",
        }
    }

    /// Whether records of this category capture a stack.
    pub fn captures_stack(&self) -> bool {
        matches!(self, LogCategory::Error)
    }
}

impl std::fmt::Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── LogRecord ─────────────────────────────────────────────────────────────────

/// A single intercepted log call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Session-unique identifier, monotonically increasing.
    pub id: u64,
    /// Severity of the original call.
    pub category: LogCategory,
    /// Stringified, bounded-length message text.
    pub message: String,
    /// Captured stack, present for error-severity records.
    pub stack: Option<String>,
    /// When the call was observed.
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    /// Whether this record came from an error-severity call.
    pub fn is_error(&self) -> bool {
        self.category == LogCategory::Error
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Truncate a message to at most `max_len` bytes, never splitting a
/// character, appending `...` when anything was cut.
pub fn truncate_message(message: &str, max_len: usize) -> String {
    if message.len() <= max_len {
        return message.to_string();
    }
    let mut end = max_len;
    while end > 0 && !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(category: LogCategory, message: &str) -> LogRecord {
        LogRecord {
            id: 1,
            category,
            message: message.to_string(),
            stack: None,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(LogCategory::Info.label(), "INFO");
        assert_eq!(LogCategory::Warning.label(), "WARN");
        assert_eq!(LogCategory::Error.label(), "ERROR");
        assert_eq!(LogCategory::Debug.label(), "DEBUG");
    }

    #[test]
    fn test_category_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&LogCategory::Warning).unwrap(),
            "\"warning\""
        );
        let parsed: LogCategory = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, LogCategory::Error);
    }

    #[test]
    fn test_only_errors_capture_stack() {
        assert!(LogCategory::Error.captures_stack());
        assert!(!LogCategory::Info.captures_stack());
        assert!(!LogCategory::Warning.captures_stack());
        assert!(!LogCategory::Debug.captures_stack());
    }

    #[test]
    fn test_is_error() {
        assert!(make_record(LogCategory::Error, "boom").is_error());
        assert!(!make_record(LogCategory::Info, "ok").is_error());
    }

    #[test]
    fn test_truncate_short_message_unchanged() {
        assert_eq!(truncate_message("hello", 10), "hello");
        assert_eq!(truncate_message("", 10), "");
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "x".repeat(50);
        let truncated = truncate_message(&long, 10);
        assert_eq!(truncated, format!("{}...", "x".repeat(10)));
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // "é" is two bytes in UTF-8; a byte cut at 1 would split it.
        let message = "é".repeat(4);
        let truncated = truncate_message(&message, 3);
        assert_eq!(truncated, "é...");
    }
}
