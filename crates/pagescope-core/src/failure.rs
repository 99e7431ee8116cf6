//! # Failure Record Domain Types
//!
//! Uncaught synchronous failures and unobserved asynchronous failures both
//! land here as [`FailureRecord`]s, tagged with the [`FailureChannel`] they
//! arrived on. The interceptor records the failure and then forwards it to
//! the original handler; default propagation is never suppressed.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Default capacity of the failure record buffer.
pub const DEFAULT_FAILURE_CAPACITY: usize = 50;

// ── FailureChannel ────────────────────────────────────────────────────────────

/// Which failure-signal channel produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureChannel {
    /// A synchronous uncaught failure.
    Uncaught,
    /// An asynchronous failure nobody observed.
    UnobservedAsync,
}

impl std::fmt::Display for FailureChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureChannel::Uncaught => f.write_str("uncaught"),
            FailureChannel::UnobservedAsync => f.write_str("unobserved_async"),
        }
    }
}

// ── SourceLocation ────────────────────────────────────────────────────────────

/// Where in the subject program a failure originated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

// ── FailureEvent ──────────────────────────────────────────────────────────────

/// The failure signal as the host hands it to a failure handler.
///
/// This is the wire vocabulary of the failure capability points; the
/// interceptor copies it into a [`FailureRecord`] before forwarding.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureEvent {
    pub message: String,
    pub source: Option<SourceLocation>,
    pub stack: Option<String>,
}

impl FailureEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            stack: None,
        }
    }
}

// ── FailureRecord ─────────────────────────────────────────────────────────────

/// A recorded uncaught or unobserved failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    /// Session-unique identifier, monotonically increasing.
    pub id: u64,
    pub message: String,
    pub source: Option<SourceLocation>,
    pub stack: Option<String>,
    /// Which signal channel produced this record.
    pub channel: FailureChannel,
    /// When the failure was observed.
    pub timestamp: DateTime<Local>,
}

impl FailureRecord {
    /// Build a record from a capability-point event.
    pub fn from_event(id: u64, channel: FailureChannel, event: &FailureEvent) -> Self {
        Self {
            id,
            message: event.message.clone(),
            source: event.source.clone(),
            stack: event.stack.clone(),
            channel,
            timestamp: Local::now(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
