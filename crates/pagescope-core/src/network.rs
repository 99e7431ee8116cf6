//! # Network Record Domain Types
//!
//! Domain data types for intercepted outbound network calls: the settled
//! [`NetworkRecord`], its [`NetworkOutcome`], and the request/response
//! vocabulary the transport seam speaks.
//!
//! A record is written exactly once per call, after the call settles
//! (success or failure). The wrapped transport never alters the call's
//! arguments, result, or error; timing and outcome are observed from the
//! side.

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Default capacity of the network record buffer.
pub const DEFAULT_NETWORK_CAPACITY: usize = 50;

// ── NetworkOutcome ────────────────────────────────────────────────────────────

/// How an intercepted network call settled.
///
/// Serializes as the bare status code for settled responses and the literal
/// string `"failed"` when the call errored before any response, matching the
/// export format consumed by the panel shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOutcome {
    /// The call produced a response with this HTTP status code,
    /// 2xx or not (a 404 is still a settled response).
    Status(u16),
    /// The call errored before producing any response.
    Failed,
}

impl NetworkOutcome {
    /// Whether the call is considered an error (transport failure or 4xx/5xx).
    pub fn is_error(&self) -> bool {
        match self {
            NetworkOutcome::Status(status) => *status >= 400,
            NetworkOutcome::Failed => true,
        }
    }

    /// The status code, if the call settled with a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkOutcome::Status(status) => Some(*status),
            NetworkOutcome::Failed => None,
        }
    }
}

impl Serialize for NetworkOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NetworkOutcome::Status(status) => serializer.serialize_u16(*status),
            NetworkOutcome::Failed => serializer.serialize_str("failed"),
        }
    }
}

impl std::fmt::Display for NetworkOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkOutcome::Status(status) => write!(f, "{}", status),
            NetworkOutcome::Failed => f.write_str("failed"),
        }
    }
}

// ── NetworkRecord ─────────────────────────────────────────────────────────────

/// A settled outbound network call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRecord {
    /// Session-unique identifier, monotonically increasing.
    pub id: u64,
    /// HTTP method: GET, POST, PUT, DELETE, etc.
    pub method: String,
    /// Full target URL as the caller passed it.
    pub target: String,
    /// Status code or failure marker.
    pub outcome: NetworkOutcome,
    /// Response status text, or the error message for failed calls.
    pub status_text: String,
    /// Wall-clock time from dispatch to settlement, in milliseconds.
    pub duration_millis: f64,
    /// Response size in bytes, when the transport reported one.
    pub size_hint: Option<u64>,
    /// When the call settled.
    pub timestamp: DateTime<Local>,
}

impl NetworkRecord {
    /// Whether the call is considered an error.
    pub fn is_error(&self) -> bool {
        self.outcome.is_error()
    }

    /// Human-readable response size. `None` if the transport reported none.
    pub fn size_display(&self) -> Option<String> {
        self.size_hint.map(format_bytes)
    }

    /// Short path from the target (strips scheme + host for display).
    pub fn short_target(&self) -> &str {
        if let Some(rest) = self
            .target
            .strip_prefix("https://")
            .or_else(|| self.target.strip_prefix("http://"))
        {
            if let Some(slash_pos) = rest.find('/') {
                return &rest[slash_pos..];
            }
        }
        &self.target
    }
}

// ── Transport vocabulary ──────────────────────────────────────────────────────

/// An outbound request as handed to the transport capability point.
///
/// The wrapper forwards this value to the real transport untouched; only
/// `method` and `target` are read (for the record written once the call
/// settles).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method: GET, POST, PUT, DELETE, etc.
    pub method: String,
    /// Full target URL.
    pub target: String,
    /// Request headers, insertion-ordered.
    pub headers: Vec<(String, String)>,
    /// Request body bytes, if any.
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// The settled response a transport produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status text, e.g. "OK" or "Not Found".
    pub status_text: String,
    /// Response content length in bytes, if known.
    pub content_length: Option<u64>,
}

// ── Helper functions ──────────────────────────────────────────────────────────

/// Format a byte count as a human-readable string (B, KB, MB).
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a duration in milliseconds for display.
pub fn format_duration_ms(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.0}us", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{:.0}ms", ms)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
