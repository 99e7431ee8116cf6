//! # Signal Interceptor
//!
//! Wraps the host's capability points (log sink, network transport, and the
//! two failure channels) so that every invocation is forwarded to its
//! original behavior unchanged *and* recorded into the collector.
//!
//! The wrapping contract, in order of importance:
//!
//! 1. The wrapped operation's outcome is never affected. Requests, results,
//!    and errors pass through untouched; recording happens in a side channel
//!    after the fact, and a recording failure is swallowed.
//! 2. `install` is idempotent: installing while installed returns the same
//!    wrapped instances. Single wrap, never nested.
//! 3. `restore` is idempotent and deterministic: it hands back the captured
//!    originals, and wrapped instances still held by the caller become inert
//!    pass-throughs. No record is appended after `restore` returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Local;
use futures_util::future::BoxFuture;

use pagescope_core::failure::{FailureChannel, FailureEvent, FailureRecord};
use pagescope_core::log::{truncate_message, LogCategory, LogRecord};
use pagescope_core::network::{
    NetworkOutcome, NetworkRecord, TransportRequest, TransportResponse,
};
use pagescope_core::prelude::*;

use crate::collector::{lock_or_recover, Collector};
use crate::host::{CapabilityPoints, FailureHandler, LogSink, NetworkTransport};

// ── SignalInterceptor ─────────────────────────────────────────────────────────

struct InstallState {
    originals: CapabilityPoints,
    wrapped: CapabilityPoints,
}

/// Installs and removes recording wrappers around the host's capability
/// points.
pub struct SignalInterceptor {
    collector: Arc<Collector>,
    max_message_len: usize,
    /// Shared with every wrapper; cleared by `restore` so outstanding
    /// wrapped references stop recording immediately.
    active: Arc<AtomicBool>,
    state: Mutex<Option<InstallState>>,
}

impl SignalInterceptor {
    pub fn new(collector: Arc<Collector>, max_message_len: usize) -> Self {
        Self {
            collector,
            max_message_len,
            active: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(None),
        }
    }

    /// Wrap the given capability points and return the wrapped set for the
    /// caller to substitute at its integration point.
    ///
    /// Idempotent: a second call while installed ignores `points` and
    /// returns the wrapped set from the first call, so repeated installs can
    /// never stack wrappers.
    pub fn install(&self, points: CapabilityPoints) -> CapabilityPoints {
        let mut state = lock_or_recover(&self.state);
        if let Some(installed) = state.as_ref() {
            debug!("interceptor already installed, returning existing wrappers");
            return installed.wrapped.clone();
        }

        let wrapped = CapabilityPoints {
            log_sink: Arc::new(RecordingLogSink {
                inner: Arc::clone(&points.log_sink),
                collector: Arc::clone(&self.collector),
                active: Arc::clone(&self.active),
                max_message_len: self.max_message_len,
            }),
            transport: Arc::new(RecordingTransport {
                inner: Arc::clone(&points.transport),
                collector: Arc::clone(&self.collector),
                active: Arc::clone(&self.active),
            }),
            uncaught: Arc::new(RecordingFailureHandler {
                inner: Arc::clone(&points.uncaught),
                collector: Arc::clone(&self.collector),
                active: Arc::clone(&self.active),
                channel: FailureChannel::Uncaught,
            }),
            unobserved: Arc::new(RecordingFailureHandler {
                inner: Arc::clone(&points.unobserved),
                collector: Arc::clone(&self.collector),
                active: Arc::clone(&self.active),
                channel: FailureChannel::UnobservedAsync,
            }),
        };

        self.active.store(true, Ordering::SeqCst);
        *state = Some(InstallState {
            originals: points,
            wrapped: wrapped.clone(),
        });
        debug!("interceptor installed");
        wrapped
    }

    /// Remove interception and return the captured originals for the caller
    /// to substitute back.
    ///
    /// Idempotent and safe to call when never installed (returns `None`).
    /// After this returns, wrapped instances the caller still holds forward
    /// calls but append no further records.
    pub fn restore(&self) -> Option<CapabilityPoints> {
        self.active.store(false, Ordering::SeqCst);
        let originals = lock_or_recover(&self.state)
            .take()
            .map(|installed| installed.originals);
        if originals.is_some() {
            debug!("interceptor restored");
        }
        originals
    }

    /// Whether wrappers are currently installed.
    pub fn is_installed(&self) -> bool {
        lock_or_recover(&self.state).is_some()
    }
}

impl std::fmt::Debug for SignalInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalInterceptor")
            .field("installed", &self.is_installed())
            .finish_non_exhaustive()
    }
}

// ── Log sink wrapper ──────────────────────────────────────────────────────────

struct RecordingLogSink {
    inner: Arc<dyn LogSink>,
    collector: Arc<Collector>,
    active: Arc<AtomicBool>,
    max_message_len: usize,
}

impl LogSink for RecordingLogSink {
    fn write(&self, category: LogCategory, args: &[serde_json::Value]) {
        // Forward first: the real sink's side effects and formatting happen
        // exactly as they would without interception.
        self.inner.write(category, args);

        if !self.active.load(Ordering::SeqCst) {
            return;
        }

        let message = truncate_message(&stringify_args(args), self.max_message_len);
        let stack = category
            .captures_stack()
            .then(|| std::backtrace::Backtrace::force_capture().to_string());
        let record = LogRecord {
            id: self.collector.next_id(),
            category,
            message,
            stack,
            timestamp: Local::now(),
        };
        self.collector.append_log(record);
    }
}

/// Join loosely-typed log arguments into one message string.
///
/// Strings are taken verbatim; other values are JSON-encoded. A value that
/// cannot be encoded degrades to a placeholder rather than an error, so
/// recording can never break the wrapped call.
fn stringify_args(args: &[serde_json::Value]) -> String {
    args.iter()
        .map(|value| match value {
            serde_json::Value::String(text) => text.clone(),
            other => serde_json::to_string(other)
                .unwrap_or_else(|_| "[unserializable]".to_string()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Transport wrapper ─────────────────────────────────────────────────────────

struct RecordingTransport {
    inner: Arc<dyn NetworkTransport>,
    collector: Arc<Collector>,
    active: Arc<AtomicBool>,
}

impl NetworkTransport for RecordingTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        Box::pin(async move {
            let method = request.method.clone();
            let target = request.target.clone();
            let started = Instant::now();

            let result = self.inner.send(request).await;

            if self.active.load(Ordering::SeqCst) {
                let duration_millis = started.elapsed().as_secs_f64() * 1000.0;
                let (outcome, status_text, size_hint) = match &result {
                    Ok(response) => (
                        NetworkOutcome::Status(response.status),
                        response.status_text.clone(),
                        response.content_length,
                    ),
                    Err(error) => (NetworkOutcome::Failed, error.to_string(), None),
                };
                self.collector.append_network(NetworkRecord {
                    id: self.collector.next_id(),
                    method,
                    target,
                    outcome,
                    status_text,
                    duration_millis,
                    size_hint,
                    timestamp: Local::now(),
                });
            }

            // Success or failure, the caller sees exactly what the real
            // transport produced.
            result
        })
    }
}

// ── Failure handler wrapper ───────────────────────────────────────────────────

struct RecordingFailureHandler {
    inner: Arc<dyn FailureHandler>,
    collector: Arc<Collector>,
    active: Arc<AtomicBool>,
    channel: FailureChannel,
}

impl FailureHandler for RecordingFailureHandler {
    fn on_failure(&self, event: &FailureEvent) {
        // Record before forwarding: the original handler may terminate the
        // session, and the record must exist by then.
        if self.active.load(Ordering::SeqCst) {
            let record =
                FailureRecord::from_event(self.collector.next_id(), self.channel, event);
            self.collector.append_failure(record);
        }
        self.inner.on_failure(event);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
