//! # Host Capability Traits
//!
//! The engine never reaches for globals: every externally-owned capability
//! point (the structured log sink, the outbound network transport, the two
//! failure-signal channels, the rendered document tree, environment
//! introspection, and the key/value stores) arrives as an injected trait
//! object. The interceptor returns wrapped implementations that the host
//! substitutes at its own integration point, which keeps install/restore
//! trivially testable in isolation.
//!
//! All traits here are object-safe; the transport trait returns a
//! [`BoxFuture`] rather than using an async method so it can live behind
//! `Arc<dyn NetworkTransport>`.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use pagescope_core::environment::{HeapStats, PerformanceSnapshot, SystemSnapshot};
use pagescope_core::failure::FailureEvent;
use pagescope_core::log::LogCategory;
use pagescope_core::network::{TransportRequest, TransportResponse};
use pagescope_core::Result;

// ── Signal capability points ──────────────────────────────────────────────────

/// The structured log sink the subject program writes to.
pub trait LogSink: Send + Sync {
    /// Write one log call. `args` are the call's arguments as loosely-typed
    /// values; the sink owns formatting and side effects.
    fn write(&self, category: LogCategory, args: &[serde_json::Value]);
}

/// The outbound network transport.
///
/// Implementations settle the request and report the response, or fail with
/// an error. The recording wrapper forwards requests untouched and
/// propagates results and errors unchanged.
pub trait NetworkTransport: Send + Sync {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>>;
}

/// A failure-signal channel handler.
///
/// Two independent instances are injected: one for synchronous uncaught
/// failures, one for asynchronous failures nobody observed. Handlers own the
/// default propagation behavior; the recording wrapper never suppresses it.
pub trait FailureHandler: Send + Sync {
    fn on_failure(&self, event: &FailureEvent);
}

/// The full set of wrappable capability points, as handed to
/// [`SignalInterceptor::install`] and returned (wrapped) from it.
///
/// [`SignalInterceptor::install`]: crate::interceptor::SignalInterceptor::install
#[derive(Clone)]
pub struct CapabilityPoints {
    pub log_sink: Arc<dyn LogSink>,
    pub transport: Arc<dyn NetworkTransport>,
    /// Handler for synchronous uncaught failures.
    pub uncaught: Arc<dyn FailureHandler>,
    /// Handler for asynchronous unobserved failures.
    pub unobserved: Arc<dyn FailureHandler>,
}

impl std::fmt::Debug for CapabilityPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityPoints").finish_non_exhaustive()
    }
}

// ── Document query ────────────────────────────────────────────────────────────

/// A visible node of the rendered document tree.
///
/// Carries the structural facts the analyzer reads; resolved styling is a
/// separate lookup via [`DocumentQuery::resolved_style_of`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    /// Position in document order, unique within one query.
    pub index: usize,
    /// Lowercase tag name, e.g. "div".
    pub tag: String,
    /// Attribute name/value pairs, names lowercase.
    pub attributes: Vec<(String, String)>,
}

impl NodeRef {
    pub fn new(index: usize, tag: impl Into<String>) -> Self {
        Self {
            index,
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the node carries the named attribute at all.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(attr_name, _)| attr_name == name)
    }
}

/// Resolved style values for one node, as computed by the host's rendering
/// engine. `None` fields were not set on the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    /// Comma-separated font-family list as resolved by the host.
    pub font_family: Option<String>,
}

/// Read-only access to the rendered document tree.
///
/// The analyzer contains no environment-specific traversal code; everything
/// it knows about the document comes through this interface.
pub trait DocumentQuery: Send + Sync {
    /// Document title, if any.
    fn title(&self) -> Option<String>;

    /// Content of the named meta field, if present.
    fn meta(&self, name: &str) -> Option<String>;

    /// Host name the document was served from, if known.
    fn host_name(&self) -> Option<String>;

    /// All visible nodes in document order.
    fn query_all_nodes(&self) -> Vec<NodeRef>;

    /// Resolved style of one node. `None` when the node has no computed
    /// style (e.g. it left the tree between query and lookup).
    fn resolved_style_of(&self, node: &NodeRef) -> Option<ResolvedStyle>;
}

// ── Environment probe ─────────────────────────────────────────────────────────

/// Introspection of the host environment.
///
/// `system` and `performance` may fail transiently (the sampler skips the
/// section for that tick); absent heap introspection is not an error but a
/// `None` from [`EnvironmentProbe::heap`].
pub trait EnvironmentProbe: Send + Sync {
    fn system(&self) -> Result<SystemSnapshot>;

    fn performance(&self) -> Result<PerformanceSnapshot>;

    /// Current heap readings, or `None` when the host exposes no heap
    /// introspection.
    fn heap(&self) -> Option<HeapStats>;
}

// ── Store access ──────────────────────────────────────────────────────────────

/// Read-only access to the host's key/value stores.
pub trait StoreAccess: Send + Sync {
    fn durable_entries(&self) -> Result<Vec<(String, String)>>;

    fn ephemeral_entries(&self) -> Result<Vec<(String, String)>>;

    fn cookie_entries(&self) -> Result<Vec<(String, String)>>;
}

// ── HostCapabilities ──────────────────────────────────────────────────────────

/// The read-side capabilities the sampler and analyzer consume.
///
/// Kept separate from [`CapabilityPoints`]: these are polled by the engine,
/// never wrapped or substituted.
#[derive(Clone)]
pub struct HostCapabilities {
    pub document: Arc<dyn DocumentQuery>,
    pub probe: Arc<dyn EnvironmentProbe>,
    pub stores: Arc<dyn StoreAccess>,
}

impl std::fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilities").finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
