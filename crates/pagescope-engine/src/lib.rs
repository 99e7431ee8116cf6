//! # pagescope-engine - Runtime Instrumentation Engine
//!
//! The engine behind the Pagescope diagnostics panel. It wraps
//! host-injected capability points (log sink, network transport, failure
//! channels), samples environment and performance state on a fixed period,
//! derives structural audits of the rendered document, and buffers
//! everything into bounded, JSON-serializable records.
//!
//! The visual shell is an external collaborator: it calls
//! [`Engine::activate`] / [`Engine::deactivate`] and reads snapshots through
//! the accessor methods. Nothing here renders anything, and nothing here
//! survives deactivation.
//!
//! ## Modules
//!
//! - [`host`] — capability traits the embedding host implements
//!   (log sink, transport, failure handlers, document query, environment
//!   probe, store access).
//! - [`interceptor`] — [`SignalInterceptor`]: transparent recording wrappers
//!   around the host's capability points, with idempotent install/restore.
//! - [`collector`] — [`Collector`]: exclusive owner of the bounded buffers
//!   and latest-value snapshot slots; its accessors are the read-only
//!   export surface.
//! - [`sampler`] — [`Sampler`]: the periodic refresh task, with an explicit
//!   `tick()` so tests drive it without real time.
//! - [`analyzer`] — pure document traversals producing the design audit and
//!   SEO report.
//! - [`scores`] — simulated audit score generation (placeholder values).
//! - [`config`] — [`EngineConfig`] with TOML loading and defaults.
//! - [`export`] — export file naming and JSON document bodies.
//! - [`engine`] — [`Engine`]: the activation lifecycle tying it together.

pub mod analyzer;
pub mod collector;
pub mod config;
pub mod engine;
pub mod export;
pub mod host;
pub mod interceptor;
pub mod sampler;
pub mod scores;

#[cfg(test)]
pub(crate) mod testing;

pub use analyzer::DocumentAnalyzer;
pub use collector::{
    AuditSnapshots, BufferSnapshots, ClearCategory, Collector, EnvironmentSnapshots,
};
pub use config::{EngineConfig, MIN_SAMPLE_PERIOD_MS};
pub use engine::Engine;
pub use export::{export_document, export_file_name, ExportCategory};
pub use host::{
    CapabilityPoints, DocumentQuery, EnvironmentProbe, FailureHandler, HostCapabilities, LogSink,
    NetworkTransport, NodeRef, ResolvedStyle, StoreAccess,
};
pub use interceptor::SignalInterceptor;
pub use sampler::Sampler;
