//! # pagescope-core - Core Domain Types
//!
//! Foundation crate for Pagescope. Provides the record and snapshot types
//! collected by the instrumentation engine, the bounded buffer they live in,
//! error handling, and tracing setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Buffered records
//! - [`LogRecord`] / [`LogCategory`] - intercepted structured log calls
//! - [`NetworkRecord`] / [`NetworkOutcome`] - settled outbound network calls
//! - [`FailureRecord`] / [`FailureChannel`] - uncaught and unobserved failures
//! - [`MemorySample`] - periodic heap usage readings
//! - [`BoundedBuffer`] - the fixed-capacity FIFO sequence all of the above
//!   are stored in
//!
//! ### Latest-value snapshots (`environment`, `audit`, `store`)
//! - [`SystemSnapshot`] / [`PerformanceSnapshot`] - environment state,
//!   replaced on every sampler tick
//! - [`DesignAudit`] / [`SeoReport`] - structural document analyses
//! - [`ScoreEstimate`] - simulated audit scores (placeholder values)
//! - [`StoreInventory`] - durable/ephemeral/cookie store contents
//!
//! ### Error handling (`error`)
//! - [`Error`] - custom error enum with a recoverable classification
//! - [`Result`] - type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use pagescope_core::prelude::*;
//! ```

pub mod audit;
pub mod buffer;
pub mod environment;
pub mod error;
pub mod failure;
pub mod log;
pub mod logging;
pub mod network;
pub mod store;

/// Prelude for common imports used throughout the Pagescope crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use audit::{
    DesignAudit, ListenerSummary, ScoreEstimate, SeoReport, MAX_FONT_NAMES, MAX_PALETTE_COLORS,
    MAX_SAMPLE_TAGS, NO_DESCRIPTION, NO_KEYWORDS, NO_TITLE,
};
pub use buffer::BoundedBuffer;
pub use environment::{
    bytes_to_mb, ConnectionInfo, Dimensions, HeapStats, MemorySample, PerformanceSnapshot,
    SystemSnapshot, DEFAULT_MEMORY_CAPACITY,
};
pub use error::{Error, Result, ResultExt};
pub use failure::{
    FailureChannel, FailureEvent, FailureRecord, SourceLocation, DEFAULT_FAILURE_CAPACITY,
};
pub use log::{
    truncate_message, LogCategory, LogRecord, DEFAULT_LOG_CAPACITY, DEFAULT_MAX_MESSAGE_LEN,
};
pub use network::{
    format_bytes, format_duration_ms, NetworkOutcome, NetworkRecord, TransportRequest,
    TransportResponse, DEFAULT_NETWORK_CAPACITY,
};
pub use store::StoreInventory;
