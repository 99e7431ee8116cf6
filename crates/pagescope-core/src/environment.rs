//! # Environment & Performance Domain Types
//!
//! Snapshots of host environment state (screen, platform, connectivity) and
//! page performance timings, plus the rolling [`MemorySample`] series.
//!
//! The two snapshot types are current-state, not history: the sampler fully
//! replaces them on every tick. Only memory readings accumulate, in a
//! bounded buffer.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Default capacity of the memory sample buffer.
///
/// At the default 2-second sampling period this holds two minutes of
/// history.
pub const DEFAULT_MEMORY_CAPACITY: usize = 60;

/// Convert a byte count to megabytes.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

// ── Dimensions ────────────────────────────────────────────────────────────────

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ── ConnectionInfo ────────────────────────────────────────────────────────────

/// Network connection characteristics, when the host exposes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Connection class label, e.g. "4g" or "wifi".
    pub effective_type: String,
    /// Estimated downlink bandwidth in megabits per second.
    pub downlink_mbps: f64,
    /// Estimated round-trip time in milliseconds.
    pub rtt_millis: f64,
}

// ── SystemSnapshot ────────────────────────────────────────────────────────────

/// Current host environment state. Fully replaced on every sampler tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub screen: Dimensions,
    pub viewport: Dimensions,
    pub pixel_ratio: f64,
    /// Host platform label, e.g. "Linux x86_64".
    pub platform_label: String,
    pub online: bool,
    /// `None` when the host does not expose connection introspection.
    pub connection: Option<ConnectionInfo>,
    /// IANA timezone name, e.g. "Europe/Berlin".
    pub timezone: String,
    /// When this snapshot was taken.
    pub timestamp: DateTime<Local>,
}

// ── PerformanceSnapshot ───────────────────────────────────────────────────────

/// Page load and heap timings. Fully replaced on every sampler tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSnapshot {
    /// Time until the document tree finished parsing, in milliseconds.
    pub dom_load_millis: f64,
    /// Time until the load event completed, in milliseconds.
    pub load_complete_millis: f64,
    /// Total page load time, in milliseconds.
    pub page_load_millis: f64,
    /// Time to first byte, in milliseconds.
    pub time_to_first_byte_millis: f64,
    /// Current heap usage in MB. `None` when heap introspection is
    /// unavailable on the host.
    pub heap_used_mb: Option<f64>,
    /// Heap size limit in MB. `None` when unavailable.
    pub heap_limit_mb: Option<f64>,
    /// When this snapshot was taken.
    pub timestamp: DateTime<Local>,
}

// ── HeapStats ─────────────────────────────────────────────────────────────────

/// Raw heap readings from the environment probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    /// Currently used heap, in bytes.
    pub used_bytes: u64,
    /// Heap size limit, in bytes.
    pub limit_bytes: u64,
}

impl HeapStats {
    /// Used heap in megabytes.
    pub fn used_mb(&self) -> f64 {
        bytes_to_mb(self.used_bytes)
    }

    /// Heap limit in megabytes.
    pub fn limit_mb(&self) -> f64 {
        bytes_to_mb(self.limit_bytes)
    }

    /// Heap utilization as a fraction (0.0–1.0).
    pub fn utilization(&self) -> f64 {
        if self.limit_bytes == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / self.limit_bytes as f64
    }
}

// ── MemorySample ──────────────────────────────────────────────────────────────

/// One heap usage reading, appended every sampler tick while heap
/// introspection is available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemorySample {
    pub used_heap_mb: f64,
    pub timestamp: DateTime<Local>,
}

impl MemorySample {
    /// Build a sample from raw heap readings, stamped now.
    pub fn from_heap(heap: HeapStats) -> Self {
        Self {
            used_heap_mb: heap.used_mb(),
            timestamp: Local::now(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
