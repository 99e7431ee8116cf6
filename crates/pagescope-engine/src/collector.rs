//! # Collector - Session State Owner
//!
//! The [`Collector`] exclusively owns everything the engine gathers: the
//! four bounded record buffers, the latest-value snapshot slots, and the
//! monotonic record id counter. The interceptor and sampler write through
//! it; the panel shell and exporter only ever read cloned snapshots through
//! the accessor methods.
//!
//! Locking policy: every slot sits behind its own `std::sync::Mutex`, and a
//! poisoned lock recovers to its inner value. Recording must never panic
//! the caller whose signal is being observed, and a panicked writer leaves
//! at worst one stale slot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use pagescope_core::audit::{DesignAudit, ScoreEstimate, SeoReport};
use pagescope_core::buffer::BoundedBuffer;
use pagescope_core::environment::{MemorySample, PerformanceSnapshot, SystemSnapshot};
use pagescope_core::failure::FailureRecord;
use pagescope_core::log::LogRecord;
use pagescope_core::network::NetworkRecord;
use pagescope_core::store::StoreInventory;

use crate::config::BufferCapacities;

/// Lock a mutex, recovering from poisoning.
pub(crate) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ── Accessor result types ─────────────────────────────────────────────────────

/// Ordered contents of the four record buffers at the moment of the call.
#[derive(Debug, Clone, Serialize)]
pub struct BufferSnapshots {
    pub log: Vec<LogRecord>,
    pub network: Vec<NetworkRecord>,
    pub failures: Vec<FailureRecord>,
    pub memory: Vec<MemorySample>,
}

/// Latest environment state. `None` fields have not been computed yet.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentSnapshots {
    pub system: Option<SystemSnapshot>,
    pub performance: Option<PerformanceSnapshot>,
}

/// Latest document audits. `None` fields have not been computed yet.
#[derive(Debug, Clone, Serialize)]
pub struct AuditSnapshots {
    pub design: Option<DesignAudit>,
    pub seo: Option<SeoReport>,
    /// Simulated placeholder scores, not measurements.
    pub scores: Option<ScoreEstimate>,
}

/// Buffer categories that can be selectively cleared.
///
/// Environment, audit, and store snapshots are always "latest value" and
/// cannot be cleared; the memory series resets only on deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearCategory {
    Log,
    Network,
    Failure,
}

// ── Collector ─────────────────────────────────────────────────────────────────

/// Exclusive owner of all collected session state.
#[derive(Debug)]
pub struct Collector {
    next_id: AtomicU64,
    log: Mutex<BoundedBuffer<LogRecord>>,
    network: Mutex<BoundedBuffer<NetworkRecord>>,
    failures: Mutex<BoundedBuffer<FailureRecord>>,
    memory: Mutex<BoundedBuffer<MemorySample>>,
    system: Mutex<Option<SystemSnapshot>>,
    performance: Mutex<Option<PerformanceSnapshot>>,
    design: Mutex<Option<DesignAudit>>,
    seo: Mutex<Option<SeoReport>>,
    scores: Mutex<Option<ScoreEstimate>>,
    stores: Mutex<Option<StoreInventory>>,
}

impl Collector {
    pub fn new(capacities: &BufferCapacities) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            log: Mutex::new(BoundedBuffer::new(capacities.log)),
            network: Mutex::new(BoundedBuffer::new(capacities.network)),
            failures: Mutex::new(BoundedBuffer::new(capacities.failure)),
            memory: Mutex::new(BoundedBuffer::new(capacities.memory)),
            system: Mutex::new(None),
            performance: Mutex::new(None),
            design: Mutex::new(None),
            seo: Mutex::new(None),
            scores: Mutex::new(None),
            stores: Mutex::new(None),
        }
    }

    /// Next record id. Session-unique and monotonically increasing.
    pub(crate) fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    // ── Writers (interceptor + sampler only) ────────────────────

    pub(crate) fn append_log(&self, record: LogRecord) {
        lock_or_recover(&self.log).append(record);
    }

    pub(crate) fn append_network(&self, record: NetworkRecord) {
        lock_or_recover(&self.network).append(record);
    }

    pub(crate) fn append_failure(&self, record: FailureRecord) {
        lock_or_recover(&self.failures).append(record);
    }

    pub(crate) fn append_memory(&self, sample: MemorySample) {
        lock_or_recover(&self.memory).append(sample);
    }

    pub(crate) fn set_system(&self, snapshot: SystemSnapshot) {
        *lock_or_recover(&self.system) = Some(snapshot);
    }

    pub(crate) fn set_performance(&self, snapshot: PerformanceSnapshot) {
        *lock_or_recover(&self.performance) = Some(snapshot);
    }

    pub(crate) fn set_design(&self, audit: DesignAudit) {
        *lock_or_recover(&self.design) = Some(audit);
    }

    pub(crate) fn set_seo(&self, report: SeoReport) {
        *lock_or_recover(&self.seo) = Some(report);
    }

    pub(crate) fn set_scores(&self, estimate: ScoreEstimate) {
        *lock_or_recover(&self.scores) = Some(estimate);
    }

    pub(crate) fn set_stores(&self, inventory: StoreInventory) {
        *lock_or_recover(&self.stores) = Some(inventory);
    }

    // ── Read-only accessors (the export surface) ────────────────

    /// Ordered contents of the four record buffers.
    pub fn buffers(&self) -> BufferSnapshots {
        BufferSnapshots {
            log: lock_or_recover(&self.log).snapshot(),
            network: lock_or_recover(&self.network).snapshot(),
            failures: lock_or_recover(&self.failures).snapshot(),
            memory: lock_or_recover(&self.memory).snapshot(),
        }
    }

    /// Latest system and performance snapshots.
    pub fn environment(&self) -> EnvironmentSnapshots {
        EnvironmentSnapshots {
            system: lock_or_recover(&self.system).clone(),
            performance: lock_or_recover(&self.performance).clone(),
        }
    }

    /// Latest design audit, SEO report, and simulated scores.
    pub fn audits(&self) -> AuditSnapshots {
        AuditSnapshots {
            design: lock_or_recover(&self.design).clone(),
            seo: lock_or_recover(&self.seo).clone(),
            scores: *lock_or_recover(&self.scores),
        }
    }

    /// Latest store inventory.
    pub fn stores(&self) -> Option<StoreInventory> {
        lock_or_recover(&self.stores).clone()
    }

    /// Empty one clearable buffer. Snapshot slots are not clearable.
    pub fn clear(&self, category: ClearCategory) {
        match category {
            ClearCategory::Log => lock_or_recover(&self.log).clear(),
            ClearCategory::Network => lock_or_recover(&self.network).clear(),
            ClearCategory::Failure => lock_or_recover(&self.failures).clear(),
        }
    }

    /// Discard everything: buffers, snapshot slots, and the id counter.
    /// A session reactivated after this starts from scratch.
    pub(crate) fn reset(&self) {
        lock_or_recover(&self.log).clear();
        lock_or_recover(&self.network).clear();
        lock_or_recover(&self.failures).clear();
        lock_or_recover(&self.memory).clear();
        *lock_or_recover(&self.system) = None;
        *lock_or_recover(&self.performance) = None;
        *lock_or_recover(&self.design) = None;
        *lock_or_recover(&self.seo) = None;
        *lock_or_recover(&self.scores) = None;
        *lock_or_recover(&self.stores) = None;
        self.next_id.store(1, Ordering::Relaxed);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
