//! # Engine - Activation Lifecycle
//!
//! [`Engine`] ties the pieces together behind the two commands the panel
//! shell knows: `activate` and `deactivate`. Activation wraps the capability
//! points, refreshes every snapshot once synchronously, and starts the
//! sampler; deactivation stops the sampler, hands back the original
//! capability points, and discards all collected state. Both are idempotent.
//!
//! Everything in between (reading buffers, environment, audits, stores,
//! clearing a buffer, building an export body) goes through the read-only
//! accessor surface the engine re-exposes from its [`Collector`].

use std::sync::Arc;

use pagescope_core::prelude::*;
use pagescope_core::store::StoreInventory;

use crate::collector::{
    AuditSnapshots, BufferSnapshots, ClearCategory, Collector, EnvironmentSnapshots,
};
use crate::config::EngineConfig;
use crate::export::{self, ExportCategory};
use crate::host::{CapabilityPoints, HostCapabilities};
use crate::interceptor::SignalInterceptor;
use crate::sampler::Sampler;

/// The instrumentation engine for one diagnostics session.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    collector: Arc<Collector>,
    interceptor: SignalInterceptor,
    sampler: Arc<Sampler>,
}

impl Engine {
    /// Wire an engine against the host's read-side capabilities.
    ///
    /// Nothing starts running until [`Engine::activate`].
    pub fn new(config: EngineConfig, host: HostCapabilities) -> Self {
        let collector = Arc::new(Collector::new(&config.buffers));
        let interceptor = SignalInterceptor::new(Arc::clone(&collector), config.max_message_len);
        let sampler = Arc::new(Sampler::new(
            Arc::clone(&collector),
            host,
            config.sample_period(),
        ));
        Self {
            config,
            collector,
            interceptor,
            sampler,
        }
    }

    /// Begin a session: wrap the capability points, refresh all snapshots
    /// once synchronously, and start the periodic sampler.
    ///
    /// Returns the wrapped capability points for the caller to substitute at
    /// its integration point. Idempotent: activating while active returns
    /// the wrapped points from the first call and has no additional effect.
    ///
    /// Must be called from within a tokio runtime (the sampler task is
    /// spawned on it).
    pub fn activate(&self, points: CapabilityPoints) -> CapabilityPoints {
        if self.interceptor.is_installed() {
            debug!("activate called while already active");
            return self.interceptor.install(points);
        }

        let wrapped = self.interceptor.install(points);
        // Snapshots are populated before the first periodic tick so readers
        // see data immediately after activation.
        self.sampler.tick();
        self.sampler.start();
        info!("engine activated");
        wrapped
    }

    /// End the session: stop the sampler, restore the original capability
    /// points, and discard every buffer and snapshot.
    ///
    /// Returns the originals for re-substitution, or `None` when already
    /// inactive. A later [`Engine::activate`] starts a fresh session with
    /// empty buffers.
    pub fn deactivate(&self) -> Option<CapabilityPoints> {
        self.sampler.stop();
        let originals = self.interceptor.restore();
        if originals.is_some() {
            self.collector.reset();
            info!("engine deactivated, session state discarded");
        }
        originals
    }

    /// Whether a session is currently active.
    pub fn is_active(&self) -> bool {
        self.interceptor.is_installed()
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Read-only accessor surface ──────────────────────────────

    /// Ordered contents of the four record buffers.
    pub fn buffers(&self) -> BufferSnapshots {
        self.collector.buffers()
    }

    /// Latest system and performance snapshots.
    pub fn environment(&self) -> EnvironmentSnapshots {
        self.collector.environment()
    }

    /// Latest design audit, SEO report, and simulated scores.
    pub fn audits(&self) -> AuditSnapshots {
        self.collector.audits()
    }

    /// Latest store inventory.
    pub fn stores(&self) -> Option<StoreInventory> {
        self.collector.stores()
    }

    /// Empty one clearable buffer (log, network, or failure).
    pub fn clear(&self, category: ClearCategory) {
        self.collector.clear(category);
    }

    /// JSON export body for one category; see [`export::export_document`].
    ///
    /// # Errors
    ///
    /// Returns [`pagescope_core::Error::Json`] if serialization fails.
    pub fn export(&self, category: ExportCategory) -> Result<String> {
        export::export_document(&self.collector, category)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
