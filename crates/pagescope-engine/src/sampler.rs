//! # Sampler - Periodic Snapshot Refresh
//!
//! The sampler is the only autonomously scheduled work in the engine: a
//! single task that refreshes every snapshot slot on a fixed period. It is
//! an explicit schedulable object: [`Sampler::tick`] is public and
//! synchronous, so tests drive refresh cycles deterministically without real
//! time passing.
//!
//! Each tick, in order: system and performance snapshots, one memory sample
//! (when heap introspection is available), the store inventory, and the
//! document audits. A failing sub-computation is logged at debug level and
//! skipped for that tick, leaving its previous value unchanged; the
//! remaining sections still update.
//!
//! Ticks never overlap: one sequential task runs them, and the tick body
//! contains no await points, so a started tick always completes before the
//! loop suspends again.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use pagescope_core::environment::MemorySample;
use pagescope_core::prelude::*;
use pagescope_core::store::StoreInventory;

use crate::analyzer::DocumentAnalyzer;
use crate::collector::{lock_or_recover, Collector};
use crate::host::HostCapabilities;
use crate::scores;

struct RunningSampler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Periodic, cancellable snapshot refresh task.
pub struct Sampler {
    collector: Arc<Collector>,
    host: HostCapabilities,
    period: Duration,
    running: Mutex<Option<RunningSampler>>,
}

impl Sampler {
    pub fn new(collector: Arc<Collector>, host: HostCapabilities, period: Duration) -> Self {
        Self {
            collector,
            host,
            period,
            running: Mutex::new(None),
        }
    }

    /// Run one refresh cycle synchronously.
    ///
    /// Sub-computations are isolated: a failing section is skipped for this
    /// tick (its previous value stays in place) and the rest still update.
    pub fn tick(&self) {
        match self.host.probe.system() {
            Ok(snapshot) => self.collector.set_system(snapshot),
            Err(e) => debug!("system snapshot skipped this tick: {}", e),
        }

        match self.host.probe.performance() {
            Ok(snapshot) => self.collector.set_performance(snapshot),
            Err(e) => debug!("performance snapshot skipped this tick: {}", e),
        }

        // Heap introspection being absent is an unavailability marker, not
        // an error: the series simply gains no sample this tick.
        if let Some(heap) = self.host.probe.heap() {
            self.collector.append_memory(MemorySample::from_heap(heap));
        }

        match self.read_stores() {
            Ok(inventory) => self.collector.set_stores(inventory),
            Err(e) => debug!("store inventory skipped this tick: {}", e),
        }

        let document = self.host.document.as_ref();
        self.collector
            .set_design(DocumentAnalyzer::design_audit(document));
        self.collector.set_seo(DocumentAnalyzer::seo_report(document));
        self.collector.set_scores(scores::simulate());
    }

    fn read_stores(&self) -> Result<StoreInventory> {
        Ok(StoreInventory {
            durable: self.host.stores.durable_entries()?.into_iter().collect(),
            ephemeral: self.host.stores.ephemeral_entries()?.into_iter().collect(),
            cookies: self.host.stores.cookie_entries()?.into_iter().collect(),
        })
    }

    /// Start the periodic tick loop. Idempotent: calling while running is a
    /// no-op.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) {
        let mut running = lock_or_recover(&self.running);
        if running.is_some() {
            debug!("sampler already running");
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let sampler = Arc::clone(self);
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // An interval's first tick completes immediately, and activation
            // already refreshed synchronously. Consume it so the first
            // periodic tick lands one full period later.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sampler.tick();
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            debug!("sampler loop exiting");
                            break;
                        }
                    }
                }
            }
        });

        *running = Some(RunningSampler {
            shutdown_tx,
            handle,
        });
        info!("sampler started, period {:?}", period);
    }

    /// Stop the tick loop. Idempotent and safe when not running; after this
    /// returns no further tick fires.
    pub fn stop(&self) {
        let mut running = lock_or_recover(&self.running);
        if let Some(task) = running.take() {
            let _ = task.shutdown_tx.send(true);
            // The loop only suspends between ticks (the tick body has no
            // await points), so aborting here cannot cut a tick in half.
            task.handle.abort();
            info!("sampler stopped");
        }
    }

    /// Whether the periodic loop is currently running.
    pub fn is_running(&self) -> bool {
        lock_or_recover(&self.running).is_some()
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
