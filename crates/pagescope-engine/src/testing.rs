//! In-memory host fakes shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Local;
use futures_util::future::BoxFuture;

use pagescope_core::environment::{
    ConnectionInfo, Dimensions, HeapStats, PerformanceSnapshot, SystemSnapshot,
};
use pagescope_core::failure::FailureEvent;
use pagescope_core::log::LogCategory;
use pagescope_core::network::{TransportRequest, TransportResponse};
use pagescope_core::{Error, Result};

use crate::host::{
    CapabilityPoints, DocumentQuery, EnvironmentProbe, FailureHandler, HostCapabilities, LogSink,
    NetworkTransport, NodeRef, ResolvedStyle, StoreAccess,
};

// ── Document fake ─────────────────────────────────────────────────────────────

/// A fixed document tree: nodes plus a parallel list of resolved styles.
pub(crate) struct FakeDocument {
    pub title: Option<String>,
    pub metas: Vec<(String, String)>,
    pub host: Option<String>,
    pub nodes: Vec<NodeRef>,
    pub styles: Vec<Option<ResolvedStyle>>,
}

impl FakeDocument {
    pub fn empty() -> Self {
        Self {
            title: Some("Test Page".to_string()),
            metas: vec![],
            host: Some("example.com".to_string()),
            nodes: vec![],
            styles: vec![],
        }
    }

    /// Push a node with its resolved style; keeps the two lists in step.
    pub fn push(&mut self, node: NodeRef, style: Option<ResolvedStyle>) {
        self.nodes.push(node);
        self.styles.push(style);
    }
}

impl DocumentQuery for FakeDocument {
    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn meta(&self, name: &str) -> Option<String> {
        self.metas
            .iter()
            .find(|(meta_name, _)| meta_name == name)
            .map(|(_, content)| content.clone())
    }

    fn host_name(&self) -> Option<String> {
        self.host.clone()
    }

    fn query_all_nodes(&self) -> Vec<NodeRef> {
        self.nodes.clone()
    }

    fn resolved_style_of(&self, node: &NodeRef) -> Option<ResolvedStyle> {
        self.styles.get(node.index).cloned().flatten()
    }
}

// ── Environment probe fake ────────────────────────────────────────────────────

/// Probe with switchable failure modes per section.
#[derive(Default)]
pub(crate) struct FakeProbe {
    pub fail_system: AtomicBool,
    pub fail_performance: AtomicBool,
    pub heap_unavailable: AtomicBool,
}

impl EnvironmentProbe for FakeProbe {
    fn system(&self) -> Result<SystemSnapshot> {
        if self.fail_system.load(Ordering::SeqCst) {
            return Err(Error::environment("system introspection failed"));
        }
        Ok(SystemSnapshot {
            screen: Dimensions {
                width: 2560,
                height: 1440,
            },
            viewport: Dimensions {
                width: 1280,
                height: 720,
            },
            pixel_ratio: 2.0,
            platform_label: "TestOS x86_64".to_string(),
            online: true,
            connection: Some(ConnectionInfo {
                effective_type: "4g".to_string(),
                downlink_mbps: 10.0,
                rtt_millis: 50.0,
            }),
            timezone: "UTC".to_string(),
            timestamp: Local::now(),
        })
    }

    fn performance(&self) -> Result<PerformanceSnapshot> {
        if self.fail_performance.load(Ordering::SeqCst) {
            return Err(Error::environment("performance introspection failed"));
        }
        Ok(PerformanceSnapshot {
            dom_load_millis: 120.0,
            load_complete_millis: 300.0,
            page_load_millis: 450.0,
            time_to_first_byte_millis: 80.0,
            heap_used_mb: Some(42.0),
            heap_limit_mb: Some(2048.0),
            timestamp: Local::now(),
        })
    }

    fn heap(&self) -> Option<HeapStats> {
        if self.heap_unavailable.load(Ordering::SeqCst) {
            return None;
        }
        Some(HeapStats {
            used_bytes: 44_040_192,
            limit_bytes: 2_147_483_648,
        })
    }
}

// ── Store fake ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct FakeStores {
    pub fail: AtomicBool,
    pub durable: Vec<(String, String)>,
    pub ephemeral: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
}

impl StoreAccess for FakeStores {
    fn durable_entries(&self) -> Result<Vec<(String, String)>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::store("store access denied"));
        }
        Ok(self.durable.clone())
    }

    fn ephemeral_entries(&self) -> Result<Vec<(String, String)>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::store("store access denied"));
        }
        Ok(self.ephemeral.clone())
    }

    fn cookie_entries(&self) -> Result<Vec<(String, String)>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::store("store access denied"));
        }
        Ok(self.cookies.clone())
    }
}

// ── Capability-point fakes ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct NullSink {
    pub calls: AtomicUsize,
}

impl LogSink for NullSink {
    fn write(&self, _category: LogCategory, _args: &[serde_json::Value]) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) struct OkTransport {
    pub status: u16,
}

impl NetworkTransport for OkTransport {
    fn send(&self, _request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        let status = self.status;
        Box::pin(async move {
            Ok(TransportResponse {
                status,
                status_text: "OK".to_string(),
                content_length: Some(128),
            })
        })
    }
}

#[derive(Default)]
pub(crate) struct NullHandler {
    pub calls: AtomicUsize,
}

impl FailureHandler for NullHandler {
    fn on_failure(&self, _event: &FailureEvent) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

// ── Assembly helpers ──────────────────────────────────────────────────────────

pub(crate) fn host_with(document: FakeDocument, probe: Arc<FakeProbe>) -> HostCapabilities {
    HostCapabilities {
        document: Arc::new(document),
        probe,
        stores: Arc::new(FakeStores::default()),
    }
}

pub(crate) fn default_host() -> HostCapabilities {
    host_with(FakeDocument::empty(), Arc::new(FakeProbe::default()))
}

pub(crate) fn null_points() -> CapabilityPoints {
    CapabilityPoints {
        log_sink: Arc::new(NullSink::default()),
        transport: Arc::new(OkTransport { status: 200 }),
        uncaught: Arc::new(NullHandler::default()),
        unobserved: Arc::new(NullHandler::default()),
    }
}
