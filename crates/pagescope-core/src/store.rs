//! # Store Inventory Domain Types
//!
//! A point-in-time copy of the host's three key/value stores. Snapshotted,
//! not diffed: the sampler replaces the whole inventory every tick.

use std::collections::BTreeMap;

use serde::Serialize;

/// Contents of the durable, ephemeral, and cookie stores.
///
/// `BTreeMap` keeps serialized output key-ordered, so exports of an
/// unchanged store are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreInventory {
    /// Key/value pairs that survive a host restart.
    pub durable: BTreeMap<String, String>,
    /// Key/value pairs scoped to the current host session.
    pub ephemeral: BTreeMap<String, String>,
    /// Small cookie-style entries.
    pub cookies: BTreeMap<String, String>,
}

impl StoreInventory {
    /// Total entries across all three stores.
    pub fn total_entries(&self) -> usize {
        self.durable.len() + self.ephemeral.len() + self.cookies.len()
    }

    /// Whether all three stores are empty.
    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }
}
