//! Last-write-wins node state

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::models::NodeMetrics;

/// Latest metrics per node id. Entries never expire.
#[derive(Debug, Default)]
pub struct StateStore {
    nodes: RwLock<HashMap<String, NodeMetrics>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was recorded for `node_id`
    pub fn put(&self, node_id: impl Into<String>, metrics: NodeMetrics) {
        self.nodes.write().insert(node_id.into(), metrics);
    }

    /// Point-in-time copy of every known node, ordered by id
    pub fn get_all(&self) -> BTreeMap<String, NodeMetrics> {
        self.nodes
            .read()
            .iter()
            .map(|(id, m)| (id.clone(), m.clone()))
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Drop every node record. The HTTP reset keeps nodes, so no route
    /// calls this.
    #[allow(dead_code)]
    pub fn clear(&self) {
        self.nodes.write().clear();
    }
}
