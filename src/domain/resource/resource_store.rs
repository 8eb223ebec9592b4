use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use slotmap::{SlotMap, new_key_type};

use crate::domain::resource::{network_link::NetworkLink, resource_node::ResourceNode};
use crate::domain::utils::id::{LinkName, NodeName};

new_key_type! {
    pub struct NodeKey;
    pub struct LinkKey;
}

/// Shared registry of all resource nodes and network links of one simulation.
///
/// Cloning the store is cheap and every clone points at the same resources,
/// so rounding, routing and reporting all observe the same usage counters.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    nodes: SlotMap<NodeKey, Arc<ResourceNode>>,
    links: SlotMap<LinkKey, Arc<NetworkLink>>,

    node_index: HashMap<NodeName, NodeKey>,
    link_index: HashMap<LinkName, LinkKey>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(StoreInner::default())) }
    }

    //---------------------
    // --- Node Methods ---
    //---------------------
    pub fn add_node(&self, node: ResourceNode) -> NodeKey {
        let mut guard = self.inner.write().unwrap();

        let name = node.get_name();
        if let Some(old_key) = guard.node_index.remove(&name) {
            log::warn!("DuplicateNodeName: Node {} was already registered and is replaced.", name);
            guard.nodes.remove(old_key);
        }

        let key = guard.nodes.insert(Arc::new(node));
        guard.node_index.insert(name, key);
        key
    }

    pub fn get_node(&self, node_key: NodeKey) -> Option<Arc<ResourceNode>> {
        let guard = self.inner.read().unwrap();
        guard.nodes.get(node_key).cloned()
    }

    pub fn get_node_key(&self, name: &NodeName) -> Option<NodeKey> {
        let guard = self.inner.read().unwrap();
        guard.node_index.get(name).copied()
    }

    pub fn get_node_by_name(&self, name: &NodeName) -> Option<Arc<ResourceNode>> {
        let guard = self.inner.read().unwrap();
        guard.node_index.get(name).and_then(|key| guard.nodes.get(*key)).cloned()
    }

    pub fn contains_node(&self, name: &NodeName) -> bool {
        let guard = self.inner.read().unwrap();
        guard.node_index.contains_key(name)
    }

    /// All nodes in insertion order, together with their keys.
    pub fn nodes(&self) -> Vec<(NodeKey, Arc<ResourceNode>)> {
        let guard = self.inner.read().unwrap();
        guard.nodes.iter().map(|(key, node)| (key, node.clone())).collect()
    }

    pub fn get_num_of_nodes(&self) -> usize {
        let guard = self.inner.read().unwrap();
        guard.nodes.len()
    }

    //---------------------
    // --- Link Methods ---
    //---------------------
    pub fn add_link(&self, link: NetworkLink) -> LinkKey {
        let mut guard = self.inner.write().unwrap();

        let name = link.get_name();
        if let Some(old_key) = guard.link_index.remove(&name) {
            log::warn!("DuplicateLinkName: Link {} was already registered and is replaced.", name);
            guard.links.remove(old_key);
        }

        let key = guard.links.insert(Arc::new(link));
        guard.link_index.insert(name, key);
        key
    }

    pub fn get_link(&self, link_key: LinkKey) -> Option<Arc<NetworkLink>> {
        let guard = self.inner.read().unwrap();
        guard.links.get(link_key).cloned()
    }

    pub fn get_link_by_name(&self, name: &LinkName) -> Option<Arc<NetworkLink>> {
        let guard = self.inner.read().unwrap();
        guard.link_index.get(name).and_then(|key| guard.links.get(*key)).cloned()
    }

    /// All links in insertion order, together with their keys.
    pub fn links(&self) -> Vec<(LinkKey, Arc<NetworkLink>)> {
        let guard = self.inner.read().unwrap();
        guard.links.iter().map(|(key, link)| (key, link.clone())).collect()
    }

    pub fn get_num_of_links(&self) -> usize {
        let guard = self.inner.read().unwrap();
        guard.links.len()
    }

    pub fn get_total_link_capacity(&self) -> f64 {
        let guard = self.inner.read().unwrap();
        guard.links.values().map(|link| link.get_capacity()).sum()
    }

    //----------------------------
    // --- Aggregation Methods ---
    //----------------------------

    /// Clears every usage counter so a fresh rounding pass can reuse the
    /// loaded topology.
    pub fn reset_usage(&self) {
        let guard = self.inner.read().unwrap();

        for node in guard.nodes.values() {
            node.reset();
        }
        for link in guard.links.values() {
            link.reset();
        }
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}
