use std::collections::{HashMap, VecDeque};

use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::domain::resource::resource_store::{LinkKey, NodeKey, ResourceStore};
use crate::domain::utils::id::NodeName;
use crate::error::{Error, Result};

/// The undirected graph of resource nodes connected by network links.
///
/// Built once after loading and immutable afterwards; all capacity accounting
/// lives inside the shared [`ResourceStore`] resources. Routing is
/// deterministic: adjacency lists are kept sorted by neighbor name, so the
/// breadth-first search always discovers the lexicographically smallest
/// shortest path first.
#[derive(Debug)]
pub struct NetworkTopology {
    store: ResourceStore,

    /// Neighbor lists per node, sorted by (neighbor name, link name).
    adjacency: HashMap<NodeKey, Vec<(NodeKey, LinkKey)>>,

    /// Connected-component id per node, from a disjoint-set union pass over
    /// all links. Lets path queries on disconnected pairs fail fast.
    components: HashMap<NodeKey, usize>,
}

impl NetworkTopology {
    /// Builds the topology over all nodes and links currently in `store`.
    ///
    /// Fails with [`Error::UnknownEndpoint`] if any link references a node
    /// that is not registered; the loader drops such records up front, so
    /// hitting this here means the store was assembled by hand incorrectly.
    pub fn build(store: ResourceStore) -> Result<Self> {
        let nodes = store.nodes();
        let links = store.links();

        // 1. Index nodes for the DSU structure.
        let mut node_position: HashMap<NodeKey, usize> = HashMap::with_capacity(nodes.len());
        for (position, (key, _)) in nodes.iter().enumerate() {
            node_position.insert(*key, position);
        }

        // 2. Build the adjacency lists, validating every endpoint.
        let mut adjacency: HashMap<NodeKey, Vec<(NodeKey, LinkKey)>> = HashMap::new();
        let mut dsu = QuickUnionUf::<UnionBySize>::new(nodes.len());

        for (link_key, link) in &links {
            let source_key = store.get_node_key(&link.get_source());
            let target_key = store.get_node_key(&link.get_target());

            let (source_key, target_key) = match (source_key, target_key) {
                (Some(s), Some(t)) => (s, t),
                (None, _) => {
                    return Err(Error::UnknownEndpoint { link: link.get_name().into(), endpoint: link.get_source().into() });
                }
                (_, None) => {
                    return Err(Error::UnknownEndpoint { link: link.get_name().into(), endpoint: link.get_target().into() });
                }
            };

            // Undirected: register the link under both endpoints.
            adjacency.entry(source_key).or_default().push((target_key, *link_key));
            adjacency.entry(target_key).or_default().push((source_key, *link_key));

            dsu.union(node_position[&source_key], node_position[&target_key]);
        }

        // 3. Fix the traversal order: neighbors ascending by name, then link name.
        for neighbors in adjacency.values_mut() {
            neighbors.sort_by_key(|(node_key, link_key)| {
                let node_name = store.get_node(*node_key).map(|n| String::from(n.get_name())).unwrap_or_default();
                let link_name = store.get_link(*link_key).map(|l| String::from(l.get_name())).unwrap_or_default();
                (node_name, link_name)
            });
        }

        let mut components: HashMap<NodeKey, usize> = HashMap::with_capacity(nodes.len());
        for (key, _) in &nodes {
            components.insert(*key, dsu.find(node_position[key]));
        }

        log::debug!("TopologyBuilt: {} nodes, {} links", nodes.len(), links.len());

        Ok(Self { store, adjacency, components })
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Neighbors of a node in deterministic traversal order.
    pub fn neighbors(&self, node_key: NodeKey) -> &[(NodeKey, LinkKey)] {
        self.adjacency.get(&node_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shortest path by hop count between two nodes, as the ordered sequence
    /// of links to traverse.
    ///
    /// Equal-hop ties resolve to the path with the lexicographically smallest
    /// node-name sequence, because neighbors are expanded in ascending name
    /// order and the first discovery wins. `from == to` yields the empty
    /// path. Returns `None` for unknown nodes or disconnected pairs.
    pub fn shortest_path(&self, from: &NodeName, to: &NodeName) -> Option<Vec<LinkKey>> {
        let start = self.store.get_node_key(from)?;
        let goal = self.store.get_node_key(to)?;

        if start == goal {
            return Some(Vec::new());
        }

        if self.components.get(&start) != self.components.get(&goal) {
            log::debug!("NoPathFound: {} => {} (different components)", from, to);
            return None;
        }

        let mut predecessor: HashMap<NodeKey, (NodeKey, LinkKey)> = HashMap::new();
        let mut queue: VecDeque<NodeKey> = VecDeque::new();
        queue.push_back(start);

        'search: while let Some(current) = queue.pop_front() {
            for (neighbor, link_key) in self.neighbors(current) {
                if *neighbor == start || predecessor.contains_key(neighbor) {
                    continue;
                }

                predecessor.insert(*neighbor, (current, *link_key));

                if *neighbor == goal {
                    break 'search;
                }

                queue.push_back(*neighbor);
            }
        }

        if !predecessor.contains_key(&goal) {
            log::debug!("NoPathFound: {} => {}", from, to);
            return None;
        }

        // Walk the predecessor chain backwards from the goal.
        let mut path: Vec<LinkKey> = Vec::new();
        let mut cursor = goal;
        while cursor != start {
            let (previous, link_key) = predecessor[&cursor];
            path.push(link_key);
            cursor = previous;
        }
        path.reverse();

        Some(path)
    }
}
