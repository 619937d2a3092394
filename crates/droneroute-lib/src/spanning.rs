use serde::Serialize;
use tracing::{debug, warn};

use crate::network::{Network, NetworkEdge, Weight};

/// Disjoint-set union with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Representative of the set containing `item`.
    pub fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = item;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`. Returns `false` if they were
    /// already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

/// Minimum-weight edge set produced by [`minimum_spanning_tree`].
///
/// When the network is disconnected this is a spanning forest; check
/// [`is_connected`](Self::is_connected) before treating it as a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    /// Accepted edges in acceptance order.
    pub edges: Vec<NetworkEdge>,
    pub node_count: usize,
}

impl SpanningTree {
    /// Sum of accepted edge weights, saturating at `Weight::MAX`.
    pub fn total_weight(&self) -> Weight {
        self.edges
            .iter()
            .map(|edge| edge.weight)
            .fold(0, Weight::saturating_add)
    }

    /// `true` when the edges connect every node.
    pub fn is_connected(&self) -> bool {
        self.edges.len() + 1 >= self.node_count
    }

    /// Number of connected components spanned.
    pub fn component_count(&self) -> usize {
        self.node_count.saturating_sub(self.edges.len())
    }
}

/// Kruskal's algorithm.
///
/// Edges are considered by ascending weight, ties broken by endpoint
/// identifiers, so the result is deterministic for a given edge set.
pub fn minimum_spanning_tree(network: &Network) -> SpanningTree {
    let node_count = network.len();
    let target = node_count.saturating_sub(1);

    let mut candidates = network.indexed_edges();
    candidates.sort_unstable();

    let mut sets = DisjointSet::new(node_count);
    let mut edges = Vec::with_capacity(target);
    for (weight, a, b) in candidates {
        if edges.len() == target {
            break;
        }
        if sets.union(a, b) {
            edges.push(NetworkEdge {
                a: network.id_at(a).to_string(),
                b: network.id_at(b).to_string(),
                weight,
            });
        }
    }

    let tree = SpanningTree { edges, node_count };
    if tree.is_connected() {
        debug!(
            edges = tree.edges.len(),
            total = tree.total_weight(),
            "spanning tree built"
        );
    } else {
        warn!(
            components = tree.component_count(),
            "network is disconnected; returning a spanning forest"
        );
    }
    tree
}
