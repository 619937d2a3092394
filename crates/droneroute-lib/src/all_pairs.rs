//! All-pairs shortest paths over edge weights only.
//!
//! Battery limits are not modelled here: the tables answer "cheapest path
//! ignoring energy" for every ordered pair of nodes.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::network::{Network, NodeId, NodeIndex, Weight};
use crate::path::Route;

/// Shortest-path distance; unreachable pairs are [`Distance::Infinite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Finite(Weight),
    Infinite,
}

impl Distance {
    pub fn finite(self) -> Option<Weight> {
        match self {
            Distance::Finite(value) => Some(value),
            Distance::Infinite => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    fn plus(self, other: Distance) -> Distance {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => Distance::Finite(a.saturating_add(b)),
            _ => Distance::Infinite,
        }
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.cmp(b),
            (Distance::Finite(_), Distance::Infinite) => Ordering::Less,
            (Distance::Infinite, Distance::Finite(_)) => Ordering::Greater,
            (Distance::Infinite, Distance::Infinite) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(value) => write!(f, "{value}"),
            Distance::Infinite => f.write_str("∞"),
        }
    }
}

/// `predecessor(s, t)` is the node just before `t` on a shortest path from `s`.
///
/// Every node known to the table has a (possibly empty) row. There is no entry
/// for `s == t` or for unreachable pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredecessorMatrix {
    rows: BTreeMap<NodeId, BTreeMap<NodeId, NodeId>>,
}

impl PredecessorMatrix {
    /// Empty table covering `nodes`.
    pub fn with_nodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        Self {
            rows: nodes
                .into_iter()
                .map(|node| (node.into(), BTreeMap::new()))
                .collect(),
        }
    }

    /// Record `predecessor` for the pair, adding rows as needed.
    pub fn insert(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        predecessor: impl Into<NodeId>,
    ) {
        let target = target.into();
        self.rows.entry(target.clone()).or_default();
        self.rows
            .entry(source.into())
            .or_default()
            .insert(target, predecessor.into());
    }

    pub fn get(&self, source: &str, target: &str) -> Option<&str> {
        self.rows
            .get(source)
            .and_then(|row| row.get(target))
            .map(String::as_str)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Number of nodes covered by the table.
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }
}

/// Shortest distance for every ordered pair of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceMatrix {
    rows: BTreeMap<NodeId, BTreeMap<NodeId, Distance>>,
}

impl DistanceMatrix {
    /// `None` when either node is absent from the table.
    pub fn get(&self, source: &str, target: &str) -> Option<Distance> {
        self.rows.get(source).and_then(|row| row.get(target)).copied()
    }

    /// All distances from `source`, in target identifier order.
    pub fn row(&self, source: &str) -> Option<&BTreeMap<NodeId, Distance>> {
        self.rows.get(source)
    }

    pub fn node_count(&self) -> usize {
        self.rows.len()
    }
}

/// Output of [`compute_all_pairs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllPairs {
    pub predecessors: PredecessorMatrix,
    pub distances: DistanceMatrix,
}

impl AllPairs {
    /// Cheapest path between two nodes with its cost.
    ///
    /// `None` when either node is unknown or the pair is unreachable.
    pub fn route(&self, source: &str, target: &str) -> Option<Route> {
        let cost = self.distances.get(source, target)?.finite()?;
        let steps = reconstruct_path(&self.predecessors, source, target)?;
        Some(Route { steps, cost })
    }
}

/// Run Floyd-Warshall over the network's edge weights.
///
/// Returns `None` for an empty network.
pub fn compute_all_pairs(network: &Network) -> Option<AllPairs> {
    let n = network.len();
    if n == 0 {
        return None;
    }

    let mut dist = vec![Distance::Infinite; n * n];
    let mut pred: Vec<Option<NodeIndex>> = vec![None; n * n];
    for i in 0..n {
        dist[i * n + i] = Distance::Finite(0);
    }
    for (weight, a, b) in network.indexed_edges() {
        dist[a * n + b] = Distance::Finite(weight);
        dist[b * n + a] = Distance::Finite(weight);
        pred[a * n + b] = Some(a);
        pred[b * n + a] = Some(b);
    }

    let mut relaxations = 0usize;
    for k in 0..n {
        for i in 0..n {
            let via_k = dist[i * n + k];
            if !via_k.is_finite() {
                continue;
            }
            for j in 0..n {
                let candidate = via_k.plus(dist[k * n + j]);
                if candidate < dist[i * n + j] {
                    dist[i * n + j] = candidate;
                    pred[i * n + j] = pred[k * n + j];
                    relaxations += 1;
                }
            }
        }
    }
    debug!(nodes = n, relaxations, "floyd-warshall complete");

    let mut predecessors = PredecessorMatrix::with_nodes(network.nodes().map(|node| node.id.clone()));
    let mut distances = DistanceMatrix::default();
    for i in 0..n {
        let source = network.id_at(i);
        let mut row = BTreeMap::new();
        for j in 0..n {
            let target = network.id_at(j);
            row.insert(target.to_string(), dist[i * n + j]);
            if let Some(p) = pred[i * n + j] {
                predecessors.insert(source, target, network.id_at(p));
            }
        }
        distances.rows.insert(source.to_string(), row);
    }

    Some(AllPairs {
        predecessors,
        distances,
    })
}

/// Walk predecessors backwards from `target` to `source`.
///
/// Returns `None` if either node is absent from the table, the chain breaks
/// before reaching `source`, or the walk grows past the number of nodes in the
/// table (a corrupt, cyclic chain). `source == target` yields `[source]`.
pub fn reconstruct_path(
    predecessors: &PredecessorMatrix,
    source: &str,
    target: &str,
) -> Option<Vec<NodeId>> {
    if !predecessors.contains_node(source) || !predecessors.contains_node(target) {
        return None;
    }

    let limit = predecessors.node_count();
    let mut path = vec![target.to_string()];
    let mut current = target;
    while current != source {
        let previous = predecessors.get(source, current)?;
        path.push(previous.to_string());
        if path.len() > limit {
            debug!(source, target, "predecessor chain exceeds node count");
            return None;
        }
        current = previous;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkBuilder, NodeRole};

    fn square() -> Network {
        NetworkBuilder::new()
            .node("A", NodeRole::Storage)
            .node("B", NodeRole::Client)
            .node("C", NodeRole::Client)
            .node("D", NodeRole::Recharge)
            .node("E", NodeRole::Client)
            .edge("A", "B", 1)
            .edge("B", "C", 2)
            .edge("C", "D", 3)
            .edge("D", "A", 10)
            .build()
            .unwrap()
    }

    #[test]
    fn distance_orders_infinite_last() {
        assert!(Distance::Finite(u64::MAX) < Distance::Infinite);
        assert_eq!(Distance::Finite(3).plus(Distance::Infinite), Distance::Infinite);
        assert_eq!(Distance::Infinite.to_string(), "∞");
    }

    #[test]
    fn computes_shortest_distances_and_paths() {
        let all = compute_all_pairs(&square()).expect("non-empty");
        assert_eq!(all.distances.get("A", "D"), Some(Distance::Finite(6)));
        assert_eq!(all.distances.get("A", "A"), Some(Distance::Finite(0)));
        let route = all.route("A", "D").expect("reachable");
        assert_eq!(route.steps, vec!["A", "B", "C", "D"]);
        assert_eq!(route.cost, 6);
        assert_eq!(all.predecessors.get("A", "D"), Some("C"));
    }

    #[test]
    fn unreachable_pairs_are_infinite_not_missing() {
        let all = compute_all_pairs(&square()).unwrap();
        assert_eq!(all.distances.get("A", "E"), Some(Distance::Infinite));
        assert_eq!(all.distances.get("A", "Z"), None);
        assert_eq!(all.route("A", "E"), None);
        assert_eq!(reconstruct_path(&all.predecessors, "A", "E"), None);
    }

    #[test]
    fn empty_network_has_no_tables() {
        let network = NetworkBuilder::new().build().unwrap();
        assert!(compute_all_pairs(&network).is_none());
    }

    #[test]
    fn same_node_reconstructs_to_single_step() {
        let all = compute_all_pairs(&square()).unwrap();
        assert_eq!(
            reconstruct_path(&all.predecessors, "E", "E"),
            Some(vec!["E".to_string()])
        );
    }

    #[test]
    fn cyclic_chain_is_rejected() {
        let mut table = PredecessorMatrix::with_nodes(["S", "X", "Y", "T"]);
        table.insert("S", "T", "X");
        table.insert("S", "X", "Y");
        table.insert("S", "Y", "X");
        assert_eq!(reconstruct_path(&table, "S", "T"), None);
    }

    #[test]
    fn broken_chain_is_rejected() {
        let mut table = PredecessorMatrix::with_nodes(["S", "X", "T"]);
        table.insert("S", "T", "X");
        assert_eq!(reconstruct_path(&table, "S", "T"), None);
        assert_eq!(reconstruct_path(&table, "S", "Q"), None);
    }
}
