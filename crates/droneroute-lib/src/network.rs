use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque, totally ordered node identifier.
pub type NodeId = String;

/// Dense position of a node inside a [`Network`]. Index order equals identifier order.
pub type NodeIndex = usize;

/// Edge cost and battery unit.
pub type Weight = u64;

/// Separator used when joining node identifiers into a canonical route string.
///
/// Node identifiers are rejected at build time if they contain it, so a
/// canonical route can always be split back into its nodes.
pub const ROUTE_SEPARATOR: &str = " → ";

/// Minimum Jaro-Winkler similarity for an identifier to be offered as a suggestion.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Role a node plays in the delivery network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Storage,
    Recharge,
    Client,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            NodeRole::Storage => "storage",
            NodeRole::Recharge => "recharge",
            NodeRole::Client => "client",
        };
        f.write_str(value)
    }
}

/// Geographic coordinates attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Service tier of a client node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientTier {
    Premium,
    Normal,
}

/// Metadata carried by client nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub client_id: String,
    pub name: String,
    pub tier: ClientTier,
}

/// A node of the delivery network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub role: NodeRole,
    pub position: Option<GeoPoint>,
    pub client: Option<ClientInfo>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, role: NodeRole) -> Self {
        Self {
            id: id.into(),
            role,
            position: None,
            client: None,
        }
    }

    pub fn with_position(mut self, lat: f64, lon: f64) -> Self {
        self.position = Some(GeoPoint { lat, lon });
        self
    }

    pub fn with_client(mut self, client: ClientInfo) -> Self {
        self.client = Some(client);
        self
    }
}

/// Half of an undirected edge as stored in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: NodeIndex,
    pub weight: Weight,
}

/// Undirected edge reported by [`Network::edges`], with `a <= b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NetworkEdge {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: Weight,
}

/// Weighted undirected delivery network.
///
/// The network is immutable once built. Clones share storage, so a clone is a
/// cheap read-only snapshot that can be handed to other threads.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Arc<Vec<Node>>,
    index: Arc<HashMap<NodeId, NodeIndex>>,
    adjacency: Arc<Vec<Vec<Edge>>>,
    edge_count: usize,
}

impl Network {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterate nodes in identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.role == role)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn role_of(&self, id: &str) -> Option<NodeRole> {
        self.node(id).map(|node| node.role)
    }

    /// Dense index for an identifier.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Node stored at a dense index.
    pub fn node_at(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Return the adjacency list of a node, in edge insertion order.
    pub fn neighbours(&self, index: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Neighbour identifiers and edge weights for a node identifier.
    pub fn neighbours_of<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a str, Weight)> + 'a {
        let edges = self.index_of(id).map(|index| self.neighbours(index)).unwrap_or(&[]);
        edges
            .iter()
            .map(move |edge| (self.nodes[edge.target].id.as_str(), edge.weight))
    }

    /// Weight of the edge between two identifiers, if one exists.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<Weight> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        self.weight_between(a, b)
    }

    pub(crate) fn weight_between(&self, a: NodeIndex, b: NodeIndex) -> Option<Weight> {
        self.neighbours(a)
            .iter()
            .find(|edge| edge.target == b)
            .map(|edge| edge.weight)
    }

    pub(crate) fn is_recharge(&self, index: NodeIndex) -> bool {
        self.nodes
            .get(index)
            .map(|node| node.role == NodeRole::Recharge)
            .unwrap_or(false)
    }

    pub(crate) fn id_at(&self, index: NodeIndex) -> &str {
        self.nodes[index].id.as_str()
    }

    /// Every undirected edge exactly once, as `(weight, a, b)` with `a < b`.
    pub(crate) fn indexed_edges(&self) -> Vec<(Weight, NodeIndex, NodeIndex)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (a, list) in self.adjacency.iter().enumerate() {
            for edge in list {
                if edge.target > a {
                    edges.push((edge.weight, a, edge.target));
                }
            }
        }
        edges
    }

    /// Every undirected edge exactly once.
    pub fn edges(&self) -> Vec<NetworkEdge> {
        self.indexed_edges()
            .into_iter()
            .map(|(weight, a, b)| NetworkEdge {
                a: self.id_at(a).to_string(),
                b: self.id_at(b).to_string(),
                weight,
            })
            .collect()
    }

    /// Sum of the edge weights along `path`, or `None` if a hop is not an edge.
    pub fn path_cost<S: AsRef<str>>(&self, path: &[S]) -> Option<Weight> {
        let mut total: Weight = 0;
        for pair in path.windows(2) {
            let weight = self.edge_weight(pair[0].as_ref(), pair[1].as_ref())?;
            total = total.saturating_add(weight);
        }
        Some(total)
    }

    /// Resolve an identifier, producing an error with suggestions when absent.
    pub fn resolve(&self, id: &str) -> Result<NodeIndex> {
        self.index_of(id).ok_or_else(|| Error::UnknownNode {
            name: id.to_string(),
            suggestions: self.fuzzy_matches(id, 3),
        })
    }

    /// Identifiers similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .iter()
            .map(|node| (strsim::jaro_winkler(name, &node.id), node.id.as_str()))
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    pub(crate) fn ids_for(&self, indices: &[NodeIndex]) -> Vec<NodeId> {
        indices
            .iter()
            .map(|&index| self.id_at(index).to_string())
            .collect()
    }
}

/// Incrementally assembles a [`Network`] and validates it on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    edges: Vec<(NodeId, NodeId, Weight)>,
}

impl NetworkBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node with no coordinates or client metadata.
    pub fn node(self, id: impl Into<NodeId>, role: NodeRole) -> Self {
        self.with_node(Node::new(id, role))
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Declare an undirected edge.
    pub fn edge(mut self, a: impl Into<NodeId>, b: impl Into<NodeId>, weight: Weight) -> Self {
        self.edges.push((a.into(), b.into(), weight));
        self
    }

    pub fn build(self) -> Result<Network> {
        let mut nodes = self.nodes;
        for node in &nodes {
            validate_node_id(&node.id)?;
        }
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(pair) = nodes.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(Error::DuplicateNode {
                id: pair[0].id.clone(),
            });
        }

        let index: HashMap<NodeId, NodeIndex> = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id.clone(), position))
            .collect();

        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); nodes.len()];
        let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        for (a, b, weight) in &self.edges {
            let lookup = |id: &String| {
                index.get(id).copied().ok_or_else(|| Error::DanglingEdge {
                    source_id: a.clone(),
                    target_id: b.clone(),
                    missing: id.clone(),
                })
            };
            let from = lookup(a)?;
            let to = lookup(b)?;
            if from == to {
                return Err(Error::SelfLoop { id: a.clone() });
            }
            if !seen.insert((from.min(to), from.max(to))) {
                return Err(Error::DuplicateEdge {
                    a: a.clone(),
                    b: b.clone(),
                });
            }
            adjacency[from].push(Edge {
                target: to,
                weight: *weight,
            });
            adjacency[to].push(Edge {
                target: from,
                weight: *weight,
            });
        }

        Ok(Network {
            nodes: Arc::new(nodes),
            index: Arc::new(index),
            adjacency: Arc::new(adjacency),
            edge_count: seen.len(),
        })
    }
}

fn validate_node_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidNodeId {
            id: id.to_string(),
            reason: "identifier is empty",
        });
    }
    if id.contains(ROUTE_SEPARATOR) {
        return Err(Error::InvalidNodeId {
            id: id.to_string(),
            reason: "identifier contains the route separator",
        });
    }
    Ok(())
}
