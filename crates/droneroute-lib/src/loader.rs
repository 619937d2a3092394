use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::network::{ClientInfo, ClientTier, Network, NetworkBuilder, Node, NodeRole, Weight};

/// On-disk representation of a delivery network.
///
/// Edges may be listed under `edges` or `links`.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkDocument {
    pub nodes: Vec<NodeRecord>,
    #[serde(default, alias = "links")]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub role: NodeRole,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Option<ClientTier>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: Weight,
}

fn default_weight() -> Weight {
    1
}

impl NodeRecord {
    fn into_node(self) -> Node {
        let mut node = Node::new(self.id, self.role);
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            node = node.with_position(lat, lon);
        }
        if self.role == NodeRole::Client {
            if let Some(client_id) = self.client_id {
                let name = self.name.unwrap_or_else(|| client_id.clone());
                node = node.with_client(ClientInfo {
                    client_id,
                    name,
                    tier: self.tier.unwrap_or(ClientTier::Normal),
                });
            }
        } else if self.client_id.is_some() {
            warn!(node = %node.id, role = %node.role, "ignoring client metadata on non-client node");
        }
        node
    }
}

impl NetworkDocument {
    /// Validate the document and build a [`Network`].
    pub fn into_network(self) -> Result<Network> {
        let mut builder = NetworkBuilder::new();
        for record in self.nodes {
            builder = builder.with_node(record.into_node());
        }
        for edge in self.edges {
            builder = builder.edge(edge.source, edge.target, edge.weight);
        }
        builder.build()
    }
}

/// Parse a network from a JSON string.
pub fn parse_network(json: &str) -> Result<Network> {
    let document: NetworkDocument = serde_json::from_str(json)?;
    document.into_network()
}

/// Load a network from a JSON file.
pub fn load_network(path: &Path) -> Result<Network> {
    let contents = fs::read_to_string(path)?;
    let network = parse_network(&contents)?;
    info!(
        nodes = network.len(),
        edges = network.edge_count(),
        "loaded network from {}",
        path.display()
    );
    Ok(network)
}
