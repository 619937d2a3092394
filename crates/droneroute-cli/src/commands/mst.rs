//! Minimum spanning tree command handler.

use std::path::Path;

use anyhow::Result;

use droneroute_lib::minimum_spanning_tree;

use super::load_network_from;
use droneroute_cli::output::{OutputFormat, SpanningReport};

pub fn handle_mst_command(network_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let network = load_network_from(network_path)?;
    let tree = minimum_spanning_tree(&network);

    let report = SpanningReport {
        total_weight: tree.total_weight(),
        connected: tree.is_connected(),
        components: tree.component_count(),
        edges: tree.edges,
    };
    format.render_spanning(&report)?;
    Ok(())
}
