//! All-pairs distance command handler.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use droneroute_lib::compute_all_pairs;

use super::{describe_error, load_network_from};
use droneroute_cli::output::{DistanceEntry, DistanceReport, OutputFormat};

#[derive(Debug, Clone, Args)]
pub struct DistancesCommandArgs {
    /// Source node identifier.
    #[arg(long = "from")]
    pub from: String,
}

/// Print the shortest distance from one node to every node, ignoring battery.
pub fn handle_distances_command(
    network_path: Option<&Path>,
    format: OutputFormat,
    args: &DistancesCommandArgs,
) -> Result<()> {
    let network = load_network_from(network_path)?;
    network.resolve(&args.from).map_err(describe_error)?;

    let all = compute_all_pairs(&network).context("network has no nodes")?;
    let row = all
        .distances
        .row(&args.from)
        .with_context(|| format!("no distance row for {}", args.from))?;

    let report = DistanceReport {
        source: args.from.clone(),
        distances: row
            .iter()
            .map(|(target, distance)| DistanceEntry {
                target: target.clone(),
                cost: distance.finite(),
            })
            .collect(),
    };
    format.render_distances(&report)?;
    Ok(())
}
