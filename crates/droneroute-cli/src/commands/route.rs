//! Route command handler for planning a single delivery.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use droneroute_lib::{
    plan_route, RouteAlgorithm, RouteRequest, RouteSummary, Weight, DEFAULT_MAX_BATTERY,
};

use super::{describe_error, load_network_from, AlgorithmArg};
use droneroute_cli::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Origin node identifier.
    #[arg(long = "from")]
    pub from: String,
    /// Destination node identifier.
    #[arg(long = "to")]
    pub to: String,
    /// Search strategy.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Bfs)]
    pub algorithm: AlgorithmArg,
    /// Largest segment battery allowed between recharges.
    #[arg(long, default_value_t = DEFAULT_MAX_BATTERY)]
    pub max_battery: Weight,
}

impl RouteCommandArgs {
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            origin: self.from.clone(),
            destination: self.to.clone(),
            algorithm: self.algorithm.into(),
            max_battery: self.max_battery,
        }
    }
}

/// Handle the route subcommand.
///
/// Fails when either endpoint is unknown or no feasible route exists.
pub fn handle_route_command(
    network_path: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = load_network_from(network_path)?;
    let request = args.to_request();

    let plan = plan_route(&network, &request).map_err(describe_error)?;
    let Some(plan) = plan else {
        anyhow::bail!(format_route_not_found_message(&request));
    };

    let summary =
        RouteSummary::from_plan(&network, &plan).context("failed to build route summary")?;
    format.render_route(&summary)?;
    Ok(())
}

fn format_route_not_found_message(request: &RouteRequest) -> String {
    let mut message = format!(
        "No route found between {} and {}.",
        request.origin, request.destination
    );
    if request.algorithm.is_battery_aware() {
        message.push_str(&format!(
            " Every path exceeds the battery ceiling of {} or the nodes are not connected. \
             Try raising --max-battery",
            request.max_battery
        ));
        if request.algorithm == RouteAlgorithm::Bfs {
            message.push_str(" or --algorithm dijkstra");
        }
        message.push('.');
    } else {
        message.push_str(" The nodes are not connected.");
    }
    message
}
