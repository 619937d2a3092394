//! Order simulation command handler.
//!
//! Replays a batch of delivery orders against the network, tallies completed
//! routes, and reports route frequencies and node visits.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tracing::{info, warn};

use droneroute_lib::{
    compute_all_pairs, plan_route, AllPairs, Network, Route, RouteAlgorithm, RouteRequest,
    RouteUsage, Weight, DEFAULT_MAX_BATTERY,
};

use super::{load_network_from, AlgorithmArg};
use droneroute_cli::output::{OrderFailure, OutputFormat, RouteCount, SimulationReport};

#[derive(Debug, Clone, Args)]
pub struct SimulateCommandArgs {
    /// JSON file containing `[{"id", "origin", "destination"}]`.
    #[arg(long)]
    pub orders: PathBuf,
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Bfs)]
    pub algorithm: AlgorithmArg,
    #[arg(long, default_value_t = DEFAULT_MAX_BATTERY)]
    pub max_battery: Weight,
    /// How many of the most frequent routes to list.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

/// A delivery order: fly from `origin` to `destination`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub origin: String,
    pub destination: String,
}

pub fn handle_simulate_command(
    network_path: Option<&Path>,
    format: OutputFormat,
    args: &SimulateCommandArgs,
) -> Result<()> {
    let network = load_network_from(network_path)?;
    let orders = load_orders(&args.orders)?;
    info!(orders = orders.len(), "simulating deliveries");

    let report = simulate(
        &network,
        &orders,
        args.algorithm.into(),
        args.max_battery,
        args.top,
    );
    format.render_simulation(&report)?;
    Ok(())
}

fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read orders from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse orders in {}", path.display()))
}

/// Answers the orders of one simulation run.
///
/// Floyd-Warshall tables are computed once per run and shared by every order.
enum OrderPlanner {
    Search {
        algorithm: RouteAlgorithm,
        max_battery: Weight,
    },
    Precomputed(Option<AllPairs>),
}

impl OrderPlanner {
    fn new(network: &Network, algorithm: RouteAlgorithm, max_battery: Weight) -> Self {
        match algorithm {
            RouteAlgorithm::FloydWarshall => {
                warn!(
                    max_battery,
                    "floyd-warshall ignores the battery ceiling; routes may be infeasible for the drone"
                );
                Self::Precomputed(compute_all_pairs(network))
            }
            RouteAlgorithm::Bfs | RouteAlgorithm::Dijkstra => Self::Search {
                algorithm,
                max_battery,
            },
        }
    }

    fn plan(&self, network: &Network, order: &Order) -> droneroute_lib::Result<Option<Route>> {
        match self {
            Self::Search {
                algorithm,
                max_battery,
            } => {
                let request = RouteRequest {
                    origin: order.origin.clone(),
                    destination: order.destination.clone(),
                    algorithm: *algorithm,
                    max_battery: *max_battery,
                };
                Ok(plan_route(network, &request)?.map(|plan| Route {
                    steps: plan.steps,
                    cost: plan.cost,
                }))
            }
            Self::Precomputed(all_pairs) => {
                network.resolve(&order.origin)?;
                network.resolve(&order.destination)?;
                Ok(all_pairs
                    .as_ref()
                    .and_then(|all| all.route(&order.origin, &order.destination)))
            }
        }
    }
}

/// Plan every order and aggregate the completed routes.
///
/// Orders with unknown endpoints or no feasible route are reported as
/// failures; they do not stop the run.
pub fn simulate(
    network: &Network,
    orders: &[Order],
    algorithm: RouteAlgorithm,
    max_battery: Weight,
    top: usize,
) -> SimulationReport {
    let planner = OrderPlanner::new(network, algorithm, max_battery);
    let mut usage = RouteUsage::new();
    let mut failures = Vec::new();
    let mut total_cost: Weight = 0;
    let mut total_hops: u64 = 0;

    for order in orders {
        match planner.plan(network, order) {
            Ok(Some(route)) => {
                total_cost = total_cost.saturating_add(route.cost);
                total_hops = total_hops.saturating_add(route.hop_count() as u64);
                usage.record(&route.steps);
            }
            Ok(None) => {
                warn!(order = %order.id, "no feasible route");
                failures.push(OrderFailure {
                    id: order.id.clone(),
                    reason: format!(
                        "no feasible route from {} to {}",
                        order.origin, order.destination
                    ),
                });
            }
            Err(err) => {
                warn!(order = %order.id, error = %err, "order rejected");
                failures.push(OrderFailure {
                    id: order.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let delivered = usage.total();
    let average = |sum: u64| {
        if delivered == 0 {
            0.0
        } else {
            sum as f64 / delivered as f64
        }
    };

    let index = usage.build_index();
    SimulationReport {
        algorithm,
        max_battery,
        orders: orders.len(),
        delivered,
        total_cost,
        average_hops: average(total_hops),
        average_cost: average(total_cost),
        failures,
        top_routes: usage
            .most_frequent(top)
            .into_iter()
            .map(|(route, count)| RouteCount {
                route: route.to_string(),
                count,
            })
            .collect(),
        visits: usage.node_visits(network),
        index_preorder: index
            .preorder()
            .into_iter()
            .map(|(key, count)| RouteCount {
                route: key.route.clone(),
                count,
            })
            .collect(),
    }
}
