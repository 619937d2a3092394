//! Route planning strategies implementing the Strategy pattern.
//!
//! Each planner wraps one search algorithm behind the [`RoutePlanner`] trait so
//! `plan_route` can dispatch without knowing the algorithm.

use tracing::warn;

use crate::all_pairs::compute_all_pairs;
use crate::error::Result;
use crate::network::{Network, Weight};
use crate::path::{find_route_battery_bfs, find_route_battery_dijkstra, Route};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search.
    ///
    /// Returns `Ok(Some(route))` if a route is found and `Ok(None)` if none is
    /// feasible. Unknown endpoints are an error.
    fn find_path(
        &self,
        network: &Network,
        origin: &str,
        destination: &str,
        max_battery: Weight,
    ) -> Result<Option<Route>>;

    /// Whether the planner enforces the battery ceiling.
    fn honours_battery(&self) -> bool {
        true
    }
}

/// Breadth-first planner over battery states.
///
/// Finds the feasible route with the fewest hops; cost is not minimised.
#[derive(Debug, Clone, Default)]
pub struct BatteryBfsPlanner;

impl RoutePlanner for BatteryBfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(
        &self,
        network: &Network,
        origin: &str,
        destination: &str,
        max_battery: Weight,
    ) -> Result<Option<Route>> {
        find_route_battery_bfs(network, origin, destination, max_battery)
    }
}

/// Dijkstra planner over battery states.
#[derive(Debug, Clone, Default)]
pub struct BatteryDijkstraPlanner;

impl RoutePlanner for BatteryDijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        network: &Network,
        origin: &str,
        destination: &str,
        max_battery: Weight,
    ) -> Result<Option<Route>> {
        find_route_battery_dijkstra(network, origin, destination, max_battery)
    }
}

/// Floyd-Warshall planner. Ignores the battery ceiling.
///
/// Computes the full tables per call; callers issuing many queries against the
/// same network should use [`compute_all_pairs`] directly and keep the result.
#[derive(Debug, Clone, Default)]
pub struct AllPairsPlanner;

impl RoutePlanner for AllPairsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::FloydWarshall
    }

    fn find_path(
        &self,
        network: &Network,
        origin: &str,
        destination: &str,
        max_battery: Weight,
    ) -> Result<Option<Route>> {
        network.resolve(origin)?;
        network.resolve(destination)?;
        warn!(
            max_battery,
            "floyd-warshall ignores the battery ceiling; route may be infeasible for the drone"
        );
        Ok(compute_all_pairs(network).and_then(|all| all.route(origin, destination)))
    }

    fn honours_battery(&self) -> bool {
        false
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Bfs => Box::new(BatteryBfsPlanner),
        RouteAlgorithm::Dijkstra => Box::new(BatteryDijkstraPlanner),
        RouteAlgorithm::FloydWarshall => Box::new(AllPairsPlanner),
    }
}
