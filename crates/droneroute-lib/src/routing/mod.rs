//! Route planning over a delivery network.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Selectable search strategies
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] implementation, and
//! [`select_planner`] picks one for a request. The two battery-aware searches
//! are independent strategies and may return different routes for the same
//! query.
//!
//! # Example
//!
//! ```ignore
//! use droneroute_lib::{load_network, plan_route, RouteRequest};
//!
//! let network = load_network("network.json")?;
//! let request = RouteRequest::dijkstra("AA", "AF", 50);
//! if let Some(plan) = plan_route(&network, &request)? {
//!     println!("{} hops, cost {}", plan.hop_count(), plan.cost);
//! }
//! ```

mod planner;

pub use planner::{
    select_planner, AllPairsPlanner, BatteryBfsPlanner, BatteryDijkstraPlanner, RoutePlanner,
};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::frequency::RouteKey;
use crate::network::{Network, NodeId, Weight};
use crate::path::DEFAULT_MAX_BATTERY;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Breadth-first search over battery states (fewest hops).
    #[default]
    Bfs,
    /// Dijkstra over battery states (lowest cost).
    Dijkstra,
    /// Floyd-Warshall over edge weights, ignoring the battery ceiling.
    FloydWarshall,
}

impl RouteAlgorithm {
    /// Whether the algorithm honours the battery ceiling.
    pub fn is_battery_aware(self) -> bool {
        !matches!(self, RouteAlgorithm::FloydWarshall)
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::FloydWarshall => "floyd-warshall",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub algorithm: RouteAlgorithm,
    pub max_battery: Weight,
}

impl RouteRequest {
    /// Breadth-first request with the default battery ceiling.
    pub fn bfs(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            algorithm: RouteAlgorithm::Bfs,
            max_battery: DEFAULT_MAX_BATTERY,
        }
    }

    pub fn dijkstra(
        origin: impl Into<String>,
        destination: impl Into<String>,
        max_battery: Weight,
    ) -> Self {
        Self {
            algorithm: RouteAlgorithm::Dijkstra,
            max_battery,
            ..Self::bfs(origin, destination)
        }
    }

    pub fn floyd_warshall(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            algorithm: RouteAlgorithm::FloydWarshall,
            ..Self::bfs(origin, destination)
        }
    }

    pub fn with_max_battery(mut self, max_battery: Weight) -> Self {
        self.max_battery = max_battery;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub origin: NodeId,
    pub destination: NodeId,
    pub steps: Vec<NodeId>,
    pub cost: Weight,
    pub max_battery: Weight,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn route_key(&self) -> RouteKey {
        RouteKey::from_path(&self.steps)
    }
}

/// Compute a route using the requested algorithm.
///
/// Unknown origin or destination is an error raised before any search runs.
/// `Ok(None)` means no feasible route exists.
pub fn plan_route(network: &Network, request: &RouteRequest) -> Result<Option<RoutePlan>> {
    network.resolve(&request.origin)?;
    network.resolve(&request.destination)?;

    let planner = select_planner(request);
    let Some(route) = planner.find_path(
        network,
        &request.origin,
        &request.destination,
        request.max_battery,
    )?
    else {
        debug!(
            algorithm = %request.algorithm,
            "no feasible route from {} to {}",
            request.origin,
            request.destination
        );
        return Ok(None);
    };

    Ok(Some(RoutePlan {
        algorithm: planner.algorithm(),
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        steps: route.steps,
        cost: route.cost,
        max_battery: request.max_battery,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_uses_default_ceiling() {
        let request = RouteRequest::bfs("A", "B");
        assert_eq!(request.algorithm, RouteAlgorithm::Bfs);
        assert_eq!(request.max_battery, DEFAULT_MAX_BATTERY);
        assert_eq!(request.with_max_battery(12).max_battery, 12);
    }

    #[test]
    fn route_plan_hop_count() {
        let plan = RoutePlan {
            algorithm: RouteAlgorithm::Bfs,
            origin: "A".into(),
            destination: "C".into(),
            steps: vec!["A".into(), "B".into(), "C".into()],
            cost: 9,
            max_battery: 50,
        };
        assert_eq!(plan.hop_count(), 2);
        assert_eq!(plan.route_key().route, "A → B → C");
    }

    #[test]
    fn algorithm_display_matches_serde_names() {
        for algorithm in [
            RouteAlgorithm::Bfs,
            RouteAlgorithm::Dijkstra,
            RouteAlgorithm::FloydWarshall,
        ] {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{algorithm}\""));
        }
        assert!(!RouteAlgorithm::FloydWarshall.is_battery_aware());
    }
}
