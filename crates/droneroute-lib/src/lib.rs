//! Droneroute library entry points.
//!
//! This crate loads a delivery network, runs battery-constrained route
//! searches and weight-only planners over it, and keeps analytics over the
//! routes that were actually flown. Higher-level consumers (CLI, reporting)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod all_pairs;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod loader;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod spanning;

pub use all_pairs::{
    compute_all_pairs, reconstruct_path, AllPairs, Distance, DistanceMatrix, PredecessorMatrix,
};
pub use dataset::{default_network_path, resolve_network_path, NETWORK_ENV_VAR};
pub use error::{Error, Result};
pub use frequency::{canonical_route, RouteFrequencyIndex, RouteKey, RouteUsage, VisitCounts};
pub use loader::{load_network, parse_network, NetworkDocument};
pub use network::{
    ClientInfo, ClientTier, GeoPoint, Network, NetworkBuilder, NetworkEdge, Node, NodeId,
    NodeRole, Weight, ROUTE_SEPARATOR,
};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{
    find_route_battery_bfs, find_route_battery_dijkstra, replay_battery, RechargeRule, Route,
    SearchState, DEFAULT_MAX_BATTERY,
};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RoutePlanner, RouteRequest};
pub use spanning::{minimum_spanning_tree, DisjointSet, SpanningTree};
