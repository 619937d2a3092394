// Test utilities shared by the CLI unit tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use droneroute_lib::{
    plan_route, Network, NetworkBuilder, NodeRole, RouteRequest, RouteSummary, RouteUsage,
    VisitCounts,
};

/// Three-node line `A (storage) - B (recharge) - C (client)` with weights 5 and 40.
pub fn line_network() -> Network {
    NetworkBuilder::new()
        .node("A", NodeRole::Storage)
        .node("B", NodeRole::Recharge)
        .node("C", NodeRole::Client)
        .edge("A", "B", 5)
        .edge("B", "C", 40)
        .build()
        .expect("valid network")
}

/// Summary of the BFS route `A → B → C` on [`line_network`].
pub fn sample_summary() -> RouteSummary {
    let network = line_network();
    let plan = plan_route(&network, &RouteRequest::bfs("A", "C"))
        .expect("known endpoints")
        .expect("feasible route");
    RouteSummary::from_plan(&network, &plan).expect("summary builds")
}

/// Visit totals after one completion of `C → B → A`.
pub fn visits() -> VisitCounts {
    let mut usage = RouteUsage::new();
    usage.record(&["C", "B", "A"]);
    usage.node_visits(&line_network())
}
