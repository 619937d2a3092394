use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::frequency::canonical_route;
use crate::network::{Network, NodeId, NodeRole, Weight};
use crate::path::{replay_battery, RechargeRule};
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    /// Single line: the canonical route string.
    Canonical,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<NodeRole>,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<NodeRole>,
    /// Weight of the edge that reached this step; absent for the origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hop_cost: Option<Weight>,
    /// Segment battery after arriving, under the planner's recharge rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_battery: Option<Weight>,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub cost: Weight,
    pub max_battery: Weight,
    pub battery_enforced: bool,
    pub route: String,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary annotated with roles and battery levels.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Result<Self> {
        let (Some(first), Some(last)) = (plan.steps.first(), plan.steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };

        let rule = match plan.algorithm {
            RouteAlgorithm::Bfs => Some(RechargeRule::CarryEntryEdge),
            RouteAlgorithm::Dijkstra => Some(RechargeRule::FullReset),
            RouteAlgorithm::FloydWarshall => None,
        };
        let battery = rule
            .and_then(|rule| replay_battery(network, &plan.steps, rule, plan.max_battery))
            .unwrap_or_default();

        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let hop_cost = index
                    .checked_sub(1)
                    .and_then(|previous| network.edge_weight(&plan.steps[previous], id));
                RouteStep {
                    index,
                    id: id.clone(),
                    role: network.role_of(id),
                    hop_cost,
                    segment_battery: index
                        .checked_sub(1)
                        .and_then(|hop| battery.get(hop).copied()),
                }
            })
            .collect();

        Ok(Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            cost: plan.cost,
            max_battery: plan.max_battery,
            battery_enforced: plan.algorithm.is_battery_aware(),
            route: canonical_route(&plan.steps),
            start: RouteEndpoint {
                id: first.clone(),
                role: network.role_of(first),
            },
            goal: RouteEndpoint {
                id: last.clone(),
                role: network.role_of(last),
            },
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Canonical => format!("{}\n", self.route),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, cost {}, algorithm: {})",
            self.start.id, self.goal.id, self.hops, self.cost, self.algorithm
        );
        for step in &self.steps {
            let role = step.role.map(|role| role.to_string()).unwrap_or_default();
            match (step.hop_cost, step.segment_battery) {
                (Some(cost), Some(battery)) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} [{}] +{} (battery {}/{})",
                        step.index, step.id, role, cost, battery, self.max_battery
                    );
                }
                (Some(cost), None) => {
                    let _ = writeln!(buffer, "{:>3}: {} [{}] +{}", step.index, step.id, role, cost);
                }
                _ => {
                    let _ = writeln!(buffer, "{:>3}: {} [{}]", step.index, step.id, role);
                }
            }
        }
        if !self.battery_enforced {
            let _ = writeln!(buffer, "note: battery ceiling not enforced by {}", self.algorithm);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkBuilder;

    fn network() -> Network {
        NetworkBuilder::new()
            .node("A", NodeRole::Storage)
            .node("B", NodeRole::Recharge)
            .node("C", NodeRole::Client)
            .edge("A", "B", 5)
            .edge("B", "C", 40)
            .build()
            .unwrap()
    }

    fn plan(algorithm: RouteAlgorithm) -> RoutePlan {
        RoutePlan {
            algorithm,
            origin: "A".into(),
            destination: "C".into(),
            steps: vec!["A".into(), "B".into(), "C".into()],
            cost: 45,
            max_battery: 50,
        }
    }

    #[test]
    fn summary_annotates_steps() {
        let summary = RouteSummary::from_plan(&network(), &plan(RouteAlgorithm::Bfs)).unwrap();
        assert_eq!(summary.hops, 2);
        assert_eq!(summary.route, "A → B → C");
        assert_eq!(summary.steps[0].hop_cost, None);
        assert_eq!(summary.steps[1].role, Some(NodeRole::Recharge));
        assert_eq!(summary.steps[1].segment_battery, Some(5));
        assert_eq!(summary.steps[2].segment_battery, Some(45));
    }

    #[test]
    fn dijkstra_summary_uses_full_reset() {
        let summary =
            RouteSummary::from_plan(&network(), &plan(RouteAlgorithm::Dijkstra)).unwrap();
        assert_eq!(summary.steps[1].segment_battery, Some(0));
        assert_eq!(summary.steps[2].segment_battery, Some(40));
    }

    #[test]
    fn empty_plan_is_rejected() {
        let mut empty = plan(RouteAlgorithm::Bfs);
        empty.steps.clear();
        let err = RouteSummary::from_plan(&network(), &empty).expect_err("empty");
        assert!(matches!(err, Error::EmptyRoutePlan));
    }

    #[test]
    fn plain_text_mentions_unenforced_battery() {
        let summary =
            RouteSummary::from_plan(&network(), &plan(RouteAlgorithm::FloydWarshall)).unwrap();
        let text = summary.render(RouteRenderMode::PlainText);
        assert!(text.contains("algorithm: floyd-warshall"));
        assert!(text.contains("battery ceiling not enforced"));
        assert_eq!(summary.render(RouteRenderMode::Canonical), "A → B → C\n");
    }
}
