use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::frequency::RouteKey;
use crate::network::{Network, NodeId, NodeIndex, Weight};

/// Battery ceiling used when the caller does not provide one.
pub const DEFAULT_MAX_BATTERY: Weight = 50;

/// How arriving at a recharge node affects the segment battery counter.
///
/// The two constrained searches deliberately use different rules and can
/// therefore disagree on the same query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RechargeRule {
    /// The counter restarts at the weight of the edge that entered the
    /// recharge node, and only that value is checked against the ceiling.
    /// Used by [`find_route_battery_bfs`].
    CarryEntryEdge,
    /// The edge into the recharge node must fit the current segment; the
    /// counter then restarts at zero. Used by [`find_route_battery_dijkstra`].
    FullReset,
}

impl RechargeRule {
    /// Segment battery after traversing an edge of `weight`, or `None` when the
    /// hop would exceed `max_battery`.
    pub fn transition(
        self,
        battery: Weight,
        weight: Weight,
        into_recharge: bool,
        max_battery: Weight,
    ) -> Option<Weight> {
        match self {
            RechargeRule::CarryEntryEdge => {
                let next = if into_recharge {
                    weight
                } else {
                    battery.saturating_add(weight)
                };
                (next <= max_battery).then_some(next)
            }
            RechargeRule::FullReset => {
                let spent = battery.saturating_add(weight);
                if spent > max_battery {
                    return None;
                }
                Some(if into_recharge { 0 } else { spent })
            }
        }
    }
}

/// Unit of visitation during constrained search.
///
/// The same node may be revisited with a different in-flight battery level, so
/// the visited key is the pair rather than the node alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchState {
    pub node: NodeIndex,
    pub battery: Weight,
}

/// A feasible path together with its total edge-weight cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub steps: Vec<NodeId>,
    pub cost: Weight,
}

impl Route {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Ordering key used by the route frequency index.
    pub fn key(&self) -> RouteKey {
        RouteKey::from_path(&self.steps)
    }
}

/// Breadth-first search over `(node, segment battery)` states.
///
/// States are expanded in FIFO order, so the first completion is a feasible
/// path with the fewest hops, not necessarily the cheapest. Recharge nodes
/// follow [`RechargeRule::CarryEntryEdge`].
///
/// Returns `Ok(None)` when the destination is unreachable or every path breaks
/// the ceiling; unknown endpoints are an error.
pub fn find_route_battery_bfs(
    network: &Network,
    origin: &str,
    destination: &str,
    max_battery: Weight,
) -> Result<Option<Route>> {
    let start = network.resolve(origin)?;
    let goal = network.resolve(destination)?;
    let rule = RechargeRule::CarryEntryEdge;

    let start_state = SearchState {
        node: start,
        battery: 0,
    };
    let mut parents: HashMap<SearchState, (SearchState, Weight)> = HashMap::new();
    let mut visited: HashSet<SearchState> = HashSet::from([start_state]);
    let mut queue = VecDeque::from([start_state]);
    let mut expanded = 0usize;

    while let Some(current) = queue.pop_front() {
        if current.node == goal {
            let (steps, cost) = reconstruct_states(&parents, current);
            debug!(
                expanded,
                visited = visited.len(),
                "battery bfs reached {}",
                destination
            );
            return Ok(Some(Route {
                steps: network.ids_for(&steps),
                cost,
            }));
        }

        expanded += 1;
        for edge in network.neighbours(current.node) {
            let Some(battery) = rule.transition(
                current.battery,
                edge.weight,
                network.is_recharge(edge.target),
                max_battery,
            ) else {
                continue;
            };
            let next = SearchState {
                node: edge.target,
                battery,
            };
            if visited.insert(next) {
                parents.insert(next, (current, edge.weight));
                queue.push_back(next);
            }
        }
    }

    debug!(expanded, "battery bfs exhausted frontier without reaching {}", destination);
    Ok(None)
}

/// Dijkstra search over `(node, segment battery)` states.
///
/// The returned route is cost-minimal under [`RechargeRule::FullReset`].
/// Frontier ties break on segment battery, then node identifier.
pub fn find_route_battery_dijkstra(
    network: &Network,
    origin: &str,
    destination: &str,
    max_battery: Weight,
) -> Result<Option<Route>> {
    let start = network.resolve(origin)?;
    let goal = network.resolve(destination)?;
    let rule = RechargeRule::FullReset;

    let start_state = SearchState {
        node: start,
        battery: 0,
    };
    let mut best: HashMap<SearchState, Weight> = HashMap::from([(start_state, 0)]);
    let mut parents: HashMap<SearchState, (SearchState, Weight)> = HashMap::new();
    let mut queue = BinaryHeap::from([QueueEntry::new(start_state, 0)]);
    let mut expanded = 0usize;
    let mut peak_frontier = 1usize;

    while let Some(entry) = queue.pop() {
        let recorded = best.get(&entry.state).copied().unwrap_or(Weight::MAX);
        if entry.cost > recorded {
            continue;
        }

        if entry.state.node == goal {
            let (steps, _) = reconstruct_states(&parents, entry.state);
            debug!(
                expanded,
                peak_frontier,
                cost = entry.cost,
                "battery dijkstra reached {}",
                destination
            );
            return Ok(Some(Route {
                steps: network.ids_for(&steps),
                cost: entry.cost,
            }));
        }

        expanded += 1;
        for edge in network.neighbours(entry.state.node) {
            let Some(battery) = rule.transition(
                entry.state.battery,
                edge.weight,
                network.is_recharge(edge.target),
                max_battery,
            ) else {
                continue;
            };
            let next = SearchState {
                node: edge.target,
                battery,
            };
            let next_cost = entry.cost.saturating_add(edge.weight);
            if next_cost < best.get(&next).copied().unwrap_or(Weight::MAX) {
                best.insert(next, next_cost);
                parents.insert(next, (entry.state, edge.weight));
                queue.push(QueueEntry::new(next, next_cost));
                peak_frontier = peak_frontier.max(queue.len());
            }
        }
    }

    debug!(expanded, "battery dijkstra exhausted frontier without reaching {}", destination);
    Ok(None)
}

/// Replay `path` under `rule`, returning the segment battery after each hop.
///
/// Returns `None` if a hop is not an edge of the network, an identifier is
/// unknown, or a hop would exceed `max_battery`.
pub fn replay_battery<S: AsRef<str>>(
    network: &Network,
    path: &[S],
    rule: RechargeRule,
    max_battery: Weight,
) -> Option<Vec<Weight>> {
    let mut trace = Vec::with_capacity(path.len().saturating_sub(1));
    let mut battery: Weight = 0;
    for pair in path.windows(2) {
        let from = network.index_of(pair[0].as_ref())?;
        let to = network.index_of(pair[1].as_ref())?;
        let weight = network.weight_between(from, to)?;
        battery = rule.transition(battery, weight, network.is_recharge(to), max_battery)?;
        trace.push(battery);
    }
    Some(trace)
}

/// Walk parent links back to the start state, returning node indices in travel
/// order and the summed edge weights.
fn reconstruct_states(
    parents: &HashMap<SearchState, (SearchState, Weight)>,
    goal: SearchState,
) -> (Vec<NodeIndex>, Weight) {
    let mut path = vec![goal.node];
    let mut cost: Weight = 0;
    let mut current = goal;
    while let Some(&(previous, weight)) = parents.get(&current) {
        path.push(previous.node);
        cost = cost.saturating_add(weight);
        current = previous;
    }
    path.reverse();
    (path, cost)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    cost: Weight,
    state: SearchState,
}

impl QueueEntry {
    fn new(state: SearchState, cost: Weight) -> Self {
        Self { cost, state }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.battery.cmp(&self.state.battery))
            .then_with(|| other.state.node.cmp(&self.state.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
