//! Route usage analytics.
//!
//! Completed routes are tallied in a [`RouteUsage`] ledger keyed by their
//! canonical string. For ordered retrieval the ledger is loaded into a
//! [`RouteFrequencyIndex`], a height-balanced search tree ordered by
//! [`RouteKey`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::{Network, NodeId, NodeRole, ROUTE_SEPARATOR};

/// Join node identifiers into the canonical route string.
pub fn canonical_route<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ROUTE_SEPARATOR)
}

/// Ordering key for historical routes: path length first, then the canonical
/// route string.
///
/// `length` counts nodes, not characters of the canonical string. Two routes
/// with the same hop count compare by their text, so identifiers of different
/// widths do not reorder them; tree shape and preorder listings follow this
/// ordering rather than string width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteKey {
    /// Number of nodes on the path.
    pub length: usize,
    pub route: String,
}

impl RouteKey {
    pub fn from_path<S: AsRef<str>>(path: &[S]) -> Self {
        Self {
            length: path.len(),
            route: canonical_route(path),
        }
    }

    /// Build a key from an already joined route string.
    pub fn from_canonical(route: impl Into<String>) -> Self {
        let route = route.into();
        let length = if route.is_empty() {
            0
        } else {
            route.split(ROUTE_SEPARATOR).count()
        };
        Self { length, route }
    }

    /// Split the canonical string back into node identifiers.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.route
            .split(ROUTE_SEPARATOR)
            .filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route)
    }
}

#[derive(Debug, Clone)]
struct AvlNode {
    key: RouteKey,
    frequency: u64,
    height: i32,
    left: Option<Box<AvlNode>>,
    right: Option<Box<AvlNode>>,
}

impl AvlNode {
    fn leaf(key: RouteKey, frequency: u64) -> Self {
        Self {
            key,
            frequency,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height(node: &Option<Box<AvlNode>>) -> i32 {
    node.as_ref().map_or(0, |n| n.height)
}

/// Height-balanced search tree of route frequencies ordered by [`RouteKey`].
///
/// Inserting an existing key overwrites its frequency (last write wins).
/// Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct RouteFrequencyIndex {
    root: Option<Box<AvlNode>>,
    len: usize,
}

impl RouteFrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: RouteKey, frequency: u64) {
        let mut inserted = false;
        let root = insert_node(self.root.take(), &key, frequency, &mut inserted);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
    }

    pub fn get(&self, key: &RouteKey) -> Option<u64> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.frequency),
            };
        }
        None
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree; zero when empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Node, left subtree, right subtree.
    pub fn preorder(&self) -> Vec<(&RouteKey, u64)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&AvlNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push((&node.key, node.frequency));
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }
        out
    }

    /// Entries in ascending key order.
    pub fn in_order(&self) -> Vec<(&RouteKey, u64)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&AvlNode> = Vec::new();
        let mut current = self.root.as_deref();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push((&node.key, node.frequency));
                current = node.right.as_deref();
            }
        }
        out
    }
}

fn insert_node(
    node: Option<Box<AvlNode>>,
    key: &RouteKey,
    frequency: u64,
    inserted: &mut bool,
) -> Box<AvlNode> {
    let Some(mut node) = node else {
        *inserted = true;
        return Box::new(AvlNode::leaf(key.clone(), frequency));
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, frequency, inserted)),
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, frequency, inserted))
        }
        Ordering::Equal => {
            node.frequency = frequency;
            return node;
        }
    }

    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        let left_key_order = node.left.as_ref().map(|left| key.cmp(&left.key));
        match left_key_order {
            Some(Ordering::Less) => return rotate_right(node),
            Some(Ordering::Greater) => {
                node.left = node.left.take().map(rotate_left);
                return rotate_right(node);
            }
            _ => {}
        }
    }

    if balance < -1 {
        let right_key_order = node.right.as_ref().map(|right| key.cmp(&right.key));
        match right_key_order {
            Some(Ordering::Greater) => return rotate_left(node),
            Some(Ordering::Less) => {
                node.right = node.right.take().map(rotate_right);
                return rotate_left(node);
            }
            _ => {}
        }
    }

    node
}

fn rotate_left(mut z: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut y) = z.right.take() else {
        return z;
    };
    z.right = y.left.take();
    z.update_height();
    y.left = Some(z);
    y.update_height();
    y
}

fn rotate_right(mut z: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut y) = z.left.take() else {
        return z;
    };
    z.left = y.right.take();
    z.update_height();
    y.right = Some(z);
    y.update_height();
    y
}

/// Visit totals per node, split by role. Every node of a role is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitCounts {
    pub clients: BTreeMap<NodeId, u64>,
    pub recharge: BTreeMap<NodeId, u64>,
    pub storage: BTreeMap<NodeId, u64>,
}

impl VisitCounts {
    pub fn for_role(&self, role: NodeRole) -> &BTreeMap<NodeId, u64> {
        match role {
            NodeRole::Client => &self.clients,
            NodeRole::Recharge => &self.recharge,
            NodeRole::Storage => &self.storage,
        }
    }
}

/// Running tally of completed routes keyed by canonical route string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteUsage {
    counts: BTreeMap<String, u64>,
}

impl RouteUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one completion of `path`, returning the updated count.
    pub fn record<S: AsRef<str>>(&mut self, path: &[S]) -> u64 {
        let count = self.counts.entry(canonical_route(path)).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, route: &str) -> u64 {
        self.counts.get(route).copied().unwrap_or(0)
    }

    /// Total completions across all routes, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().copied().fold(0, u64::saturating_add)
    }

    /// Number of distinct routes.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(route, count)| (route.as_str(), *count))
    }

    /// Up to `limit` routes, most used first; ties by canonical string.
    pub fn most_frequent(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Load every route into a frequency index in ascending key order.
    pub fn build_index(&self) -> RouteFrequencyIndex {
        let mut entries: Vec<(RouteKey, u64)> = self
            .counts
            .iter()
            .map(|(route, count)| (RouteKey::from_canonical(route.clone()), *count))
            .collect();
        entries.sort();

        let mut index = RouteFrequencyIndex::new();
        for (key, count) in entries {
            index.insert(key, count);
        }
        index
    }

    /// Per-role visit totals; identifiers not present in `network` are ignored.
    pub fn node_visits(&self, network: &Network) -> VisitCounts {
        let mut visits = VisitCounts::default();
        for node in network.nodes() {
            let bucket = match node.role {
                NodeRole::Client => &mut visits.clients,
                NodeRole::Recharge => &mut visits.recharge,
                NodeRole::Storage => &mut visits.storage,
            };
            bucket.insert(node.id.clone(), 0);
        }

        for (route, count) in &self.counts {
            for id in route.split(ROUTE_SEPARATOR) {
                let Some(role) = network.role_of(id) else {
                    continue;
                };
                let bucket = match role {
                    NodeRole::Client => &mut visits.clients,
                    NodeRole::Recharge => &mut visits.recharge,
                    NodeRole::Storage => &mut visits.storage,
                };
                if let Some(total) = bucket.get_mut(id) {
                    *total += count;
                }
            }
        }
        visits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(route: &str) -> RouteKey {
        RouteKey::from_canonical(route)
    }

    fn assert_balanced(node: &Option<Box<AvlNode>>) -> i32 {
        let Some(node) = node else {
            return 0;
        };
        let left = assert_balanced(&node.left);
        let right = assert_balanced(&node.right);
        assert!((left - right).abs() <= 1, "unbalanced at {}", node.key);
        assert_eq!(node.height, 1 + left.max(right));
        node.height
    }

    #[test]
    fn canonical_route_round_trips_through_key() {
        let key = RouteKey::from_path(&["A", "B", "C"]);
        assert_eq!(key.route, "A → B → C");
        assert_eq!(key.length, 3);
        assert_eq!(key.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(RouteKey::from_canonical("A → B → C"), key);
    }

    #[test]
    fn keys_order_by_length_first() {
        assert!(key("Z → Y") < key("A → B → C"));
        assert!(key("A → B") < key("A → C"));
    }

    #[test]
    fn ascending_inserts_trigger_left_rotation() {
        let mut index = RouteFrequencyIndex::new();
        index.insert(key("A → B"), 1);
        index.insert(key("A → C"), 2);
        index.insert(key("A → D"), 3);

        let preorder: Vec<&str> = index.preorder().iter().map(|(k, _)| k.route.as_str()).collect();
        assert_eq!(preorder, vec!["A → C", "A → B", "A → D"]);
        assert_eq!(index.height(), 2);
    }

    #[test]
    fn zig_zag_inserts_trigger_double_rotation() {
        let mut index = RouteFrequencyIndex::new();
        index.insert(key("A → D"), 1);
        index.insert(key("A → B"), 1);
        index.insert(key("A → C"), 1);

        let preorder: Vec<&str> = index.preorder().iter().map(|(k, _)| k.route.as_str()).collect();
        assert_eq!(preorder, vec!["A → C", "A → B", "A → D"]);

        let mut index = RouteFrequencyIndex::new();
        index.insert(key("A → B"), 1);
        index.insert(key("A → D"), 1);
        index.insert(key("A → C"), 1);
        let preorder: Vec<&str> = index.preorder().iter().map(|(k, _)| k.route.as_str()).collect();
        assert_eq!(preorder, vec!["A → C", "A → B", "A → D"]);
    }

    #[test]
    fn repeated_key_overwrites_frequency() {
        let mut index = RouteFrequencyIndex::new();
        index.insert(key("A → B"), 4);
        index.insert(key("A → B"), 1);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&key("A → B")), Some(1));
    }

    #[test]
    fn stays_balanced_under_many_inserts() {
        let mut index = RouteFrequencyIndex::new();
        for i in 0..200u64 {
            let route = format!("N{:03} → M{:03}", (i * 37) % 200, i);
            index.insert(key(&route), i);
        }
        assert_eq!(index.len(), 200);
        assert_balanced(&index.root);
        assert!(index.height() <= 11);

        let in_order = index.in_order();
        assert!(in_order.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn usage_ranks_by_count() {
        let mut usage = RouteUsage::new();
        usage.record(&["A", "B"]);
        usage.record(&["A", "C"]);
        assert_eq!(usage.record(&["A", "C"]), 2);

        assert_eq!(usage.total(), 3);
        assert_eq!(usage.distinct(), 2);
        assert_eq!(usage.most_frequent(1), vec![("A → C", 2)]);
        assert_eq!(usage.count("A → B"), 1);
        assert_eq!(usage.count("B → A"), 0);
    }

    #[test]
    fn total_saturates_on_large_tallies() {
        let usage: RouteUsage =
            serde_json::from_str(&format!(r#"{{"A → B": {}, "B → A": 1}}"#, u64::MAX)).unwrap();
        assert_eq!(usage.total(), u64::MAX);
        assert_eq!(usage.distinct(), 2);
    }

    #[test]
    fn keys_order_by_node_count_before_text_width() {
        let wide = RouteKey::from_path(&["STORAGE-NORTH", "CLIENT-0042"]);
        let narrow = RouteKey::from_path(&["A", "B", "C"]);
        assert_eq!(wide.length, 2);
        assert_eq!(narrow.length, 3);
        assert!(wide < narrow);
    }
}
