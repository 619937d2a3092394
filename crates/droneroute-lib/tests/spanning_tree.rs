mod common;

use droneroute_lib::{minimum_spanning_tree, NetworkBuilder, NetworkEdge, NodeRole};

use common::{chain_network, fixture_network};

fn edge(a: &str, b: &str, weight: u64) -> NetworkEdge {
    NetworkEdge {
        a: a.to_string(),
        b: b.to_string(),
        weight,
    }
}

#[test]
fn fixture_tree_in_kruskal_order() {
    let network = fixture_network();
    let tree = minimum_spanning_tree(&network);

    assert_eq!(
        tree.edges,
        vec![
            edge("I", "J", 3),
            edge("D", "G", 4),
            edge("G", "H", 6),
            edge("A", "E", 8),
            edge("E", "F", 9),
            edge("B", "H", 12),
            edge("C", "F", 20),
            edge("H", "I", 25),
            edge("C", "G", 30),
        ]
    );
    assert_eq!(tree.total_weight(), 117);
    assert!(tree.is_connected());
}

#[test]
fn tree_has_one_edge_fewer_than_nodes_when_connected() {
    for seed in 0..6 {
        let network = chain_network(seed, 15, 20);
        let tree = minimum_spanning_tree(&network);
        assert_eq!(tree.edges.len(), network.len() - 1);
        assert_eq!(tree.component_count(), 1);

        // Every tree edge exists in the network with the same weight.
        for e in &tree.edges {
            assert_eq!(network.edge_weight(&e.a, &e.b), Some(e.weight));
        }
    }
}

#[test]
fn disconnected_network_yields_forest() {
    let network = NetworkBuilder::new()
        .node("A", NodeRole::Storage)
        .node("B", NodeRole::Client)
        .node("C", NodeRole::Recharge)
        .node("D", NodeRole::Client)
        .edge("A", "B", 2)
        .edge("C", "D", 7)
        .build()
        .unwrap();
    let tree = minimum_spanning_tree(&network);

    assert_eq!(tree.edges, vec![edge("A", "B", 2), edge("C", "D", 7)]);
    assert!(!tree.is_connected());
    assert_eq!(tree.component_count(), 2);
}

#[test]
fn rerun_is_stable() {
    let network = fixture_network();
    assert_eq!(
        minimum_spanning_tree(&network).edges,
        minimum_spanning_tree(&network).edges
    );
}
