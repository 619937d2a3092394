mod common;

use droneroute_lib::{compute_all_pairs, reconstruct_path, Distance, NetworkBuilder, NodeRole};

use common::fixture_network;

#[test]
fn distances_from_storage_node() {
    let network = fixture_network();
    let all = compute_all_pairs(&network).expect("non-empty network");

    let expected = [
        ("A", 0),
        ("B", 67),
        ("C", 35),
        ("D", 57),
        ("E", 8),
        ("F", 17),
        ("G", 53),
        ("H", 59),
        ("I", 84),
        ("J", 87),
    ];
    for (target, cost) in expected {
        assert_eq!(
            all.distances.get("A", target),
            Some(Distance::Finite(cost)),
            "A -> {target}"
        );
    }
}

#[test]
fn route_ignores_battery_ceiling() {
    let network = fixture_network();
    let all = compute_all_pairs(&network).unwrap();
    let route = all.route("A", "B").expect("connected");
    assert_eq!(route.steps, vec!["A", "E", "F", "B"]);
    assert_eq!(route.cost, 67);
}

#[test]
fn distances_are_symmetric_and_reconstruct_consistently() {
    let network = fixture_network();
    let all = compute_all_pairs(&network).unwrap();
    let ids: Vec<String> = network.nodes().map(|node| node.id.clone()).collect();

    for source in &ids {
        for target in &ids {
            let forward = all.distances.get(source, target).unwrap();
            let backward = all.distances.get(target, source).unwrap();
            assert_eq!(forward, backward, "{source} <-> {target}");

            let path = reconstruct_path(&all.predecessors, source, target).expect("connected");
            assert_eq!(path.first(), Some(source));
            assert_eq!(path.last(), Some(target));
            assert!(path.len() <= ids.len());
            assert_eq!(
                network.path_cost(&path).map(Distance::Finite),
                Some(forward)
            );
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let network = fixture_network();
    assert_eq!(compute_all_pairs(&network), compute_all_pairs(&network));
}

#[test]
fn disconnected_pairs_are_infinite() {
    let network = NetworkBuilder::new()
        .node("A", NodeRole::Storage)
        .node("B", NodeRole::Client)
        .node("Z", NodeRole::Recharge)
        .edge("A", "B", 4)
        .build()
        .unwrap();
    let all = compute_all_pairs(&network).unwrap();

    assert_eq!(all.distances.get("A", "Z"), Some(Distance::Infinite));
    assert_eq!(all.distances.get("Z", "Z"), Some(Distance::Finite(0)));
    assert!(all.route("A", "Z").is_none());
    assert!(reconstruct_path(&all.predecessors, "A", "Z").is_none());
    assert_eq!(
        reconstruct_path(&all.predecessors, "Z", "Z"),
        Some(vec!["Z".to_string()])
    );
}

#[test]
fn empty_network_has_no_tables() {
    let network = NetworkBuilder::new().build().unwrap();
    assert!(compute_all_pairs(&network).is_none());
}
