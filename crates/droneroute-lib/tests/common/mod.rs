//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use droneroute_lib::{load_network, Network, NetworkBuilder, NodeRole, Weight};

/// Path to the fixtures directory shared by the workspace.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the ten-node sample network.
pub fn fixture_network_path() -> PathBuf {
    fixtures_dir().join("sample_network.json")
}

/// Load the sample network used across the integration tests.
///
/// Storage: A, B. Recharge: C, D. Clients: E through J.
#[allow(dead_code)]
pub fn fixture_network() -> Network {
    load_network(&fixture_network_path()).expect("fixture network loads")
}

/// Deterministic pseudo-random network without recharge nodes.
///
/// Nodes are `N00..`; a spanning chain keeps it connected and extra chords are
/// added from a linear congruential sequence seeded by `seed`.
#[allow(dead_code)]
pub fn chain_network(seed: u64, size: usize, chords: usize) -> Network {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % bound
    };

    let id = |i: usize| format!("N{i:02}");
    let mut builder = NetworkBuilder::new();
    for i in 0..size {
        let role = if i == 0 {
            NodeRole::Storage
        } else {
            NodeRole::Client
        };
        builder = builder.node(id(i), role);
    }

    let mut seen = std::collections::HashSet::new();
    for i in 1..size {
        let weight: Weight = 1 + next(20);
        builder = builder.edge(id(i - 1), id(i), weight);
        seen.insert((i - 1, i));
    }
    for _ in 0..chords {
        let a = next(size as u64) as usize;
        let b = next(size as u64) as usize;
        let pair = (a.min(b), a.max(b));
        if a == b || !seen.insert(pair) {
            continue;
        }
        builder = builder.edge(id(pair.0), id(pair.1), 1 + next(40));
    }
    builder.build().expect("generated network is valid")
}
