use criterion::{criterion_group, criterion_main, Criterion};
use droneroute_lib::{
    compute_all_pairs, load_network, minimum_spanning_tree, plan_route, Network, RouteRequest,
};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/sample_network.json")
}

static NETWORK: Lazy<Network> = Lazy::new(|| load_network(&fixture_path()).expect("fixture loads"));
static BFS_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::bfs("A", "B"));
static DIJKSTRA_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::dijkstra("A", "J", 50));
static FLOYD_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::floyd_warshall("A", "J"));

fn benchmark_pathfinding(c: &mut Criterion) {
    let network = &*NETWORK;

    c.bench_function("battery_bfs_a_b", |b| {
        let request = &*BFS_REQUEST;
        b.iter(|| {
            let plan = plan_route(network, request).expect("known endpoints");
            black_box(plan.map(|plan| plan.hop_count()))
        });
    });

    c.bench_function("battery_dijkstra_a_j", |b| {
        let request = &*DIJKSTRA_REQUEST;
        b.iter(|| {
            let plan = plan_route(network, request).expect("known endpoints");
            black_box(plan.map(|plan| plan.cost))
        });
    });

    c.bench_function("floyd_warshall_a_j", |b| {
        let request = &*FLOYD_REQUEST;
        b.iter(|| {
            let plan = plan_route(network, request).expect("known endpoints");
            black_box(plan.map(|plan| plan.cost))
        });
    });

    c.bench_function("all_pairs_tables", |b| {
        b.iter(|| black_box(compute_all_pairs(network).map(|all| all.distances.node_count())));
    });

    c.bench_function("kruskal_mst", |b| {
        b.iter(|| black_box(minimum_spanning_tree(network).total_weight()));
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
