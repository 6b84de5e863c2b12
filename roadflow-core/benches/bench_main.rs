use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;
use roadflow_core::prelude::*;

/// Square grid with eastbound and southbound streets, roughly 400 m apart.
fn grid(side: usize) -> RoadNetwork {
    let mut network = RoadNetwork::new();
    for row in 0..side {
        for col in 0..side {
            network
                .add_node(Node {
                    id: format!("n{row}_{col}"),
                    name: format!("n{row}_{col}"),
                    location: Point::new(-75.0 + col as f64 * 0.004, 40.0 + row as f64 * 0.004),
                    address: None,
                    place_id: None,
                    kind: NodeKind::Junction,
                })
                .unwrap();
        }
    }
    let mut add = |id: String, from: String, to: String| {
        network
            .add_edge(Edge {
                id,
                from,
                to,
                distance_km: 0.4,
                duration_min: 1.0,
                road_type: RoadType::Street,
                base_weight: 0.4,
                current_weight: 0.0,
                is_blocked: false,
                traffic_level: TrafficLevel::Low,
                polyline: None,
            })
            .unwrap();
    };
    for row in 0..side {
        for col in 0..side {
            if col + 1 < side {
                add(
                    format!("e{row}_{col}_east"),
                    format!("n{row}_{col}"),
                    format!("n{row}_{}", col + 1),
                );
            }
            if row + 1 < side {
                add(
                    format!("e{row}_{col}_south"),
                    format!("n{row}_{col}"),
                    format!("n{}_{col}", row + 1),
                );
            }
        }
    }
    network
}

fn bench_routing(c: &mut Criterion) {
    let network = grid(30);
    let start = "n0_0";
    let end = "n29_29";

    c.bench_function("dijkstra_grid_30x30", |b| {
        b.iter(|| find_route(&network, black_box(start), black_box(end), Algorithm::Dijkstra))
    });
    c.bench_function("astar_grid_30x30", |b| {
        b.iter(|| find_route(&network, black_box(start), black_box(end), Algorithm::AStar))
    });
    c.bench_function("bellman_ford_grid_30x30", |b| {
        b.iter(|| find_route(&network, black_box(start), black_box(end), Algorithm::BellmanFord))
    });
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
