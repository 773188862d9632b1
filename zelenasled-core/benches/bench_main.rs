use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;
use zelenasled_core::prelude::*;

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn grid(size: usize) -> StreetGraph {
    let id = |x: usize, y: usize| (y * size + x) as OsmNodeId;
    let mut network = RawStreetNetwork::new();
    for y in 0..size {
        for x in 0..size {
            network.add_node(
                id(x, y),
                Point::new(14.45 + x as f64 * 0.001, 46.0 + y as f64 * 0.001),
            );
        }
    }
    for y in 0..size {
        for x in 0..size {
            // Uneven lengths keep the shortest paths distinct
            let length = 50.0 + ((x * 7 + y * 13) % 11) as f64;
            if x + 1 < size {
                network.add_edge(id(x, y), id(x + 1, y), StreetEdge::new(length)).unwrap();
                network.add_edge(id(x + 1, y), id(x, y), StreetEdge::new(length)).unwrap();
            }
            if y + 1 < size {
                network.add_edge(id(x, y), id(x, y + 1), StreetEdge::new(length)).unwrap();
                network.add_edge(id(x, y + 1), id(x, y), StreetEdge::new(length)).unwrap();
            }
        }
    }
    reduce_network(&network, EdgeWeight::Length)
}

fn bench_k_shortest_paths(c: &mut Criterion) {
    let graph = grid(40);
    let source = graph.node_index(0).unwrap();
    let target = graph.node_index(40 * 40 - 1).unwrap();

    c.bench_function("ksp_grid_40x40_k25", |b| {
        b.iter(|| {
            k_shortest_paths(
                black_box(&graph),
                source,
                target,
                EdgeWeight::Length,
                MAX_CANDIDATE_PATHS,
            )
            .unwrap()
        });
    });

    c.bench_function("ksp_grid_40x40_first", |b| {
        b.iter(|| {
            KShortestPaths::new(black_box(&graph), source, target, EdgeWeight::Length)
                .unwrap()
                .next()
        });
    });
}

criterion_group!(benches, bench_k_shortest_paths);
criterion_main!(benches);
