//! Multigraph to simple digraph reduction

use hashbrown::{HashMap, hash_map::Entry};
use petgraph::{graph::DiGraph, visit::EdgeRef};

use crate::model::{EdgeWeight, RawStreetNetwork, StreetEdge, StreetGraph, StreetNode};

/// Collapses parallel edges of `network`, keeping the cheapest by `weight`
pub fn reduce_network(network: &RawStreetNetwork, weight: EdgeWeight) -> StreetGraph {
    let reduced = reduce_by(&network.graph, |edge| {
        weight.value(edge).unwrap_or(f64::INFINITY)
    });
    StreetGraph::from_graph(reduced)
}

/// Keeps, for every ordered node pair, the parallel edge with the lowest cost.
///
/// Nodes are copied in their original order, including isolated ones. The
/// surviving edge carries all attributes of the winning occurrence; on equal
/// cost the first occurrence wins.
pub fn reduce_by<F>(
    graph: &DiGraph<StreetNode, StreetEdge>,
    cost: F,
) -> DiGraph<StreetNode, StreetEdge>
where
    F: Fn(&StreetEdge) -> f64,
{
    let mut reduced = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.node_weights() {
        reduced.add_node(node.clone());
    }

    let mut kept = HashMap::with_capacity(graph.edge_count());
    for edge in graph.edge_references() {
        let candidate = edge.weight();
        match kept.entry((edge.source(), edge.target())) {
            Entry::Vacant(entry) => {
                let index = reduced.add_edge(edge.source(), edge.target(), candidate.clone());
                entry.insert((index, cost(candidate)));
            }
            Entry::Occupied(mut entry) => {
                let (index, best) = *entry.get();
                let candidate_cost = cost(candidate);
                if best > candidate_cost {
                    reduced[index] = candidate.clone();
                    entry.insert((index, candidate_cost));
                }
            }
        }
    }

    reduced
}
