use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use super::state::State;
use crate::{
    OsmNodeId,
    model::{EdgeWeight, StreetGraph},
    routing::path::StreetPath,
};

/// Nodes and edges hidden from a search, sized for one graph
#[derive(Debug, Clone)]
pub struct SearchMask {
    nodes: FixedBitSet,
    edges: FixedBitSet,
}

impl SearchMask {
    pub fn new(graph: &StreetGraph) -> Self {
        Self {
            nodes: FixedBitSet::with_capacity(graph.node_count()),
            edges: FixedBitSet::with_capacity(graph.edge_count()),
        }
    }

    pub fn block_node(&mut self, node: NodeIndex) {
        self.nodes.insert(node.index());
    }

    pub fn block_edge(&mut self, edge: EdgeIndex) {
        self.edges.insert(edge.index());
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn allows_node(&self, node: NodeIndex) -> bool {
        !self.nodes.contains(node.index())
    }

    fn allows_edge(&self, edge: EdgeIndex) -> bool {
        !self.edges.contains(edge.index())
    }
}

/// Dijkstra's algorithm between two nodes of the street graph, skipping
/// masked nodes and edges. Returns `None` when `target` is unreachable.
///
/// Among equally cheap paths the one with the lexicographically smallest
/// OSM node id sequence wins, whatever order the nodes were loaded in.
pub fn shortest_path(
    graph: &StreetGraph,
    start: NodeIndex,
    target: NodeIndex,
    weight: EdgeWeight,
    mask: &SearchMask,
) -> Option<StreetPath> {
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);
    let mut settled = FixedBitSet::with_capacity(graph.node_count());

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    let mut reached = false;
    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            reached = true;
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }
        if settled.put(node.index()) {
            continue;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            if !mask.allows_edge(edge.id()) || !mask.allows_node(next) {
                continue;
            }
            let Some(edge_cost) = weight.value(edge.weight()) else {
                continue;
            };
            let next_cost = cost + edge_cost;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    } else if next_cost == *entry.get()
                        && !settled.contains(next.index())
                        && let Some(&current) = predecessors.get(&next)
                        && id_sequence(graph, &predecessors, start, node, next)
                            < id_sequence(graph, &predecessors, start, current, next)
                    {
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    if !reached {
        return None;
    }

    // Follow predecessors backward from target to start
    let mut nodes = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        nodes.push(current);
    }
    nodes.reverse();

    Some(StreetPath {
        nodes,
        weight: distances.get(&target).copied().unwrap_or_default(),
    })
}

/// OSM ids along the settled predecessor chain from `start` to `via`,
/// followed by `next`
fn id_sequence(
    graph: &StreetGraph,
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    via: NodeIndex,
    next: NodeIndex,
) -> Vec<OsmNodeId> {
    let mut ids = Vec::new();
    let mut current = via;
    loop {
        if let Some(node) = graph.node(current) {
            ids.push(node.id);
        }
        if current == start {
            break;
        }
        match predecessors.get(&current) {
            Some(&previous) => current = previous,
            None => break,
        }
    }
    ids.reverse();
    if let Some(node) = graph.node(next) {
        ids.push(node.id);
    }
    ids
}
