//! K loopless shortest paths (Yen's algorithm)
//!
//! [`KShortestPaths`] is a lazy iterator: every call to `next` computes
//! only the deviations of the previously emitted path, so callers bound
//! the work by how many paths they take.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use hashbrown::HashSet;
use petgraph::graph::NodeIndex;

use super::{
    dijkstra::{SearchMask, shortest_path},
    path::StreetPath,
};
use crate::{
    Error, OsmNodeId,
    model::{EdgeWeight, StreetGraph},
};

/// Pending path, ordered by weight then by its OSM node id sequence
#[derive(Debug)]
struct Candidate {
    ids: Vec<OsmNodeId>,
    path: StreetPath,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .weight
            .total_cmp(&other.path.weight)
            .then_with(|| self.ids.cmp(&other.ids))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Lazily generated loopless paths from `source` to `target` in
/// non-decreasing order of total weight.
pub struct KShortestPaths<'a> {
    graph: &'a StreetGraph,
    source: NodeIndex,
    target: NodeIndex,
    weight: EdgeWeight,
    emitted: Vec<StreetPath>,
    candidates: BinaryHeap<Reverse<Candidate>>,
    queued: HashSet<Vec<NodeIndex>>,
    mask: SearchMask,
    started: bool,
}

impl<'a> KShortestPaths<'a> {
    /// # Errors
    ///
    /// [`Error::InvalidNodeIndex`] for endpoints outside the graph, and the
    /// weight validation errors of [`StreetGraph::validate_weights`].
    pub fn new(
        graph: &'a StreetGraph,
        source: NodeIndex,
        target: NodeIndex,
        weight: EdgeWeight,
    ) -> Result<Self, Error> {
        graph.validate_weights(weight)?;
        Self::on_validated_graph(graph, source, target, weight)
    }

    /// Like [`KShortestPaths::new`] without the scan over every edge, for
    /// graphs that already passed [`StreetGraph::validate_weights`] for
    /// `weight`, such as those held by a [`crate::model::RoutingModel`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeIndex`] for endpoints outside the graph.
    pub fn on_validated_graph(
        graph: &'a StreetGraph,
        source: NodeIndex,
        target: NodeIndex,
        weight: EdgeWeight,
    ) -> Result<Self, Error> {
        if graph.node(source).is_none() || graph.node(target).is_none() {
            return Err(Error::InvalidNodeIndex);
        }

        Ok(Self {
            graph,
            source,
            target,
            weight,
            emitted: Vec::new(),
            candidates: BinaryHeap::new(),
            queued: HashSet::new(),
            mask: SearchMask::new(graph),
            started: false,
        })
    }

    fn enqueue(&mut self, path: StreetPath) {
        if !self.queued.insert(path.nodes.clone()) {
            return;
        }
        let ids = path
            .nodes
            .iter()
            .filter_map(|&index| self.graph.node(index).map(|node| node.id))
            .collect();
        self.candidates.push(Reverse(Candidate { ids, path }));
    }

    /// Queues every deviation of the last emitted path
    fn enqueue_deviations(&mut self) {
        let Some(previous) = self.emitted.last().map(|path| path.nodes.clone()) else {
            return;
        };

        let mut deviations = Vec::new();
        for spur_idx in 0..previous.len().saturating_sub(1) {
            let spur = previous[spur_idx];
            let root = &previous[..=spur_idx];

            self.mask.clear();
            // Edges that would recreate an emitted path with the same root
            for path in &self.emitted {
                if path.nodes.len() > spur_idx + 1
                    && path.nodes[..=spur_idx] == *root
                    && let Some(edge) = self
                        .graph
                        .graph
                        .find_edge(path.nodes[spur_idx], path.nodes[spur_idx + 1])
                {
                    self.mask.block_edge(edge);
                }
            }
            for &node in &root[..spur_idx] {
                self.mask.block_node(node);
            }

            let Some(spur_path) =
                shortest_path(self.graph, spur, self.target, self.weight, &self.mask)
            else {
                continue;
            };

            let mut nodes = root[..spur_idx].to_vec();
            nodes.extend(spur_path.nodes);
            if let Some(weight) = self.graph.path_weight(&nodes, self.weight) {
                deviations.push(StreetPath { nodes, weight });
            }
        }

        for path in deviations {
            self.enqueue(path);
        }
    }
}

impl Iterator for KShortestPaths<'_> {
    type Item = StreetPath;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.enqueue_deviations();
        } else {
            self.started = true;
            self.mask.clear();
            if let Some(path) =
                shortest_path(self.graph, self.source, self.target, self.weight, &self.mask)
            {
                self.enqueue(path);
            }
        }

        let Reverse(candidate) = self.candidates.pop()?;
        self.emitted.push(candidate.path.clone());
        Some(candidate.path)
    }
}

/// First `k` loopless shortest paths from `source` to `target`.
///
/// An unreachable target yields an empty vector, `source == target` a
/// single trivial path.
///
/// # Errors
///
/// See [`KShortestPaths::new`].
pub fn k_shortest_paths(
    graph: &StreetGraph,
    source: NodeIndex,
    target: NodeIndex,
    weight: EdgeWeight,
    k: usize,
) -> Result<Vec<StreetPath>, Error> {
    Ok(KShortestPaths::new(graph, source, target, weight)?
        .take(k)
        .collect())
}
