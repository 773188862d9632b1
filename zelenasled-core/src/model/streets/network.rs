//! Street networks before and after parallel-edge reduction

use geo::{Coord, LineString, Point};
use hashbrown::HashMap;
use petgraph::{
    Directed,
    graph::{DiGraph, EdgeIndex, EdgeReference, Edges, NodeIndex},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{EdgeWeight, StreetEdge, StreetNode};
use crate::{Error, Meters, OsmNodeId};

/// Street node position stored in the spatial index, longitude scaled by
/// the cosine of the graph's mean latitude
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Raw directed street multigraph as delivered by the network loader.
///
/// Parallel edges between the same ordered node pair are allowed here,
/// see [`crate::algo::reduce_network`] for the simple graph used in routing.
#[derive(Debug, Clone, Default)]
pub struct RawStreetNetwork {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    node_lookup: HashMap<OsmNodeId, NodeIndex>,
}

impl RawStreetNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, or moves an already known node to `geometry`
    pub fn add_node(&mut self, id: OsmNodeId, geometry: Point<f64>) -> NodeIndex {
        if let Some(&index) = self.node_lookup.get(&id) {
            self.graph[index].geometry = geometry;
            return index;
        }

        let index = self.graph.add_node(StreetNode { id, geometry });
        self.node_lookup.insert(id, index);
        index
    }

    /// Adds a directed edge between two known nodes
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] if either endpoint was never added.
    pub fn add_edge(
        &mut self,
        from: OsmNodeId,
        to: OsmNodeId,
        edge: StreetEdge,
    ) -> Result<EdgeIndex, Error> {
        match (self.node_lookup.get(&from), self.node_lookup.get(&to)) {
            (Some(&source), Some(&target)) => Ok(self.graph.add_edge(source, target, edge)),
            _ => Err(Error::DanglingEdge { from, to }),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edge_weights(&self) -> impl Iterator<Item = &StreetEdge> {
        self.graph.edge_weights()
    }
}

/// Simple directed street graph: at most one edge per ordered node pair.
///
/// Built once at startup and only read afterwards, so it can be shared
/// between concurrent requests without synchronization.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
    lon_scale: f64,
    node_lookup: HashMap<OsmNodeId, NodeIndex>,
}

impl StreetGraph {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn from_graph(graph: DiGraph<StreetNode, StreetEdge>) -> Self {
        let lon_scale = if graph.node_count() == 0 {
            1.0
        } else {
            let mean_lat = graph.node_weights().map(|node| node.geometry.y()).sum::<f64>()
                / graph.node_count() as f64;
            mean_lat.to_radians().cos()
        };

        let points = graph
            .node_indices()
            .map(|index| {
                let point = graph[index].geometry;
                IndexedPoint::new([point.x() * lon_scale, point.y()], index)
            })
            .collect::<Vec<_>>();

        let node_lookup = graph
            .node_indices()
            .map(|index| (graph[index].id, index))
            .collect();

        Self {
            graph,
            rtree: RTree::bulk_load(points),
            lon_scale,
            node_lookup,
        }
    }

    /// Nearest street node to the given (lon, lat) point.
    ///
    /// Distances are equirectangular around the graph's mean latitude, so a
    /// degree of longitude counts for less than a degree of latitude.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<NodeIndex> {
        self.rtree
            .nearest_neighbor(&[point.x() * self.lon_scale, point.y()])
            .map(|nearest| nearest.data)
    }

    pub fn node(&self, index: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(index)
    }

    pub fn node_index(&self, id: OsmNodeId) -> Option<NodeIndex> {
        self.node_lookup.get(&id).copied()
    }

    pub fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&StreetEdge> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    /// Outgoing edges of `node`
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, StreetEdge, Directed> {
        self.graph.edges(node)
    }

    pub fn edge_weights(&self) -> impl Iterator<Item = &StreetEdge> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Sum of `weight` along consecutive nodes, `None` if an edge is missing
    pub fn path_weight(&self, nodes: &[NodeIndex], weight: EdgeWeight) -> Option<f64> {
        nodes.windows(2).try_fold(0.0, |total, pair| {
            self.edge_between(pair[0], pair[1])
                .and_then(|edge| weight.value(edge))
                .map(|value| total + value)
        })
    }

    pub fn path_length(&self, nodes: &[NodeIndex]) -> Option<Meters> {
        self.path_weight(nodes, EdgeWeight::Length)
    }

    pub fn path_coordinates(&self, nodes: &[NodeIndex]) -> Vec<Coord<f64>> {
        nodes
            .iter()
            .filter_map(|&index| self.graph.node_weight(index))
            .map(|node| node.geometry.into())
            .collect()
    }

    /// Checks that every edge carries a finite, non-negative `weight`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingEdgeWeight`] or [`Error::NegativeWeight`] for the first
    /// offending edge.
    pub fn validate_weights(&self, weight: EdgeWeight) -> Result<(), Error> {
        for edge in self.graph.edge_references() {
            let (from, to) = self.edge_endpoint_ids(&edge);
            let Some(value) = weight.value(edge.weight()) else {
                return Err(Error::MissingEdgeWeight {
                    from,
                    to,
                    key: weight.key(),
                });
            };
            if !(value >= 0.0) || value.is_infinite() {
                return Err(Error::NegativeWeight {
                    from,
                    to,
                    weight: value,
                });
            }
        }
        Ok(())
    }

    fn edge_endpoint_ids(&self, edge: &EdgeReference<'_, StreetEdge>) -> (OsmNodeId, OsmNodeId) {
        (
            self.graph[edge.source()].id,
            self.graph[edge.target()].id,
        )
    }
}

/// Edge geometry, or the straight segment between its endpoints
pub(crate) fn edge_line(
    graph: &DiGraph<StreetNode, StreetEdge>,
    edge: EdgeReference<'_, StreetEdge>,
) -> LineString<f64> {
    edge.weight().geometry.clone().unwrap_or_else(|| {
        LineString::from(vec![
            Coord::from(graph[edge.source()].geometry),
            Coord::from(graph[edge.target()].geometry),
        ])
    })
}
