//! Paths through the street graph and the per-request route candidates

use geo::LineString;
use hashbrown::HashSet;
use petgraph::graph::NodeIndex;

use crate::{Meters, OsmNodeId, model::StreetGraph};

/// Node sequence with its total cost under the weight it was searched with
#[derive(Debug, Clone, PartialEq)]
pub struct StreetPath {
    pub nodes: Vec<NodeIndex>,
    pub weight: f64,
}

impl StreetPath {
    pub fn trivial(node: NodeIndex) -> Self {
        Self {
            nodes: vec![node],
            weight: 0.0,
        }
    }

    pub fn source(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }

    /// True when no node is visited twice
    pub fn is_loopless(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|node| seen.insert(*node))
    }
}

/// Route candidate of one request, optionally scored
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    /// 1-based position in the candidate set
    pub path_num: usize,
    pub nodes: Vec<NodeIndex>,
    /// OSM ids of `nodes`
    pub node_ids: Vec<OsmNodeId>,
    pub geometry: LineString<f64>,
    pub length_m: Meters,
    /// Environmental score under the active criterion
    pub score: Option<f64>,
}

impl RouteCandidate {
    pub fn from_path(graph: &StreetGraph, path: StreetPath, path_num: usize) -> Self {
        let length_m = graph.path_length(&path.nodes).unwrap_or_default();
        let geometry = LineString::new(graph.path_coordinates(&path.nodes));
        let node_ids = path
            .nodes
            .iter()
            .filter_map(|&index| graph.node(index).map(|node| node.id))
            .collect();

        Self {
            path_num,
            nodes: path.nodes,
            node_ids,
            geometry,
            length_m,
            score: None,
        }
    }
}

impl AsRef<[NodeIndex]> for RouteCandidate {
    fn as_ref(&self) -> &[NodeIndex] {
        &self.nodes
    }
}

impl AsRef<[NodeIndex]> for StreetPath {
    fn as_ref(&self) -> &[NodeIndex] {
        &self.nodes
    }
}
