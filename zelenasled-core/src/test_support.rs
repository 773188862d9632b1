//! Small hand-built networks shared by unit tests

use geo::{Coord, LineString, MultiPolygon, Point, Rect};
use petgraph::graph::NodeIndex;

use crate::{
    Meters, OsmNodeId,
    algo::reduce_network,
    model::{EdgeWeight, NoisePolygon, RawStreetNetwork, StreetEdge, StreetGraph},
    routing::RouteCandidate,
};

const ORIGIN_LON: f64 = 14.500;
const ORIGIN_LAT: f64 = 46.050;
const STEP: f64 = 0.001;

#[allow(clippy::cast_precision_loss)]
fn grid_point(x: usize, y: usize) -> Point<f64> {
    Point::new(
        ORIGIN_LON + x as f64 * STEP,
        ORIGIN_LAT + y as f64 * STEP,
    )
}

/// Nodes eastward along lat 46.05, one `spacing`-long edge forward between
/// each consecutive pair
pub fn line_network(ids: &[OsmNodeId], spacing: Meters) -> RawStreetNetwork {
    let mut network = RawStreetNetwork::new();
    for (i, &id) in ids.iter().enumerate() {
        network.add_node(id, grid_point(i, 0));
    }
    for pair in ids.windows(2) {
        network
            .add_edge(pair[0], pair[1], StreetEdge::new(spacing))
            .unwrap();
    }
    network
}

pub fn simple(network: &RawStreetNetwork) -> StreetGraph {
    reduce_network(network, EdgeWeight::Length)
}

/// Two routes from node 1 to node 4: via node 2 of total `a_total`, via
/// node 3 of total `b_total`
pub fn diamond(a_total: Meters, b_total: Meters) -> StreetGraph {
    diamond_in_order(&[1, 2, 3, 4], a_total, b_total)
}

/// [`diamond`] with its nodes added to the graph in `order`
pub fn diamond_in_order(order: &[OsmNodeId], a_total: Meters, b_total: Meters) -> StreetGraph {
    let mut network = RawStreetNetwork::new();
    for &id in order {
        let position = match id {
            1 => Point::new(14.500, 46.050),
            2 => Point::new(14.501, 46.051),
            3 => Point::new(14.501, 46.049),
            _ => Point::new(14.502, 46.050),
        };
        network.add_node(id, position);
    }

    for (from, to, length) in [
        (1, 2, a_total / 2.0),
        (2, 4, a_total / 2.0),
        (1, 3, b_total / 2.0),
        (3, 4, b_total / 2.0),
    ] {
        network.add_edge(from, to, StreetEdge::new(length)).unwrap();
    }
    simple(&network)
}

pub fn node(graph: &StreetGraph, id: OsmNodeId) -> NodeIndex {
    graph.node_index(id).unwrap()
}

/// `width` x `height` grid with row-major ids from 0 and `spacing`-long
/// edges in both directions between neighbours
#[allow(clippy::cast_possible_wrap)]
pub fn grid_network(width: usize, height: usize, spacing: Meters) -> RawStreetNetwork {
    let id = |x: usize, y: usize| (y * width + x) as OsmNodeId;

    let mut network = RawStreetNetwork::new();
    for y in 0..height {
        for x in 0..width {
            network.add_node(id(x, y), grid_point(x, y));
        }
    }
    for y in 0..height {
        for x in 0..width {
            let mut neighbours = Vec::new();
            if x + 1 < width {
                neighbours.push(id(x + 1, y));
            }
            if y + 1 < height {
                neighbours.push(id(x, y + 1));
            }
            for other in neighbours {
                network
                    .add_edge(id(x, y), other, StreetEdge::new(spacing))
                    .unwrap();
                network
                    .add_edge(other, id(x, y), StreetEdge::new(spacing))
                    .unwrap();
            }
        }
    }
    network
}

/// Square noise polygon spanning `[min, min + size]` on both axes
pub fn square(min_lon: f64, min_lat: f64, size: f64, level: f64) -> NoisePolygon {
    let rect = Rect::new(
        Coord {
            x: min_lon,
            y: min_lat,
        },
        Coord {
            x: min_lon + size,
            y: min_lat + size,
        },
    );
    NoisePolygon {
        geometry: MultiPolygon::new(vec![rect.to_polygon()]),
        level,
    }
}

/// Candidate whose node indices equal `ids`, laid out eastward
#[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn candidate(path_num: usize, ids: &[OsmNodeId], score: Option<f64>) -> RouteCandidate {
    let geometry = ids
        .iter()
        .enumerate()
        .map(|(i, &id)| Coord {
            x: ORIGIN_LON + i as f64 * STEP,
            y: ORIGIN_LAT + id as f64 * STEP / 10.0,
        })
        .collect::<LineString<f64>>();

    RouteCandidate {
        path_num,
        nodes: ids.iter().map(|&id| NodeIndex::new(id as usize)).collect(),
        node_ids: ids.to_vec(),
        geometry,
        length_m: 100.0 * ids.len().saturating_sub(1) as f64,
        score,
    }
}
