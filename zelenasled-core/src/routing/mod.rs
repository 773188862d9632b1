//! Route search: candidate enumeration, environmental scoring and
//! selection of diverse alternatives.

mod dijkstra;
mod diversity;
mod green_routing;
mod ksp;
mod path;
pub mod scoring;
mod to_geojson;

pub use crate::model::EdgeWeight;
pub use diversity::{jaccard_distance, most_diverse_triple, select_diverse};
pub use green_routing::{RouteRequest, RouteSelection, RoutingCriterion, find_green_routes};
pub use ksp::{KShortestPaths, k_shortest_paths};
pub use path::{RouteCandidate, StreetPath};
