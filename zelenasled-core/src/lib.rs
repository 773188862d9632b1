//! Environmentally-aware walking and cycling routing.
//!
//! The crate reduces raw street networks into simple weighted graphs, enumerates
//! loopless shortest paths between two nodes, scores them against vegetation,
//! heat and noise datasets and picks a diverse set of three alternatives.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ErrorKind};
pub use loading::{RoutingModelConfig, create_routing_model};
pub use model::{RoutingModel, StreetGraph, TransportMode};
pub use routing::{RouteRequest, RouteSelection, RoutingCriterion, find_green_routes};

/// OpenStreetMap node identifier
pub type OsmNodeId = i64;

/// Distance in meters
pub type Meters = f64;

/// Number of candidate paths enumerated per request
pub const MAX_CANDIDATE_PATHS: usize = 25;

/// Pool size for diversity selection of hex-scored criteria (vegetation, heat)
pub const HEX_POOL_SIZE: usize = 10;

/// Pool size for diversity selection on the combined-weight graph
pub const NOISE_POOL_SIZE: usize = 25;

/// Number of routes handed back to the caller
pub const SELECTION_SIZE: usize = 3;

/// Length assumed for an edge without a `length` attribute
pub const DEFAULT_EDGE_LENGTH: Meters = 1.0;
