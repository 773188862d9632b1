pub use crate::{
    DEFAULT_EDGE_LENGTH, HEX_POOL_SIZE, MAX_CANDIDATE_PATHS, NOISE_POOL_SIZE, SELECTION_SIZE,
};

// Re-export key components
pub use crate::algo::{CombinedWeights, FALLBACK_NOISE_LEVEL, attach_noise, reduce_network};
pub use crate::loading::environment::{load_hex_index, load_noise_overlay};
pub use crate::loading::network::load_street_network;
pub use crate::loading::{RoutingModelConfig, create_routing_model};
pub use crate::model::{
    BoundingBox, EnvironmentalData, HexIndex, ModeGraphs, NoiseOverlay, NoisePolygon,
    RawStreetNetwork, RoutingModel, RoutingModelMeta, StreetEdge, StreetGraph, StreetNode,
    TransportMode,
};
pub use crate::routing::{
    EdgeWeight, KShortestPaths, RouteCandidate, RouteRequest, RouteSelection, RoutingCriterion,
    StreetPath, find_green_routes, k_shortest_paths, most_diverse_triple, select_diverse,
};

// Core scalar types
pub use crate::Meters;
pub use crate::OsmNodeId;
pub use crate::{Error, ErrorKind};
