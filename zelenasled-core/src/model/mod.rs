//! Data model for environmentally-aware street routing
//!
//! Contains the street graphs, environmental datasets and the immutable
//! routing model shared by every request.

pub mod bbox;
pub mod environment;
pub mod routing_model;
pub mod streets;

// Re-export of the main model structure
pub use routing_model::{
    EnvironmentalData, ModeGraphs, RoutingModel, RoutingModelMeta, TransportMode,
};

// Re-export of basic types for convenience
pub use bbox::BoundingBox;
pub use environment::{HexIndex, NoiseOverlay, NoisePolygon};
pub use streets::{
    EdgeWeight, IndexedPoint, RawStreetNetwork, StreetEdge, StreetGraph, StreetNode,
};
