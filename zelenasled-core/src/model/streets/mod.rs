//! Pedestrian and cycling street network model

pub mod components;
pub mod network;

pub use components::{EdgeWeight, StreetEdge, StreetNode};
pub use network::{IndexedPoint, RawStreetNetwork, StreetGraph};
