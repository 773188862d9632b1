//! Street network components - nodes and edges

use geo::{LineString, Point};

use crate::{DEFAULT_EDGE_LENGTH, Meters, OsmNodeId};

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// OSM ID of the node
    pub id: OsmNodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Street graph edge (street segment)
#[derive(Debug, Clone, Default)]
pub struct StreetEdge {
    /// Physical length in meters, absent in some raw exports
    pub length: Option<Meters>,
    /// Mean noise level of the overlay polygons touching the segment
    pub noise: Option<f64>,
    /// Blend of length and noise used by noise-aware routing
    pub combined: Option<f64>,
    /// Optional geometry, endpoints are used when missing
    pub geometry: Option<LineString<f64>>,
}

impl StreetEdge {
    pub fn new(length: Meters) -> Self {
        Self {
            length: Some(length),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: LineString<f64>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    #[must_use]
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Length in meters, falling back to [`DEFAULT_EDGE_LENGTH`]
    pub fn length(&self) -> Meters {
        self.length.unwrap_or(DEFAULT_EDGE_LENGTH)
    }
}

/// Edge attribute used as the cost of a street segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeWeight {
    /// Physical length in meters
    Length,
    /// Blended length and noise penalty
    Combined,
}

impl EdgeWeight {
    /// Attribute name, as used in error messages
    pub fn key(self) -> &'static str {
        match self {
            EdgeWeight::Length => "length",
            EdgeWeight::Combined => "combined",
        }
    }

    pub fn value(self, edge: &StreetEdge) -> Option<f64> {
        match self {
            EdgeWeight::Length => Some(edge.length()),
            EdgeWeight::Combined => edge.combined,
        }
    }
}
