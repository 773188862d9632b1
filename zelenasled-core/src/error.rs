use thiserror::Error;

use crate::OsmNodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No nearby points found for snapping")]
    NoPointsFound,
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("{which} coordinates are outside the allowed area")]
    OutOfBounds { which: &'static str },
    #[error("Unknown commute mode '{0}' (expected walk or bike)")]
    UnknownTransportMode(String),
    #[error("Unknown routing mode '{0}'")]
    UnknownCriterion(String),
    #[error("No {0} dataset is loaded")]
    MissingDataset(&'static str),
    #[error("Destination is unreachable from the origin")]
    Unreachable,
    #[error("Not enough environmental data between chosen locations to estimate the best path")]
    InsufficientCoverage,
    #[error("Not enough diverse candidate paths: found {found}, need 3")]
    InsufficientCandidates { found: usize },
    #[error("Edge {from} -> {to} has negative or undefined weight {weight}")]
    NegativeWeight {
        from: OsmNodeId,
        to: OsmNodeId,
        weight: f64,
    },
    #[error("Edge {from} -> {to} has no '{key}' attribute")]
    MissingEdgeWeight {
        from: OsmNodeId,
        to: OsmNodeId,
        key: &'static str,
    },
    #[error("Edge {from} -> {to} references a node that is not in the network")]
    DanglingEdge { from: OsmNodeId, to: OsmNodeId },
    #[error("Invalid combined weights: {0}")]
    InvalidWeights(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Unrecoverable error: {0}")]
    UnrecoverableError(&'static str),
}

/// Coarse classification of [`Error`] used by the request surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before routing starts
    Input,
    /// No path between origin and destination
    Unreachable,
    /// Environmental datasets do not cover the candidates
    Coverage,
    /// Fewer than three usable candidates
    InsufficientCandidates,
    /// Corrupted graph or configuration, halts startup
    Precondition,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoPointsFound
            | Error::OutOfBounds { .. }
            | Error::UnknownTransportMode(_)
            | Error::UnknownCriterion(_)
            | Error::MissingDataset(_) => ErrorKind::Input,
            Error::Unreachable => ErrorKind::Unreachable,
            Error::InsufficientCoverage => ErrorKind::Coverage,
            Error::InsufficientCandidates { .. } => ErrorKind::InsufficientCandidates,
            Error::NegativeWeight { .. }
            | Error::MissingEdgeWeight { .. }
            | Error::DanglingEdge { .. }
            | Error::InvalidWeights(_) => ErrorKind::Precondition,
            Error::InvalidNodeIndex
            | Error::IoError(_)
            | Error::JsonError(_)
            | Error::CsvError(_)
            | Error::GeoJsonError(_)
            | Error::InvalidData(_)
            | Error::UnrecoverableError(_) => ErrorKind::Internal,
        }
    }
}
