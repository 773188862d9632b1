//! Combined length and noise edge cost for noise-aware routing

use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    algo::reduce::reduce_by,
    model::{RawStreetNetwork, StreetEdge, StreetGraph, StreetNode},
};

/// Coefficients of `combined = length * length_weight + noise * noise_weight`.
///
/// Fixed per deployment; both must be finite and non-negative so the cost is
/// monotone in each factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedWeights {
    #[serde(default = "default_weight")]
    pub length: f64,
    #[serde(default = "default_weight")]
    pub noise: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for CombinedWeights {
    fn default() -> Self {
        Self {
            length: default_weight(),
            noise: default_weight(),
        }
    }
}

impl CombinedWeights {
    /// # Errors
    ///
    /// Returns [`Error::InvalidWeights`] for negative or non-finite weights.
    pub fn new(length: f64, noise: f64) -> Result<Self, Error> {
        let weights = Self { length, noise };
        weights.validate()?;
        Ok(weights)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidWeights`] for negative or non-finite weights.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [("length", self.length), ("noise", self.noise)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "{name} weight must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Combined cost of an edge, `None` while its noise is unknown
    pub fn combine(&self, edge: &StreetEdge) -> Option<f64> {
        edge.noise
            .map(|noise| self.length * edge.length() + self.noise * noise)
    }

    /// Simple graph keyed on the combined cost of `network`'s edges.
    ///
    /// # Errors
    ///
    /// Fails for invalid weights or an edge without a noise value.
    pub fn build_graph(&self, network: &RawStreetNetwork) -> Result<StreetGraph, Error> {
        self.build_from(&network.graph)
    }

    /// Re-weights an already reduced graph.
    ///
    /// # Errors
    ///
    /// Fails for invalid weights or an edge without a noise value.
    pub fn reweight(&self, graph: &StreetGraph) -> Result<StreetGraph, Error> {
        self.build_from(&graph.graph)
    }

    fn build_from(&self, graph: &DiGraph<StreetNode, StreetEdge>) -> Result<StreetGraph, Error> {
        self.validate()?;

        let mut weighted = graph.clone();
        for index in weighted.edge_indices() {
            let Some(combined) = self.combine(&weighted[index]) else {
                let (from, to) = weighted
                    .edge_endpoints(index)
                    .ok_or(Error::InvalidNodeIndex)?;
                return Err(Error::MissingEdgeWeight {
                    from: weighted[from].id,
                    to: weighted[to].id,
                    key: "noise",
                });
            };
            weighted[index].combined = Some(combined);
        }

        let reduced = reduce_by(&weighted, |edge| edge.combined.unwrap_or(f64::INFINITY));
        Ok(StreetGraph::from_graph(reduced))
    }
}
