//! Immutable routing context built once at startup

use std::{fmt, str::FromStr};

use log::info;

use super::{BoundingBox, HexIndex, NoiseOverlay, RawStreetNetwork, StreetGraph};
use crate::{
    Error,
    algo::{CombinedWeights, attach_noise, reduce_network},
    model::EdgeWeight,
};

/// Way of moving through the street network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Walk,
    Bike,
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walk" => Ok(TransportMode::Walk),
            "bike" => Ok(TransportMode::Bike),
            other => Err(Error::UnknownTransportMode(other.to_string())),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Walk => f.write_str("walk"),
            TransportMode::Bike => f.write_str("bike"),
        }
    }
}

/// Length-weighted and combined-weighted graphs of one transport mode.
///
/// Both graphs share the node order of the raw network, so a `NodeIndex`
/// refers to the same street node in either of them.
#[derive(Debug, Clone)]
pub struct ModeGraphs {
    pub by_length: StreetGraph,
    pub by_combined: StreetGraph,
}

impl ModeGraphs {
    /// Attaches noise to `network` and derives both routing graphs.
    ///
    /// # Errors
    ///
    /// Fails if a resulting edge weight is negative or undefined.
    pub fn build(
        mut network: RawStreetNetwork,
        noise: Option<&NoiseOverlay>,
        weights: CombinedWeights,
    ) -> Result<Self, Error> {
        attach_noise(&mut network, noise);

        let by_length = reduce_network(&network, EdgeWeight::Length);
        let by_combined = weights.build_graph(&network)?;

        by_length.validate_weights(EdgeWeight::Length)?;
        by_combined.validate_weights(EdgeWeight::Combined)?;

        Ok(Self {
            by_length,
            by_combined,
        })
    }

    /// Graph whose edges are keyed by `weight`
    pub fn graph(&self, weight: EdgeWeight) -> &StreetGraph {
        match weight {
            EdgeWeight::Length => &self.by_length,
            EdgeWeight::Combined => &self.by_combined,
        }
    }
}

/// Datasets the candidate routes are scored against
#[derive(Debug, Clone, Default)]
pub struct EnvironmentalData {
    /// Mean NDVI per H3 cell
    pub vegetation: Option<HexIndex>,
    /// Heat index per H3 cell
    pub heat: Option<HexIndex>,
    /// Polygon noise readings
    pub noise: Option<NoiseOverlay>,
}

#[derive(Debug, Clone, Copy)]
pub struct RoutingModelMeta {
    pub weights: CombinedWeights,
    pub bounds: BoundingBox,
}

/// Everything a routing request reads: four street graphs and the
/// environmental datasets. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct RoutingModel {
    walk: ModeGraphs,
    bike: ModeGraphs,
    pub environment: EnvironmentalData,
    pub meta: RoutingModelMeta,
}

impl RoutingModel {
    /// Builds the routing graphs of both transport modes.
    ///
    /// # Errors
    ///
    /// Propagates weight validation failures of either mode.
    pub fn from_networks(
        walk: RawStreetNetwork,
        bike: RawStreetNetwork,
        environment: EnvironmentalData,
        meta: RoutingModelMeta,
    ) -> Result<Self, Error> {
        let (walk, bike) = rayon::join(
            || ModeGraphs::build(walk, environment.noise.as_ref(), meta.weights),
            || ModeGraphs::build(bike, environment.noise.as_ref(), meta.weights),
        );
        let model = Self {
            walk: walk?,
            bike: bike?,
            environment,
            meta,
        };

        for mode in [TransportMode::Walk, TransportMode::Bike] {
            let graphs = model.graphs(mode);
            info!(
                "{mode} network: {} nodes, {} edges ({} by combined weight)",
                graphs.by_length.node_count(),
                graphs.by_length.edge_count(),
                graphs.by_combined.edge_count()
            );
        }

        Ok(model)
    }

    pub fn graphs(&self, mode: TransportMode) -> &ModeGraphs {
        match mode {
            TransportMode::Walk => &self.walk,
            TransportMode::Bike => &self.bike,
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.meta.bounds
    }
}
