//! Noise attribute of street segments derived from the polygon overlay

use log::{info, warn};
use petgraph::{graph::EdgeIndex, visit::EdgeRef};
use rayon::prelude::*;

use crate::model::{NoiseOverlay, RawStreetNetwork, streets::network::edge_line};

/// Noise level (dB) assigned when no segment of the network is covered
pub const FALLBACK_NOISE_LEVEL: f64 = 55.0;

/// Outcome of [`attach_noise`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseCoverage {
    /// Edges with at least one overlapping noise polygon
    pub covered: usize,
    /// Edges that received `fill_level`
    pub filled: usize,
    /// Level given to uncovered edges
    pub fill_level: f64,
}

/// Sets `noise` on every edge of `network`.
///
/// Covered edges get the mean level of the overlapping polygons. Uncovered
/// edges get the mean over all covered edges, or [`FALLBACK_NOISE_LEVEL`]
/// when nothing is covered or no overlay is loaded.
pub fn attach_noise(network: &mut RawStreetNetwork, overlay: Option<&NoiseOverlay>) -> NoiseCoverage {
    let graph = &network.graph;
    let levels: Vec<(EdgeIndex, Option<f64>)> = match overlay {
        Some(overlay) => graph
            .edge_references()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|edge| (edge.id(), overlay.mean_level(&edge_line(graph, edge))))
            .collect(),
        None => graph.edge_indices().map(|edge| (edge, None)).collect(),
    };

    let (total, covered) = levels
        .iter()
        .filter_map(|(_, level)| *level)
        .fold((0.0, 0_usize), |(total, count), level| (total + level, count + 1));

    #[allow(clippy::cast_precision_loss)]
    let fill_level = if covered > 0 {
        total / covered as f64
    } else {
        if overlay.is_some() {
            warn!("No street segment overlaps the noise overlay, using {FALLBACK_NOISE_LEVEL} dB");
        }
        FALLBACK_NOISE_LEVEL
    };

    let mut filled = 0;
    for (edge, level) in levels {
        network.graph[edge].noise = Some(level.unwrap_or_else(|| {
            filled += 1;
            fill_level
        }));
    }

    info!(
        "Attached noise to {} edges ({covered} covered, {filled} filled with {fill_level:.1} dB)",
        covered + filled
    );

    NoiseCoverage {
        covered,
        filled,
        fill_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{line_network, square};

    #[test]
    fn every_edge_gets_a_noise_value() {
        let mut network = line_network(&[1, 2, 3, 4], 100.0);
        // Covers only the first node (14.500, 46.050)
        let overlay = NoiseOverlay::new(vec![
            square(14.4995, 46.0495, 0.001, 60.0),
            square(14.4995, 46.0495, 0.001, 70.0),
        ]);

        let coverage = attach_noise(&mut network, Some(&overlay));

        assert!(network.edge_weights().all(|edge| edge.noise.is_some()));
        assert_eq!(coverage.covered, 1);
        assert_eq!(coverage.filled, 2);
        assert_eq!(coverage.fill_level, 65.0);
    }

    #[test]
    fn covered_edges_average_their_polygons() {
        let mut network = line_network(&[1, 2], 100.0);
        let overlay = NoiseOverlay::new(vec![
            square(14.4995, 46.0495, 0.001, 50.0),
            square(14.5005, 46.0495, 0.001, 80.0),
        ]);

        attach_noise(&mut network, Some(&overlay));

        let levels: Vec<_> = network.edge_weights().map(|edge| edge.noise).collect();
        assert_eq!(levels, vec![Some(65.0)]);
    }

    #[test]
    fn without_overlay_fallback_is_used() {
        let mut network = line_network(&[1, 2, 3], 100.0);

        let coverage = attach_noise(&mut network, None);

        assert_eq!(coverage.covered, 0);
        assert!(
            network
                .edge_weights()
                .all(|edge| edge.noise == Some(FALLBACK_NOISE_LEVEL))
        );
    }
}
