//! Per-request pipeline: snapping, candidate enumeration, scoring and selection

use std::{fmt, str::FromStr};

use geo::Point;
use log::{debug, warn};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::{
    diversity::select_diverse,
    ksp::KShortestPaths,
    path::RouteCandidate,
    scoring::{hex_score, quietness_score, rank_by_score},
};
use crate::{
    Error, HEX_POOL_SIZE, MAX_CANDIDATE_PATHS, NOISE_POOL_SIZE, SELECTION_SIZE,
    model::{EdgeWeight, HexIndex, RoutingModel, StreetGraph, TransportMode},
};

/// What the returned routes are optimized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoutingCriterion {
    /// Shortest by length, no environmental scoring
    #[default]
    Shortest,
    /// Greenest: highest mean vegetation index
    Vegetation,
    /// Coolest: lowest mean heat index
    Heat,
    /// Diverse routes on the length-and-noise weighted graph
    Noise,
    /// Lowest mean noise reading, with a minimum reading density
    Quietest,
}

impl RoutingCriterion {
    /// Parses an optional routing mode where a missing or empty value, as
    /// well as `"none"`, selects [`RoutingCriterion::Shortest`].
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCriterion`] for any other unrecognized name.
    pub fn from_mode(mode: Option<&str>) -> Result<Self, Error> {
        match mode {
            None | Some("") => Ok(Self::Shortest),
            Some(name) => name.parse(),
        }
    }

    /// Property name of the per-route score in the output
    pub fn score_property(self) -> Option<&'static str> {
        match self {
            Self::Vegetation => Some("average_vegetation"),
            Self::Heat => Some("average_heat"),
            Self::Quietest => Some("average_noise"),
            Self::Shortest | Self::Noise => None,
        }
    }

    /// Edge weight the candidate paths are enumerated by
    pub fn edge_weight(self) -> EdgeWeight {
        match self {
            Self::Noise => EdgeWeight::Combined,
            _ => EdgeWeight::Length,
        }
    }
}

impl FromStr for RoutingCriterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::Shortest),
            "vegetation" => Ok(Self::Vegetation),
            "heat" => Ok(Self::Heat),
            "noise" => Ok(Self::Noise),
            "quietest" => Ok(Self::Quietest),
            other => Err(Error::UnknownCriterion(other.to_string())),
        }
    }
}

impl fmt::Display for RoutingCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Shortest => "none",
            Self::Vegetation => "vegetation",
            Self::Heat => "heat",
            Self::Noise => "noise",
            Self::Quietest => "quietest",
        };
        f.write_str(name)
    }
}

/// Single routing request. Points are (lon, lat).
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest {
    pub origin: Point<f64>,
    pub destination: Point<f64>,
    pub mode: TransportMode,
    pub criterion: RoutingCriterion,
}

impl RouteRequest {
    /// Builds a request from `[lat, lon]` pairs as sent by web clients
    pub fn from_lat_lon(
        origin: [f64; 2],
        destination: [f64; 2],
        mode: TransportMode,
        criterion: RoutingCriterion,
    ) -> Self {
        Self {
            origin: Point::new(origin[1], origin[0]),
            destination: Point::new(destination[1], destination[0]),
            mode,
            criterion,
        }
    }
}

/// Routes chosen for a request, best first
#[derive(Debug, Clone)]
pub struct RouteSelection {
    pub criterion: RoutingCriterion,
    pub origin: Point<f64>,
    pub destination: Point<f64>,
    pub routes: Vec<RouteCandidate>,
}

/// Finds up to three routes between the request's endpoints under its criterion.
///
/// # Errors
///
/// - [`Error::OutOfBounds`] for endpoints outside the model's bounding box
/// - [`Error::MissingDataset`] when the criterion needs a dataset that is not loaded
/// - [`Error::Unreachable`] when no path connects the endpoints
/// - [`Error::InsufficientCoverage`] when no candidate could be scored
/// - [`Error::InsufficientCandidates`] when fewer than three candidates remain
///   for diversity selection
pub fn find_green_routes(
    model: &RoutingModel,
    request: &RouteRequest,
) -> Result<RouteSelection, Error> {
    let bounds = model.bounds();
    if !bounds.contains(&request.destination) {
        return Err(Error::OutOfBounds {
            which: "Destination",
        });
    }
    if !bounds.contains(&request.origin) {
        return Err(Error::OutOfBounds { which: "Starting" });
    }

    let graph = model
        .graphs(request.mode)
        .graph(request.criterion.edge_weight());
    let source = graph
        .nearest_node(&request.origin)
        .ok_or(Error::NoPointsFound)?;
    let target = graph
        .nearest_node(&request.destination)
        .ok_or(Error::NoPointsFound)?;

    let environment = &model.environment;
    let routes = match request.criterion {
        RoutingCriterion::Shortest => {
            let mut candidates = enumerate_candidates(graph, source, target, request)?;
            candidates.truncate(SELECTION_SIZE);
            candidates
        }
        RoutingCriterion::Vegetation => {
            let index = environment
                .vegetation
                .as_ref()
                .ok_or(Error::MissingDataset("vegetation"))?;
            let candidates = enumerate_candidates(graph, source, target, request)?;
            select_by_hex_score(candidates, index, true)?
        }
        RoutingCriterion::Heat => {
            let index = environment
                .heat
                .as_ref()
                .ok_or(Error::MissingDataset("heat"))?;
            let candidates = enumerate_candidates(graph, source, target, request)?;
            select_by_hex_score(candidates, index, false)?
        }
        RoutingCriterion::Noise => {
            let candidates = enumerate_candidates(graph, source, target, request)?;
            select_diverse(candidates, NOISE_POOL_SIZE)?
        }
        RoutingCriterion::Quietest => {
            let overlay = environment
                .noise
                .as_ref()
                .ok_or(Error::MissingDataset("noise"))?;
            let mut candidates = enumerate_candidates(graph, source, target, request)?;
            candidates.par_iter_mut().for_each(|candidate| {
                candidate.score =
                    quietness_score(&candidate.geometry, candidate.length_m, overlay);
            });
            candidates.retain(|candidate| candidate.score.is_some());
            if candidates.is_empty() {
                return Err(Error::InsufficientCoverage);
            }
            rank_by_score(&mut candidates, false);
            candidates.truncate(SELECTION_SIZE);
            candidates
        }
    };

    debug!(
        "{} {} request: returning {} routes",
        request.mode,
        request.criterion,
        routes.len()
    );

    Ok(RouteSelection {
        criterion: request.criterion,
        origin: request.origin,
        destination: request.destination,
        routes,
    })
}

fn enumerate_candidates(
    graph: &StreetGraph,
    source: NodeIndex,
    target: NodeIndex,
    request: &RouteRequest,
) -> Result<Vec<RouteCandidate>, Error> {
    // Model graphs are validated once when the model is built
    let paths = KShortestPaths::on_validated_graph(
        graph,
        source,
        target,
        request.criterion.edge_weight(),
    )?
    .take(MAX_CANDIDATE_PATHS)
    .collect::<Vec<_>>();

    if paths.is_empty() {
        warn!(
            "No {} path between {:?} and {:?}",
            request.mode, request.origin, request.destination
        );
        return Err(Error::Unreachable);
    }
    debug!("Enumerated {} candidate paths", paths.len());

    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(idx, path)| RouteCandidate::from_path(graph, path, idx + 1))
        .collect())
}

fn select_by_hex_score(
    mut candidates: Vec<RouteCandidate>,
    index: &HexIndex,
    higher_is_better: bool,
) -> Result<Vec<RouteCandidate>, Error> {
    candidates.par_iter_mut().for_each(|candidate| {
        candidate.score = hex_score(&candidate.geometry, index);
    });
    if candidates.iter().all(|candidate| candidate.score.is_none()) {
        return Err(Error::InsufficientCoverage);
    }

    rank_by_score(&mut candidates, higher_is_better);
    select_diverse(candidates, HEX_POOL_SIZE)
}

#[cfg(test)]
mod tests {
    use h3o::{LatLng, Resolution};

    use super::*;
    use crate::{
        OsmNodeId,
        algo::CombinedWeights,
        model::{BoundingBox, EnvironmentalData, RoutingModelMeta},
        test_support::{candidate, grid_network},
    };

    fn grid_model(environment: EnvironmentalData) -> RoutingModel {
        RoutingModel::from_networks(
            grid_network(4, 4, 100.0),
            grid_network(4, 4, 100.0),
            environment,
            RoutingModelMeta {
                weights: CombinedWeights::default(),
                bounds: BoundingBox::default(),
            },
        )
        .unwrap()
    }

    fn request(criterion: RoutingCriterion) -> RouteRequest {
        RouteRequest::from_lat_lon(
            [46.05, 14.5],
            [46.053, 14.503],
            TransportMode::Walk,
            criterion,
        )
    }

    #[test]
    fn routing_mode_names() {
        assert_eq!(
            RoutingCriterion::from_mode(None).unwrap(),
            RoutingCriterion::Shortest
        );
        assert_eq!(
            RoutingCriterion::from_mode(Some("")).unwrap(),
            RoutingCriterion::Shortest
        );
        assert_eq!(
            RoutingCriterion::from_mode(Some("none")).unwrap(),
            RoutingCriterion::Shortest
        );
        assert_eq!(
            RoutingCriterion::from_mode(Some("quietest")).unwrap(),
            RoutingCriterion::Quietest
        );
        assert!(matches!(
            RoutingCriterion::from_mode(Some("scenic")),
            Err(Error::UnknownCriterion(name)) if name == "scenic"
        ));
        for criterion in [
            RoutingCriterion::Shortest,
            RoutingCriterion::Vegetation,
            RoutingCriterion::Heat,
            RoutingCriterion::Noise,
            RoutingCriterion::Quietest,
        ] {
            assert_eq!(criterion.to_string().parse::<RoutingCriterion>().unwrap(), criterion);
        }
    }

    #[test]
    fn endpoints_outside_the_box_are_rejected() {
        let model = grid_model(EnvironmentalData::default());

        let mut outside = request(RoutingCriterion::Shortest);
        outside.origin = Point::new(15.2, 46.05);
        assert!(matches!(
            find_green_routes(&model, &outside),
            Err(Error::OutOfBounds { which: "Starting" })
        ));

        let mut outside = request(RoutingCriterion::Shortest);
        outside.destination = Point::new(14.5, 45.0);
        assert!(matches!(
            find_green_routes(&model, &outside),
            Err(Error::OutOfBounds {
                which: "Destination"
            })
        ));
    }

    #[test]
    fn shortest_returns_three_ascending_paths() {
        let model = grid_model(EnvironmentalData::default());

        let selection = find_green_routes(&model, &request(RoutingCriterion::Shortest)).unwrap();

        assert_eq!(selection.routes.len(), 3);
        let numbers: Vec<_> = selection.routes.iter().map(|r| r.path_num).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        for route in &selection.routes {
            assert_eq!(route.length_m, 600.0);
            assert!(route.score.is_none());
        }
    }

    #[test]
    fn missing_datasets_are_reported() {
        let model = grid_model(EnvironmentalData::default());

        for (criterion, dataset) in [
            (RoutingCriterion::Vegetation, "vegetation"),
            (RoutingCriterion::Heat, "heat"),
            (RoutingCriterion::Quietest, "noise"),
        ] {
            assert!(matches!(
                find_green_routes(&model, &request(criterion)),
                Err(Error::MissingDataset(name)) if name == dataset
            ));
        }
    }

    #[test]
    fn noise_routes_are_diverse_on_the_combined_graph() {
        let model = grid_model(EnvironmentalData::default());

        let selection = find_green_routes(&model, &request(RoutingCriterion::Noise)).unwrap();

        assert_eq!(selection.routes.len(), 3);
        assert!(selection.routes.iter().all(|r| r.score.is_none()));
        let numbers: Vec<_> = selection.routes.iter().map(|r| r.path_num).collect();
        assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Candidates `[1, middle, 2]` that share both endpoints and differ in
    /// the middle vertex, which alone decides whether they are scored
    fn hex_candidates(scored: usize, unscored: usize) -> (Vec<RouteCandidate>, HexIndex) {
        let mut candidates = Vec::new();
        let mut cells = Vec::new();
        for n in 0..unscored {
            candidates.push(candidate(
                candidates.len() + 1,
                &[1, 500 + n as OsmNodeId, 2],
                None,
            ));
        }
        for n in 0..scored {
            let route = candidate(candidates.len() + 1, &[1, 10 + n as OsmNodeId, 2], None);
            let middle = route.geometry.0[1];
            let cell = LatLng::new(middle.y, middle.x)
                .unwrap()
                .to_cell(Resolution::Thirteen);
            cells.push((cell, n as f64));
            candidates.push(route);
        }

        let index = HexIndex::from_values(Resolution::Thirteen, cells).unwrap();
        (candidates, index)
    }

    #[test]
    fn hex_scoring_without_any_coverage_is_insufficient_coverage() {
        let (candidates, _) = hex_candidates(0, 12);
        let (_, index) = hex_candidates(3, 0);

        let result = select_by_hex_score(candidates, &index, true);
        assert!(matches!(result, Err(Error::InsufficientCoverage)));
    }

    #[test]
    fn unscored_candidates_never_reach_a_full_scored_pool() {
        let (candidates, index) = hex_candidates(12, 6);

        let greenest = select_by_hex_score(candidates.clone(), &index, true).unwrap();
        assert!(greenest.iter().all(|route| route.score.is_some()));
        let scores: Vec<_> = greenest.iter().map(|route| route.score).collect();
        assert_eq!(scores, vec![Some(11.0), Some(10.0), Some(9.0)]);

        let coolest = select_by_hex_score(candidates, &index, false).unwrap();
        assert!(coolest.iter().all(|route| route.score.is_some()));
        let scores: Vec<_> = coolest.iter().map(|route| route.score).collect();
        assert_eq!(scores, vec![Some(0.0), Some(1.0), Some(2.0)]);
    }
}
