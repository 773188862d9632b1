//! Street networks exported as `GeoJSON` (osmnx `graph_to_gdfs` layout)

use std::{fs::File, io::BufReader, io::Read, path::Path};

use geo::Geometry;
use geojson::{Feature, FeatureCollection, GeoJson};
use log::{debug, warn};
use serde_json::Value;

use crate::{
    Error, OsmNodeId,
    model::{RawStreetNetwork, StreetEdge},
};

/// Reads a street network file.
///
/// # Errors
///
/// I/O and `GeoJSON` errors, plus the errors of [`read_street_network`].
pub fn load_street_network(path: impl AsRef<Path>) -> Result<RawStreetNetwork, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open street network '{}': {e}", path.display()),
        )
    })?;
    read_street_network(BufReader::new(file))
}

/// Builds a raw network from a `FeatureCollection` where Point features
/// carrying `osmid` are nodes and `LineString` features carrying `u` and
/// `v` are directed edges with an optional `length`.
///
/// # Errors
///
/// [`Error::DanglingEdge`] for an edge whose endpoint is not among the nodes,
/// [`Error::InvalidData`] for a node or edge without usable ids.
pub fn read_street_network<R: Read>(reader: R) -> Result<RawStreetNetwork, Error> {
    let collection = read_feature_collection(reader)?;
    let mut network = RawStreetNetwork::new();
    let mut edges = Vec::new();

    for feature in collection.features {
        match feature_geometry(&feature)? {
            Some(Geometry::Point(point)) => {
                let id = id_property(&feature, "osmid")?;
                network.add_node(id, point);
            }
            Some(Geometry::LineString(line)) => edges.push((feature, line)),
            other => debug!("Skipping street feature with geometry {other:?}"),
        }
    }

    for (feature, line) in edges {
        let from = id_property(&feature, "u")?;
        let to = id_property(&feature, "v")?;
        let edge = StreetEdge {
            length: feature.property("length").and_then(Value::as_f64),
            ..StreetEdge::default()
        }
        .with_geometry(line);
        network.add_edge(from, to, edge)?;
    }

    if network.node_count() == 0 {
        warn!("Street network contains no nodes");
    }
    Ok(network)
}

pub(crate) fn read_feature_collection<R: Read>(reader: R) -> Result<FeatureCollection, Error> {
    let geojson = GeoJson::from_reader(reader).map_err(|e| Error::GeoJsonError(e.to_string()))?;
    FeatureCollection::try_from(geojson).map_err(|e| Error::GeoJsonError(e.to_string()))
}

pub(crate) fn feature_geometry(feature: &Feature) -> Result<Option<Geometry<f64>>, Error> {
    feature
        .geometry
        .clone()
        .map(|geometry| {
            Geometry::<f64>::try_from(geometry).map_err(|e| Error::GeoJsonError(e.to_string()))
        })
        .transpose()
}

/// Integer id stored as a JSON number or a numeric string
#[allow(clippy::cast_possible_truncation)]
fn id_property(feature: &Feature, key: &str) -> Result<OsmNodeId, Error> {
    let value = feature.property(key);
    value
        .and_then(|value| match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as i64)),
            Value::String(text) => text.parse().ok(),
            _ => None,
        })
        .ok_or_else(|| {
            Error::InvalidData(format!("Street feature has no integer '{key}': {value:?}"))
        })
}
