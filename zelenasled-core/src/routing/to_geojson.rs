use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::{Value, json};

use super::{green_routing::RouteSelection, path::RouteCandidate};
use crate::Error;

impl RouteSelection {
    /// One `LineString` feature per selected route.
    ///
    /// Request endpoints are echoed as `[lat, lon]`, route coordinates as
    /// `[lon, lat]` pairs.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .routes
            .iter()
            .map(|route| self.route_feature(route))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    fn route_feature(&self, route: &RouteCandidate) -> Result<Feature, Error> {
        let geometry = Geometry::new(GeoJsonValue::from(&route.geometry));
        let coordinates: Vec<[f64; 2]> = route.geometry.coords().map(|c| [c.x, c.y]).collect();

        let mut value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "path_num": route.path_num,
                "origin_coords": lat_lon(self.origin),
                "destination_coords": lat_lon(self.destination),
                "length_m": route.length_m,
                "coordinates": coordinates,
            }
        });

        if let Some(property) = self.criterion.score_property()
            && let Some(properties) = value["properties"].as_object_mut()
        {
            properties.insert(property.to_string(), json!(route.score));
        }

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn lat_lon(point: Point<f64>) -> Value {
    json!([point.y(), point.x()])
}
