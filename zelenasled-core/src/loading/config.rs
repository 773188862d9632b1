use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{algo::CombinedWeights, model::BoundingBox};

/// Input datasets and tuning of a [`crate::RoutingModel`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingModelConfig {
    /// Walking network `GeoJSON`
    pub walk_network: PathBuf,
    /// Cycling network `GeoJSON`
    pub bike_network: PathBuf,
    /// H3 vegetation (NDVI) index, JSON or CSV
    #[serde(default)]
    pub vegetation_index: Option<PathBuf>,
    /// H3 heat index, JSON or CSV
    #[serde(default)]
    pub heat_index: Option<PathBuf>,
    /// Noise polygons `GeoJSON`
    #[serde(default)]
    pub noise_overlay: Option<PathBuf>,
    #[serde(default)]
    pub weights: CombinedWeights,
    #[serde(default)]
    pub bounds: BoundingBox,
}

impl RoutingModelConfig {
    pub fn new(walk_network: impl Into<PathBuf>, bike_network: impl Into<PathBuf>) -> Self {
        Self {
            walk_network: walk_network.into(),
            bike_network: bike_network.into(),
            vegetation_index: None,
            heat_index: None,
            noise_overlay: None,
            weights: CombinedWeights::default(),
            bounds: BoundingBox::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_take_defaults() {
        let config: RoutingModelConfig = serde_json::from_str(
            r#"{"walk_network": "walk.geojson", "bike_network": "bike.geojson",
                "weights": {"noise": 2.5}}"#,
        )
        .unwrap();

        assert_eq!(config.walk_network, PathBuf::from("walk.geojson"));
        assert!(config.vegetation_index.is_none());
        assert_eq!(config.weights.length, 1.0);
        assert_eq!(config.weights.noise, 2.5);
        assert_eq!(config.bounds, BoundingBox::LJUBLJANA);
    }
}
