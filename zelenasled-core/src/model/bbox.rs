//! Service area check for incoming coordinates

use geo::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned area in WGS84 degrees where the routing data is valid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Ljubljana as defined by OpenStreetMap
    pub const LJUBLJANA: BoundingBox = BoundingBox {
        west: 14.408617,
        south: 45.974064,
        east: 14.755332,
        north: 46.145997,
    };

    /// Inclusive containment test for a (lon, lat) point
    pub fn contains(&self, point: &Point<f64>) -> bool {
        (self.west..=self.east).contains(&point.x())
            && (self.south..=self.north).contains(&point.y())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::LJUBLJANA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_centre_is_inside() {
        assert!(BoundingBox::LJUBLJANA.contains(&Point::new(14.5058, 46.0569)));
    }

    #[test]
    fn swapped_coordinates_are_outside() {
        // (lat, lon) passed as (lon, lat)
        assert!(!BoundingBox::LJUBLJANA.contains(&Point::new(46.0569, 14.5058)));
    }

    #[test]
    fn edges_are_inclusive() {
        let bbox = BoundingBox::LJUBLJANA;
        assert!(bbox.contains(&Point::new(bbox.west, bbox.south)));
        assert!(bbox.contains(&Point::new(bbox.east, bbox.north)));
        assert!(!bbox.contains(&Point::new(bbox.east + 1e-6, bbox.north)));
    }
}
