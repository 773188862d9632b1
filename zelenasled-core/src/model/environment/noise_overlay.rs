//! Noise readings attached to polygons, with an R-tree over their envelopes

use geo::{BoundingRect, Intersects, LineString, MultiPolygon};
use rstar::{
    AABB, RTree,
    primitives::{GeomWithData, Rectangle},
};

/// Polygon area with a measured noise level
#[derive(Debug, Clone)]
pub struct NoisePolygon {
    pub geometry: MultiPolygon<f64>,
    pub level: f64,
}

type IndexedEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Immutable collection of noise polygons with spatial lookup
#[derive(Debug, Clone)]
pub struct NoiseOverlay {
    polygons: Vec<NoisePolygon>,
    rtree: RTree<IndexedEnvelope>,
}

impl NoiseOverlay {
    pub fn new(polygons: Vec<NoisePolygon>) -> Self {
        let envelopes = polygons
            .iter()
            .enumerate()
            .filter_map(|(idx, polygon)| {
                polygon.geometry.bounding_rect().map(|rect| {
                    let rectangle = Rectangle::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    );
                    IndexedEnvelope::new(rectangle, idx)
                })
            })
            .collect::<Vec<_>>();

        Self {
            polygons,
            rtree: RTree::bulk_load(envelopes),
        }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Polygons intersecting `line`, in insertion order
    pub fn intersecting(&self, line: &LineString<f64>) -> Vec<&NoisePolygon> {
        let Some(rect) = line.bounding_rect() else {
            return Vec::new();
        };
        let envelope =
            AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);

        let mut hits = self
            .rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|candidate| candidate.data)
            .filter(|&idx| self.polygons[idx].geometry.intersects(line))
            .collect::<Vec<_>>();
        hits.sort_unstable();

        hits.into_iter().map(|idx| &self.polygons[idx]).collect()
    }

    /// Sum of levels and number of polygons intersecting `line`
    pub fn level_summary(&self, line: &LineString<f64>) -> (f64, usize) {
        self.intersecting(line)
            .iter()
            .fold((0.0, 0), |(total, count), polygon| {
                (total + polygon.level, count + 1)
            })
    }

    /// Mean level of the polygons intersecting `line`
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_level(&self, line: &LineString<f64>) -> Option<f64> {
        match self.level_summary(line) {
            (_, 0) => None,
            (total, count) => Some(total / count as f64),
        }
    }
}
