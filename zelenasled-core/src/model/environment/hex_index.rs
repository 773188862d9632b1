//! Scalar values (NDVI, heat) keyed by H3 cells of one resolution

use geo::Coord;
use h3o::{CellIndex, LatLng, Resolution};
use hashbrown::HashMap;

use crate::Error;

/// Immutable mapping from an H3 cell to a scalar value
#[derive(Debug, Clone)]
pub struct HexIndex {
    values: HashMap<CellIndex, f64>,
    resolution: Resolution,
}

impl HexIndex {
    /// Builds an index whose cells all have `resolution`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a cell at another resolution
    /// or a non-finite value.
    pub fn from_values<I>(resolution: Resolution, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (CellIndex, f64)>,
    {
        let values = values
            .into_iter()
            .map(|(cell, value)| {
                if cell.resolution() != resolution {
                    return Err(Error::InvalidData(format!(
                        "H3 cell {cell} has resolution {}, expected {resolution}",
                        cell.resolution()
                    )));
                }
                if !value.is_finite() {
                    return Err(Error::InvalidData(format!(
                        "H3 cell {cell} has non-finite value {value}"
                    )));
                }
                Ok((cell, value))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { values, resolution })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, cell: CellIndex) -> Option<f64> {
        self.values.get(&cell).copied()
    }

    /// Value of the cell enclosing a (lon, lat) coordinate
    pub fn value_at(&self, coord: Coord<f64>) -> Option<f64> {
        let lat_lng = LatLng::new(coord.y, coord.x).ok()?;
        self.get(lat_lng.to_cell(self.resolution))
    }
}
