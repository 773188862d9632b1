//! Environmental dataset loaders: H3 value indices and noise polygons

use std::{collections::BTreeMap, fs::File, io::BufReader, io::Read, path::Path};

use geo::{Geometry, MultiPolygon};
use h3o::CellIndex;
use log::{info, warn};
use serde::Deserialize;

use super::network::{feature_geometry, read_feature_collection};
use crate::{
    Error,
    model::{HexIndex, NoiseOverlay, NoisePolygon},
};

/// Format of an H3 index file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexFormat {
    /// `{ "<cell>": value }`
    Json,
    /// `h3,value` rows with a header
    Csv,
}

impl HexFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => HexFormat::Csv,
            _ => HexFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HexRow {
    h3: String,
    value: f64,
}

fn open(path: &Path, what: &str) -> Result<BufReader<File>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open {what} '{}': {e}", path.display()),
        )
    })?;
    Ok(BufReader::new(file))
}

/// Reads an H3 index file.
///
/// # Errors
///
/// I/O errors and the errors of [`read_hex_index`].
pub fn load_hex_index(path: impl AsRef<Path>) -> Result<HexIndex, Error> {
    let path = path.as_ref();
    let index = read_hex_index(open(path, "hex index")?, HexFormat::from_path(path))?;
    info!(
        "Loaded {} H3 cells at resolution {} from {}",
        index.len(),
        index.resolution(),
        path.display()
    );
    Ok(index)
}

/// Parses H3 cell/value pairs. The resolution is taken from the first cell
/// and every other cell must share it.
///
/// # Errors
///
/// JSON or CSV syntax errors, [`Error::InvalidData`] for invalid cells,
/// mixed resolutions or an empty dataset.
pub fn read_hex_index<R: Read>(reader: R, format: HexFormat) -> Result<HexIndex, Error> {
    let raw: Vec<(String, f64)> = match format {
        HexFormat::Json => serde_json::from_reader::<_, BTreeMap<String, f64>>(reader)?
            .into_iter()
            .collect(),
        HexFormat::Csv => {
            let mut rows = csv::Reader::from_reader(reader);
            rows.deserialize::<HexRow>()
                .map(|row| row.map(|row| (row.h3, row.value)))
                .collect::<Result<_, _>>()?
        }
    };

    let cells = raw
        .into_iter()
        .map(|(cell, value)| {
            cell.parse::<CellIndex>()
                .map(|cell| (cell, value))
                .map_err(|e| Error::InvalidData(format!("Invalid H3 cell '{cell}': {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let resolution = cells
        .first()
        .map(|(cell, _)| cell.resolution())
        .ok_or_else(|| Error::InvalidData("H3 index contains no cells".to_string()))?;

    HexIndex::from_values(resolution, cells)
}

/// Reads a noise polygon file.
///
/// # Errors
///
/// I/O errors and the errors of [`read_noise_overlay`].
pub fn load_noise_overlay(path: impl AsRef<Path>) -> Result<NoiseOverlay, Error> {
    let path = path.as_ref();
    let overlay = read_noise_overlay(open(path, "noise overlay")?)?;
    info!(
        "Loaded {} noise polygons from {}",
        overlay.len(),
        path.display()
    );
    Ok(overlay)
}

/// Parses Polygon and `MultiPolygon` features with a numeric `noise_level`.
/// Other features are skipped with a warning.
///
/// # Errors
///
/// `GeoJSON` syntax or geometry conversion errors.
pub fn read_noise_overlay<R: Read>(reader: R) -> Result<NoiseOverlay, Error> {
    let collection = read_feature_collection(reader)?;
    let mut polygons = Vec::with_capacity(collection.features.len());
    let mut skipped = 0_usize;

    for feature in &collection.features {
        let level = feature
            .property("noise_level")
            .and_then(serde_json::Value::as_f64)
            .filter(|level| level.is_finite());
        let geometry = match feature_geometry(feature)? {
            Some(Geometry::Polygon(polygon)) => Some(MultiPolygon::new(vec![polygon])),
            Some(Geometry::MultiPolygon(multi)) => Some(multi),
            _ => None,
        };

        match (geometry, level) {
            (Some(geometry), Some(level)) => polygons.push(NoisePolygon { geometry, level }),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {skipped} noise features without polygon geometry or noise_level");
    }
    Ok(NoiseOverlay::new(polygons))
}
