use geo::LineString;
use log::trace;

use crate::{Meters, model::NoiseOverlay};

/// Longest stretch of path a single noise reading may stand for
pub const MAX_METERS_PER_READING: Meters = 500.0;

/// Mean level of the noise polygons crossed by the path.
///
/// Paths crossing no polygon, or fewer than one polygon per
/// [`MAX_METERS_PER_READING`] meters, are too sparsely sampled and get `None`.
#[allow(clippy::cast_precision_loss)]
pub fn quietness_score(
    line: &LineString<f64>,
    length_m: Meters,
    overlay: &NoiseOverlay,
) -> Option<f64> {
    let (total, count) = overlay.level_summary(line);
    if count == 0 {
        return None;
    }

    let meters_per_reading = length_m / count as f64;
    if meters_per_reading < MAX_METERS_PER_READING {
        Some(total / count as f64)
    } else {
        trace!("Rejecting path: {meters_per_reading:.0} m per noise reading over {count} readings");
        None
    }
}
