use geo::LineString;

use crate::model::HexIndex;

/// Mean index value over the path's vertices, `None` when no vertex
/// falls into an indexed cell
#[allow(clippy::cast_precision_loss)]
pub fn hex_score(line: &LineString<f64>, index: &HexIndex) -> Option<f64> {
    let (total, matched) = line
        .coords()
        .filter_map(|coord| index.value_at(*coord))
        .fold((0.0, 0_usize), |(total, count), value| (total + value, count + 1));

    (matched > 0).then(|| total / matched as f64)
}
