//! Environmental scores of route candidates

mod hex;
mod noise;

use std::cmp::Ordering;

pub use hex::hex_score;
pub use noise::{MAX_METERS_PER_READING, quietness_score};

use super::path::RouteCandidate;

/// Sorts candidates best-first by score.
///
/// Unscored candidates always go last whatever the direction; the sort
/// is stable so equal scores keep enumeration order.
pub fn rank_by_score(candidates: &mut [RouteCandidate], higher_is_better: bool) {
    candidates.sort_by(|a, b| match (a.score, b.score) {
        (Some(x), Some(y)) if higher_is_better => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;

    fn scores(candidates: &[RouteCandidate]) -> Vec<(usize, Option<f64>)> {
        candidates.iter().map(|c| (c.path_num, c.score)).collect()
    }

    #[test]
    fn unscored_sort_last_when_descending() {
        let mut candidates = vec![
            candidate(1, &[1, 2], None),
            candidate(2, &[1, 3], Some(0.2)),
            candidate(3, &[1, 4], Some(0.7)),
        ];

        rank_by_score(&mut candidates, true);

        assert_eq!(
            scores(&candidates),
            vec![(3, Some(0.7)), (2, Some(0.2)), (1, None)]
        );
    }

    #[test]
    fn unscored_sort_last_when_ascending() {
        let mut candidates = vec![
            candidate(1, &[1, 2], None),
            candidate(2, &[1, 3], Some(31.0)),
            candidate(3, &[1, 4], Some(29.5)),
            candidate(4, &[1, 5], Some(29.5)),
        ];

        rank_by_score(&mut candidates, false);

        assert_eq!(
            scores(&candidates),
            vec![(3, Some(29.5)), (4, Some(29.5)), (2, Some(31.0)), (1, None)]
        );
    }
}
