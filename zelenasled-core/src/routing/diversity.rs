//! Choice of three mutually dissimilar routes from a pool of candidates

use hashbrown::HashSet;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use super::path::RouteCandidate;
use crate::{Error, SELECTION_SIZE};

/// Jaccard distance between the node sets of two paths
#[allow(clippy::cast_precision_loss)]
pub fn jaccard_distance(a: &[NodeIndex], b: &[NodeIndex]) -> f64 {
    let a: HashSet<_> = a.iter().collect();
    let b: HashSet<_> = b.iter().collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    let shared = a.intersection(&b).count();
    1.0 - shared as f64 / union as f64
}

/// Indices `i < j < k` of the three pool members with the largest sum of
/// pairwise Jaccard distances. Triples are visited in lexicographic order and
/// only a strictly larger sum replaces the current best.
///
/// Returns `None` for pools with fewer than three members.
pub fn most_diverse_triple<T: AsRef<[NodeIndex]>>(pool: &[T]) -> Option<[usize; 3]> {
    let size = pool.len();
    let mut distances = vec![vec![0.0; size]; size];
    for (i, j) in (0..size).tuple_combinations() {
        let distance = jaccard_distance(pool[i].as_ref(), pool[j].as_ref());
        distances[i][j] = distance;
        distances[j][i] = distance;
    }

    let mut best: Option<([usize; 3], f64)> = None;
    for (i, j, k) in (0..size).tuple_combinations() {
        let total = distances[i][j] + distances[i][k] + distances[j][k];
        if best.is_none_or(|(_, best_total)| total > best_total) {
            best = Some(([i, j, k], total));
        }
    }

    best.map(|(triple, _)| triple)
}

/// Keeps the most diverse triple among the first `pool_size` candidates,
/// in their original order.
///
/// # Errors
///
/// [`Error::InsufficientCandidates`] when the pool holds fewer than three.
pub fn select_diverse(
    mut candidates: Vec<RouteCandidate>,
    pool_size: usize,
) -> Result<Vec<RouteCandidate>, Error> {
    candidates.truncate(pool_size);
    let triple = most_diverse_triple(&candidates).ok_or(Error::InsufficientCandidates {
        found: candidates.len(),
    })?;

    let selected = candidates
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| triple.contains(idx))
        .map(|(_, candidate)| candidate)
        .collect::<Vec<_>>();
    debug_assert_eq!(selected.len(), SELECTION_SIZE);

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;

    fn nodes(ids: &[usize]) -> Vec<NodeIndex> {
        ids.iter().map(|&id| NodeIndex::new(id)).collect()
    }

    fn triple_total(pool: &[Vec<NodeIndex>], [i, j, k]: [usize; 3]) -> f64 {
        jaccard_distance(&pool[i], &pool[j])
            + jaccard_distance(&pool[i], &pool[k])
            + jaccard_distance(&pool[j], &pool[k])
    }

    #[test]
    fn jaccard_distance_ignores_order_and_repeats() {
        assert_eq!(jaccard_distance(&nodes(&[1, 2, 3]), &nodes(&[3, 2, 1, 1])), 0.0);
        assert_eq!(jaccard_distance(&nodes(&[1, 2]), &nodes(&[3, 4])), 1.0);
        assert_eq!(jaccard_distance(&nodes(&[1, 2, 3]), &nodes(&[1, 2, 4])), 0.5);
        assert_eq!(jaccard_distance(&[], &[]), 0.0);
    }

    #[test]
    fn identical_paths_have_zero_diversity() {
        let pool = vec![nodes(&[1, 2]), nodes(&[1, 2]), nodes(&[1, 2])];

        let triple = most_diverse_triple(&pool).unwrap();
        assert_eq!(triple, [0, 1, 2]);
        assert_eq!(triple_total(&pool, triple), 0.0);
    }

    #[test]
    fn chosen_triple_beats_every_other_combination() {
        let pool = vec![
            nodes(&[0, 1, 2, 9]),
            nodes(&[0, 1, 3, 9]),
            nodes(&[0, 4, 5, 9]),
            nodes(&[0, 1, 2, 3, 9]),
            nodes(&[0, 6, 7, 8, 9]),
            nodes(&[0, 4, 2, 9]),
        ];

        let best = most_diverse_triple(&pool).unwrap();
        let best_total = triple_total(&pool, best);
        for (i, j, k) in (0..pool.len()).tuple_combinations() {
            assert!(best_total >= triple_total(&pool, [i, j, k]));
        }
        assert!(best.contains(&4));
    }

    #[test]
    fn ties_keep_first_combination() {
        let pool = vec![
            nodes(&[0, 1, 9]),
            nodes(&[0, 2, 9]),
            nodes(&[0, 3, 9]),
            nodes(&[0, 4, 9]),
        ];

        assert_eq!(most_diverse_triple(&pool), Some([0, 1, 2]));
    }

    #[test]
    fn small_pools_are_insufficient() {
        let candidates = vec![candidate(1, &[1, 2], None), candidate(2, &[1, 3], None)];

        assert!(matches!(
            select_diverse(candidates, 10),
            Err(Error::InsufficientCandidates { found: 2 })
        ));
    }

    #[test]
    fn selection_is_limited_to_the_pool() {
        let candidates = vec![
            candidate(1, &[1, 2, 9], None),
            candidate(2, &[1, 2, 9], None),
            candidate(3, &[1, 2, 9], None),
            candidate(4, &[1, 5, 9], None),
        ];

        let selected = select_diverse(candidates, 3).unwrap();
        let numbers: Vec<_> = selected.iter().map(|c| c.path_num).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
