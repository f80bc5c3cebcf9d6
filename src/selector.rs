//! Bounded best-of-N selection.

/// Merge `incoming` into `current` and keep the `n` items with the highest key.
///
/// The result is sorted descending by `key`. The sort is stable, so items with
/// equal keys keep their concatenation order: everything from `current` first,
/// then `incoming` in its given order. Asking for more items than exist is not
/// an error; the result is simply shorter.
pub fn merge_top_n<T, K, F>(current: Vec<T>, incoming: Vec<T>, n: usize, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged = current;
    merged.extend(incoming);
    merged.sort_by(|a, b| key(b).cmp(&key(a)));
    merged.truncate(n);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (rank, tag) pairs; the tag identifies origin for tie-break checks
    fn items(ranks: &[(u64, &'static str)]) -> Vec<(u64, &'static str)> {
        ranks.to_vec()
    }

    fn rank(item: &(u64, &'static str)) -> u64 {
        item.0
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let merged = merge_top_n(
            items(&[(10, "a"), (50, "b")]),
            items(&[(30, "c"), (70, "d"), (20, "e")]),
            3,
            rank,
        );

        assert_eq!(merged, vec![(70, "d"), (50, "b"), (30, "c")]);
    }

    #[test]
    fn n_larger_than_input_returns_everything() {
        let merged = merge_top_n(Vec::new(), items(&[(10, "a"), (50, "b")]), 5, rank);

        assert_eq!(merged, vec![(50, "b"), (10, "a")]);
    }

    #[test]
    fn n_zero_returns_nothing() {
        let merged = merge_top_n(items(&[(1, "a")]), items(&[(2, "b")]), 0, rank);

        assert!(merged.is_empty());
    }

    #[test]
    fn ties_keep_concatenation_order() {
        let merged = merge_top_n(
            items(&[(5, "current-1"), (5, "current-2")]),
            items(&[(5, "incoming-1"), (9, "top"), (5, "incoming-2")]),
            4,
            rank,
        );

        assert_eq!(
            merged,
            vec![
                (9, "top"),
                (5, "current-1"),
                (5, "current-2"),
                (5, "incoming-1"),
            ]
        );
    }

    #[test]
    fn remerge_with_empty_is_identity() {
        let once = merge_top_n(
            items(&[(3, "a"), (8, "b")]),
            items(&[(8, "c"), (1, "d"), (4, "e")]),
            3,
            rank,
        );
        let twice = merge_top_n(once.clone(), Vec::new(), 3, rank);

        assert_eq!(once, twice);
    }

    #[test]
    fn folding_in_sub_batches_matches_single_fold() {
        let state = items(&[(40, "s1"), (15, "s2")]);
        let first = items(&[(22, "p1"), (90, "p2"), (15, "p3")]);
        let second = items(&[(60, "q1"), (22, "q2"), (5, "q3")]);

        let stepwise = merge_top_n(
            merge_top_n(state.clone(), first.clone(), 4, rank),
            second.clone(),
            4,
            rank,
        );
        let mut group = first;
        group.extend(second);
        let at_once = merge_top_n(state, group, 4, rank);

        assert_eq!(stepwise, at_once);
        assert_eq!(stepwise, vec![(90, "p2"), (60, "q1"), (40, "s1"), (22, "p1")]);
    }

    #[test]
    fn result_is_bounded_and_descending() {
        let incoming: Vec<(u64, &'static str)> =
            (0..50u64).map(|i| ((i * 37) % 23, "x")).collect();

        for n in [0, 1, 7, 50, 80] {
            let merged = merge_top_n(Vec::new(), incoming.clone(), n, rank);
            assert_eq!(merged.len(), n.min(incoming.len()));
            assert!(merged.windows(2).all(|w| w[0].0 >= w[1].0));
        }
    }
}
