//! Static row partitioning across workers.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Split `rows` into `workers` contiguous, disjoint ranges covering `0..rows`.
///
/// Every range is `rows / workers` long except the last, which also takes
/// the remainder. With more workers than rows, all but the last range are
/// empty.
pub fn partition(rows: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    let workers = workers.get();
    let chunk = rows / workers;

    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i == workers - 1 { rows } else { (i + 1) * chunk };
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn n(workers: usize) -> NonZeroUsize {
        NonZeroUsize::new(workers).unwrap()
    }

    #[test]
    fn test_even_split() {
        assert_eq!(partition(16, n(4)), vec![0..4, 4..8, 8..12, 12..16]);
    }

    #[test]
    fn test_remainder_goes_to_last() {
        assert_eq!(partition(10, n(3)), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_single_worker() {
        assert_eq!(partition(7, n(1)), vec![0..7]);
    }

    #[test]
    fn test_more_workers_than_rows() {
        assert_eq!(partition(2, n(4)), vec![0..0, 0..0, 0..0, 0..2]);
    }

    proptest! {
        #[test]
        fn prop_partitions_cover_rows_exactly_once(rows in 1usize..512, workers in 1usize..64) {
            let ranges = partition(rows, n(workers));
            prop_assert_eq!(ranges.len(), workers);

            let mut seen = vec![0u32; rows];
            for range in &ranges {
                for row in range.clone() {
                    seen[row] += 1;
                }
            }
            prop_assert!(seen.iter().all(|&c| c == 1));

            // Contiguous and ordered.
            prop_assert_eq!(ranges[0].start, 0);
            prop_assert_eq!(ranges[workers - 1].end, rows);
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }
}
