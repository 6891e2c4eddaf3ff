use std::ops::Range;

/// Fraction of the per-worker share that closes a chunk; absorbs rounding
/// in the integer share.
const FILL_TOLERANCE: f64 = 0.999;

/// Splits wires into contiguous chunks of roughly equal estimated work.
///
/// Costs are accumulated in index order and a chunk closes once it reaches
/// `(total / nproc) * 0.999`; the last worker takes whatever is left. Returns
/// at most `nproc` non-empty ranges covering `0..costs.len()` exactly once.
/// Skewed costs can leave fewer ranges than workers, or one oversized tail.
pub fn partition(costs: &[u64], nproc: usize) -> Vec<Range<usize>> {
    if costs.is_empty() {
        return Vec::new();
    }

    let nproc = nproc.clamp(1, costs.len());
    let total: u64 = costs.iter().sum();
    let threshold = (total / nproc as u64) as f64 * FILL_TOLERANCE;

    let mut ranges = Vec::with_capacity(nproc);
    let mut begin = 0;
    let mut accumulated = 0u64;
    let last = costs.len() - 1;

    for (i, &cost) in costs.iter().enumerate() {
        accumulated += cost;

        if i == last {
            ranges.push(begin..i + 1);
        } else if accumulated as f64 >= threshold && ranges.len() != nproc - 1 {
            ranges.push(begin..i + 1);
            begin = i + 1;
            accumulated = 0;
        }
    }

    ranges
}

/// Carves `items` into disjoint mutable slices, one per range.
///
/// The ranges must be contiguous and start at zero, as `partition` returns them.
pub fn split_mut<'a, T>(items: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut chunks = Vec::with_capacity(ranges.len());
    let mut rest = items;
    let mut offset = 0;

    for range in ranges {
        assert_eq!(range.start, offset, "partitions must be contiguous");
        let (head, tail) = rest.split_at_mut(range.len());
        chunks.push(head);
        rest = tail;
        offset = range.end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_worker_takes_everything() {
        assert_eq!(partition(&[3, 1, 4, 1, 5], 1), vec![0..5]);
    }

    #[test]
    fn balanced_costs_split_evenly() {
        assert_eq!(partition(&[2; 8], 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn last_worker_absorbs_remainder() {
        // Share is 10; the second chunk never fills but is the last worker's.
        assert_eq!(partition(&[10, 1, 1, 1, 1, 6], 2), vec![0..1, 1..6]);
    }

    #[test]
    fn skewed_costs_can_leave_workers_idle() {
        assert_eq!(partition(&[0, 0, 0, 12], 3), vec![0..4]);
    }

    #[test]
    fn zero_cost_wires_fill_one_per_worker() {
        assert_eq!(partition(&[0, 0, 0, 0, 0], 3), vec![0..1, 1..2, 2..5]);
    }

    #[test]
    fn more_workers_than_wires() {
        assert_eq!(partition(&[5, 5], 8), vec![0..1, 1..2]);
        assert!(partition(&[], 4).is_empty());
    }

    #[test]
    fn split_mut_matches_ranges() {
        let mut items: Vec<u32> = (0..7).collect();
        let ranges = vec![0..3, 3..4, 4..7];
        let chunks = split_mut(&mut items, &ranges);
        assert_eq!(chunks.len(), 3);
        assert_eq!(&*chunks[0], &[0, 1, 2]);
        assert_eq!(&*chunks[1], &[3]);
        assert_eq!(&*chunks[2], &[4, 5, 6]);
    }

    proptest! {
        #[test]
        fn ranges_cover_every_wire_once(
            costs in proptest::collection::vec(0u64..50, 1..200),
            nproc in 1usize..16,
        ) {
            let ranges = partition(&costs, nproc);
            prop_assert!(!ranges.is_empty());
            prop_assert!(ranges.len() <= nproc);
            prop_assert_eq!(ranges[0].start, 0);
            prop_assert_eq!(ranges[ranges.len() - 1].end, costs.len());
            for r in &ranges {
                prop_assert!(!r.is_empty());
            }
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        }

        #[test]
        fn uniform_costs_use_every_worker(
            n in 1usize..200,
            nproc in 1usize..16,
        ) {
            prop_assume!(nproc <= n);
            let ranges = partition(&vec![1u64; n], nproc);
            prop_assert_eq!(ranges.len(), nproc);
        }
    }
}
