//! Splitting the first-row columns between workers.

use std::ops::Range;

/// Divide `[0, n)` into `num_workers` contiguous ranges.
///
/// The first `n % num_workers` ranges get one extra column, so sizes differ
/// by at most one. Ranges are returned in increasing column order and cover
/// every column exactly once. `num_workers` must be in `1..=n`.
pub fn partition_columns(n: usize, num_workers: usize) -> Vec<Range<usize>> {
    debug_assert!(num_workers >= 1 && num_workers <= n);
    let base = n / num_workers;
    let remainder = n % num_workers;

    let mut ranges = Vec::with_capacity(num_workers);
    let mut start = 0;
    for i in 0..num_workers {
        let len = base + usize::from(i < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
