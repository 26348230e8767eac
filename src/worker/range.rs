//! Search-space partitioning.

use std::fmt;

/// A half-open range of salt indices assigned to exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    pub start: u64,
    pub end: u64,
}

impl SearchRange {
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for SearchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Splits `[0, max_attempts)` into up to `num_workers` contiguous ranges of
/// size ceil(max_attempts / num_workers), the last truncated. The returned
/// ranges cover the space exactly once with no gaps or overlaps.
pub fn partition(max_attempts: u64, num_workers: usize) -> Vec<SearchRange> {
    if max_attempts == 0 || num_workers == 0 {
        return Vec::new();
    }
    let chunk = max_attempts.div_ceil(num_workers as u64);
    (0..num_workers as u64)
        .map(|i| {
            let start = i * chunk;
            SearchRange {
                start: start.min(max_attempts),
                end: (start + chunk).min(max_attempts),
            }
        })
        .filter(|r| !r.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(max_attempts: u64, num_workers: usize) {
        let ranges = partition(max_attempts, num_workers);
        assert!(ranges.len() <= num_workers);

        // Contiguous, ordered, non-overlapping, covering [0, max_attempts).
        let mut next = 0u64;
        for range in &ranges {
            assert_eq!(range.start, next);
            assert!(range.end > range.start);
            next = range.end;
        }
        assert_eq!(next, max_attempts);
    }

    #[test]
    fn test_partition_exact_cover() {
        for max_attempts in [1u64, 2, 7, 100, 999, 1_000_000] {
            for num_workers in [1usize, 2, 3, 7, 8, 16, 100] {
                assert_exact_cover(max_attempts, num_workers);
            }
        }
    }

    #[test]
    fn test_partition_more_workers_than_attempts() {
        let ranges = partition(3, 8);
        assert_eq!(
            ranges,
            vec![
                SearchRange { start: 0, end: 1 },
                SearchRange { start: 1, end: 2 },
                SearchRange { start: 2, end: 3 },
            ]
        );
    }

    #[test]
    fn test_partition_degenerate() {
        assert!(partition(0, 4).is_empty());
        assert!(partition(10, 0).is_empty());
    }

    #[test]
    fn test_partition_chunk_size() {
        let ranges = partition(10, 3);
        // ceil(10 / 3) = 4, last range truncated.
        assert_eq!(
            ranges,
            vec![
                SearchRange { start: 0, end: 4 },
                SearchRange { start: 4, end: 8 },
                SearchRange { start: 8, end: 10 },
            ]
        );
    }
}
