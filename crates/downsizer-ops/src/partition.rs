//! Destination row partitioning.
//!
//! A [`RowPartition`] splits `[0, height)` into one contiguous range per
//! worker. Every row belongs to exactly one range; that exactness is the
//! only thing keeping parallel writers apart, so it is validated before any
//! worker is dispatched.
//!
//! # Policy
//!
//! With `N` workers (capped at `height`), each of the first `N - 1` workers
//! gets `floor(height / N)` rows and the last worker absorbs the remainder:
//!
//! ```text
//! height = 10, N = 4  ->  [0..2) [2..4) [4..6) [6..10)
//! ```
//!
//! ```rust
//! use downsizer_ops::RowPartition;
//!
//! let p = RowPartition::new(10, 4);
//! assert_eq!(p.ranges(), &[0..2, 2..4, 4..6, 6..10]);
//! assert!(p.validate().is_ok());
//! ```

use std::ops::Range;

use crate::{OpsError, OpsResult};

/// Disjoint, contiguous row ranges covering a destination height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPartition {
    height: usize,
    ranges: Vec<Range<usize>>,
}

impl RowPartition {
    /// Partitions `height` rows across `workers` workers.
    ///
    /// `workers` is capped at `height` so no worker receives zero rows, and
    /// raised to 1 if zero. A zero height yields an empty partition.
    pub fn new(height: usize, workers: usize) -> Self {
        if height == 0 {
            return Self {
                height,
                ranges: Vec::new(),
            };
        }
        let workers = workers.clamp(1, height);
        let per_worker = height / workers;
        let ranges = (0..workers)
            .map(|i| {
                let start = i * per_worker;
                let end = if i == workers - 1 {
                    height
                } else {
                    start + per_worker
                };
                start..end
            })
            .collect();
        Self { height, ranges }
    }

    /// Wraps caller-supplied ranges without checking them.
    ///
    /// Call [`validate`](Self::validate) before using the partition.
    pub fn from_ranges(height: usize, ranges: Vec<Range<usize>>) -> Self {
        Self { height, ranges }
    }

    /// Destination height this partition covers.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Ranges in worker order.
    #[inline]
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Number of workers.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if no worker is needed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Rows assigned to `worker`.
    pub fn rows_of(&self, worker: usize) -> Option<Range<usize>> {
        self.ranges.get(worker).cloned()
    }

    /// Checks that the ranges cover `[0, height)` exactly once.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidPartition`] describing the first gap, overlap or
    /// empty range found.
    pub fn validate(&self) -> OpsResult<()> {
        let mut expected = 0;
        for (worker, range) in self.ranges.iter().enumerate() {
            if range.start >= range.end {
                return Err(OpsError::InvalidPartition(format!(
                    "worker {worker} has empty range {}..{}",
                    range.start, range.end
                )));
            }
            if range.start < expected {
                return Err(OpsError::InvalidPartition(format!(
                    "worker {worker} range {}..{} overlaps rows before {expected}",
                    range.start, range.end
                )));
            }
            if range.start > expected {
                return Err(OpsError::InvalidPartition(format!(
                    "rows {expected}..{} are not assigned",
                    range.start
                )));
            }
            expected = range.end;
        }
        if expected != self.height {
            return Err(OpsError::InvalidPartition(format!(
                "ranges end at row {expected}, height is {}",
                self.height
            )));
        }
        Ok(())
    }
}
