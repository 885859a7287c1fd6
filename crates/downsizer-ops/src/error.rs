//! Error types for downscale operations.

use std::ops::Range;

use thiserror::Error;

/// Error type for downscale operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid scale, invalid buffer or an addressing error from the core.
    #[error(transparent)]
    Core(#[from] downsizer_core::Error),

    /// Output has zero width or height.
    ///
    /// Downscalers return such buffers as valid results; this variant is
    /// produced by [`ensure_not_degenerate`](crate::ensure_not_degenerate)
    /// for callers that cannot use them.
    #[error("degenerate output {width}x{height}: scale too small for the source")]
    DegenerateOutput {
        /// Output width
        width: usize,
        /// Output height
        height: usize,
    },

    /// Row partition does not cover the destination exactly once.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// One or more workers failed; no output was produced.
    #[error("{} worker(s) failed: {}", .failures.len(), describe_faults(.failures))]
    WorkerFailure {
        /// Every fault, ordered by worker index.
        failures: Vec<WorkerFault>,
    },

    /// The cancellation flag was raised before the output was complete.
    #[error("downscale cancelled")]
    Cancelled,

    /// Worker pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(String),

    /// Sequential and parallel outputs differ.
    #[error("sequential and parallel outputs differ")]
    OutputMismatch,
}

impl OpsError {
    /// Returns `true` if the caller's input was rejected before any work ran.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Core(err) if err.is_input_error())
    }

    /// Worker faults, empty unless this is [`OpsError::WorkerFailure`].
    pub fn faults(&self) -> &[WorkerFault] {
        match self {
            Self::WorkerFailure { failures } => failures,
            _ => &[],
        }
    }
}

/// Result type for downscale operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Failure of a single worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFault {
    /// Worker index, in partition order.
    pub worker: usize,
    /// Destination rows assigned to the worker, when known.
    pub rows: Option<Range<usize>>,
    /// Error message or panic payload.
    pub reason: String,
}

impl WorkerFault {
    pub(crate) fn new(worker: usize, reason: impl Into<String>) -> Self {
        Self {
            worker,
            rows: None,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for WorkerFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.rows {
            Some(rows) => write!(
                f,
                "worker {} (rows {}..{}): {}",
                self.worker, rows.start, rows.end, self.reason
            ),
            None => write!(f, "worker {}: {}", self.worker, self.reason),
        }
    }
}

fn describe_faults(faults: &[WorkerFault]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_failure_message() {
        let mut fault = WorkerFault::new(2, "boom");
        fault.rows = Some(10..15);
        let err = OpsError::WorkerFailure {
            failures: vec![WorkerFault::new(0, "bad"), fault],
        };
        assert_eq!(
            err.to_string(),
            "2 worker(s) failed: worker 0: bad; worker 2 (rows 10..15): boom"
        );
        assert_eq!(err.faults().len(), 2);
    }

    #[test]
    fn test_input_error_classification() {
        let err: OpsError = downsizer_core::Error::invalid_scale(0.0, "must be greater than 0").into();
        assert!(err.is_input_error());
        assert!(!OpsError::Cancelled.is_input_error());
        assert!(OpsError::Cancelled.faults().is_empty());
    }
}
