//! Per-request configuration.
//!
//! [`DownscaleOptions`] carries everything a single downscale call can be
//! tuned with. Nothing here outlives the call; two requests never share
//! state except a [`CancelFlag`] the caller chose to reuse.
//!
//! ```rust
//! use downsizer_ops::{CancelFlag, DownscaleOptions, Executor};
//!
//! let cancel = CancelFlag::new();
//! let options = DownscaleOptions::default()
//!     .with_workers(4)
//!     .with_executor(Executor::Threads)
//!     .with_cancel(cancel.clone());
//! assert_eq!(options.resolve_workers(), 4);
//! ```

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// How partition workers are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Executor {
    /// One scoped OS thread per partition, spawned for this call.
    #[default]
    Threads,
    /// A rayon pool built for this call with one thread per partition.
    #[cfg(feature = "rayon")]
    Rayon,
}

impl Executor {
    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Threads => "threads",
            #[cfg(feature = "rayon")]
            Self::Rayon => "rayon",
        }
    }
}

impl std::fmt::Display for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared cancellation flag.
///
/// Clones observe the same flag. Downscalers check it before every
/// destination row and stop with [`OpsError::Cancelled`](crate::OpsError::Cancelled).
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag that is not raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called on any clone.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Configuration of one downscale request.
#[derive(Debug, Clone)]
pub struct DownscaleOptions {
    /// Worker count. `None` uses the available hardware parallelism.
    pub workers: Option<NonZeroUsize>,
    /// How workers are run.
    pub executor: Executor,
    /// Destination stride is rounded up to a multiple of this many bytes.
    pub row_alignment: NonZeroUsize,
    /// Checked before every destination row.
    pub cancel: Option<CancelFlag>,
}

impl Default for DownscaleOptions {
    fn default() -> Self {
        Self {
            workers: None,
            executor: Executor::default(),
            row_alignment: NonZeroUsize::MIN,
            cancel: None,
        }
    }
}

impl DownscaleOptions {
    /// Sets the worker count; `0` restores automatic detection.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers);
        self
    }

    /// Sets the executor.
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Sets the destination row alignment in bytes.
    pub fn with_row_alignment(mut self, align: NonZeroUsize) -> Self {
        self.row_alignment = align;
        self
    }

    /// Attaches a cancellation flag.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Worker count before capping at the destination height.
    pub fn resolve_workers(&self) -> usize {
        self.workers
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }

    /// Returns `true` if a cancellation flag is attached and raised.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}
