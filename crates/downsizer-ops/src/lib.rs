//! # downsizer-ops
//!
//! Nearest-neighbor downscaling, single-threaded and parallel.
//!
//! # Modules
//!
//! - [`sequential`] - Reference downscaler, runs on the calling thread
//! - [`parallel`] - Row-partitioned downscaler over disjoint bands
//! - [`partition`] - Row partition policy and its coverage check
//! - [`fork_join`](mod@fork_join) - One worker per task, join, aggregate failures
//! - [`benchmark`](mod@benchmark) - Times both paths and computes the speedup
//! - [`nearest`] - The sampling kernel both paths share
//!
//! # Example
//!
//! ```rust
//! use downsizer_core::{PixelBuffer, PixelFormat};
//! use downsizer_ops::{benchmark, downscale_parallel, downscale_sequential};
//!
//! // 4x4 single-byte image with values 1..=16
//! let src = PixelBuffer::from_packed(4, 4, PixelFormat::Gray8, (1..=16).collect()).unwrap();
//!
//! let seq = downscale_sequential(&src, 0.5).unwrap();
//! let par = downscale_parallel(&src, 0.5).unwrap();
//! assert_eq!(seq.to_packed(), vec![1, 3, 9, 11]);
//! assert_eq!(seq, par);
//!
//! let report = benchmark(&src, 0.5).unwrap();
//! println!("{report}");
//! ```
//!
//! # Failure Model
//!
//! Input errors (`InvalidScale`, `InvalidBuffer`) are returned before any
//! worker starts. Worker errors and panics are collected after the join and
//! surfaced together as [`OpsError::WorkerFailure`]; a failed call never
//! returns a partially written buffer.
//!
//! # Feature Flags
//!
//! - `rayon` (default) - Adds [`Executor::Rayon`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod options;

pub mod benchmark;
pub mod fork_join;
pub mod nearest;
pub mod parallel;
pub mod partition;
pub mod sequential;

pub use benchmark::{BenchmarkReport, DownscaleResult, Speedup, benchmark, benchmark_with};
pub use error::{OpsError, OpsResult, WorkerFault};
pub use fork_join::fork_join;
pub use nearest::{ensure_not_degenerate, resample_band, validate_request};
pub use options::{CancelFlag, DownscaleOptions, Executor};
pub use parallel::{downscale_parallel, downscale_parallel_with, downscale_partitioned};
pub use partition::RowPartition;
pub use sequential::{downscale_sequential, downscale_sequential_with};
