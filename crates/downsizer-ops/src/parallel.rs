//! Parallel downscaling over disjoint row bands.
//!
//! The destination rows are partitioned across workers
//! ([`RowPartition`]), the destination buffer is split into one
//! [`RowBand`](downsizer_core::RowBand) per range, and each worker resamples
//! its band from the shared read-only source. Workers never touch each
//! other's bytes, so no locking is involved. The call returns only after
//! every worker has finished.
//!
//! # Example
//!
//! ```rust
//! use downsizer_core::{PixelBuffer, PixelFormat};
//! use downsizer_ops::{downscale_parallel, downscale_sequential};
//!
//! let data = (0..64 * 48 * 3).map(|v| (v % 251) as u8).collect();
//! let src = PixelBuffer::from_packed(64, 48, PixelFormat::Rgb8, data).unwrap();
//!
//! let par = downscale_parallel(&src, 0.37).unwrap();
//! let seq = downscale_sequential(&src, 0.37).unwrap();
//! assert_eq!(par, seq);
//! ```

use downsizer_core::{PixelBuffer, ScaleFactor};
use tracing::{debug, trace};

use crate::nearest::{allocate_destination, resample_band, validate_request};
use crate::{DownscaleOptions, OpsError, OpsResult, RowPartition, fork_join};

/// Downscales `src` by `scale` using one worker per available CPU.
///
/// Produces output identical to
/// [`downscale_sequential`](crate::downscale_sequential).
///
/// # Errors
///
/// - `InvalidScale` / `InvalidBuffer` before any worker starts
/// - [`OpsError::WorkerFailure`] if any worker failed
pub fn downscale_parallel(src: &PixelBuffer, scale: f64) -> OpsResult<PixelBuffer> {
    downscale_parallel_with(src, scale, &DownscaleOptions::default())
}

/// Same as [`downscale_parallel`] with explicit options.
pub fn downscale_parallel_with(
    src: &PixelBuffer,
    scale: f64,
    options: &DownscaleOptions,
) -> OpsResult<PixelBuffer> {
    downscale_parallel_counted(src, scale, options).map(|(dst, _)| dst)
}

/// Parallel downscale that also returns the number of workers it ran.
pub(crate) fn downscale_parallel_counted(
    src: &PixelBuffer,
    scale: f64,
    options: &DownscaleOptions,
) -> OpsResult<(PixelBuffer, usize)> {
    let factor = validate_request(src, scale)?;
    let (_, dst_h) = factor.output_size(src.width(), src.height());
    let partition = RowPartition::new(dst_h, options.resolve_workers());
    let dst = run_partitioned(src, factor, &partition, options)?;
    Ok((dst, partition.worker_count()))
}

/// Downscales with a caller-supplied row partition.
///
/// The partition is validated against the destination height before any
/// worker is dispatched.
///
/// # Errors
///
/// [`OpsError::InvalidPartition`] if `partition` does not cover the
/// destination rows exactly once, plus everything
/// [`downscale_parallel`] can return.
pub fn downscale_partitioned(
    src: &PixelBuffer,
    scale: f64,
    partition: &RowPartition,
    options: &DownscaleOptions,
) -> OpsResult<PixelBuffer> {
    let factor = validate_request(src, scale)?;
    run_partitioned(src, factor, partition, options)
}

fn run_partitioned(
    src: &PixelBuffer,
    factor: ScaleFactor,
    partition: &RowPartition,
    options: &DownscaleOptions,
) -> OpsResult<PixelBuffer> {
    let mut dst = allocate_destination(src, factor, options)?;
    if partition.height() != dst.height() {
        return Err(OpsError::InvalidPartition(format!(
            "partition covers {} rows, destination has {}",
            partition.height(),
            dst.height()
        )));
    }
    partition.validate()?;
    debug!(
        workers = partition.worker_count(),
        executor = %options.executor,
        rows = dst.height(),
        "parallel downscale"
    );
    if partition.is_empty() {
        return Ok(dst);
    }
    if options.is_cancelled() {
        return Err(OpsError::Cancelled);
    }

    let cancel = options.cancel.as_ref();
    let bands = dst.split_rows_mut(partition.ranges())?;
    fork_join(options.executor, bands, |worker, mut band| {
        trace!(worker, rows = ?band.rows(), "resampling band");
        resample_band(src, factor, &mut band, cancel)
    })
    .map_err(|err| attach_rows(err, partition))?;

    Ok(dst)
}

fn attach_rows(err: OpsError, partition: &RowPartition) -> OpsError {
    match err {
        OpsError::WorkerFailure { mut failures } => {
            for fault in &mut failures {
                fault.rows = partition.rows_of(fault.worker);
            }
            OpsError::WorkerFailure { failures }
        }
        other => other,
    }
}
