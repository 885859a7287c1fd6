//! Single-threaded reference downscaler.
//!
//! Walks the destination in row-major order on the calling thread. This is
//! the correctness baseline for the parallel path and the timing baseline
//! for [`benchmark`](crate::benchmark).
//!
//! # Example
//!
//! ```rust
//! use downsizer_core::{PixelBuffer, PixelFormat};
//! use downsizer_ops::downscale_sequential;
//!
//! let src = PixelBuffer::from_packed(4, 4, PixelFormat::Gray8, (1..=16).collect()).unwrap();
//! let dst = downscale_sequential(&src, 0.5).unwrap();
//! assert_eq!(dst.to_packed(), vec![1, 3, 9, 11]);
//! ```

use downsizer_core::PixelBuffer;
use tracing::debug;

use crate::nearest::{allocate_destination, resample_band, validate_request};
use crate::{DownscaleOptions, OpsResult};

/// Downscales `src` by `scale` on the calling thread.
///
/// # Errors
///
/// - `InvalidScale` if `scale` is not a finite number in `(0, 1]`
/// - `InvalidBuffer` if `src` has zero width or height
///
/// A zero-area output is returned as `Ok`; see
/// [`ensure_not_degenerate`](crate::ensure_not_degenerate).
pub fn downscale_sequential(src: &PixelBuffer, scale: f64) -> OpsResult<PixelBuffer> {
    downscale_sequential_with(src, scale, &DownscaleOptions::default())
}

/// Same as [`downscale_sequential`] with explicit options.
///
/// Only `row_alignment` and `cancel` apply; worker settings are ignored.
pub fn downscale_sequential_with(
    src: &PixelBuffer,
    scale: f64,
    options: &DownscaleOptions,
) -> OpsResult<PixelBuffer> {
    let scale = validate_request(src, scale)?;
    let mut dst = allocate_destination(src, scale, options)?;
    debug!(scale = scale.get(), "sequential downscale");
    resample_band(src, scale, &mut dst.band_mut(), options.cancel.as_ref())?;
    Ok(dst)
}
