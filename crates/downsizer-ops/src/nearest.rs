//! Nearest-neighbor sampling kernel shared by every downscaler.
//!
//! For a scale `s`, destination pixel `(x, y)` copies source pixel
//! `(floor(x / s), floor(y / s))` byte for byte. No blending, no color
//! conversion. The sequential and parallel paths both call
//! [`resample_band`]; they differ only in how the destination rows are
//! split up.

use downsizer_core::{PixelBuffer, RowBand, ScaleFactor};
use tracing::debug;

use crate::{CancelFlag, DownscaleOptions, OpsError, OpsResult};

/// Validates a downscale request.
///
/// Runs before any destination memory is allocated or any worker started.
///
/// # Errors
///
/// - `InvalidScale` if `scale` is not a finite number in `(0, 1]`
/// - `InvalidBuffer` if the source has zero width or height
pub fn validate_request(src: &PixelBuffer, scale: f64) -> OpsResult<ScaleFactor> {
    let scale = ScaleFactor::new(scale)?;
    if src.is_empty() {
        return Err(downsizer_core::Error::invalid_buffer(
            src.width(),
            src.height(),
            "width and height must be > 0",
        )
        .into());
    }
    Ok(scale)
}

/// Allocates the zeroed destination for `src` at `scale`.
pub(crate) fn allocate_destination(
    src: &PixelBuffer,
    scale: ScaleFactor,
    options: &DownscaleOptions,
) -> OpsResult<PixelBuffer> {
    let (width, height) = scale.output_size(src.width(), src.height());
    debug!(
        src_w = src.width(),
        src_h = src.height(),
        dst_w = width,
        dst_h = height,
        format = %src.format(),
        "allocating destination"
    );
    Ok(PixelBuffer::with_row_alignment(
        width,
        height,
        src.format(),
        options.row_alignment,
    )?)
}

/// Fills every row of `band` from `src`.
///
/// `band` must belong to a buffer of size `scale.output_size(src)`. The
/// cancellation flag is checked once per row.
///
/// # Errors
///
/// - `OutOfBounds` if a computed coordinate falls outside `src` or the band
/// - [`OpsError::Cancelled`] if `cancel` is raised
pub fn resample_band(
    src: &PixelBuffer,
    scale: ScaleFactor,
    band: &mut RowBand<'_>,
    cancel: Option<&CancelFlag>,
) -> OpsResult<()> {
    for y in band.rows() {
        if cancel.is_some_and(CancelFlag::is_cancelled) {
            return Err(OpsError::Cancelled);
        }
        let src_y = scale.source_coordinate(y, src.height());
        for x in 0..band.width() {
            let src_x = scale.source_coordinate(x, src.width());
            band.write_pixel(x, y, src.read_pixel(src_x, src_y)?)?;
        }
    }
    Ok(())
}

/// Rejects zero-area outputs.
///
/// Downscalers return a `0 x N` or `N x 0` buffer when the scale is too
/// small for the source. Callers that display or encode the result use this
/// to turn that case into an error.
///
/// ```rust
/// use downsizer_core::{PixelBuffer, PixelFormat};
/// use downsizer_ops::{downscale_sequential, ensure_not_degenerate, OpsError};
///
/// let src = PixelBuffer::new(10, 10, PixelFormat::Rgb8).unwrap();
/// let out = downscale_sequential(&src, 0.05).unwrap();
/// assert!(matches!(
///     ensure_not_degenerate(&out),
///     Err(OpsError::DegenerateOutput { width: 0, height: 0 })
/// ));
/// ```
pub fn ensure_not_degenerate(buffer: &PixelBuffer) -> OpsResult<()> {
    if buffer.is_empty() {
        return Err(OpsError::DegenerateOutput {
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use downsizer_core::PixelFormat;

    fn ramp(width: usize, height: usize) -> PixelBuffer {
        let data = (0..width * height).map(|v| v as u8).collect();
        PixelBuffer::from_packed(width, height, PixelFormat::Gray8, data).unwrap()
    }

    #[test]
    fn test_validate_request() {
        let src = ramp(4, 4);
        assert!(validate_request(&src, 0.5).is_ok());
        assert!(validate_request(&src, 0.0).unwrap_err().is_input_error());
        assert!(validate_request(&src, -1.0).unwrap_err().is_input_error());
        assert!(validate_request(&src, f64::NAN).unwrap_err().is_input_error());

        let empty = PixelBuffer::new(0, 4, PixelFormat::Gray8).unwrap();
        let err = validate_request(&empty, 0.5).unwrap_err();
        assert!(matches!(
            err,
            OpsError::Core(downsizer_core::Error::InvalidBuffer { .. })
        ));
    }

    #[test]
    fn test_band_subset() {
        let src = ramp(6, 6);
        let scale = ScaleFactor::new(0.5).unwrap();
        let mut dst = PixelBuffer::new(3, 3, PixelFormat::Gray8).unwrap();
        {
            let mut bands = dst.split_rows_mut(&[1..2]).unwrap();
            resample_band(&src, scale, &mut bands[0], None).unwrap();
        }
        assert_eq!(dst.row(0).unwrap(), &[0, 0, 0]);
        assert_eq!(dst.row(1).unwrap(), &[12, 14, 16]);
        assert_eq!(dst.row(2).unwrap(), &[0, 0, 0]);
    }

    #[test]
    fn test_mismatched_destination_fails() {
        let src = ramp(4, 4);
        let scale = ScaleFactor::new(0.5).unwrap();
        let mut too_wide = PixelBuffer::new(2, 2, PixelFormat::Rgb8).unwrap();
        let err = resample_band(&src, scale, &mut too_wide.band_mut(), None).unwrap_err();
        assert!(matches!(
            err,
            OpsError::Core(downsizer_core::Error::PixelSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_cancel_before_first_row() {
        let src = ramp(4, 4);
        let scale = ScaleFactor::new(1.0).unwrap();
        let mut dst = PixelBuffer::new(4, 4, PixelFormat::Gray8).unwrap();
        let cancel = CancelFlag::new();
        cancel.cancel();
        let err = resample_band(&src, scale, &mut dst.band_mut(), Some(&cancel)).unwrap_err();
        assert!(matches!(err, OpsError::Cancelled));
        assert!(dst.as_bytes().iter().all(|&b| b == 0));
    }
}
