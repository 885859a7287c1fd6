//! Normalized scale factors.
//!
//! A [`ScaleFactor`] is a finite real number in `(0, 1]`. It owns the two
//! truncating formulas shared by every downscaler:
//!
//! - output size: `floor(len * s)`
//! - source coordinate: `floor(d / s)`
//!
//! Keeping both in one place means the sequential and parallel paths cannot
//! drift apart (one rounding, the other truncating).
//!
//! # Usage
//!
//! ```rust
//! use downsizer_core::ScaleFactor;
//!
//! let s = ScaleFactor::from_percentage(50.0).unwrap();
//! assert_eq!(s.output_size(4, 4), (2, 2));
//! assert_eq!(s.source_coordinate(1, 4), 2);
//! ```

use crate::{Error, Result};

/// A validated scale factor in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Identity scale. Output dimensions equal input dimensions.
    pub const IDENTITY: ScaleFactor = ScaleFactor(1.0);

    /// Validates a normalized scale.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidScale`] if `value` is NaN, infinite, `<= 0` or `> 1`.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::invalid_scale(value, "must be a finite number"));
        }
        if value <= 0.0 {
            return Err(Error::invalid_scale(value, "must be greater than 0"));
        }
        if value > 1.0 {
            return Err(Error::invalid_scale(value, "must not exceed 1"));
        }
        Ok(Self(value))
    }

    /// Validates a percentage in `(0, 100]` and normalizes it.
    ///
    /// ```rust
    /// use downsizer_core::ScaleFactor;
    ///
    /// assert_eq!(ScaleFactor::from_percentage(25.0).unwrap().get(), 0.25);
    /// assert!(ScaleFactor::from_percentage(0.0).is_err());
    /// assert!(ScaleFactor::from_percentage(100.5).is_err());
    /// ```
    pub fn from_percentage(percent: f64) -> Result<Self> {
        if !percent.is_finite() || percent <= 0.0 || percent > 100.0 {
            return Err(Error::invalid_scale(
                percent,
                "percentage must be greater than 0 and up to 100",
            ));
        }
        Self::new(percent / 100.0)
    }

    /// Returns the raw factor.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Returns the factor as a percentage.
    #[inline]
    pub fn percentage(self) -> f64 {
        self.0 * 100.0
    }

    /// Scaled length of one axis: `floor(len * s)`.
    #[inline]
    pub fn scaled_len(self, len: usize) -> usize {
        (len as f64 * self.0).floor() as usize
    }

    /// Output dimensions for a `width x height` source.
    #[inline]
    pub fn output_size(self, width: usize, height: usize) -> (usize, usize) {
        (self.scaled_len(width), self.scaled_len(height))
    }

    /// Source coordinate sampled by destination coordinate `dst`:
    /// `floor(dst / s)`.
    ///
    /// The result is clamped to `src_len - 1`. With exact arithmetic
    /// `dst < floor(src_len * s)` already implies `dst / s < src_len`; the
    /// clamp only absorbs floating-point rounding on the last column or row.
    #[inline]
    pub fn source_coordinate(self, dst: usize, src_len: usize) -> usize {
        let src = (dst as f64 / self.0).floor() as usize;
        src.min(src_len.saturating_sub(1))
    }
}

impl TryFrom<f64> for ScaleFactor {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl std::fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_domain() {
        for bad in [0.0, -0.1, 1.0001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ScaleFactor::new(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidScale { .. }), "{bad} accepted");
        }
    }

    #[test]
    fn test_accepts_domain_edges() {
        assert_eq!(ScaleFactor::new(1.0).unwrap(), ScaleFactor::IDENTITY);
        assert!(ScaleFactor::new(f64::MIN_POSITIVE).is_ok());
    }

    #[test]
    fn test_percentage_boundary() {
        assert!(ScaleFactor::from_percentage(100.0).is_ok());
        assert!(ScaleFactor::from_percentage(0.001).is_ok());
        assert!(ScaleFactor::from_percentage(0.0).is_err());
        assert!(ScaleFactor::from_percentage(-5.0).is_err());
        assert!(ScaleFactor::from_percentage(101.0).is_err());
        assert!(ScaleFactor::from_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_output_size_truncates() {
        let s = ScaleFactor::new(0.3).unwrap();
        // 10 * 0.3 = 3.0000000000000004, 7 * 0.3 = 2.1
        assert_eq!(s.output_size(10, 7), (3, 2));

        let tiny = ScaleFactor::new(0.05).unwrap();
        assert_eq!(tiny.output_size(10, 10), (0, 0));
    }

    #[test]
    fn test_source_coordinate_truncates() {
        let s = ScaleFactor::new(0.5).unwrap();
        assert_eq!(s.source_coordinate(0, 4), 0);
        assert_eq!(s.source_coordinate(1, 4), 2);

        let s = ScaleFactor::new(0.75).unwrap();
        // 1 / 0.75 = 1.33, 2 / 0.75 = 2.67
        assert_eq!(s.source_coordinate(1, 8), 1);
        assert_eq!(s.source_coordinate(2, 8), 2);
    }

    #[test]
    fn test_source_coordinate_stays_in_range() {
        for len in 1..200usize {
            for pct in [1.0, 3.0, 33.0, 66.7, 99.9, 100.0] {
                let s = ScaleFactor::from_percentage(pct).unwrap();
                let out = s.scaled_len(len);
                for d in 0..out {
                    assert!(s.source_coordinate(d, len) < len);
                }
            }
        }
    }
}
