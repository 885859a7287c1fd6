//! # downsizer-core
//!
//! Core types for nearest-neighbor image downscaling.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`PixelBuffer`] - Owned row-major pixel memory with explicit stride
//! - [`PixelLayout`] - Buffer geometry and the single offset formula
//! - [`RowBand`] - Disjoint mutable view over a range of rows
//! - [`PixelFormat`] - Channel layout handed over by the decoder
//! - [`ScaleFactor`] - Validated scale in `(0, 1]`
//!
//! ## Design Philosophy
//!
//! Raw byte offsets are computed in exactly one place ([`PixelLayout`]).
//! Every read and write goes through a bounds-checked accessor, and
//! concurrent writers receive [`RowBand`]s carved out of the destination by
//! slice splitting, so the borrow checker proves they never overlap:
//!
//! ```rust
//! use downsizer_core::{PixelBuffer, PixelFormat};
//!
//! let mut dst = PixelBuffer::new(8, 8, PixelFormat::Rgba8).unwrap();
//! let bands = dst.split_rows_mut(&[0..4, 4..8]).unwrap();
//! std::thread::scope(|s| {
//!     for mut band in bands {
//!         s.spawn(move || {
//!             for y in band.rows() {
//!                 band.write_pixel(0, y, &[1, 2, 3, 4]).unwrap();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(dst.read_pixel(0, 7).unwrap(), &[1, 2, 3, 4]);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! downsizer-core (this crate)
//!    ^
//!    +-- downsizer-ops (sequential/parallel downscalers, benchmark)
//!    +-- downsizer-cli (file I/O shell)
//!    +-- downsizer-bench (criterion benchmarks)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod format;
pub mod scale;

pub use buffer::{PixelBuffer, PixelLayout, RowBand};
pub use error::{Error, Result};
pub use format::{DataFormat, PixelFormat};
pub use scale::ScaleFactor;

/// Prelude module for convenient imports.
///
/// ```
/// use downsizer_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, PixelLayout, RowBand};
    pub use crate::error::{Error, Result};
    pub use crate::format::{DataFormat, PixelFormat};
    pub use crate::scale::ScaleFactor;
}
