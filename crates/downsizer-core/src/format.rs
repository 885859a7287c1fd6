//! Pixel formats handed over by image decoders.
//!
//! The downscaling engine never looks inside a pixel. It only needs to know
//! how many bytes one pixel occupies so it can copy them verbatim. The
//! format therefore travels unchanged from the decoded input to the output.
//!
//! # Types
//!
//! - [`DataFormat`] - Storage type of one channel (U8, U16, F32)
//! - [`PixelFormat`] - Channel layout plus storage type
//!
//! # Usage
//!
//! ```rust
//! use downsizer_core::{DataFormat, PixelFormat};
//!
//! let fmt = PixelFormat::Rgba16;
//! assert_eq!(fmt.channels(), 4);
//! assert_eq!(fmt.data_format(), DataFormat::U16);
//! assert_eq!(fmt.bytes_per_pixel(), 8);
//! ```

/// Storage type of a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// 8-bit unsigned integer.
    #[default]
    U8,
    /// 16-bit unsigned integer (native endian).
    U16,
    /// 32-bit single-precision float (native endian).
    F32,
}

impl DataFormat {
    /// Number of bytes per channel.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::F32 => 4,
        }
    }

    /// Whether this is a floating-point format.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32)
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::F32 => "f32",
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Interleaved channel layout of a pixel.
///
/// Channels are stored in the order the variant name spells them
/// (`Rgba8` is `[R, G, B, A]`, one byte each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Single 8-bit luma channel.
    Gray8,
    /// 8-bit luma with alpha.
    GrayAlpha8,
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGBA.
    #[default]
    Rgba8,
    /// Single 16-bit luma channel.
    Gray16,
    /// 16-bit luma with alpha.
    GrayAlpha16,
    /// 16-bit RGB.
    Rgb16,
    /// 16-bit RGBA.
    Rgba16,
    /// 32-bit float RGB.
    Rgb32F,
    /// 32-bit float RGBA.
    Rgba32F,
}

impl PixelFormat {
    /// All supported formats.
    pub const ALL: [PixelFormat; 10] = [
        Self::Gray8,
        Self::GrayAlpha8,
        Self::Rgb8,
        Self::Rgba8,
        Self::Gray16,
        Self::GrayAlpha16,
        Self::Rgb16,
        Self::Rgba16,
        Self::Rgb32F,
        Self::Rgba32F,
    ];

    /// Number of interleaved channels.
    #[inline]
    pub const fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::GrayAlpha8 | Self::GrayAlpha16 => 2,
            Self::Rgb8 | Self::Rgb16 | Self::Rgb32F => 3,
            Self::Rgba8 | Self::Rgba16 | Self::Rgba32F => 4,
        }
    }

    /// Storage type of each channel.
    #[inline]
    pub const fn data_format(&self) -> DataFormat {
        match self {
            Self::Gray8 | Self::GrayAlpha8 | Self::Rgb8 | Self::Rgba8 => DataFormat::U8,
            Self::Gray16 | Self::GrayAlpha16 | Self::Rgb16 | Self::Rgba16 => DataFormat::U16,
            Self::Rgb32F | Self::Rgba32F => DataFormat::F32,
        }
    }

    /// Size of one pixel in bytes.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.data_format().bytes_per_channel()
    }

    /// Whether the last channel is alpha.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(self.channels(), 2 | 4)
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gray8 => "gray8",
            Self::GrayAlpha8 => "gray-alpha8",
            Self::Rgb8 => "rgb8",
            Self::Rgba8 => "rgba8",
            Self::Gray16 => "gray16",
            Self::GrayAlpha16 => "gray-alpha16",
            Self::Rgb16 => "rgb16",
            Self::Rgba16 => "rgba16",
            Self::Rgb32F => "rgb32f",
            Self::Rgba32F => "rgba32f",
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
