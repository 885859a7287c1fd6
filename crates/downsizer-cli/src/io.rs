//! Conversion between decoded images and pixel buffers.
//!
//! Decoding keeps the decoder's channel layout: an 8-bit RGB file becomes a
//! [`PixelFormat::Rgb8`] buffer, a 16-bit RGBA PNG becomes
//! [`PixelFormat::Rgba16`], and so on. Encoding converts only when the
//! target container cannot hold the layout (JPEG has no alpha, GIF is
//! always RGBA8, ...).

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use downsizer_core::{DataFormat, PixelBuffer, PixelFormat};
use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, LumaA, Pixel, Rgb, Rgba};

/// Container format of a saved image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG (alpha is dropped)
    Jpeg,
    /// Windows bitmap
    Bmp,
    /// GIF (8-bit RGBA)
    Gif,
}

impl OutputFormat {
    /// Picks the format from the file extension, PNG if unknown.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("bmp") => Self::Bmp,
            Some("gif") => Self::Gif,
            _ => Self::Png,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
            Self::Gif => ImageFormat::Gif,
        }
    }
}

/// Decodes the image at `path` into a pixel buffer.
pub fn read(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path)?;
    to_pixel_buffer(image)
}

/// Encodes `buffer` to `path` in `format`.
pub fn write(path: &Path, buffer: &PixelBuffer, format: OutputFormat) -> Result<()> {
    let image = encodable(to_dynamic_image(buffer)?, format);
    image.save_with_format(path, format.image_format())?;
    Ok(())
}

/// Wraps decoded pixels without converting them.
pub fn to_pixel_buffer(image: DynamicImage) -> Result<PixelBuffer> {
    let format = match &image {
        DynamicImage::ImageLuma8(_) => PixelFormat::Gray8,
        DynamicImage::ImageLumaA8(_) => PixelFormat::GrayAlpha8,
        DynamicImage::ImageRgb8(_) => PixelFormat::Rgb8,
        DynamicImage::ImageRgba8(_) => PixelFormat::Rgba8,
        DynamicImage::ImageLuma16(_) => PixelFormat::Gray16,
        DynamicImage::ImageLumaA16(_) => PixelFormat::GrayAlpha16,
        DynamicImage::ImageRgb16(_) => PixelFormat::Rgb16,
        DynamicImage::ImageRgba16(_) => PixelFormat::Rgba16,
        DynamicImage::ImageRgb32F(_) => PixelFormat::Rgb32F,
        DynamicImage::ImageRgba32F(_) => PixelFormat::Rgba32F,
        _ => return to_pixel_buffer(DynamicImage::ImageRgba8(image.to_rgba8())),
    };
    let width = image.width() as usize;
    let height = image.height() as usize;
    Ok(PixelBuffer::from_packed(
        width,
        height,
        format,
        image.as_bytes().to_vec(),
    )?)
}

/// Builds a decoded-image value from a buffer, dropping row padding.
pub fn to_dynamic_image(buffer: &PixelBuffer) -> Result<DynamicImage> {
    let width = u32::try_from(buffer.width()).context("width exceeds u32")?;
    let height = u32::try_from(buffer.height()).context("height exceeds u32")?;
    let bytes = buffer.to_packed();

    let image = match buffer.format() {
        PixelFormat::Gray8 => DynamicImage::ImageLuma8(raw::<Luma<u8>>(width, height, bytes)?),
        PixelFormat::GrayAlpha8 => {
            DynamicImage::ImageLumaA8(raw::<LumaA<u8>>(width, height, bytes)?)
        }
        PixelFormat::Rgb8 => DynamicImage::ImageRgb8(raw::<Rgb<u8>>(width, height, bytes)?),
        PixelFormat::Rgba8 => DynamicImage::ImageRgba8(raw::<Rgba<u8>>(width, height, bytes)?),
        PixelFormat::Gray16 => {
            DynamicImage::ImageLuma16(raw::<Luma<u16>>(width, height, u16s(&bytes))?)
        }
        PixelFormat::GrayAlpha16 => {
            DynamicImage::ImageLumaA16(raw::<LumaA<u16>>(width, height, u16s(&bytes))?)
        }
        PixelFormat::Rgb16 => {
            DynamicImage::ImageRgb16(raw::<Rgb<u16>>(width, height, u16s(&bytes))?)
        }
        PixelFormat::Rgba16 => {
            DynamicImage::ImageRgba16(raw::<Rgba<u16>>(width, height, u16s(&bytes))?)
        }
        PixelFormat::Rgb32F => {
            DynamicImage::ImageRgb32F(raw::<Rgb<f32>>(width, height, f32s(&bytes))?)
        }
        PixelFormat::Rgba32F => {
            DynamicImage::ImageRgba32F(raw::<Rgba<f32>>(width, height, f32s(&bytes))?)
        }
    };
    Ok(image)
}

/// Converts `image` into a layout `format` can store.
fn encodable(image: DynamicImage, format: OutputFormat) -> DynamicImage {
    let color = image.color();
    let alpha = color.has_alpha();
    let float = matches!(
        image,
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_)
    );
    let eight_bit = color.bytes_per_pixel() == color.channel_count();
    match format {
        OutputFormat::Png if float && alpha => image.to_rgba16().into(),
        OutputFormat::Png if float => image.to_rgb16().into(),
        OutputFormat::Png => image,
        OutputFormat::Jpeg if matches!(image, DynamicImage::ImageLuma8(_)) => image,
        OutputFormat::Jpeg => image.to_rgb8().into(),
        OutputFormat::Bmp if eight_bit => image,
        OutputFormat::Bmp if alpha => image.to_rgba8().into(),
        OutputFormat::Bmp => image.to_rgb8().into(),
        OutputFormat::Gif => image.to_rgba8().into(),
    }
}

fn raw<P: Pixel>(
    width: u32,
    height: u32,
    data: Vec<P::Subpixel>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>> {
    match ImageBuffer::from_raw(width, height, data) {
        Some(buffer) => Ok(buffer),
        None => bail!("pixel data does not fit {width}x{height}"),
    }
}

fn u16s(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(DataFormat::U16.bytes_per_channel())
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

fn f32s(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(DataFormat::F32.bytes_per_channel())
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
