//! CLI command implementations

pub mod info;
pub mod scale;

use crate::io::{self, OutputFormat};
use anyhow::{Context, Result};
use downsizer_core::{PixelBuffer, ScaleFactor};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, buffer: &PixelBuffer, format: OutputFormat) -> Result<()> {
    io::write(path, buffer, format).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parses a `--percent` value into a scale factor.
pub fn parse_percentage(value: &str) -> Result<ScaleFactor, String> {
    const HINT: &str = "enter a valid downscaling factor (a number greater than 0 and up to 100)";
    let percent: f64 = value.trim().parse().map_err(|_| HINT.to_string())?;
    ScaleFactor::from_percentage(percent).map_err(|_| HINT.to_string())
}

/// Human-readable byte count in binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = None;
    for name in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = Some(name);
    }
    match unit {
        Some(name) => format!("{value:.2} {name}"),
        None => format!("{bytes} B"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("100").unwrap(), ScaleFactor::IDENTITY);
        assert_eq!(parse_percentage(" 25 ").unwrap().get(), 0.25);
        assert!(parse_percentage("0.5").is_ok());

        let err = parse_percentage("0").unwrap_err();
        assert!(err.contains("greater than 0 and up to 100"));
        assert!(parse_percentage("100.1").is_err());
        assert!(parse_percentage("NaN").is_err());
        assert!(parse_percentage("half").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
        assert_eq!(format_size(1536 * 1024 * 1024), "1.50 GB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 * 1024), "5120.00 GB");
    }
}
