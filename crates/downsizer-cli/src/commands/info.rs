//! Image info command.

use crate::InfoArgs;
use anyhow::{Context, Result};
use std::fs;

pub fn run(args: InfoArgs) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let image = super::load_image(path)?;

        println!("{}", path.display());
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Format:     {}", image.format());
        println!("  Channels:   {}", image.format().channels());
        println!("  Pixels:     {}", image.width() as u64 * image.height() as u64);
        println!("  Stride:     {} bytes", image.stride());
        println!("  Decoded:    {}", super::format_size(image.as_bytes().len() as u64));
        println!("  File size:  {}", super::format_size(file_size));

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::save_image;
    use crate::io::OutputFormat;
    use downsizer_core::{PixelBuffer, PixelFormat};

    #[test]
    fn test_info_reads_every_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.bmp");
        let image = PixelBuffer::new(5, 3, PixelFormat::Rgb8).unwrap();
        save_image(&a, &image, OutputFormat::Png).unwrap();
        save_image(&b, &image, OutputFormat::Bmp).unwrap();

        run(InfoArgs { input: vec![a, b.clone()] }).unwrap();

        let missing = dir.path().join("missing.png");
        let err = run(InfoArgs { input: vec![b, missing.clone()] }).unwrap_err();
        assert!(err.to_string().contains(&missing.display().to_string()));
    }
}
