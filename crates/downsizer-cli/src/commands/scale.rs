//! Scale command
//!
//! Downscales one image, prints the sequential/parallel timings and writes
//! the parallel output.

use crate::ScaleArgs;
use crate::io::OutputFormat;
use anyhow::{Context, Result};
use downsizer_ops::{
    DownscaleOptions, DownscaleResult, benchmark_with, downscale_sequential_with,
    ensure_not_degenerate,
};
use tracing::{debug, info};

pub fn run(args: ScaleArgs, options: &DownscaleOptions) -> Result<()> {
    let src = super::load_image(&args.input)?;
    let scale = args.percent;
    info!(
        "Loaded {} ({}x{} {})",
        args.input.display(),
        src.width(),
        src.height(),
        src.format()
    );

    let output = if args.sequential {
        let result =
            DownscaleResult::measure(|| downscale_sequential_with(&src, scale.get(), options))?;
        println!("Sequential Time: {} ms", result.elapsed_millis());
        result.buffer
    } else {
        let report = benchmark_with(&src, scale.get(), options)?;
        debug!("{} workers", report.workers);
        println!("{report}");
        report.into_buffer()
    };

    ensure_not_degenerate(&output).with_context(|| {
        format!(
            "{} of {}x{} leaves nothing to save",
            scale,
            src.width(),
            src.height()
        )
    })?;

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.output));
    super::save_image(&args.output, &output, format)?;
    println!(
        "Saved {}x{} to {}",
        output.width(),
        output.height(),
        args.output.display()
    );
    Ok(())
}
