//! downsizer - nearest-neighbor image downscaler
//!
//! Decodes an image, downscales it sequentially and in parallel, reports
//! both timings and the speedup, then encodes the result.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use downsizer_core::ScaleFactor;
use downsizer_ops::{DownscaleOptions, Executor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod io;

use io::OutputFormat;

#[derive(Parser)]
#[command(name = "downsizer")]
#[command(author, version, about = "Nearest-neighbor image downscaler")]
#[command(long_about = "
Downscales images with nearest-neighbor sampling and compares a sequential
run against a row-partitioned parallel run.

Examples:
  downsizer scale photo.jpg -p 50 -o half.png     # Time both paths, save
  downsizer scale photo.jpg -p 25 -o q.jpg -j 8   # Eight workers
  downsizer scale big.png -p 10 -o s.png --sequential
  downsizer info photo.jpg half.png               # Show dimensions/format
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of worker threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// How parallel workers are spawned
    #[arg(long, global = true, value_enum, default_value_t = ExecutorArg::Threads)]
    executor: ExecutorArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Downscale an image and report sequential vs parallel timings
    #[command(visible_alias = "s")]
    Scale(ScaleArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct ScaleArgs {
    /// Input image
    input: PathBuf,

    /// Downscale percentage, greater than 0 and up to 100
    #[arg(short, long, value_parser = commands::parse_percentage)]
    percent: ScaleFactor,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (default: from extension, PNG if unknown)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Only run the sequential path
    #[arg(long)]
    sequential: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExecutorArg {
    /// Scoped OS threads, one per worker
    Threads,
    /// Per-call rayon pool
    Rayon,
}

impl From<ExecutorArg> for Executor {
    fn from(arg: ExecutorArg) -> Self {
        match arg {
            ExecutorArg::Threads => Executor::Threads,
            ExecutorArg::Rayon => Executor::Rayon,
        }
    }
}

impl Cli {
    fn options(&self) -> DownscaleOptions {
        DownscaleOptions::default()
            .with_workers(self.threads)
            .with_executor(self.executor.into())
    }
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options();
    match cli.command {
        Commands::Scale(args) => commands::scale::run(args, &options),
        Commands::Info(args) => commands::info::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale() {
        let cli = Cli::try_parse_from([
            "downsizer", "scale", "in.jpg", "-p", "50", "-o", "out.png", "-j", "4",
        ])
        .unwrap();
        assert_eq!(cli.threads, 4);
        assert_eq!(cli.executor, ExecutorArg::Threads);
        let Commands::Scale(args) = cli.command else {
            panic!("expected scale");
        };
        assert_eq!(args.percent.get(), 0.5);
        assert_eq!(args.format, None);
        assert!(!args.sequential);
    }

    #[test]
    fn test_parse_rejects_bad_percentage() {
        for bad in ["0", "-5", "150", "abc"] {
            let parsed =
                Cli::try_parse_from(["downsizer", "scale", "in.jpg", "-p", bad, "-o", "o.png"]);
            assert!(parsed.is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_options_from_flags() {
        let cli = Cli::try_parse_from([
            "downsizer", "-vv", "--executor", "rayon", "info", "a.png",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let options = cli.options();
        assert_eq!(options.executor, Executor::Rayon);
        assert!(options.workers.is_none());
    }
}
