//! Sequential vs. parallel timing comparison.
//!
//! [`benchmark`] runs both downscalers on the same source and scale, times
//! each with a monotonic clock and reports the speedup. The parallel output
//! is the one handed back; the sequential output only serves as a timing
//! baseline and an equivalence check.
//!
//! # Example
//!
//! ```rust
//! use downsizer_core::{PixelBuffer, PixelFormat};
//! use downsizer_ops::benchmark;
//!
//! let src = PixelBuffer::new(256, 256, PixelFormat::Rgba8).unwrap();
//! let report = benchmark(&src, 0.5).unwrap();
//! assert_eq!(report.parallel.buffer.dimensions(), (128, 128));
//! println!("{report}");
//! ```

use std::time::{Duration, Instant};

use downsizer_core::PixelBuffer;
use tracing::{error, info};

use crate::parallel::downscale_parallel_counted;
use crate::{DownscaleOptions, OpsError, OpsResult, downscale_sequential_with};

/// A downscaled buffer and the wall time it took.
#[derive(Debug, Clone)]
pub struct DownscaleResult {
    /// Output buffer.
    pub buffer: PixelBuffer,
    /// Wall time of the downscale call.
    pub elapsed: Duration,
}

impl DownscaleResult {
    /// Runs `f` and records how long it took.
    pub fn measure(f: impl FnOnce() -> OpsResult<PixelBuffer>) -> OpsResult<Self> {
        let start = Instant::now();
        let buffer = f()?;
        Ok(Self {
            buffer,
            elapsed: start.elapsed(),
        })
    }

    /// Elapsed time in whole milliseconds.
    #[inline]
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Ratio of sequential to parallel wall time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speedup {
    /// `sequential_ms / parallel_ms`.
    Ratio(f64),
    /// Parallel time rounded down to 0 ms; no meaningful ratio exists.
    Undefined,
}

impl Speedup {
    /// Divides the whole-millisecond times the report prints, or returns
    /// [`Speedup::Undefined`] when the parallel time is under 1 ms.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use downsizer_ops::Speedup;
    ///
    /// let s = Speedup::measure(Duration::from_millis(30), Duration::from_millis(10));
    /// assert_eq!(s.to_string(), "3.00x");
    /// assert_eq!(Speedup::measure(Duration::from_millis(5), Duration::ZERO), Speedup::Undefined);
    /// assert_eq!(Speedup::measure(Duration::from_millis(5), Duration::from_micros(900)), Speedup::Undefined);
    /// ```
    pub fn measure(sequential: Duration, parallel: Duration) -> Self {
        let parallel_ms = parallel.as_millis();
        if parallel_ms == 0 {
            return Self::Undefined;
        }
        Self::Ratio(sequential.as_millis() as f64 / parallel_ms as f64)
    }

    /// The ratio, if defined.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Self::Ratio(r) => Some(*r),
            Self::Undefined => None,
        }
    }
}

impl std::fmt::Display for Speedup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ratio(r) => write!(f, "{r:.2}x"),
            Self::Undefined => f.write_str("N/A"),
        }
    }
}

/// Outcome of one [`benchmark`] run.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Parallel output and its wall time.
    pub parallel: DownscaleResult,
    /// Wall time of the sequential run.
    pub sequential_elapsed: Duration,
    /// Sequential over parallel time, in whole milliseconds.
    pub speedup: Speedup,
    /// Number of workers the parallel run used.
    pub workers: usize,
}

impl BenchmarkReport {
    /// Sequential wall time in whole milliseconds.
    pub fn sequential_millis(&self) -> u128 {
        self.sequential_elapsed.as_millis()
    }

    /// Parallel wall time in whole milliseconds.
    pub fn parallel_millis(&self) -> u128 {
        self.parallel.elapsed_millis()
    }

    /// Consumes the report and returns the parallel output.
    pub fn into_buffer(self) -> PixelBuffer {
        self.parallel.buffer
    }
}

impl std::fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sequential Time: {} ms", self.sequential_millis())?;
        writeln!(f, "Parallel Time: {} ms", self.parallel_millis())?;
        write!(f, "Speedup: {}", self.speedup)
    }
}

/// Times the sequential and parallel downscalers on the same input.
///
/// # Errors
///
/// Anything either downscaler returns, or [`OpsError::OutputMismatch`] if
/// their outputs differ.
pub fn benchmark(src: &PixelBuffer, scale: f64) -> OpsResult<BenchmarkReport> {
    benchmark_with(src, scale, &DownscaleOptions::default())
}

/// Same as [`benchmark`] with explicit options for both runs.
pub fn benchmark_with(
    src: &PixelBuffer,
    scale: f64,
    options: &DownscaleOptions,
) -> OpsResult<BenchmarkReport> {
    // `src` stays borrowed immutably across both runs, so both see the same
    // pixels.
    let sequential = DownscaleResult::measure(|| downscale_sequential_with(src, scale, options))?;
    let mut workers = 0;
    let parallel = DownscaleResult::measure(|| {
        let (buffer, used) = downscale_parallel_counted(src, scale, options)?;
        workers = used;
        Ok(buffer)
    })?;

    if sequential.buffer != parallel.buffer {
        error!(
            seq = ?sequential.buffer,
            par = ?parallel.buffer,
            "sequential and parallel outputs differ"
        );
        return Err(OpsError::OutputMismatch);
    }

    let speedup = Speedup::measure(sequential.elapsed, parallel.elapsed);
    info!(
        sequential_ms = sequential.elapsed_millis(),
        parallel_ms = parallel.elapsed_millis(),
        %speedup,
        workers,
        "benchmark complete"
    );

    Ok(BenchmarkReport {
        parallel,
        sequential_elapsed: sequential.elapsed,
        speedup,
        workers,
    })
}
