//! Behavioral laws of the sequential and parallel downscalers.

use std::num::NonZeroUsize;

use downsizer_core::{PixelBuffer, PixelFormat, ScaleFactor};
use downsizer_ops::{
    DownscaleOptions, Executor, RowPartition, benchmark_with, downscale_parallel,
    downscale_parallel_with, downscale_sequential, downscale_sequential_with,
    ensure_not_degenerate,
};

const SCALES: [f64; 8] = [1.0, 0.99, 0.75, 0.5, 0.37, 0.3, 0.1, 0.013];

/// Deterministic noise so every pixel is distinguishable.
fn noise_buffer(width: usize, height: usize, padding: usize, format: PixelFormat) -> PixelBuffer {
    let stride = width * format.bytes_per_pixel() + padding;
    let mut state = (width * 31 + height * 17 + padding) as u32 | 1;
    let data = (0..stride * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    PixelBuffer::from_raw(width, height, stride, format, data).unwrap()
}

fn executors() -> Vec<Executor> {
    vec![
        Executor::Threads,
        #[cfg(feature = "rayon")]
        Executor::Rayon,
    ]
}

#[test]
fn scenario_4x4_half() {
    let src = PixelBuffer::from_packed(4, 4, PixelFormat::Gray8, (1..=16).collect()).unwrap();
    let seq = downscale_sequential(&src, 0.5).unwrap();
    let par = downscale_parallel(&src, 0.5).unwrap();
    assert_eq!(seq.dimensions(), (2, 2));
    assert_eq!(seq.to_packed(), vec![1, 3, 9, 11]);
    assert_eq!(par.to_packed(), vec![1, 3, 9, 11]);
}

#[test]
fn dimension_law() {
    for (w, h) in [(1, 1), (7, 3), (10, 10), (33, 65), (128, 9)] {
        let src = noise_buffer(w, h, 0, PixelFormat::Gray8);
        for s in SCALES {
            let expected = ((w as f64 * s).floor() as usize, (h as f64 * s).floor() as usize);
            assert_eq!(downscale_sequential(&src, s).unwrap().dimensions(), expected);
            assert_eq!(downscale_parallel(&src, s).unwrap().dimensions(), expected);
        }
    }
}

#[test]
fn sampling_law() {
    let src = noise_buffer(29, 23, 5, PixelFormat::Rgb8);
    for s in SCALES {
        let dst = downscale_parallel(&src, s).unwrap();
        for y in 0..dst.height() {
            for x in 0..dst.width() {
                let sx = (x as f64 / s).floor() as usize;
                let sy = (y as f64 / s).floor() as usize;
                assert_eq!(
                    dst.read_pixel(x, y).unwrap(),
                    src.read_pixel(sx, sy).unwrap(),
                    "scale {s} at ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn equivalence_law_across_workers_and_executors() {
    let formats = [PixelFormat::Gray8, PixelFormat::Rgb8, PixelFormat::Rgba16, PixelFormat::Rgba32F];
    for format in formats {
        for (w, h, padding) in [(17, 31, 0), (64, 50, 3), (5, 101, 7)] {
            let src = noise_buffer(w, h, padding, format);
            for s in SCALES {
                let seq = downscale_sequential(&src, s).unwrap();
                for executor in executors() {
                    for workers in [1, 2, 3, 7, 16] {
                        let options = DownscaleOptions::default()
                            .with_workers(workers)
                            .with_executor(executor);
                        let par = downscale_parallel_with(&src, s, &options).unwrap();
                        assert_eq!(
                            par.as_bytes(),
                            seq.as_bytes(),
                            "{format} {w}x{h}+{padding} scale {s} workers {workers} {executor}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn equivalence_with_aligned_destination() {
    let src = noise_buffer(45, 38, 2, PixelFormat::Rgb8);
    let options = DownscaleOptions::default()
        .with_workers(5)
        .with_row_alignment(NonZeroUsize::new(8).unwrap());
    let seq = downscale_sequential_with(&src, 0.6, &options).unwrap();
    let par = downscale_parallel_with(&src, 0.6, &options).unwrap();
    assert_eq!(seq.stride() % 8, 0);
    assert_eq!(seq.as_bytes(), par.as_bytes());
}

#[test]
fn identity_scale() {
    let src = noise_buffer(13, 11, 3, PixelFormat::Rgba8);
    let seq = downscale_sequential(&src, 1.0).unwrap();
    let par = downscale_parallel(&src, 1.0).unwrap();
    assert_eq!(seq, src);
    assert_eq!(par, src);
    assert_eq!(par.to_packed(), src.to_packed());
}

#[test]
fn degenerate_scale() {
    let src = noise_buffer(10, 10, 0, PixelFormat::Rgb8);
    for dst in [
        downscale_sequential(&src, 0.05).unwrap(),
        downscale_parallel(&src, 0.05).unwrap(),
    ] {
        assert_eq!(dst.dimensions(), (0, 0));
        assert!(dst.width() == 0 || dst.height() == 0);
        assert!(ensure_not_degenerate(&dst).is_err());
    }

    // One axis collapses, the other does not.
    let tall = noise_buffer(1, 40, 0, PixelFormat::Gray8);
    let par = downscale_parallel(&tall, 0.5).unwrap();
    assert_eq!(par.dimensions(), (0, 20));
    assert_eq!(par, downscale_sequential(&tall, 0.5).unwrap());
}

#[test]
fn partition_coverage_law() {
    for height in [1, 2, 7, 64, 99, 1000] {
        for workers in 1..=33 {
            let p = RowPartition::new(height, workers);
            p.validate().unwrap();
            assert_eq!(p.ranges().first().map(|r| r.start), Some(0));
            assert_eq!(p.ranges().last().map(|r| r.end), Some(height));
            for pair in p.ranges().windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            assert_eq!(p.ranges().iter().map(|r| r.len()).sum::<usize>(), height);
        }
    }
}

#[test]
fn input_errors() {
    let src = noise_buffer(8, 8, 0, PixelFormat::Gray8);
    for bad in [0.0, -0.5, f64::NAN, f64::INFINITY, 1.01] {
        assert!(downscale_sequential(&src, bad).unwrap_err().is_input_error());
        assert!(downscale_parallel(&src, bad).unwrap_err().is_input_error());
    }
    let empty = PixelBuffer::new(8, 0, PixelFormat::Gray8).unwrap();
    assert!(downscale_parallel(&empty, 0.5).unwrap_err().is_input_error());
}

#[test]
fn percentage_boundary_feeds_core() {
    let src = noise_buffer(200, 100, 0, PixelFormat::Gray8);
    let scale = ScaleFactor::from_percentage(25.0).unwrap();
    let dst = downscale_parallel(&src, scale.get()).unwrap();
    assert_eq!(dst.dimensions(), (50, 25));
    assert!(ScaleFactor::from_percentage(0.0).is_err());
    assert!(ScaleFactor::from_percentage(100.01).is_err());
}

#[test]
fn benchmark_on_large_input() {
    let src = noise_buffer(640, 480, 0, PixelFormat::Rgba8);
    for executor in executors() {
        let options = DownscaleOptions::default().with_executor(executor);
        let report = benchmark_with(&src, 0.5, &options).unwrap();
        assert_eq!(report.parallel.buffer.dimensions(), (320, 240));
        assert!(report.workers >= 1);
        assert!(report.to_string().starts_with("Sequential Time: "));
    }
}
