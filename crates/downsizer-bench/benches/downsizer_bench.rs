//! Benchmarks for sequential and parallel downscaling.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use downsizer_core::{PixelBuffer, PixelFormat};
use downsizer_ops::{
    DownscaleOptions, Executor, RowPartition, downscale_parallel_with, downscale_sequential,
};

/// Deterministic noise so the copy loop can't be folded away.
fn source(width: usize, height: usize) -> PixelBuffer {
    let format = PixelFormat::Rgba8;
    let mut state = 0x9E37_79B9u32;
    let data = (0..width * height * format.bytes_per_pixel())
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    PixelBuffer::from_packed(width, height, format, data).unwrap()
}

/// Sequential vs parallel at a fixed 50% over growing inputs.
fn bench_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("downscale_50");

    for (w, h) in [(256, 256), (1024, 768), (1920, 1080)] {
        let src = source(w, h);
        let id = format!("{w}x{h}");
        group.throughput(Throughput::Elements((w * h / 4) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", &id), &src, |b, src| {
            b.iter(|| downscale_sequential(black_box(src), 0.5).unwrap())
        });

        for executor in [Executor::Threads, Executor::Rayon] {
            let options = DownscaleOptions::default().with_executor(executor);
            group.bench_with_input(BenchmarkId::new(executor.name(), &id), &src, |b, src| {
                b.iter(|| downscale_parallel_with(black_box(src), 0.5, &options).unwrap())
            });
        }
    }

    group.finish();
}

/// Parallel scaling with worker count on one large input.
fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("workers");
    let src = source(2048, 2048);

    for workers in [1, 2, 4, 8, 16] {
        let options = DownscaleOptions::default().with_workers(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &options, |b, options| {
            b.iter(|| downscale_parallel_with(black_box(&src), 0.25, options).unwrap())
        });
    }

    group.finish();
}

/// Cost of building a row partition alone.
fn bench_partition(c: &mut Criterion) {
    c.bench_function("partition_4320_rows_64", |b| {
        b.iter(|| RowPartition::new(black_box(4320), black_box(64)))
    });
}

criterion_group!(benches, bench_sizes, bench_workers, bench_partition);
criterion_main!(benches);
