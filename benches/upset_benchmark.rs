#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for intersection grouping and upset rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use upset_viz::prelude::*;

/// Six overlapping categories over `size` elements, using a deterministic
/// membership pattern.
fn categories(size: u32) -> Categories<u32> {
    (0..6u32)
        .map(|c| {
            let elements: Vec<u32> = (0..size).filter(|e| (e * 7 + c * 13) % (c + 2) != 0).collect();
            (format!("set-{c}"), elements)
        })
        .collect()
}

fn intersection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersection_sizes");

    for size in [100, 1_000, 10_000, 100_000] {
        let data = categories(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| intersection_sizes(black_box(&data)));
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("upset_render");
    let plot = make_upset(&categories(1_000), "Benchmark").unwrap();

    group.bench_function("svg", |b| b.iter(|| black_box(&plot).to_svg().unwrap()));
    group.bench_function("framebuffer", |b| b.iter(|| black_box(&plot).to_framebuffer().unwrap()));

    group.finish();
}

criterion_group!(benches, intersection_benchmark, render_benchmark);
criterion_main!(benches);
