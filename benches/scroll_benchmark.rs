//! Scroll performance benchmarks.
//!
//! Measures render passes on a large list: small steps that recycle a few
//! cells per pass, long jumps that replace the whole window, and height
//! index lookups on their own.
//!
//! Run with: cargo bench --bench scroll_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rowview::surface::HeadlessSurface;
use rowview::view_state::height_index::HeightIndex;
use rowview::view_state::{ListView, TextRenderer};

type TextView = ListView<String, TextRenderer, HeadlessSurface>;

const ROW_HEIGHT: usize = 20;
const VIEWPORT: usize = 800;

fn build_view(rows: usize) -> TextView {
    let mut view = ListView::new(
        HeadlessSurface::new(),
        TextRenderer::new(ROW_HEIGHT),
        VIEWPORT,
    )
    .expect("view builds");
    view.splice(0, 0, (0..rows).map(|i| format!("row {}", i)))
        .expect("rows load");
    view
}

fn bench_small_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_small_steps");
    for rows in [1_000usize, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter_batched(
                || build_view(rows),
                |mut view| {
                    for step in 1..=100 {
                        black_box(view.set_scroll_top(step * 7).expect("scroll"));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_long_jumps(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_long_jumps");
    for rows in [1_000usize, 100_000] {
        let total = rows * ROW_HEIGHT;
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter_batched(
                || build_view(rows),
                |mut view| {
                    for jump in 0..20 {
                        let target = (jump * 7919 * ROW_HEIGHT) % total;
                        black_box(view.set_scroll_top(target).expect("scroll"));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_index_at(c: &mut Criterion) {
    let heights: Vec<usize> = (0..100_000).map(|i| 12 + (i % 5) * 4).collect();
    let index = HeightIndex::from_heights(heights);
    let total = index.total();

    c.bench_function("height_index_at_100k", |b| {
        let mut offset = 0;
        b.iter(|| {
            offset = (offset + 9973) % total;
            black_box(index.index_at(black_box(offset)))
        });
    });
}

criterion_group!(benches, bench_small_steps, bench_long_jumps, bench_index_at);
criterion_main!(benches);
