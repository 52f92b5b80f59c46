//! Layout engine micro-benchmarks
//!
//! Measures wrapping, pagination and two-pass planning for growing entry lists.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tocpress_layout::text::wrap;
use tocpress_layout::{Helvetica, LayoutConfig, LayoutEngine, compute_targets, plan_toc};
use tocpress_traits::TextMeasure;
use tocpress_types::Entry;

fn entries(count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| {
            let title = if i % 5 == 0 {
                format!(
                    "Chapter {}: a deliberately verbose heading that needs more than one line \
                     to fit inside the table of contents",
                    i
                )
            } else {
                format!("Section {}", i)
            };
            Entry::new((i % 3) as u8 + 1, title, i)
        })
        .collect()
}

fn bench_wrap(c: &mut Criterion) {
    let title = "The quick brown fox jumps over the lazy dog while the committee deliberates \
                 on an unreasonably long section heading for the third time this week";
    c.bench_function("wrap_long_title", |b| {
        b.iter(|| wrap(black_box(title), 200.0, |s| Helvetica.text_width(s, 11.0)))
    });
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_entries");
    let config = LayoutConfig::default();
    for count in [10, 100, 1000] {
        let resolved = compute_targets(&entries(count), 1);
        group.bench_with_input(BenchmarkId::new("entries", count), &resolved, |b, resolved| {
            let engine = LayoutEngine::new(&config, &Helvetica);
            b.iter(|| engine.layout(black_box(resolved)))
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_toc");
    let config = LayoutConfig::default();
    for count in [100, 1000] {
        let input = entries(count);
        group.bench_with_input(BenchmarkId::new("entries", count), &input, |b, input| {
            b.iter(|| plan_toc(black_box(input), &config, &Helvetica))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wrap, bench_layout, bench_plan);
criterion_main!(benches);
