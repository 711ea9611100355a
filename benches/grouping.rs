//! Benchmarks for the grouped-rows pipeline.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use groupgrid::{
    vertical_range_to_render, ExpandedGroups, FlatRows, GridConfig, GroupTree, JsonFieldGrouper,
    ViewportRows,
};
use serde_json::{json, Value};

/// `count` rows spread over 20 regions x 10 products.
fn sales_rows(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "region": format!("region-{}", i % 20),
                "product": format!("product-{}", (i / 20) % 10),
                "amount": i,
            })
        })
        .collect()
}

fn group_by() -> Vec<String> {
    vec!["region".to_string(), "product".to_string()]
}

/// Build the group tree for growing row counts
fn bench_group_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_tree");

    for count in [1_000usize, 10_000, 100_000] {
        let rows = sales_rows(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("build", count), &rows, |b, rows| {
            b.iter(|| GroupTree::build(black_box(rows), &group_by(), &JsonFieldGrouper))
        });
    }

    group.finish();
}

/// Flatten a 100k-row tree collapsed and fully expanded
fn bench_flatten(c: &mut Criterion) {
    let rows = sales_rows(100_000);
    let tree = GroupTree::build(&rows, &group_by(), &JsonFieldGrouper).expect("grouping keys set");
    let mut all = ExpandedGroups::new();
    all.expand_all(&tree);

    let mut group = c.benchmark_group("flatten");
    group.bench_function("collapsed", |b| {
        b.iter(|| FlatRows::flatten(black_box(&tree), &ExpandedGroups::new()))
    });
    group.bench_function("expanded", |b| {
        b.iter(|| FlatRows::flatten(black_box(&tree), black_box(&all)))
    });
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    c.bench_function("vertical_range_to_render", |b| {
        b.iter(|| {
            vertical_range_to_render(
                black_box(600.0),
                black_box(35.0),
                black_box(123_456.0),
                black_box(1_000_000),
            )
        })
    });
}

/// A scroll frame through the memoized pipeline: only the range is recomputed
fn bench_scroll_frame(c: &mut Criterion) {
    let config = GridConfig {
        group_by: group_by(),
        ..GridConfig::default()
    };
    let mut view = ViewportRows::new(sales_rows(100_000), &config)
        .expect("valid config")
        .with_grouper(JsonFieldGrouper);
    let mut expanded = ExpandedGroups::new();
    if let Some(tree) = view.compute(&expanded).tree() {
        expanded.expand_all(tree);
    }
    view.compute(&expanded);

    let mut scroll_top = 0.0;
    c.bench_function("scroll_frame", |b| {
        b.iter(|| {
            scroll_top = (scroll_top + 35.0) % 3_000_000.0;
            view.set_scroll_top(scroll_top);
            view.compute(black_box(&expanded)).rendered_rows().count()
        })
    });
}

criterion_group!(
    benches,
    bench_group_tree,
    bench_flatten,
    bench_range,
    bench_scroll_frame,
);

criterion_main!(benches);
