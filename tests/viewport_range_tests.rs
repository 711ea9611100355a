//! Viewport and render range tests
//!
//! Tests for the overscanned render range, scroll clamping, and coordinate
//! mapping for uniform-height rows.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use groupgrid::layout::{vertical_range_with_overscan, OVERSCAN_ROWS};
use groupgrid::{vertical_range_to_render, GridConfig, RowRange, Viewport};
use test_case::test_case;

fn create_viewport(height: f64, row_height: f64) -> Viewport {
    let config = GridConfig {
        row_height,
        viewport_height: height,
        ..GridConfig::default()
    };
    Viewport::from_config(&config).unwrap()
}

// =============================================================================
// RANGE CALCULATION
// =============================================================================

#[test]
fn test_range_at_scroll_zero() {
    let range = vertical_range_to_render(100.0, 20.0, 0.0, 1000).unwrap();
    assert_eq!(range.start, 0, "Start should be 0 at scrollTop=0");
    assert!(range.end >= 5, "At least 5 rows visible, got end {}", range.end);
}

#[test]
fn test_range_after_scroll() {
    let range = vertical_range_to_render(100.0, 20.0, 2000.0, 1000).unwrap();
    assert_eq!(range.start, 100 - OVERSCAN_ROWS);
    assert!(range.end >= 105, "Must cover 5 visible rows past 100, got {}", range.end);
    assert!(range.end <= 999);
}

#[test]
fn test_range_clamped_at_end() {
    let range = vertical_range_to_render(100.0, 20.0, 19_900.0, 1000).unwrap();
    assert_eq!(range.end, 999);
    assert_eq!(range.start, 995 - OVERSCAN_ROWS);
}

#[test]
fn test_range_empty_rows() {
    assert_eq!(vertical_range_to_render(100.0, 20.0, 0.0, 0), None);
    assert_eq!(vertical_range_to_render(100.0, 20.0, 500.0, 0), None);
}

#[test]
fn test_range_fewer_rows_than_viewport() {
    let range = vertical_range_to_render(600.0, 20.0, 0.0, 3).unwrap();
    assert_eq!(range, RowRange { start: 0, end: 2 });
}

#[test_case(0.0, 0, 9 ; "top")]
#[test_case(30.0, 0, 10 ; "start clamped at zero")]
#[test_case(200.0, 6, 19 ; "ten rows down")]
#[test_case(210.0, 6, 19 ; "mid row")]
fn test_range_overscan_four(scroll_top: f64, start: usize, end: usize) {
    let range = vertical_range_with_overscan(100.0, 20.0, scroll_top, 1000, 4).unwrap();
    assert_eq!(range, RowRange { start, end });
}

#[test]
fn test_range_zero_overscan_covers_exactly_visible() {
    let range = vertical_range_with_overscan(100.0, 20.0, 200.0, 1000, 0).unwrap();
    assert_eq!(range, RowRange { start: 10, end: 15 });
}

#[test]
fn test_range_fractional_viewport_rounds_up() {
    // 90px viewport with 20px rows shows parts of 5 rows
    let range = vertical_range_with_overscan(90.0, 20.0, 0.0, 100, 0).unwrap();
    assert_eq!(range.end, 5);
}

#[test]
fn test_range_always_within_bounds() {
    for row_count in [1usize, 2, 7, 50] {
        for step in 0..40 {
            let scroll_top = f64::from(step) * 37.0;
            let range = vertical_range_to_render(120.0, 25.0, scroll_top, row_count).unwrap();
            assert!(range.start <= range.end);
            assert!(range.end < row_count);
        }
    }
}

// =============================================================================
// VIEWPORT STATE
// =============================================================================

#[test]
fn test_viewport_initial_scroll_zero() {
    let viewport = Viewport::new();
    assert_eq!(viewport.scroll_top, 0.0, "Initial scroll_top should be 0");
    assert_eq!(viewport.overscan, OVERSCAN_ROWS);
}

#[test]
fn test_viewport_visible_range_uses_own_geometry() {
    let mut viewport = create_viewport(100.0, 20.0);
    viewport.set_scroll(2000.0, 1000);
    assert_eq!(
        viewport.visible_range(1000),
        vertical_range_to_render(100.0, 20.0, 2000.0, 1000)
    );
}

#[test]
fn test_viewport_scroll_clamps_to_content() {
    let mut viewport = create_viewport(100.0, 20.0);
    viewport.scroll_by(50_000.0, 1000);
    assert_eq!(viewport.scroll_top, 20_000.0 - 100.0);
    viewport.scroll_by(-1.0e9, 1000);
    assert_eq!(viewport.scroll_top, 0.0);
}

#[test]
fn test_viewport_shrinking_content_reclamps() {
    let mut viewport = create_viewport(100.0, 20.0);
    viewport.set_scroll(1500.0, 1000);
    // A collapse leaves only 10 rows
    viewport.clamp_scroll(10);
    assert_eq!(viewport.scroll_top, 100.0);
    let range = viewport.visible_range(10).unwrap();
    assert_eq!(range.end, 9);
}

#[test]
fn test_viewport_row_geometry() {
    let viewport = create_viewport(100.0, 20.0);
    assert_eq!(viewport.row_top(7), 140.0);
    assert_eq!(viewport.total_height(50), 1000.0);
    assert_eq!(viewport.row_at_y(140.0, 50), Some(7));
    assert_eq!(viewport.row_at_y(1000.0, 50), None);
}

#[test]
fn test_scroll_to_row_brings_row_into_range() {
    let mut viewport = create_viewport(100.0, 20.0);
    viewport.scroll_to_row(640, 1000);
    let range = viewport.visible_range(1000).unwrap();
    assert!(range.contains(640));
    assert_eq!(viewport.row_at_y(viewport.scroll_top + 99.0, 1000), Some(640));
}

#[test]
fn test_resize_changes_range() {
    let mut viewport = create_viewport(100.0, 20.0);
    let small = viewport.visible_range(1000).unwrap();
    viewport.resize(400.0);
    let large = viewport.visible_range(1000).unwrap();
    assert!(large.len() > small.len());
}
