//! Vertical render range for uniform-height rows.

use serde::Serialize;

/// Rows rendered above and below the visible area, to avoid blank frames
/// while scrolling fast.
pub const OVERSCAN_ROWS: usize = 4;

/// Inclusive range of flat row indices to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Rows overlapping the viewport, padded by [`OVERSCAN_ROWS`].
///
/// Returns `None` when there are no rows. `row_height` must be positive;
/// that is enforced by config validation, not here.
pub fn vertical_range_to_render(
    viewport_height: f64,
    row_height: f64,
    scroll_top: f64,
    row_count: usize,
) -> Option<RowRange> {
    vertical_range_with_overscan(viewport_height, row_height, scroll_top, row_count, OVERSCAN_ROWS)
}

/// [`vertical_range_to_render`] with an explicit overscan margin.
// Float -> usize casts saturate (negatives and NaN become 0), so bad geometry
// degrades to a clamped range instead of panicking.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn vertical_range_with_overscan(
    viewport_height: f64,
    row_height: f64,
    scroll_top: f64,
    row_count: usize,
    overscan: usize,
) -> Option<RowRange> {
    let last = row_count.checked_sub(1)?;

    let first_visible = (scroll_top / row_height).floor() as usize;
    let visible_count = (viewport_height / row_height).ceil() as usize;

    let end = first_visible
        .saturating_add(visible_count)
        .saturating_add(overscan)
        .min(last);
    let start = first_visible.saturating_sub(overscan).min(end);

    Some(RowRange { start, end })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rows_is_none() {
        assert_eq!(vertical_range_to_render(100.0, 20.0, 0.0, 0), None);
    }

    #[test]
    fn test_top_of_list() {
        let range = vertical_range_to_render(100.0, 20.0, 0.0, 1000).unwrap();
        assert_eq!(range.start, 0);
        assert_eq!(range.end, 5 + OVERSCAN_ROWS);
    }

    #[test]
    fn test_single_row() {
        let range = vertical_range_to_render(100.0, 20.0, 0.0, 1).unwrap();
        assert_eq!(range, RowRange { start: 0, end: 0 });
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_scrolled_past_end_clamps_start() {
        let range = vertical_range_to_render(100.0, 20.0, 1_000_000.0, 10).unwrap();
        assert_eq!(range, RowRange { start: 9, end: 9 });
    }

    #[test]
    fn test_negative_and_nan_do_not_panic() {
        let range = vertical_range_to_render(100.0, 20.0, -50.0, 10).unwrap();
        assert_eq!(range.start, 0);
        let range = vertical_range_to_render(f64::NAN, 20.0, f64::NAN, 10).unwrap();
        assert_eq!(range.start, 0);
    }

    #[test]
    fn test_range_iter_and_contains() {
        let range = RowRange { start: 3, end: 5 };
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert!(range.contains(4));
        assert!(!range.contains(6));
        assert_eq!(range.len(), 3);
    }
}
