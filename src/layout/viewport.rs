//! Viewport state management for scrolling.

use super::range::{vertical_range_with_overscan, RowRange};
use crate::config::{validate_row_height, validate_viewport_height, GridConfig};
use crate::error::Result;

/// Viewport state - the visible slice of a uniform-height row list
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Vertical scroll position in content coordinates
    pub scroll_top: f64,
    /// Height of the scrollable content area in pixels
    pub height: f64,
    /// Rows rendered beyond the visible area on each side
    pub overscan: usize,
    row_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            scroll_top: 0.0,
            height: config.viewport_height,
            overscan: config.overscan_rows,
            row_height: config.row_height,
        }
    }
}

impl Viewport {
    /// Create a viewport with default geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport from validated config.
    ///
    /// # Errors
    /// Returns an error if the row height or viewport height is invalid.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        validate_row_height(config.row_height)?;
        validate_viewport_height(config.viewport_height)?;
        Ok(Self {
            scroll_top: 0.0,
            height: config.viewport_height,
            overscan: config.overscan_rows,
            row_height: config.row_height,
        })
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Change the row height.
    ///
    /// # Errors
    /// Returns an error if `row_height` is not finite and positive; the
    /// viewport is left unchanged.
    pub fn set_row_height(&mut self, row_height: f64) -> Result<()> {
        validate_row_height(row_height)?;
        self.row_height = row_height;
        Ok(())
    }

    /// Inclusive range of rows to render (visible rows plus overscan).
    pub fn visible_range(&self, row_count: usize) -> Option<RowRange> {
        vertical_range_with_overscan(
            self.height,
            self.row_height,
            self.scroll_top,
            row_count,
            self.overscan,
        )
    }

    /// Total content height for `row_count` rows
    pub fn total_height(&self, row_count: usize) -> f64 {
        row_count as f64 * self.row_height
    }

    /// Top edge of row `index` in content coordinates
    pub fn row_top(&self, index: usize) -> f64 {
        index as f64 * self.row_height
    }

    /// Find the row at content y position
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row_at_y(&self, y: f64, row_count: usize) -> Option<usize> {
        if y.is_nan() || y < 0.0 || y >= self.total_height(row_count) {
            return None;
        }
        Some((y / self.row_height).floor() as usize)
    }

    /// Clamp scroll position so the viewport never runs past the content.
    pub fn clamp_scroll(&mut self, row_count: usize) {
        let max_scroll = (self.total_height(row_count) - self.height).max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, max_scroll);
    }

    /// Scroll by a delta
    pub fn scroll_by(&mut self, delta_y: f64, row_count: usize) {
        self.scroll_top += delta_y;
        self.clamp_scroll(row_count);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, y: f64, row_count: usize) {
        self.scroll_top = y;
        self.clamp_scroll(row_count);
    }

    /// Resize the viewport
    pub fn resize(&mut self, height: f64) {
        self.height = height;
    }

    /// Scroll the minimum distance that brings row `index` fully into view.
    ///
    /// Paired with `GroupRow::start_row_index` this gives jump-to-row even for
    /// groups that are currently collapsed.
    pub fn scroll_to_row(&mut self, index: usize, row_count: usize) {
        let top = self.row_top(index);
        let bottom = top + self.row_height;
        if top < self.scroll_top {
            self.scroll_top = top;
        } else if bottom > self.scroll_top + self.height {
            self.scroll_top = bottom - self.height;
        }
        self.clamp_scroll(row_count);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::GridError;

    fn viewport(height: f64, row_height: f64) -> Viewport {
        let config = GridConfig {
            row_height,
            viewport_height: height,
            ..GridConfig::default()
        };
        Viewport::from_config(&config).unwrap()
    }

    #[test]
    fn test_from_config_rejects_zero_row_height() {
        let config = GridConfig {
            row_height: 0.0,
            ..GridConfig::default()
        };
        assert!(matches!(
            Viewport::from_config(&config),
            Err(GridError::InvalidRowHeight(_))
        ));
    }

    #[test]
    fn test_set_row_height_keeps_old_value_on_error() {
        let mut vp = viewport(100.0, 20.0);
        assert!(vp.set_row_height(-3.0).is_err());
        assert_eq!(vp.row_height(), 20.0);
        vp.set_row_height(25.0).unwrap();
        assert_eq!(vp.row_height(), 25.0);
    }

    #[test]
    fn test_row_at_y() {
        let vp = viewport(100.0, 20.0);
        assert_eq!(vp.row_at_y(0.0, 10), Some(0));
        assert_eq!(vp.row_at_y(39.9, 10), Some(1));
        assert_eq!(vp.row_at_y(200.0, 10), None);
        assert_eq!(vp.row_at_y(-1.0, 10), None);
        assert_eq!(vp.row_at_y(f64::NAN, 10), None);
    }

    #[test]
    fn test_clamp_scroll() {
        let mut vp = viewport(100.0, 20.0);
        vp.set_scroll(10_000.0, 10);
        assert_eq!(vp.scroll_top, 100.0);
        vp.scroll_by(-500.0, 10);
        assert_eq!(vp.scroll_top, 0.0);
    }

    #[test]
    fn test_content_shorter_than_viewport_pins_to_top() {
        let mut vp = viewport(100.0, 20.0);
        vp.set_scroll(50.0, 2);
        assert_eq!(vp.scroll_top, 0.0);
    }

    #[test]
    fn test_scroll_to_row_down_and_up() {
        let mut vp = viewport(100.0, 20.0);
        vp.scroll_to_row(20, 100);
        assert_eq!(vp.scroll_top, 320.0);
        vp.scroll_to_row(3, 100);
        assert_eq!(vp.scroll_top, 60.0);
        // Already visible: no movement
        vp.scroll_to_row(5, 100);
        assert_eq!(vp.scroll_top, 60.0);
    }
}
