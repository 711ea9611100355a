//! Memoized grouped-rows pipeline.
//!
//! `ViewportRows` owns the inputs that change at different rates and caches
//! each derived stage separately:
//!
//! 1. rows + grouping config  -> [`GroupTree`]      (rarely)
//! 2. tree + expansion state  -> [`FlatRows`]       (on expand/collapse)
//! 3. flat length + geometry  -> [`RowRange`]       (every scroll frame)
//!
//! A scroll never regroups or reflattens, and toggling a group never regroups.

mod window;

use log::{debug, trace};

use crate::cache::{next_stamp, Memo, Stamp};
use crate::config::{validate_viewport_height, GridConfig};
use crate::error::{GridError, Result};
use crate::flatten::{ExpandedGroups, FlatRows};
use crate::grouping::{GroupTree, RowGrouper};
use crate::layout::{RowRange, Viewport};

pub use window::{RenderWindow, RenderedRow};

/// Dependency key of the grouping stage: `(rows, grouping inputs)`.
type GroupingKey = (Stamp, Stamp);

/// Dependency key of the flatten stage: `(rows, grouping inputs, expansion)`.
type FlattenKey = (Stamp, Stamp, Stamp);

/// Dependency key of the range stage.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RangeKey {
    height: f64,
    row_height: f64,
    scroll_top: f64,
    overscan: usize,
    row_count: usize,
}

impl RangeKey {
    fn new(viewport: &Viewport, row_count: usize) -> Self {
        Self {
            height: viewport.height,
            row_height: viewport.row_height(),
            scroll_top: viewport.scroll_top,
            overscan: viewport.overscan,
            row_count,
        }
    }
}

/// How many times each stage has actually been recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub grouping_runs: u64,
    pub flatten_runs: u64,
    pub range_runs: u64,
}

/// Grouped, virtualized row list over caller rows `R` partitioned by `G`.
pub struct ViewportRows<R, G> {
    rows: Vec<R>,
    rows_stamp: Stamp,
    group_by: Vec<String>,
    grouper: Option<G>,
    grouping_stamp: Stamp,
    /// Scroll offset is stored as requested and clamped in `compute`
    viewport: Viewport,
    grouped: Memo<GroupingKey, Option<GroupTree>>,
    flat: Memo<FlattenKey, FlatRows>,
    range: Memo<RangeKey, Option<RowRange>>,
}

impl<R, G: RowGrouper<R>> ViewportRows<R, G> {
    /// Create a pipeline over `rows` using geometry and `group_by` from `config`.
    ///
    /// Grouping stays off until a grouper is supplied with [`Self::with_grouper`]
    /// or [`Self::set_grouper`].
    ///
    /// # Errors
    /// Returns an error if the config fails validation.
    pub fn new(rows: Vec<R>, config: &GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rows,
            rows_stamp: next_stamp(),
            group_by: config.group_by.clone(),
            grouper: None,
            grouping_stamp: next_stamp(),
            viewport: Viewport::from_config(config)?,
            grouped: Memo::new(),
            flat: Memo::new(),
            range: Memo::new(),
        })
    }

    #[must_use]
    pub fn with_grouper(mut self, grouper: G) -> Self {
        self.set_grouper(Some(grouper));
        self
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Replace the raw rows. Invalidates every stage.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.rows_stamp = next_stamp();
    }

    /// Mutable access to the raw rows. Invalidates every stage.
    pub fn rows_mut(&mut self) -> &mut Vec<R> {
        self.rows_stamp = next_stamp();
        &mut self.rows
    }

    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    /// Replace the grouping keys.
    ///
    /// # Errors
    /// Returns an error if any key is empty; the previous keys are kept.
    pub fn set_group_by(&mut self, group_by: Vec<String>) -> Result<()> {
        if group_by.iter().any(String::is_empty) {
            return Err(GridError::InvalidConfig(
                "groupBy keys must not be empty".to_string(),
            ));
        }
        if group_by != self.group_by {
            self.group_by = group_by;
            self.grouping_stamp = next_stamp();
        }
        Ok(())
    }

    pub fn set_grouper(&mut self, grouper: Option<G>) {
        self.grouper = grouper;
        self.grouping_stamp = next_stamp();
    }

    /// Whether grouping is configured (keys and a grouper).
    pub fn is_grouped(&self) -> bool {
        !self.group_by.is_empty() && self.grouper.is_some()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Request a scroll offset.
    ///
    /// The offset is clamped to the content height by the next [`Self::compute`],
    /// so scrolling and expansion changes may be applied in either order.
    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.viewport.scroll_top = scroll_top.max(0.0);
    }

    /// Move the requested scroll offset by `delta_y`; clamped like [`Self::set_scroll_top`].
    pub fn scroll_by(&mut self, delta_y: f64) {
        self.set_scroll_top(self.viewport.scroll_top + delta_y);
    }

    /// Change the viewport height.
    ///
    /// # Errors
    /// Returns an error if `height` is negative or not finite.
    pub fn resize(&mut self, height: f64) -> Result<()> {
        validate_viewport_height(height)?;
        self.viewport.resize(height);
        Ok(())
    }

    /// Change the row height.
    ///
    /// # Errors
    /// Returns an error if `row_height` is not finite and positive.
    pub fn set_row_height(&mut self, row_height: f64) -> Result<()> {
        self.viewport.set_row_height(row_height)
    }

    /// Bring the header of group `id` into view.
    ///
    /// Returns `false` if the group is not in the current flat sequence
    /// (unknown id, or an ancestor is collapsed).
    pub fn scroll_to_group(&mut self, id: &str, expanded: &ExpandedGroups) -> bool {
        let (position, row_count) = {
            let window = self.compute(expanded);
            (window.rows().position_of(id), window.len())
        };
        match position {
            Some(index) => {
                self.viewport.scroll_to_row(index, row_count);
                true
            }
            None => false,
        }
    }

    /// Bring up to date whichever stages are stale and return the result.
    pub fn compute(&mut self, expanded: &ExpandedGroups) -> RenderWindow<'_, R> {
        let rows = &self.rows;
        let group_by = &self.group_by;
        let grouper = self.grouper.as_ref();

        let tree = self
            .grouped
            .get_or_compute((self.rows_stamp, self.grouping_stamp), || {
                grouper.and_then(|grouper| GroupTree::build(rows, group_by, grouper))
            })
            .as_ref();

        let flat_key = (self.rows_stamp, self.grouping_stamp, expanded.stamp());
        let flat = self.flat.get_or_compute(flat_key, || match tree {
            Some(tree) => FlatRows::flatten(tree, expanded),
            None => {
                debug!("grouping not configured, using {} raw rows", rows.len());
                FlatRows::ungrouped(rows.len())
            }
        });

        // Content may have shrunk (collapse) or grown (expand) since the scroll
        // offset was requested
        self.viewport.clamp_scroll(flat.len());
        let viewport = &self.viewport;
        let range = *self
            .range
            .get_or_compute(RangeKey::new(viewport, flat.len()), || {
                let range = viewport.visible_range(flat.len());
                trace!("render range {range:?} of {} rows", flat.len());
                range
            });

        RenderWindow::new(rows, tree, flat, range, viewport)
    }

    /// Recompute counts per stage.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            grouping_runs: self.grouped.misses(),
            flatten_runs: self.flat.misses(),
            range_runs: self.range.misses(),
        }
    }
}
