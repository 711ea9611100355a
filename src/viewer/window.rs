//! Read-only view over one computed state of the pipeline.

use serde::Serialize;

use crate::flatten::FlatRows;
use crate::grouping::GroupTree;
use crate::layout::{RowRange, Viewport};
use crate::types::{FlatRow, GroupRow, RowRef};

/// The flat rows and render range produced by `ViewportRows::compute`.
pub struct RenderWindow<'a, R> {
    rows: &'a [R],
    tree: Option<&'a GroupTree>,
    flat: &'a FlatRows,
    range: Option<RowRange>,
    viewport: &'a Viewport,
}

/// One row inside the render range, positioned for the rendering layer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRow<'a, R> {
    /// Position in the flat sequence
    pub index: usize,
    /// Top edge in content coordinates
    pub top: f64,
    pub entry: RowRef<'a, R>,
}

impl<R> Clone for RenderedRow<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RenderedRow<'_, R> {}

impl<R> RenderedRow<'_, R> {
    pub fn is_group(&self) -> bool {
        self.entry.is_group()
    }

    /// Whether this row is the currently selected flat row.
    pub fn is_selected(&self, selected_row: Option<usize>) -> bool {
        selected_row == Some(self.index)
    }
}

impl<'a, R> RenderWindow<'a, R> {
    pub(crate) fn new(
        rows: &'a [R],
        tree: Option<&'a GroupTree>,
        flat: &'a FlatRows,
        range: Option<RowRange>,
        viewport: &'a Viewport,
    ) -> Self {
        Self {
            rows,
            tree,
            flat,
            range,
            viewport,
        }
    }

    /// The flattened sequence under the current expansion state.
    pub fn rows(&self) -> &'a FlatRows {
        self.flat
    }

    pub fn raw_rows(&self) -> &'a [R] {
        self.rows
    }

    /// Grouping result, `None` when grouping is not configured.
    pub fn tree(&self) -> Option<&'a GroupTree> {
        self.tree
    }

    /// Row count under full expansion (raw row count when ungrouped).
    pub fn rows_count(&self) -> usize {
        self.tree.map_or(self.rows.len(), GroupTree::row_count)
    }

    /// Current flat length.
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Inclusive render range, `None` when there are no rows.
    pub fn range(&self) -> Option<RowRange> {
        self.range
    }

    pub fn is_group_row(&self, index: usize) -> bool {
        self.flat.is_group_row(index)
    }

    /// Resolve flat position `index` to a leaf row or group header.
    pub fn row(&self, index: usize) -> Option<RowRef<'a, R>> {
        match self.flat.get(index)? {
            FlatRow::Row(row_index) => self.rows.get(*row_index).map(|row| RowRef::Row { row }),
            FlatRow::Group(group) => Some(RowRef::Group { group }),
        }
    }

    /// Raw rows under `group`, in partition order.
    pub fn child_rows<'g>(&self, group: &'g GroupRow) -> impl Iterator<Item = &'a R> + 'g
    where
        'a: 'g,
    {
        let rows = self.rows;
        group
            .child_rows
            .iter()
            .filter_map(move |&index| rows.get(index))
    }

    /// Every row in the render range, in order.
    pub fn rendered_rows(&self) -> impl Iterator<Item = RenderedRow<'a, R>> + '_ {
        self.range
            .into_iter()
            .flat_map(|range| range.iter())
            .filter_map(move |index| {
                self.row(index).map(|entry| RenderedRow {
                    index,
                    top: self.viewport.row_top(index),
                    entry,
                })
            })
    }

    /// Total content height of the current flat sequence.
    pub fn total_height(&self) -> f64 {
        self.viewport.total_height(self.flat.len())
    }

    pub fn viewport(&self) -> &'a Viewport {
        self.viewport
    }
}
