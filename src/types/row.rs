use serde::Serialize;

use super::GroupRow;

/// One entry of the flattened row sequence.
///
/// The variant is the discriminator between group headers and leaf rows, so
/// callers never need to inspect the raw row type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatRow {
    /// A leaf row, by index into the caller's row slice
    Row(usize),
    /// A synthetic group header
    Group(GroupRow),
}

impl FlatRow {
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub fn as_group(&self) -> Option<&GroupRow> {
        match self {
            Self::Group(group) => Some(group),
            Self::Row(_) => None,
        }
    }

    pub fn row_index(&self) -> Option<usize> {
        match self {
            Self::Row(index) => Some(*index),
            Self::Group(_) => None,
        }
    }
}

/// A flat entry resolved against the caller's rows.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RowRef<'a, R> {
    Row { row: &'a R },
    Group { group: &'a GroupRow },
}

impl<R> Clone for RowRef<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RowRef<'_, R> {}

impl<'a, R> RowRef<'a, R> {
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    pub fn as_group(&self) -> Option<&'a GroupRow> {
        match *self {
            Self::Group { group } => Some(group),
            Self::Row { .. } => None,
        }
    }

    pub fn as_row(&self) -> Option<&'a R> {
        match *self {
            Self::Row { row } => Some(row),
            Self::Group { .. } => None,
        }
    }
}
