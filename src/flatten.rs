//! Row flattener.
//!
//! Walks a [`GroupTree`] depth-first, emitting a header for every visible
//! group and descending only into groups whose id is in [`ExpandedGroups`].
//! The result is a fresh [`FlatRows`]; nothing is patched in place.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::cache::{next_stamp, Stamp};
use crate::grouping::{GroupNodeId, GroupTree};
use crate::types::{group_id, FlatRow, GroupRow};

/// The set of expanded group ids.
///
/// Owned by the caller and only read by the flattener. Every mutation that
/// changes the set assigns a new [`Stamp`], which downstream caches use as
/// their dependency key.
#[derive(Debug, Clone, Default)]
pub struct ExpandedGroups {
    ids: HashSet<String>,
    stamp: Stamp,
}

impl PartialEq for ExpandedGroups {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for ExpandedGroups {}

impl FromIterator<String> for ExpandedGroups {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let ids: HashSet<String> = iter.into_iter().collect();
        let stamp = if ids.is_empty() { 0 } else { next_stamp() };
        Self { ids, stamp }
    }
}

impl ExpandedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Mark `id` expanded. Returns `true` if it was collapsed before.
    pub fn expand(&mut self, id: impl Into<String>) -> bool {
        let changed = self.ids.insert(id.into());
        self.touch(changed)
    }

    /// Mark `id` collapsed. Returns `true` if it was expanded before.
    pub fn collapse(&mut self, id: &str) -> bool {
        let changed = self.ids.remove(id);
        self.touch(changed)
    }

    /// Flip `id`. Returns the new expanded state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.collapse(id) {
            false
        } else {
            self.expand(id);
            true
        }
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
        if expanded {
            self.expand(id)
        } else {
            self.collapse(id)
        }
    }

    /// Expand every group in `tree`.
    pub fn expand_all(&mut self, tree: &GroupTree) {
        let before = self.ids.len();
        self.ids.extend(tree.group_ids());
        let changed = self.ids.len() != before;
        self.touch(changed);
    }

    pub fn clear(&mut self) {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        self.touch(changed);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Version of this set's contents.
    pub fn stamp(&self) -> Stamp {
        self.stamp
    }

    fn touch(&mut self, changed: bool) -> bool {
        if changed {
            self.stamp = next_stamp();
        }
        changed
    }
}

/// The flattened row sequence: group headers interleaved with leaf rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRows {
    rows: Vec<FlatRow>,
    group_count: usize,
}

impl FlatRows {
    /// Sequence for ungrouped data: every raw row in order, no headers.
    pub fn ungrouped(row_count: usize) -> Self {
        Self {
            rows: (0..row_count).map(FlatRow::Row).collect(),
            group_count: 0,
        }
    }

    /// Flatten `tree`, descending only into expanded groups.
    pub fn flatten(tree: &GroupTree, expanded: &ExpandedGroups) -> Self {
        let mut flat = Self::default();
        flat.expand_level(tree, tree.roots(), None, 0, expanded);
        debug!(
            "flattened {} groups into {} rows ({} group headers, {} expanded ids)",
            tree.group_count(),
            flat.rows.len(),
            flat.group_count,
            expanded.len()
        );
        flat
    }

    fn expand_level(
        &mut self,
        tree: &GroupTree,
        siblings: &[GroupNodeId],
        parent_id: Option<&str>,
        level: u32,
        expanded: &ExpandedGroups,
    ) {
        let set_size = siblings.len();
        for (pos_in_set, &node_id) in siblings.iter().enumerate() {
            let Some(node) = tree.node(node_id) else {
                continue;
            };
            let id = group_id(parent_id, &node.key);
            let is_expanded = expanded.contains(&id);

            self.rows.push(FlatRow::Group(GroupRow {
                id: id.clone(),
                key: node.key.clone(),
                parent_id: parent_id.map(str::to_string),
                level,
                pos_in_set,
                set_size,
                start_row_index: node.start_row_index,
                is_expanded,
                child_rows: Arc::clone(&node.child_rows),
            }));
            self.group_count += 1;

            if !is_expanded {
                continue;
            }
            match &node.child_groups {
                Some(children) => {
                    self.expand_level(tree, children, Some(&id), level + 1, expanded);
                }
                // Leaf level: the partitioned rows go in unchanged
                None => self
                    .rows
                    .extend(node.child_rows.iter().copied().map(FlatRow::Row)),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FlatRow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatRow> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Whether the entry at `index` is a group header.
    pub fn is_group_row(&self, index: usize) -> bool {
        self.get(index).is_some_and(FlatRow::is_group)
    }

    pub fn group_row(&self, index: usize) -> Option<&GroupRow> {
        self.get(index).and_then(FlatRow::as_group)
    }

    /// Raw row index of a leaf entry.
    pub fn row_index(&self, index: usize) -> Option<usize> {
        self.get(index).and_then(FlatRow::row_index)
    }

    /// Number of group headers in this sequence.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Flat position of the header for group `id`, if it is currently visible.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.as_group().is_some_and(|group| group.id == id))
    }
}

impl<'a> IntoIterator for &'a FlatRows {
    type Item = &'a FlatRow;
    type IntoIter = std::slice::Iter<'a, FlatRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::grouping::FieldGrouper;

    #[test]
    fn test_toggle_flips_and_restamps() {
        let mut expanded = ExpandedGroups::new();
        let s0 = expanded.stamp();
        assert!(expanded.toggle("A"));
        let s1 = expanded.stamp();
        assert_ne!(s0, s1);
        assert!(expanded.contains("A"));
        assert!(!expanded.toggle("A"));
        assert!(!expanded.contains("A"));
        assert_ne!(expanded.stamp(), s1);
    }

    #[test]
    fn test_noop_mutation_keeps_stamp() {
        let mut expanded: ExpandedGroups = ["A".to_string()].into_iter().collect();
        let stamp = expanded.stamp();
        assert!(!expanded.expand("A"));
        assert!(!expanded.collapse("B"));
        assert_eq!(expanded.stamp(), stamp);
    }

    #[test]
    fn test_clear() {
        let mut expanded: ExpandedGroups = ["A".to_string(), "B".to_string()].into_iter().collect();
        expanded.clear();
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_ungrouped_has_no_headers() {
        let flat = FlatRows::ungrouped(3);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.group_count(), 0);
        assert!(!flat.is_group_row(0));
        assert_eq!(flat.row_index(2), Some(2));
        assert_eq!(flat.row_index(3), None);
    }

    #[test]
    fn test_group_rows_share_tree_child_rows() {
        let rows = vec!["a", "b", "a"];
        let grouper = FieldGrouper::new(|row: &&str, _key: &str| (*row).to_string());
        let tree = GroupTree::build(&rows, &["letter".to_string()], &grouper).unwrap();
        let node = tree.node(tree.roots()[0]).unwrap();

        // Reflattening hands out the same index list, not a copy
        for state in [ExpandedGroups::new(), ["a".to_string()].into_iter().collect()] {
            let flat = FlatRows::flatten(&tree, &state);
            let group = flat.group_row(0).unwrap();
            assert_eq!(*group.child_rows, [0, 2]);
            assert!(Arc::ptr_eq(&group.child_rows, &node.child_rows));
        }
    }
}
