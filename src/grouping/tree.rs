//! Arena-backed nested group structure.

use std::sync::Arc;

use log::{debug, warn};

use super::RowGrouper;
use crate::types::group_id;

/// Handle to a node in a [`GroupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupNodeId(usize);

impl GroupNodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One group at one grouping level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    /// Key value this group was partitioned on
    pub key: String,
    /// Indices of every raw row in this group
    pub child_rows: Arc<[usize]>,
    /// Nested groups; `None` once the grouping keys are exhausted
    pub child_groups: Option<Vec<GroupNodeId>>,
    /// Position of this group's header in the fully expanded sequence
    pub start_row_index: usize,
}

impl GroupNode {
    pub fn is_leaf_level(&self) -> bool {
        self.child_groups.is_none()
    }
}

/// Result of recursively grouping rows by an ordered list of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTree {
    nodes: Vec<GroupNode>,
    roots: Vec<GroupNodeId>,
    row_count: usize,
    depth: usize,
}

impl GroupTree {
    /// Group `rows` by `group_by`, numbering headers from 0.
    ///
    /// Returns `None` when `group_by` is empty: grouping does not apply and the
    /// rows should be used as-is.
    pub fn build<R, G>(rows: &[R], group_by: &[String], grouper: &G) -> Option<Self>
    where
        G: RowGrouper<R> + ?Sized,
    {
        Self::build_at(rows, group_by, grouper, 0)
    }

    /// Group `rows` by `group_by`, with the first header at `start_row_index`.
    pub fn build_at<R, G>(
        rows: &[R],
        group_by: &[String],
        grouper: &G,
        start_row_index: usize,
    ) -> Option<Self>
    where
        G: RowGrouper<R> + ?Sized,
    {
        if group_by.is_empty() {
            return None;
        }

        let mut tree = Self {
            depth: group_by.len(),
            ..Self::default()
        };
        let members: Vec<usize> = (0..rows.len()).collect();
        let (roots, row_count) =
            tree.group_level(rows, &members, group_by, grouper, start_row_index);
        tree.roots = roots;
        tree.row_count = row_count;

        debug!(
            "grouped {} rows by {:?}: {} groups, {} flattened rows",
            rows.len(),
            group_by,
            tree.nodes.len(),
            tree.row_count
        );
        Some(tree)
    }

    /// Partition `members` by the first key and recurse into the rest.
    ///
    /// Returns the sibling ids in grouper order and the number of flattened
    /// rows they occupy (each header plus all of its descendants).
    fn group_level<R, G>(
        &mut self,
        rows: &[R],
        members: &[usize],
        keys: &[String],
        grouper: &G,
        start_row_index: usize,
    ) -> (Vec<GroupNodeId>, usize)
    where
        G: RowGrouper<R> + ?Sized,
    {
        let Some((key, remaining_keys)) = keys.split_first() else {
            return (Vec::new(), 0);
        };

        let partition = grouper.group_rows(rows, members, key);

        let partitioned: usize = partition.iter().map(|(_, group)| group.len()).sum();
        if partitioned != members.len() {
            warn!(
                "grouper returned {partitioned} rows for key {key:?} from {} input rows",
                members.len()
            );
        }

        let mut siblings = Vec::with_capacity(partition.len());
        let mut group_rows_count = 0;

        for (value, child_rows) in partition {
            let group_start = start_row_index + group_rows_count;
            let (child_groups, child_rows_count) = if remaining_keys.is_empty() {
                (None, child_rows.len())
            } else {
                // +1 reserves the slot for this group's own header
                let (children, count) =
                    self.group_level(rows, &child_rows, remaining_keys, grouper, group_start + 1);
                (Some(children), count)
            };

            let id = GroupNodeId(self.nodes.len());
            self.nodes.push(GroupNode {
                key: value,
                child_rows: child_rows.into(),
                child_groups,
                start_row_index: group_start,
            });
            siblings.push(id);
            group_rows_count += child_rows_count + 1;
        }

        (siblings, group_rows_count)
    }

    /// Top-level groups in display order.
    pub fn roots(&self) -> &[GroupNodeId] {
        &self.roots
    }

    pub fn node(&self, id: GroupNodeId) -> Option<&GroupNode> {
        self.nodes.get(id.0)
    }

    /// Child groups of `id` (empty at the leaf level or for unknown ids).
    pub fn children(&self, id: GroupNodeId) -> &[GroupNodeId] {
        self.node(id)
            .and_then(|node| node.child_groups.as_deref())
            .unwrap_or(&[])
    }

    /// Flattened row count under full expansion (headers + leaf rows).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of groups across all levels.
    pub fn group_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of grouping levels.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Ids of every group in pre-order (header before descendants).
    pub fn group_ids(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.nodes.len());
        self.collect_ids(&self.roots, None, &mut ids);
        ids
    }

    fn collect_ids(
        &self,
        level: &[GroupNodeId],
        parent_id: Option<&str>,
        out: &mut Vec<String>,
    ) {
        for &node_id in level {
            let Some(node) = self.node(node_id) else {
                continue;
            };
            let id = group_id(parent_id, &node.key);
            out.push(id.clone());
            self.collect_ids(self.children(node_id), Some(id.as_str()), out);
        }
    }

    /// Look up a group by its id (`key` chain joined with `__`).
    pub fn find(&self, id: &str) -> Option<&GroupNode> {
        self.find_in(&self.roots, None, id)
    }

    fn find_in(
        &self,
        level: &[GroupNodeId],
        parent_id: Option<&str>,
        id: &str,
    ) -> Option<&GroupNode> {
        for &node_id in level {
            let Some(node) = self.node(node_id) else {
                continue;
            };
            let node_group_id = group_id(parent_id, &node.key);
            if node_group_id == id {
                return Some(node);
            }
            if !id.starts_with(node_group_id.as_str()) {
                continue;
            }
            let children = self.children(node_id);
            if let Some(found) = self.find_in(children, Some(node_group_id.as_str()), id) {
                return Some(found);
            }
        }
        None
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

    fn by_char(row: &&str, key: &str) -> String {
        let pos: usize = key.parse().unwrap();
        row.chars().nth(pos).map(String::from).unwrap_or_default()
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_empty_keys_not_applicable() {
        let grouper = FieldGrouper::new(by_char);
        assert!(GroupTree::build(&["a"], &[], &grouper).is_none());
    }

    #[test]
    fn test_leaf_level_nodes_have_no_child_groups() {
        let rows = ["ax", "ay", "bx"];
        let tree = GroupTree::build(&rows, &keys(&["0"]), &FieldGrouper::new(by_char)).unwrap();

        assert_eq!(tree.roots().len(), 2);
        for &id in tree.roots() {
            assert!(tree.node(id).unwrap().is_leaf_level());
            assert!(tree.children(id).is_empty());
        }
        assert_eq!(tree.row_count(), 5);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_build_at_offsets_start_indices() {
        let rows = ["ax", "bx"];
        let tree =
            GroupTree::build_at(&rows, &keys(&["0"]), &FieldGrouper::new(by_char), 10).unwrap();
        let starts: Vec<usize> = tree
            .roots()
            .iter()
            .map(|&id| tree.node(id).unwrap().start_row_index)
            .collect();
        assert_eq!(starts, vec![10, 12]);
    }

    #[test]
    fn test_group_ids_pre_order() {
        let rows = ["ax", "ay", "bx"];
        let tree =
            GroupTree::build(&rows, &keys(&["0", "1"]), &FieldGrouper::new(by_char)).unwrap();
        assert_eq!(tree.group_ids(), vec!["a", "a__x", "a__y", "b", "b__x"]);
        assert_eq!(tree.group_count(), 5);
    }

    #[test]
    fn test_find_nested() {
        let rows = ["ax", "ay", "bx"];
        let tree =
            GroupTree::build(&rows, &keys(&["0", "1"]), &FieldGrouper::new(by_char)).unwrap();
        let node = tree.find("a__y").unwrap();
        assert_eq!(node.key, "y");
        assert_eq!(*node.child_rows, [1]);
        assert_eq!(node.start_row_index, 3);
        assert!(tree.find("c").is_none());
        assert!(tree.find("a__z").is_none());
    }
}
