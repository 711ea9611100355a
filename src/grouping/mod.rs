//! Grouping engine.
//!
//! This module handles:
//! - The [`RowGrouper`] capability a caller implements to partition rows by a key
//! - Ready-made groupers for per-row key extraction and JSON objects
//! - Recursive partitioning into an arena-backed [`GroupTree`]
//!
//! Rows are never copied: partitions and group nodes carry indices into the
//! caller's row slice.

mod json;
mod tree;

use std::collections::HashMap;

pub use json::JsonFieldGrouper;
pub use tree::{GroupNode, GroupNodeId, GroupTree};

/// One partition level: `(key value, member row indices)` in display order.
pub type Partition = Vec<(String, Vec<usize>)>;

/// Partitions rows by a grouping key.
///
/// `members` are indices into `rows`; the returned entries must each hold a
/// subset of `members`, and their order is the order siblings are displayed in.
/// The engine trusts the partition and does not check disjointness or coverage.
pub trait RowGrouper<R> {
    fn group_rows(&self, rows: &[R], members: &[usize], key: &str) -> Partition;
}

impl<R, F> RowGrouper<R> for F
where
    F: Fn(&[R], &[usize], &str) -> Partition,
{
    fn group_rows(&self, rows: &[R], members: &[usize], key: &str) -> Partition {
        self(rows, members, key)
    }
}

/// Groups rows by a per-row key extractor, ordering groups by first appearance.
pub struct FieldGrouper<F> {
    extract: F,
}

impl<F> FieldGrouper<F> {
    pub fn new(extract: F) -> Self {
        Self { extract }
    }
}

impl<R, F> RowGrouper<R> for FieldGrouper<F>
where
    F: Fn(&R, &str) -> String,
{
    fn group_rows(&self, rows: &[R], members: &[usize], key: &str) -> Partition {
        partition_by(rows, members, |row| (self.extract)(row, key))
    }
}

/// Partition `members` by `value_of`, keeping first-appearance order of values.
pub(crate) fn partition_by<R>(
    rows: &[R],
    members: &[usize],
    mut value_of: impl FnMut(&R) -> String,
) -> Partition {
    let mut partition: Partition = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for &index in members {
        let Some(row) = rows.get(index) else {
            continue;
        };
        let value = value_of(row);
        match positions.get(&value) {
            Some(&pos) => {
                if let Some((_, bucket)) = partition.get_mut(pos) {
                    bucket.push(index);
                }
            }
            None => {
                positions.insert(value.clone(), partition.len());
                partition.push((value, vec![index]));
            }
        }
    }

    partition
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_field_grouper_first_appearance_order() {
        let rows = vec!["b1", "a1", "b2", "c1", "a2"];
        let grouper = FieldGrouper::new(|row: &&str, _key: &str| row[..1].to_string());
        let members: Vec<usize> = (0..rows.len()).collect();

        let partition = grouper.group_rows(&rows, &members, "initial");

        let keys: Vec<&str> = partition.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(partition[0].1, vec![0, 2]);
        assert_eq!(partition[1].1, vec![1, 4]);
        assert_eq!(partition[2].1, vec![3]);
    }

    #[test]
    fn test_partition_respects_member_subset() {
        let rows = vec![1, 2, 3, 4, 5, 6];
        let partition = partition_by(&rows, &[1, 3, 5], |n| (n % 3).to_string());
        assert_eq!(
            partition,
            vec![("2".to_string(), vec![1]), ("1".to_string(), vec![3]), ("0".to_string(), vec![5])]
        );
    }

    #[test]
    fn test_partition_skips_out_of_bounds_members() {
        let rows = vec![1];
        let partition = partition_by(&rows, &[0, 7], |n| n.to_string());
        assert_eq!(partition, vec![("1".to_string(), vec![0])]);
    }

    #[test]
    fn test_closure_grouper() {
        let grouper = |_rows: &[u8], members: &[usize], _key: &str| -> Partition {
            vec![("all".to_string(), members.to_vec())]
        };
        let partition = grouper.group_rows(&[1u8, 2], &[0, 1], "any");
        assert_eq!(partition, vec![("all".to_string(), vec![0, 1])]);
    }
}
