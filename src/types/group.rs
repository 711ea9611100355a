use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Separator placed between ancestor keys when building a group id.
pub const GROUP_ID_SEPARATOR: &str = "__";

/// Build the id of a group from its parent's id and its own key.
///
/// Root groups use their key verbatim; nested groups are `parent__key`.
/// Ids stay stable across recomputation as long as the key values do, which is
/// what lets expansion state survive a regroup.
pub fn group_id(parent_id: Option<&str>, key: &str) -> String {
    match parent_id {
        Some(parent) => format!("{parent}{GROUP_ID_SEPARATOR}{key}"),
        None => key.to_string(),
    }
}

/// A group header as it appears in the flattened row sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRow {
    /// Chain of keys from the root, joined with [`GROUP_ID_SEPARATOR`]
    pub id: String,
    /// Key value this group was partitioned on
    pub key: String,
    /// Id of the enclosing group (`None` at the top level)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Nesting depth (0 = outermost grouping key)
    pub level: u32,
    /// 0-based position among its siblings
    pub pos_in_set: usize,
    /// Number of siblings including itself
    pub set_size: usize,
    /// Position of this header under full expansion
    pub start_row_index: usize,
    pub is_expanded: bool,
    /// Indices of every raw row under this group, shared with the group tree
    pub child_rows: Arc<[usize]>,
}

impl GroupRow {
    /// Number of raw rows under this group (at any depth).
    pub fn child_count(&self) -> usize {
        self.child_rows.len()
    }

    /// Whether this is a top-level group.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_root_id_is_key() {
        assert_eq!(group_id(None, "A"), "A");
    }

    #[test]
    fn test_nested_id_joins_parent() {
        assert_eq!(group_id(Some("A"), "x"), "A__x");
        assert_eq!(group_id(Some("A__x"), "1"), "A__x__1");
    }

    #[test]
    fn test_group_row_serializes_camel_case() {
        let row = GroupRow {
            id: "A".into(),
            key: "A".into(),
            parent_id: None,
            level: 0,
            pos_in_set: 0,
            set_size: 2,
            start_row_index: 0,
            is_expanded: true,
            child_rows: vec![0, 1].into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["startRowIndex"], 0);
        assert_eq!(json["posInSet"], 0);
        assert_eq!(json["isExpanded"], true);
        assert!(json.get("parentId").is_none());
        assert!(row.is_root());
        assert_eq!(row.child_count(), 2);
    }
}
