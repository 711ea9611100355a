//! Grouping for rows that arrive as JSON objects (CLI input, JS values).

use serde_json::Value;

use super::{partition_by, Partition, RowGrouper};

/// Groups `serde_json::Value` objects by the value of a named field.
///
/// Strings group verbatim, missing fields and `null` group under the empty
/// string, and other scalars group by their JSON text (`1`, `true`, ...).
/// Groups are ordered by first appearance.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFieldGrouper;

impl JsonFieldGrouper {
    /// Group key for `row[field]`.
    pub fn key_value(row: &Value, field: &str) -> String {
        match row.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl RowGrouper<Value> for JsonFieldGrouper {
    fn group_rows(&self, rows: &[Value], members: &[usize], key: &str) -> Partition {
        partition_by(rows, members, |row| Self::key_value(row, key))
    }
}
