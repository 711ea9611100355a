//! Shared fixtures for integration tests.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use groupgrid::{FieldGrouper, FlatRow, FlatRows, GroupRow};

/// A caller row with two grouping fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub g: String,
    pub h: String,
    pub value: u32,
}

pub fn record(g: &str, h: &str, value: u32) -> Record {
    Record {
        g: g.to_string(),
        h: h.to_string(),
        value,
    }
}

/// Groups `Record`s by the field named `"g"` or `"h"`.
pub fn record_grouper() -> FieldGrouper<fn(&Record, &str) -> String> {
    FieldGrouper::new(record_field as fn(&Record, &str) -> String)
}

fn record_field(row: &Record, key: &str) -> String {
    match key {
        "g" => row.g.clone(),
        "h" => row.h.clone(),
        other => panic!("unknown grouping key {other}"),
    }
}

pub fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// `[A/x, A/y, B/x]`: two `g` values split 2/1, each further split by `h`.
pub fn two_level_rows() -> Vec<Record> {
    vec![record("A", "x", 1), record("A", "y", 2), record("B", "x", 3)]
}

/// A larger fixture: `groups` values of `g`, each with `subgroups` values of
/// `h`, each holding `per_leaf` rows.
pub fn grid_rows(groups: u32, subgroups: u32, per_leaf: u32) -> Vec<Record> {
    let mut rows = Vec::new();
    let mut value = 0;
    for g in 0..groups {
        for h in 0..subgroups {
            for _ in 0..per_leaf {
                rows.push(record(&format!("g{g}"), &format!("h{h}"), value));
                value += 1;
            }
        }
    }
    rows
}

/// All group headers in flat order.
pub fn group_rows(flat: &FlatRows) -> Vec<&GroupRow> {
    flat.iter().filter_map(FlatRow::as_group).collect()
}

/// All group ids in flat order.
pub fn group_ids(flat: &FlatRows) -> Vec<String> {
    group_rows(flat).into_iter().map(|g| g.id.clone()).collect()
}
