//! groupgrid - grouped rows for virtualized data grids
//!
//! Computes what a scrolling grid with collapsible, nested groups should draw:
//! - Recursive grouping of rows by an ordered list of keys
//! - Flattening of the group tree into headers + rows, honoring expansion state
//! - The inclusive row range to render for a scroll offset, with overscan
//! - Per-stage memoization so a scroll frame never regroups or reflattens
//!
//! Rendering, input handling and styling belong to the caller.
//!
//! # Usage (Rust)
//!
//! ```
//! use groupgrid::{ExpandedGroups, FieldGrouper, GridConfig, ViewportRows};
//!
//! let rows = vec![("A", 1), ("A", 2), ("B", 3)];
//! let config = GridConfig {
//!     row_height: 20.0,
//!     viewport_height: 100.0,
//!     group_by: vec!["letter".to_string()],
//!     ..GridConfig::default()
//! };
//! let grouper = FieldGrouper::new(|row: &(&str, i32), _key: &str| row.0.to_string());
//! let mut view = ViewportRows::new(rows, &config).unwrap().with_grouper(grouper);
//!
//! let mut expanded = ExpandedGroups::new();
//! expanded.expand("A");
//! let window = view.compute(&expanded);
//! assert_eq!(window.len(), 4); // A, (A,1), (A,2), B
//! assert!(window.is_group_row(0));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod flatten;
pub mod grouping;
pub mod layout;
pub mod types;
pub mod viewer;
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use flatten::{ExpandedGroups, FlatRows};
pub use grouping::{FieldGrouper, GroupTree, JsonFieldGrouper, RowGrouper};
pub use layout::{vertical_range_to_render, RowRange, Viewport};
pub use types::*;
pub use viewer::{PipelineStats, RenderWindow, RenderedRow, ViewportRows};
pub use wasm::GroupedRowsView;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
