//! JavaScript bindings.
//!
//! `GroupedRowsView` wraps the pipeline for rows that arrive as plain JS
//! objects, grouped by field name. Expansion state lives next to it so a
//! grid component can forward toggle intents straight through.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GroupedRowsView } from 'groupgrid';
//! await init();
//! const view = new GroupedRowsView(rows, { rowHeight: 35, groupBy: ['country'] });
//! view.toggle_group('Norway');
//! view.set_scroll_top(el.scrollTop);
//! const { range, rows: visible } = view.visible_rows();
//! ```

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::GridConfig;
use crate::flatten::ExpandedGroups;
use crate::grouping::JsonFieldGrouper;
use crate::layout::RowRange;
use crate::viewer::{RenderedRow, ViewportRows};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Render state handed to JS on every frame.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VisibleRows<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<RowRange>,
    row_count: usize,
    rows_count: usize,
    total_height: f64,
    rows: Vec<RenderedRow<'a, Value>>,
}

/// Grouped, virtualized view over JSON rows.
#[wasm_bindgen]
pub struct GroupedRowsView {
    rows: ViewportRows<Value, JsonFieldGrouper>,
    expanded: ExpandedGroups,
}

#[wasm_bindgen]
impl GroupedRowsView {
    /// Create a view from an array of row objects and an optional config object.
    ///
    /// # Errors
    /// Returns an error if `rows` is not an array or the config is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: JsValue, config: JsValue) -> Result<GroupedRowsView, JsValue> {
        console_error_panic_hook::set_once();

        let rows: Vec<Value> = serde_wasm_bindgen::from_value(rows).map_err(js_error)?;
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };

        let expanded = config.expanded_groups();
        let rows = ViewportRows::new(rows, &config)
            .map_err(js_error)?
            .with_grouper(JsonFieldGrouper);
        Ok(Self { rows, expanded })
    }

    /// Replace the row data.
    ///
    /// # Errors
    /// Returns an error if `rows` is not an array.
    pub fn set_rows(&mut self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<Value> = serde_wasm_bindgen::from_value(rows).map_err(js_error)?;
        self.rows.set_rows(rows);
        Ok(())
    }

    /// Replace the grouping fields. Non-string entries are ignored.
    ///
    /// # Errors
    /// Returns an error if a field name is empty.
    pub fn set_group_by(&mut self, fields: js_sys::Array) -> Result<(), JsValue> {
        let fields: Vec<String> = fields.iter().filter_map(|v| v.as_string()).collect();
        self.rows.set_group_by(fields).map_err(js_error)
    }

    /// Flip a group's expansion. Returns the new state.
    pub fn toggle_group(&mut self, id: &str) -> bool {
        self.expanded.toggle(id)
    }

    pub fn is_group_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Replace the expansion state. Non-string entries are ignored.
    pub fn set_expanded_groups(&mut self, ids: js_sys::Array) {
        self.expanded = ids.iter().filter_map(|v| v.as_string()).collect();
    }

    pub fn expand_all(&mut self) {
        let window = self.rows.compute(&self.expanded);
        if let Some(tree) = window.tree() {
            self.expanded.expand_all(tree);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.rows.set_scroll_top(scroll_top);
    }

    pub fn scroll_by(&mut self, delta_y: f64) {
        self.rows.scroll_by(delta_y);
    }

    /// Bring a group header into view. Returns `false` if it is not visible.
    pub fn scroll_to_group(&mut self, id: &str) -> bool {
        self.rows.scroll_to_group(id, &self.expanded)
    }

    /// Scroll offset clamped to the current content.
    pub fn scroll_top(&mut self) -> f64 {
        self.rows.compute(&self.expanded);
        self.rows.viewport().scroll_top
    }

    /// # Errors
    /// Returns an error if `height` is negative or not finite.
    pub fn resize(&mut self, height: f64) -> Result<(), JsValue> {
        self.rows.resize(height).map_err(js_error)
    }

    /// # Errors
    /// Returns an error if `row_height` is not finite and positive.
    pub fn set_row_height(&mut self, row_height: f64) -> Result<(), JsValue> {
        self.rows.set_row_height(row_height).map_err(js_error)
    }

    /// Current flattened row count.
    pub fn row_count(&mut self) -> usize {
        self.rows.compute(&self.expanded).len()
    }

    /// Row count under full expansion.
    pub fn rows_count(&mut self) -> usize {
        self.rows.compute(&self.expanded).rows_count()
    }

    pub fn total_height(&mut self) -> f64 {
        self.rows.compute(&self.expanded).total_height()
    }

    /// Rows to render for the current scroll position, as plain JS objects.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn visible_rows(&mut self) -> Result<JsValue, JsValue> {
        let window = self.rows.compute(&self.expanded);
        let visible = VisibleRows {
            range: window.range(),
            row_count: window.len(),
            rows_count: window.rows_count(),
            total_height: window.total_height(),
            rows: window.rendered_rows().collect(),
        };
        visible
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}
