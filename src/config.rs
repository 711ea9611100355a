//! Grid configuration.
//!
//! Settings arrive as JSON (CLI file, JS object) and are validated here, so
//! the viewport math downstream never sees a zero or non-finite row height.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::flatten::ExpandedGroups;
use crate::layout::OVERSCAN_ROWS;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 35.0;

/// Default viewport (content area) height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

/// Configuration for a grouped, virtualized row list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Uniform height of every row (leaf or group header)
    pub row_height: f64,
    /// Height of the scrollable content area
    pub viewport_height: f64,
    /// Extra rows rendered above and below the visible area
    pub overscan_rows: usize,
    /// Grouping dimensions, outermost first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// Group ids that start out expanded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expanded_group_ids: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan_rows: OVERSCAN_ROWS,
            group_by: Vec::new(),
            expanded_group_ids: Vec::new(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or any value fails [`GridConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check geometry and grouping values.
    ///
    /// # Errors
    /// Returns an error for a non-positive/non-finite row height, a negative/non-finite
    /// viewport height, or an empty grouping key.
    pub fn validate(&self) -> Result<()> {
        validate_row_height(self.row_height)?;
        validate_viewport_height(self.viewport_height)?;
        if self.group_by.iter().any(String::is_empty) {
            return Err(GridError::InvalidConfig(
                "groupBy keys must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the initial expansion state from `expanded_group_ids`.
    pub fn expanded_groups(&self) -> ExpandedGroups {
        self.expanded_group_ids.iter().cloned().collect()
    }
}

/// Reject row heights the range math cannot divide by.
///
/// # Errors
/// Returns [`GridError::InvalidRowHeight`] unless `row_height` is finite and > 0.
pub fn validate_row_height(row_height: f64) -> Result<()> {
    if row_height.is_finite() && row_height > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidRowHeight(row_height))
    }
}

/// Reject negative or non-finite viewport heights.
///
/// # Errors
/// Returns [`GridError::InvalidViewportHeight`] unless `height` is finite and >= 0.
pub fn validate_viewport_height(height: f64) -> Result<()> {
    if height.is_finite() && height >= 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidViewportHeight(height))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(config.overscan_rows, OVERSCAN_ROWS);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GridConfig::from_json(r#"{"rowHeight": 20, "groupBy": ["country"]}"#)
            .expect("valid config");
        assert_eq!(config.row_height, 20.0);
        assert_eq!(config.viewport_height, DEFAULT_VIEWPORT_HEIGHT);
        assert_eq!(config.group_by, vec!["country".to_string()]);
    }

    #[test]
    fn test_zero_row_height_rejected() {
        let err = GridConfig::from_json(r#"{"rowHeight": 0}"#).unwrap_err();
        assert!(matches!(err, GridError::InvalidRowHeight(h) if h == 0.0));
    }

    #[test]
    fn test_nan_row_height_rejected() {
        assert!(validate_row_height(f64::NAN).is_err());
        assert!(validate_row_height(f64::INFINITY).is_err());
        assert!(validate_row_height(-1.0).is_err());
    }

    #[test]
    fn test_empty_group_key_rejected() {
        let err = GridConfig::from_json(r#"{"groupBy": ["a", ""]}"#).unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = GridConfig::from_json("{rowHeight:").unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }

    #[test]
    fn test_expanded_groups_from_config() {
        let config = GridConfig {
            expanded_group_ids: vec!["A".into(), "A__x".into()],
            ..GridConfig::default()
        };
        let expanded = config.expanded_groups();
        assert!(expanded.contains("A"));
        assert!(expanded.contains("A__x"));
        assert_eq!(expanded.len(), 2);
    }
}
