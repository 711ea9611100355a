//! Structured error types for groupgrid.
//!
//! The grouping, flattening and range algorithms are total; errors only come
//! from configuration validation and the JSON/I/O surfaces around them.

/// All errors that can occur while configuring or feeding a grouped grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Row height must be a finite, strictly positive number.
    #[error("Invalid row height: {0} (must be finite and > 0)")]
    InvalidRowHeight(f64),

    /// Viewport height must be a finite, non-negative number.
    #[error("Invalid viewport height: {0} (must be finite and >= 0)")]
    InvalidViewportHeight(f64),

    /// Structurally valid config with an unusable value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors from the binding layers.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
