//! Structured error types for the NusaWave viewer.

/// All errors that can occur while loading configuration and driving the viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Configuration payload was not valid JSON or did not match the tree schema.
    #[error("Configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration request could not be completed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The configuration request completed with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    /// Durable key-value storage was unavailable or rejected a write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A required DOM element was missing or had the wrong type.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Invalid viewer options.
    #[error("Invalid options: {0}")]
    Options(String),

    /// I/O error (CLI only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;

impl From<String> for ViewerError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ViewerError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ViewerError> for wasm_bindgen::JsValue {
    fn from(e: ViewerError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
