use thiserror::Error;

/// Errors raised while loading an [`EditorConfig`](crate::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON config failed to parse.
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML config failed to parse.
    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The same layout appears twice in `layoutOptions`.
    #[error("Layout option '{0}' is listed more than once")]
    DuplicateLayout(String),
    /// Fit-text font size defaults are inverted.
    #[error("Font size 'small' ({small}) must be below 'larger' ({larger})")]
    InvertedFontSizes {
        /// Configured small size.
        small: u32,
        /// Configured larger size.
        larger: u32,
    },
}

/// Errors raised while reading a block's attribute record.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The record was not a JSON object.
    #[error("Block attributes must be an object, got {0}")]
    NotAnObject(&'static str),
    /// A field had a shape that could not be read.
    #[error("Invalid block attributes: {0}")]
    Invalid(#[from] serde_json::Error),
}
