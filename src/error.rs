use thiserror::Error;

/// Errors raised by the feature extractor and the dataset loader.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A document tokenized to nothing where a term-frequency denominator is needed.
    #[error("document {index} has no tokens, term frequency is undefined")]
    InvalidInput { index: usize },

    /// A dataset record lacks `text` or `label`, or has the wrong shape.
    #[error("malformed dataset record {index}: {reason}")]
    MalformedInput { index: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
