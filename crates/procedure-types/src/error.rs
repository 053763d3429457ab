use thiserror::Error;

/// Input that cannot be interpreted as a document tree or screenshot analysis.
///
/// Callers should treat this as non-retryable: the same bytes will fail the
/// same way every time.
#[derive(Error, Debug)]
pub enum MalformedInputError {
    #[error("Failed to parse input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input shape: {0}")]
    Shape(String),
}
