use thiserror::Error;

/// Errors raised while building or loading a rule table
#[derive(Error, Debug)]
pub enum RuleTableError {
    #[error("Failed to parse rule table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read rule table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("Rule table contains no rules")]
    Empty,
}
