use thiserror::Error;

/// Invalid matcher configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse matcher config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scorer weights must sum to 10000 basis points, got {0}")]
    WeightSum(u64),

    #[error("Section mismatch credit must be within [0, 1], got {0}")]
    SectionCredit(f64),

    #[error("Thresholds must satisfy 0 <= manual < review < auto_assign <= 1")]
    Thresholds,
}
