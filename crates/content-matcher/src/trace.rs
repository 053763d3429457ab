use serde::{Deserialize, Serialize};

use crate::engine::ConfidenceBand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerResult {
    pub rule: String,
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub detail: String,
}

/// How one step's composite score was assembled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub step_id: String,
    pub scorers: Vec<ScorerResult>,
    pub composite: f64,
    pub classification: ConfidenceBand,
}
