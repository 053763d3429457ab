pub mod section;
pub mod sequence;
pub mod text;
pub mod ui;

use procedure_types::{ProcedureStep, ScreenshotAnalysis};

use crate::config::MatchWeights;
use crate::trace::ScorerResult;

/// Inputs shared by every scorer for one (screenshot, step) pair
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub analysis: &'a ScreenshotAnalysis,
    pub step: &'a ProcedureStep,
    /// Position of the screenshot in capture order
    pub position: u32,
    pub total_steps: usize,
}

pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;
    /// Weight in basis points
    fn weight(&self) -> u32;
    fn score(&self, ctx: &ScoringContext<'_>) -> ScorerResult;
}

/// Build a trace entry for a component score in [0, 1]
pub(crate) fn result(
    name: &str,
    weight_bp: u32,
    score: f64,
    detail: String,
) -> ScorerResult {
    let score = score.clamp(0.0, 1.0);
    let weight = MatchWeights::fraction(weight_bp);
    ScorerResult {
        rule: name.to_string(),
        score,
        weight,
        weighted_score: score * weight,
        detail,
    }
}
