use crate::trace::ScorerResult;

use super::{result, Scorer, ScoringContext};

pub struct SectionMatchScorer {
    pub weight: u32,
    /// Score when the suggested section differs from the step's
    pub mismatch_credit: f64,
}

impl Scorer for SectionMatchScorer {
    fn name(&self) -> &'static str {
        "section_match"
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ScorerResult {
        let suggested = &ctx.analysis.suggested_section;
        let score = if *suggested == ctx.step.section {
            1.0
        } else {
            self.mismatch_credit
        };

        result(
            self.name(),
            self.weight,
            score,
            format!("suggested={} step={}", suggested, ctx.step.section),
        )
    }
}
