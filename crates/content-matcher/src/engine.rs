use std::cmp::Ordering;

use procedure_types::{MalformedInputError, ProcedureStep, ScreenshotAnalysis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{MatcherConfig, WEIGHT_SCALE};
use crate::error::ConfigError;
use crate::scorers::section::SectionMatchScorer;
use crate::scorers::sequence::SequenceScorer;
use crate::scorers::text::TextSimilarityScorer;
use crate::scorers::ui::UiElementScorer;
use crate::scorers::{Scorer, ScoringContext};
use crate::trace::{ScoreTrace, ScorerResult};

/// How confidently a screenshot can be assigned to its best step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    AutoAssign,
    Review,
    Manual,
    Reject,
}

impl ConfidenceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::AutoAssign => "auto_assign",
            ConfidenceBand::Review => "review",
            ConfidenceBand::Manual => "manual",
            ConfidenceBand::Reject => "reject",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub text: f64,
    pub ui: f64,
    pub section: f64,
    pub sequence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub step_id: String,
    pub step_order: u32,
    pub composite_score: f64,
    pub component_scores: ComponentScores,
    pub confidence_band: ConfidenceBand,
}

/// Ranked candidates for one screenshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    pub best_match: Option<MatchResult>,
}

impl MatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Scores screenshots against procedure steps
#[derive(Debug, Clone, Default)]
pub struct ContentMatcher {
    config: MatcherConfig,
}

impl ContentMatcher {
    pub fn new(config: MatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    fn scorers(&self) -> Vec<Box<dyn Scorer>> {
        let weights = &self.config.weights;
        vec![
            Box::new(TextSimilarityScorer {
                weight: weights.text,
            }),
            Box::new(UiElementScorer { weight: weights.ui }),
            Box::new(SectionMatchScorer {
                weight: weights.section,
                mismatch_credit: self.config.section_mismatch_credit,
            }),
            Box::new(SequenceScorer {
                weight: weights.sequence,
            }),
        ]
    }

    pub fn classify(&self, composite: f64) -> ConfidenceBand {
        let t = &self.config.thresholds;
        if composite >= t.auto_assign {
            ConfidenceBand::AutoAssign
        } else if composite >= t.review {
            ConfidenceBand::Review
        } else if composite >= t.manual {
            ConfidenceBand::Manual
        } else {
            ConfidenceBand::Reject
        }
    }

    /// Score a single step, keeping the per-scorer breakdown
    pub fn score_step(
        &self,
        analysis: &ScreenshotAnalysis,
        step: &ProcedureStep,
        position: u32,
        total_steps: usize,
    ) -> (MatchResult, ScoreTrace) {
        let ctx = ScoringContext {
            analysis,
            step,
            position,
            total_steps,
        };

        let mut weighted_bp = 0.0;
        let scorers: Vec<ScorerResult> = self
            .scorers()
            .iter()
            .map(|scorer| {
                let result = scorer.score(&ctx);
                weighted_bp += result.score * f64::from(scorer.weight());
                result
            })
            .collect();

        let composite = (weighted_bp / f64::from(WEIGHT_SCALE)).clamp(0.0, 1.0);
        let band = self.classify(composite);

        let component_scores = ComponentScores {
            text: scorers[0].score,
            ui: scorers[1].score,
            section: scorers[2].score,
            sequence: scorers[3].score,
        };

        debug!(
            step = %step.id,
            composite,
            text = component_scores.text,
            ui = component_scores.ui,
            section = component_scores.section,
            sequence = component_scores.sequence,
            "Scored step"
        );

        let result = MatchResult {
            step_id: step.id.clone(),
            step_order: step.order,
            composite_score: composite,
            component_scores,
            confidence_band: band,
        };
        let trace = ScoreTrace {
            step_id: step.id.clone(),
            scorers,
            composite,
            classification: band,
        };

        (result, trace)
    }

    /// Rank every step as a home for the screenshot
    pub fn match_screenshot_to_steps(
        &self,
        analysis: &ScreenshotAnalysis,
        steps: &[ProcedureStep],
        position: u32,
    ) -> MatchOutcome {
        if steps.is_empty() {
            debug!("No candidate steps");
            return MatchOutcome::default();
        }

        let mut results: Vec<MatchResult> = steps
            .iter()
            .map(|step| self.score_step(analysis, step, position, steps.len()).0)
            .collect();
        rank_results(&mut results, position);

        let best_match = results.first().cloned();
        if let Some(best) = &best_match {
            info!(
                position,
                candidates = results.len(),
                best = %best.step_id,
                composite = best.composite_score,
                band = best.confidence_band.as_str(),
                "Matched screenshot"
            );
        }

        MatchOutcome {
            results,
            best_match,
        }
    }

    /// Parse the vision service's JSON and match it
    pub fn match_json(
        &self,
        analysis_json: &str,
        steps: &[ProcedureStep],
        position: u32,
    ) -> Result<MatchOutcome, MalformedInputError> {
        let analysis = ScreenshotAnalysis::from_json(analysis_json).map_err(|e| {
            warn!(error = %e, "Rejected malformed screenshot analysis");
            e
        })?;
        Ok(self.match_screenshot_to_steps(&analysis, steps, position))
    }
}

/// Composite compared at 1e-9 resolution so float noise cannot break ties
fn score_key(composite: f64) -> i64 {
    (composite * 1e9).round() as i64
}

/// Sort by composite descending, then closeness to `position`, then
/// earliest step
pub fn rank_results(results: &mut [MatchResult], position: u32) {
    results.sort_by(|a, b| {
        score_key(b.composite_score)
            .cmp(&score_key(a.composite_score))
            .then_with(|| {
                a.step_order
                    .abs_diff(position)
                    .cmp(&b.step_order.abs_diff(position))
            })
            .then_with(|| a.step_order.cmp(&b.step_order))
            .then_with(|| a.step_id.cmp(&b.step_id))
    });
}

impl PartialOrd for ConfidenceBand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConfidenceBand {
    /// AutoAssign ranks highest
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = |band: &ConfidenceBand| match band {
            ConfidenceBand::Reject => 0,
            ConfidenceBand::Manual => 1,
            ConfidenceBand::Review => 2,
            ConfidenceBand::AutoAssign => 3,
        };
        rank(self).cmp(&rank(other))
    }
}
