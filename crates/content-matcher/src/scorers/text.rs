use std::collections::BTreeSet;

use crate::trace::ScorerResult;

use super::{result, Scorer, ScoringContext};

/// Words too common to say anything about a screen
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "to", "of", "and", "or", "on", "in", "for", "from", "with", "your", "this",
    "that",
];

/// Lowercased alphanumeric tokens
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Step tokens minus stopwords, unless that would leave nothing
pub fn content_tokens(text: &str) -> BTreeSet<String> {
    let all = tokenize(text);
    let content: BTreeSet<String> = all
        .iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .cloned()
        .collect();
    if content.is_empty() {
        all
    } else {
        content
    }
}

/// Fraction of the step's distinct content tokens found in the OCR text
pub fn token_coverage(step_text: &str, ocr_text: &str) -> f64 {
    let wanted = content_tokens(step_text);
    if wanted.is_empty() {
        return 0.0;
    }
    let seen = tokenize(ocr_text);
    let shared = wanted.iter().filter(|t| seen.contains(*t)).count();
    shared as f64 / wanted.len() as f64
}

pub struct TextSimilarityScorer {
    pub weight: u32,
}

impl Scorer for TextSimilarityScorer {
    fn name(&self) -> &'static str {
        "text_similarity"
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ScorerResult {
        let score = token_coverage(&ctx.step.text, &ctx.analysis.ocr_text);
        result(
            self.name(),
            self.weight,
            score,
            format!("step_text={:?} ocr_text={:?}", ctx.step.text, ctx.analysis.ocr_text),
        )
    }
}
