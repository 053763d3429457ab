use crate::trace::ScorerResult;
use crate::verbs::StepVerb;

use super::{result, Scorer, ScoringContext};

/// Binary match between the detected element labels and the phrase the
/// step's leading verb acts on
pub struct UiElementScorer {
    pub weight: u32,
}

impl Scorer for UiElementScorer {
    fn name(&self) -> &'static str {
        "ui_element"
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ScorerResult {
        let Some((verb, phrase)) = StepVerb::split_step(&ctx.step.text) else {
            return result(
                self.name(),
                self.weight,
                0.0,
                format!("no mapped verb in {:?}", ctx.step.text),
            );
        };

        let phrase_words = words(phrase);
        let matched = if phrase_words.is_empty() {
            None
        } else {
            ctx.analysis.ui_elements.iter().find(|element| {
                let label_words = words(&element.label);
                !label_words.is_empty()
                    && (contains_run(&phrase_words, &label_words)
                        || contains_run(&label_words, &phrase_words))
            })
        };
        let phrase = phrase.to_lowercase();

        let (score, detail) = match matched {
            Some(element) => (
                1.0,
                format!(
                    "verb={} target={} matched {} {:?}",
                    verb.as_str(),
                    verb.target().as_str(),
                    element.element_type,
                    element.label
                ),
            ),
            None => (
                0.0,
                format!(
                    "verb={} target={} phrase={:?} matched no label",
                    verb.as_str(),
                    verb.target().as_str(),
                    phrase
                ),
            ),
        };

        result(self.name(), self.weight, score, detail)
    }
}

/// Lowercased alphanumeric words in reading order
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when `needle` appears as consecutive whole words in `haystack`
fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use procedure_types::{ProcedureStep, ScreenshotAnalysis, UiElement};

    fn score(step_text: &str, labels: &[&str]) -> f64 {
        let mut analysis = ScreenshotAnalysis::new("", "intro");
        for label in labels {
            analysis = analysis.with_element(UiElement::new("button", *label));
        }
        let step = ProcedureStep::new("s1", step_text, "intro", 1);
        let ctx = ScoringContext {
            analysis: &analysis,
            step: &step,
            position: 1,
            total_steps: 1,
        };
        UiElementScorer { weight: 3_000 }.score(&ctx).score
    }

    #[test]
    fn test_label_inside_action_phrase() {
        assert_eq!(score("Enter the account number", &["Account Number"]), 1.0);
        assert_eq!(score("Click Save", &["Cancel", "save"]), 1.0);
    }

    #[test]
    fn test_phrase_inside_label() {
        assert_eq!(score("Select card type", &["Card Type (required)"]), 1.0);
    }

    #[test]
    fn test_no_matching_label() {
        assert_eq!(score("Click Save", &["Cancel"]), 0.0);
        assert_eq!(score("Click Save", &[""]), 0.0);
        assert_eq!(score("Click Save", &[]), 0.0);
    }

    #[test]
    fn test_label_must_match_whole_words() {
        assert_eq!(score("Click Next", &["X"]), 0.0);
        assert_eq!(score("Enter the amount", &["Amount Due"]), 0.0);
        assert_eq!(score("Click Next", &["x", "next"]), 1.0);
    }

    #[test]
    fn test_unmapped_verb_scores_zero() {
        assert_eq!(score("Hand over the Account Number", &["Account Number"]), 0.0);
    }

    #[test]
    fn test_bare_verb_matches_nothing() {
        assert_eq!(score("Verify", &["Verify"]), 0.0);
    }
}
