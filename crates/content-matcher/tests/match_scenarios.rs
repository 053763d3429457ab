//! Matching screenshots from a card replacement procedure

use anyhow::Result;
use content_matcher::{ConfidenceBand, ContentMatcher, MatcherConfig};
use pretty_assertions::assert_eq;
use procedure_types::{ProcedureStep, ScreenType};

fn card_replacement_steps() -> Vec<ProcedureStep> {
    vec![
        ProcedureStep::new("s1", "Navigate to Member Services", "lookup", 1),
        ProcedureStep::new("s2", "Enter the account number", "card-selection", 2),
        ProcedureStep::new("s3", "Select the card type", "card-selection", 3),
        ProcedureStep::new("s4", "Check Expedited Shipping", "shipping", 4),
        ProcedureStep::new("s5", "Click Submit Order", "shipping", 5),
        ProcedureStep::new("s6", "Verify the confirmation number", "confirmation", 6),
    ]
}

const ACCOUNT_SCREEN: &str = r#"{
    "ocr_text": "Card Replacement\nAccount Number: ____\nContinue",
    "screen_type": "form",
    "ui_elements": [
        {"type": "field", "label": "Account Number", "position": {"x": 40, "y": 32}},
        {"type": "button", "label": "Continue"}
    ],
    "suggested_section": "Card-Selection"
}"#;

#[test]
fn account_screen_lands_on_account_step() -> Result<()> {
    let matcher = ContentMatcher::default();
    let outcome = matcher.match_json(ACCOUNT_SCREEN, &card_replacement_steps(), 2)?;

    let best = outcome.best_match.as_ref().expect("candidates exist");
    assert_eq!(best.step_id, "s2");
    assert_eq!(best.confidence_band, ConfidenceBand::AutoAssign);
    assert_eq!(outcome.results.len(), 6);
    Ok(())
}

#[test]
fn results_are_sorted_by_composite() -> Result<()> {
    let matcher = ContentMatcher::default();
    let outcome = matcher.match_json(ACCOUNT_SCREEN, &card_replacement_steps(), 2)?;

    let scores: Vec<f64> = outcome.results.iter().map(|r| r.composite_score).collect();
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(scores, sorted);
    assert_eq!(outcome.best_match.as_ref(), outcome.results.first());
    Ok(())
}

#[test]
fn unrelated_screen_is_not_auto_assigned() -> Result<()> {
    let json = r#"{
        "ocr_text": "Teller Drawer Balance",
        "screen_type": "dashboard",
        "suggested_section": "cash-handling"
    }"#;
    let outcome = ContentMatcher::default().match_json(json, &card_replacement_steps(), 9)?;
    let best = outcome.best_match.expect("candidates exist");
    assert!(best.confidence_band < ConfidenceBand::Review, "{:?}", best);
    Ok(())
}

#[test]
fn malformed_analysis_is_rejected() {
    let matcher = ContentMatcher::default();
    assert!(matcher
        .match_json(r#"{"ui_elements": []}"#, &card_replacement_steps(), 1)
        .is_err());
}

#[test]
fn screen_type_is_carried_through_parsing() -> Result<()> {
    let analysis = procedure_types::ScreenshotAnalysis::from_json(ACCOUNT_SCREEN)?;
    assert_eq!(analysis.screen_type, ScreenType::Form);
    Ok(())
}

#[test]
fn custom_section_credit_changes_mismatch_score() -> Result<()> {
    let config = MatcherConfig::from_json(r#"{"section_mismatch_credit": 0.0}"#)?;
    let matcher = ContentMatcher::new(config)?;
    let steps = card_replacement_steps();
    let outcome = matcher.match_json(ACCOUNT_SCREEN, &steps, 2)?;

    let shipping = outcome
        .results
        .iter()
        .find(|r| r.step_id == "s5")
        .expect("step scored");
    assert_eq!(shipping.component_scores.section, 0.0);
    Ok(())
}
