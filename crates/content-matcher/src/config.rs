use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Weights are held in basis points so the four components sum to
/// exactly 1.0
pub const WEIGHT_SCALE: u32 = 10_000;

pub const AUTO_ASSIGN_THRESHOLD: f64 = 0.60;
pub const REVIEW_THRESHOLD: f64 = 0.40;
pub const MANUAL_THRESHOLD: f64 = 0.20;

/// Credit for a screen suggested for a different section
pub const SECTION_MISMATCH_CREDIT: f64 = 0.3;

/// Component weights in basis points of the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub text: u32,
    pub ui: u32,
    pub section: u32,
    pub sequence: u32,
}

impl MatchWeights {
    /// Widened so oversized weights cannot wrap back to the scale
    pub fn total(&self) -> u64 {
        [self.text, self.ui, self.section, self.sequence]
            .into_iter()
            .map(u64::from)
            .sum()
    }

    /// A basis-point weight as a fraction of 1.0
    pub fn fraction(basis_points: u32) -> f64 {
        f64::from(basis_points) / f64::from(WEIGHT_SCALE)
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            text: 3_500,
            ui: 3_000,
            section: 2_000,
            sequence: 1_500,
        }
    }
}

/// Lower bounds of the confidence bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub auto_assign: f64,
    pub review: f64,
    pub manual: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            auto_assign: AUTO_ASSIGN_THRESHOLD,
            review: REVIEW_THRESHOLD,
            manual: MANUAL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub weights: MatchWeights,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default = "default_section_credit")]
    pub section_mismatch_credit: f64,
}

fn default_section_credit() -> f64 {
    SECTION_MISMATCH_CREDIT
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            thresholds: Thresholds::default(),
            section_mismatch_credit: SECTION_MISMATCH_CREDIT,
        }
    }
}

impl MatcherConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatcherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.weights.total();
        if total != u64::from(WEIGHT_SCALE) {
            return Err(ConfigError::WeightSum(total));
        }

        let credit = self.section_mismatch_credit;
        if !(0.0..=1.0).contains(&credit) {
            return Err(ConfigError::SectionCredit(credit));
        }

        let t = &self.thresholds;
        let ordered = 0.0 <= t.manual
            && t.manual < t.review
            && t.review < t.auto_assign
            && t.auto_assign <= 1.0;
        if !ordered {
            return Err(ConfigError::Thresholds);
        }

        Ok(())
    }
}
