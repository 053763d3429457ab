pub mod config;
pub mod engine;
pub mod error;
pub mod scorers;
pub mod trace;
pub mod verbs;

pub use config::{MatchWeights, MatcherConfig, Thresholds};
pub use engine::{
    rank_results, ComponentScores, ConfidenceBand, ContentMatcher, MatchOutcome, MatchResult,
};
pub use error::ConfigError;
pub use trace::{ScoreTrace, ScorerResult};
pub use verbs::{StepVerb, UiTarget};
