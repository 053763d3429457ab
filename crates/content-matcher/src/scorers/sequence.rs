use crate::trace::ScorerResult;

use super::{result, Scorer, ScoringContext};

/// `max(0, 1 - |position - order| / total_steps)`
pub fn proximity(position: u32, order: u32, total_steps: usize) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    let distance = f64::from(position.abs_diff(order));
    (1.0 - distance / total_steps as f64).max(0.0)
}

pub struct SequenceScorer {
    pub weight: u32,
}

impl Scorer for SequenceScorer {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> ScorerResult {
        let score = proximity(ctx.position, ctx.step.order, ctx.total_steps);
        result(
            self.name(),
            self.weight,
            score,
            format!(
                "position={} order={} total_steps={}",
                ctx.position, ctx.step.order, ctx.total_steps
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_proximity() {
        assert_eq!(proximity(3, 3, 8), 1.0);
        assert_eq!(proximity(3, 7, 8), 0.5);
        assert_eq!(proximity(1, 20, 8), 0.0);
        assert_eq!(proximity(1, 1, 0), 0.0);
    }

    proptest! {
        #[test]
        fn proximity_decreases_with_distance(
            order in 0u32..50,
            near in 0u32..25,
            further in 0u32..25,
            total in 1usize..60
        ) {
            let close = proximity(order + near, order, total);
            let far = proximity(order + near + further, order, total);
            prop_assert!(far <= close);
            prop_assert!((0.0..=1.0).contains(&far));
        }
    }
}
