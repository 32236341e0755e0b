//! Random roll evaluator
//!
//! Rolls each die of a formula with `rand`. A seeded evaluator gives
//! reproducible results for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::ports::outbound::{RollError, RollEvaluatorPort, RollOutcome, RollRequest};
use crate::domain::value_objects::DiceFormula;

#[derive(Default)]
pub struct RandomRollEvaluator {
    /// `None` rolls with the thread-local generator
    seeded: Option<Mutex<StdRng>>,
}

impl RandomRollEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn roll_dice(&self, formula: &DiceFormula) -> Result<Vec<i32>, RollError> {
        match &self.seeded {
            Some(rng) => {
                let mut rng = rng
                    .lock()
                    .map_err(|_| RollError::Evaluation("Dice generator poisoned".to_string()))?;
                Ok(roll_with(&mut *rng, formula))
            }
            None => Ok(roll_with(&mut rand::thread_rng(), formula)),
        }
    }
}

fn roll_with(rng: &mut impl Rng, formula: &DiceFormula) -> Vec<i32> {
    (0..formula.dice_count)
        .map(|_| rng.gen_range(1..=i32::from(formula.die_size)))
        .collect()
}

#[async_trait]
impl RollEvaluatorPort for RandomRollEvaluator {
    async fn evaluate(&self, request: RollRequest) -> Result<RollOutcome, RollError> {
        let rolls = self.roll_dice(&request.formula)?;
        let total = rolls
            .iter()
            .try_fold(request.formula.modifier, |total, roll| total.checked_add(*roll))
            .ok_or_else(|| {
                RollError::Evaluation(format!("Total of {} overflowed", request.formula))
            })?;
        tracing::debug!(formula = %request.formula, ?rolls, total, "Dice rolled");

        Ok(RollOutcome {
            formula: request.formula.to_string(),
            label: request.label,
            rolls,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DieSize;

    #[tokio::test]
    async fn test_single_die_within_faces() {
        let roller = RandomRollEvaluator::new();
        for _ in 0..50 {
            let outcome = roller
                .evaluate(RollRequest::new(DiceFormula::single(DieSize::D4)).with_label("[ability] Sea"))
                .await
                .unwrap();
            assert_eq!(outcome.rolls.len(), 1);
            assert!((1..=4).contains(&outcome.total));
            assert_eq!(outcome.formula, "1d4");
            assert_eq!(outcome.label.as_deref(), Some("[ability] Sea"));
        }
    }

    #[tokio::test]
    async fn test_modifier_applied() {
        let roller = RandomRollEvaluator::seeded(7);
        let formula = DiceFormula::parse("3d6-2").unwrap();
        for _ in 0..50 {
            let outcome = roller.evaluate(RollRequest::new(formula.clone())).await.unwrap();
            assert_eq!(outcome.rolls.len(), 3);
            assert_eq!(outcome.total, outcome.rolls.iter().sum::<i32>() - 2);
            assert!(formula.range().unwrap().contains(&outcome.total));
        }
    }

    #[tokio::test]
    async fn test_overflowing_total_is_an_error() {
        // Built by hand; the parser refuses this formula.
        let formula = DiceFormula {
            dice_count: 1,
            die_size: 6,
            modifier: i32::MAX,
        };
        let err = RandomRollEvaluator::seeded(1)
            .evaluate(RollRequest::new(formula))
            .await
            .unwrap_err();
        assert!(matches!(err, RollError::Evaluation(_)));
    }

    #[tokio::test]
    async fn test_most_negative_modifier_rolls() {
        let formula = DiceFormula::parse("1d6-2147483648").unwrap();
        let outcome = RandomRollEvaluator::seeded(1)
            .evaluate(RollRequest::new(formula.clone()))
            .await
            .unwrap();
        assert!(formula.range().unwrap().contains(&outcome.total));
    }

    #[tokio::test]
    async fn test_seeded_rolls_repeat() {
        let formula = DiceFormula::parse("4d10").unwrap();
        let first = RandomRollEvaluator::seeded(42)
            .evaluate(RollRequest::new(formula.clone()))
            .await
            .unwrap();
        let second = RandomRollEvaluator::seeded(42)
            .evaluate(RollRequest::new(formula))
            .await
            .unwrap();
        assert_eq!(first.rolls, second.rolls);
    }
}
