//! Roll port - Interface for whatever actually rolls the dice

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DiceFormula;

#[derive(Debug, thiserror::Error)]
pub enum RollError {
    #[error("Roll evaluation failed: {0}")]
    Evaluation(String),
}

/// A roll the engine has decided is legal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    pub formula: DiceFormula,
    pub label: Option<String>,
}

impl RollRequest {
    pub fn new(formula: DiceFormula) -> Self {
        Self {
            formula,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// What the evaluator reports back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Formula as rolled, e.g. "1d8"
    pub formula: String,
    pub label: Option<String>,
    pub rolls: Vec<i32>,
    pub total: i32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RollEvaluatorPort: Send + Sync {
    async fn evaluate(&self, request: RollRequest) -> Result<RollOutcome, RollError>;
}
