//! Decisions game use cases.
//!
//! Scenarios are generated in batches by the LLM, queued, and served one at
//! a time. Each answered scenario is classified and counted toward
//! achievements.

use std::sync::Arc;

use fincoach_domain::DomainError;

use crate::infrastructure::ports::LlmError;

mod choose;
mod dispense;
mod generate_batch;
pub mod json_extract;
pub mod normalize;
pub mod prompt;

pub use choose::{ChoiceOutcome, ResolveChoice};
pub use dispense::DispenseScenario;
pub use generate_batch::{GenerateScenarioBatch, DEFAULT_BATCH_SIZE};
pub use json_extract::extract_json;
pub use normalize::normalize_scenario;

/// Container for game use cases.
pub struct GameUseCases {
    pub dispense: Arc<DispenseScenario>,
    pub choose: Arc<ResolveChoice>,
}

impl GameUseCases {
    pub fn new(dispense: Arc<DispenseScenario>, choose: Arc<ResolveChoice>) -> Self {
        Self { dispense, choose }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The LLM call failed or its output was not a usable batch.
    #[error("Scenario generation failed: {0}")]
    Generation(String),
    #[error("Scenario generation timed out after {0} seconds")]
    GenerationTimeout(u64),
    /// A generated element broke the three-option shape. Rejects its batch.
    #[error("Malformed scenario in batch: {0}")]
    Malformed(#[from] DomainError),
    /// A refill reported success but left nothing to serve.
    #[error("Scenario queue is empty after refill")]
    EmptyQueue,
}

impl GameError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::GenerationTimeout(_))
    }
}

impl From<LlmError> for GameError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Timeout(secs) => Self::GenerationTimeout(secs),
            other => Self::Generation(other.to_string()),
        }
    }
}
