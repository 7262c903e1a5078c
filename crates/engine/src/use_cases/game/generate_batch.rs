//! Scenario batch generation.

use std::sync::Arc;

use serde_json::Value;

use fincoach_domain::Scenario;

use super::json_extract::extract_json;
use super::normalize::normalize_scenario;
use super::prompt::scenario_batch_prompt;
use super::GameError;
use crate::infrastructure::ports::{FinishReason, LlmPort, LlmRequest};
use crate::stores::GameSession;

/// Scenarios requested per LLM call.
pub const DEFAULT_BATCH_SIZE: usize = 5;

const TEMPERATURE: f32 = 0.9;

/// Asks the LLM for a batch of scenarios and enqueues them.
///
/// One request per call, no retry. A batch is all-or-nothing: if any element
/// fails to normalize, or the model returns fewer than `batch_size`,
/// nothing is remembered or enqueued.
pub struct GenerateScenarioBatch {
    llm: Arc<dyn LlmPort>,
    session: Arc<GameSession>,
    batch_size: usize,
}

impl GenerateScenarioBatch {
    pub fn new(llm: Arc<dyn LlmPort>, session: Arc<GameSession>, batch_size: usize) -> Self {
        Self {
            llm,
            session,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Generate a batch, enqueue it and take the queue head for the caller.
    ///
    /// The enqueue and the pop happen under one queue lock, so the caller
    /// that paid for the refill is always served from it.
    pub async fn execute(&self, user_profile: &Value) -> Result<Scenario, GameError> {
        let recent = self.session.recent_titles().await;
        let prompt = scenario_batch_prompt(self.batch_size, &recent, user_profile);

        let response = self
            .llm
            .generate(LlmRequest::prompt(prompt).with_temperature(TEMPERATURE))
            .await?;

        tracing::debug!(
            raw = %response.content,
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
            "Scenario batch raw output"
        );
        if response.finish_reason == FinishReason::Length {
            tracing::warn!("Scenario batch output was cut off at the token limit");
        }

        let batch = parse_batch(&response.content, self.batch_size)?;

        self.session
            .remember_titles(batch.iter().map(|s| s.title.as_str()))
            .await;

        let count = batch.len();
        let head = self
            .session
            .queue()
            .push_batch_and_pop(batch)
            .await
            .ok_or(GameError::EmptyQueue)?;

        tracing::info!(count, "Enqueued scenario batch");
        Ok(head)
    }
}

/// Extract, parse and normalize the model's answer into exactly
/// `batch_size` scenarios.
///
/// A short batch is rejected; extra scenarios past `batch_size` are
/// dropped once every element has normalized.
fn parse_batch(raw: &str, batch_size: usize) -> Result<Vec<Scenario>, GameError> {
    let cleaned = extract_json(raw);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::warn!(cleaned = %cleaned, error = %e, "Scenario batch is not valid JSON");
        GameError::Generation(format!("invalid JSON: {}", e))
    })?;

    let Value::Array(items) = value else {
        return Err(GameError::Generation(
            "expected a JSON array of scenarios".to_string(),
        ));
    };

    if items.is_empty() {
        return Err(GameError::Generation("model returned no scenarios".to_string()));
    }

    if items.len() < batch_size {
        return Err(GameError::Generation(format!(
            "expected {} scenarios, got {}",
            batch_size,
            items.len()
        )));
    }

    let mut batch = items
        .iter()
        .map(|item| normalize_scenario(item).map_err(GameError::from))
        .collect::<Result<Vec<_>, _>>()?;

    if batch.len() > batch_size {
        tracing::warn!(
            requested = batch_size,
            received = batch.len(),
            "Model returned extra scenarios, keeping the first ones"
        );
        batch.truncate(batch_size);
    }

    Ok(batch)
}
