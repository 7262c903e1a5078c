//! Transaction insights.
//!
//! Summarises transactions, asks the LLM for advice on the summary and falls
//! back to rule-based insights when the model fails or answers with
//! something unusable. Generation itself never fails; only the transaction
//! lookup can.

use std::sync::Arc;

use serde::Serialize;

use fincoach_domain::{analyze, fallback_insights, Insight, Transaction, TransactionAnalysis};

use crate::infrastructure::ports::{
    DateRange, LlmPort, LlmRequest, TransactionStoreError, TransactionStorePort,
};
use crate::use_cases::game::extract_json;

const SYSTEM_PROMPT: &str =
    "You are a helpful financial advisor. Always respond with valid JSON only.";

const TEMPERATURE: f32 = 0.7;

/// Insights plus the summary they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    pub insights: Vec<Insight>,
    pub analysis: TransactionAnalysis,
}

#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Transaction store unavailable: {0}")]
    Store(String),
}

impl From<TransactionStoreError> for InsightsError {
    fn from(e: TransactionStoreError) -> Self {
        match e {
            TransactionStoreError::NotFound(user_id) => Self::UserNotFound(user_id),
            other => Self::Store(other.to_string()),
        }
    }
}

/// Container for insights use cases.
pub struct InsightsUseCases {
    pub ops: Arc<InsightsOps>,
}

impl InsightsUseCases {
    pub fn new(ops: Arc<InsightsOps>) -> Self {
        Self { ops }
    }
}

pub struct InsightsOps {
    llm: Arc<dyn LlmPort>,
    store: Arc<dyn TransactionStorePort>,
}

impl InsightsOps {
    pub fn new(llm: Arc<dyn LlmPort>, store: Arc<dyn TransactionStorePort>) -> Self {
        Self { llm, store }
    }

    /// Insights for a caller-supplied set of transactions.
    pub async fn generate(&self, transactions: &[Transaction]) -> InsightsReport {
        let analysis = analyze(transactions);
        let insights = match self.ask_model(&analysis).await {
            Some(insights) => insights,
            None => fallback_insights(&analysis),
        };
        InsightsReport { insights, analysis }
    }

    /// Insights for a user's stored transactions within `range`.
    pub async fn for_user(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<InsightsReport, InsightsError> {
        let transactions = self.store.list_transactions(user_id, range).await?;
        tracing::debug!(user_id = %user_id, count = transactions.len(), "Generating insights");
        Ok(self.generate(&transactions).await)
    }

    async fn ask_model(&self, analysis: &TransactionAnalysis) -> Option<Vec<Insight>> {
        let request = LlmRequest::prompt(insights_prompt(analysis))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_temperature(TEMPERATURE);

        let response = match self.llm.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Insights LLM call failed, using rule-based insights");
                return None;
            }
        };

        match parse_insights(&response.content) {
            Some(insights) => Some(insights),
            None => {
                tracing::warn!(raw = %response.content, "Unparseable insights, using rule-based insights");
                None
            }
        }
    }
}

fn insights_prompt(analysis: &TransactionAnalysis) -> String {
    let summary = serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a financial advisor. Analyze this user's transaction data and provide personalized financial insights.\n\
         \n\
         Transaction Summary:\n\
         {summary}\n\
         \n\
         Please provide 5-7 financial insights in JSON format. Each insight should have:\n\
         - type: \"tip\" | \"warning\" | \"achievement\" | \"opportunity\"\n\
         - title: A short, clear title\n\
         - description: A detailed, actionable description with specific amounts and recommendations\n\
         - priority: 1-5 (1 is highest priority)\n\
         \n\
         Return ONLY a valid JSON array of insights, no other text."
    )
}

/// `None` unless the text holds a non-empty array of well-formed insights.
fn parse_insights(raw: &str) -> Option<Vec<Insight>> {
    let parsed: Vec<Insight> = serde_json::from_str(&extract_json(raw)).ok()?;
    if parsed.is_empty() {
        return None;
    }
    Some(
        parsed
            .into_iter()
            .map(|i| Insight::new(i.insight_type, i.title, i.description, i.priority))
            .collect(),
    )
}
