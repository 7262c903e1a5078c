//! Mock bank transaction store client.
//!
//! Talks to the seeded mock-bank REST service:
//! `GET {base}/users/{user_id}/transactions?from=..&to=..`

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use fincoach_domain::Transaction;

use crate::infrastructure::ports::{DateRange, TransactionStoreError, TransactionStorePort};

/// Default mock bank base URL.
pub const DEFAULT_MOCKBANK_URL: &str = "http://localhost:3001";

#[derive(Clone)]
pub struct MockBankClient {
    client: Client,
    base_url: String,
}

impl MockBankClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The user id is pushed as one encoded path segment, so it can never
    /// step outside `/users/{id}`.
    fn transactions_url(&self, user_id: &str) -> Result<Url, TransactionStoreError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            TransactionStoreError::RequestFailed(format!("invalid mock bank URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                TransactionStoreError::RequestFailed(format!(
                    "mock bank URL cannot take a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["users", user_id, "transactions"]);
        Ok(url)
    }
}

impl Default for MockBankClient {
    fn default() -> Self {
        Self::new(DEFAULT_MOCKBANK_URL)
    }
}

#[derive(Debug, Deserialize)]
struct TransactionsResponse {
    transactions: Vec<Transaction>,
}

fn range_query(range: DateRange) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(from) = range.from {
        query.push(("from", from.to_rfc3339_opts(SecondsFormat::Millis, true)));
    }
    if let Some(to) = range.to {
        query.push(("to", to.to_rfc3339_opts(SecondsFormat::Millis, true)));
    }
    query
}

#[async_trait]
impl TransactionStorePort for MockBankClient {
    async fn list_transactions(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<Transaction>, TransactionStoreError> {
        let response = self
            .client
            .get(self.transactions_url(user_id)?)
            .query(&range_query(range))
            .send()
            .await
            .map_err(|e| TransactionStoreError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(TransactionStoreError::NotFound(user_id.to_string()));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(TransactionStoreError::RequestFailed(format!(
                    "{}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        let body: TransactionsResponse = response
            .json()
            .await
            .map_err(|e| TransactionStoreError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            user_id = %user_id,
            count = body.transactions.len(),
            "Fetched transactions from mock bank"
        );

        Ok(body.transactions)
    }
}
