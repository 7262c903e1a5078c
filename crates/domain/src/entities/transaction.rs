//! Bank transactions as served by the transaction store.

use serde::{Deserialize, Serialize};

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
    Processing,
    #[serde(other)]
    Unknown,
}

/// A single transaction record.
///
/// Amounts are signed: income is positive, spending negative. Only the
/// magnitude matters for analysis, which classifies by category instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// ISO-8601 timestamp as delivered by the store.
    #[serde(default)]
    pub date: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
}

impl Transaction {
    /// Category name, `"Other"` when absent or blank.
    pub fn category_name(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => "Other",
        }
    }

    pub fn is_income(&self) -> bool {
        self.category_name().eq_ignore_ascii_case("income")
    }
}
