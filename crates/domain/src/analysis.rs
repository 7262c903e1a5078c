//! Transaction summaries and rule-based financial insights.
//!
//! The summary is what gets handed to the LLM when asking for insights.
//! `fallback_insights` produces a usable answer from the same summary when
//! the model is unreachable or answers with something that isn't JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{Transaction, TransactionStatus};

/// How many categories `top_categories` keeps.
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Share of a positive balance suggested for savings.
pub const SAVINGS_SHARE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub success: u32,
    pub pending: u32,
    pub failed: u32,
    pub processing: u32,
}

impl StatusCounts {
    fn record(&mut self, status: TransactionStatus) {
        match status {
            TransactionStatus::Success => self.success += 1,
            TransactionStatus::Pending => self.pending += 1,
            TransactionStatus::Failed => self.failed += 1,
            TransactionStatus::Processing => self.processing += 1,
            TransactionStatus::Unknown => {}
        }
    }
}

/// Aggregate view of a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnalysis {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub category_totals: BTreeMap<String, f64>,
    pub top_categories: Vec<CategoryTotal>,
    pub status_counts: StatusCounts,
    pub total_transactions: usize,
    /// Mean expense magnitude; zero when there are no expenses.
    pub average_transaction: f64,
}

/// Summarise transactions by magnitude.
///
/// Income is recognised by category (`income`, any case), not by sign.
pub fn analyze(transactions: &[Transaction]) -> TransactionAnalysis {
    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut category_counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut status_counts = StatusCounts::default();
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut expense_count = 0usize;

    for tx in transactions {
        let category = tx.category_name().to_string();
        let amount = tx.amount.abs();

        *category_totals.entry(category.clone()).or_default() += amount;
        *category_counts.entry(category).or_default() += 1;

        if let Some(status) = tx.status {
            status_counts.record(status);
        }

        if tx.is_income() {
            total_income += amount;
        } else {
            total_expenses += amount;
            expense_count += 1;
        }
    }

    let mut top_categories: Vec<CategoryTotal> = category_totals
        .iter()
        .filter(|(category, _)| !category.eq_ignore_ascii_case("income"))
        .map(|(category, total)| CategoryTotal {
            category: category.clone(),
            total: *total,
            count: category_counts.get(category).copied().unwrap_or_default(),
        })
        .collect();
    top_categories.sort_by(|a, b| b.total.total_cmp(&a.total));
    top_categories.truncate(TOP_CATEGORY_LIMIT);

    let average_transaction = if expense_count == 0 {
        0.0
    } else {
        total_expenses / expense_count as f64
    };

    TransactionAnalysis {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        category_totals,
        top_categories,
        status_counts,
        total_transactions: transactions.len(),
        average_transaction,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Tip,
    Warning,
    Achievement,
    Opportunity,
}

/// One piece of advice shown on the insights page. Priority 1 is most urgent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub priority: u8,
}

impl Insight {
    pub fn new(
        insight_type: InsightType,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: u8,
    ) -> Self {
        Self {
            insight_type,
            title: title.into(),
            description: description.into(),
            priority: priority.clamp(1, 5),
        }
    }
}

/// Insights derived purely from the numbers.
pub fn fallback_insights(analysis: &TransactionAnalysis) -> Vec<Insight> {
    let mut insights = Vec::new();

    if analysis.net_balance < 0.0 {
        insights.push(Insight::new(
            InsightType::Warning,
            "Negative Cash Flow",
            format!(
                "Your expenses (€{:.2}) exceed your income (€{:.2}) by €{:.2}. Consider reducing spending in your top categories.",
                analysis.total_expenses,
                analysis.total_income,
                analysis.net_balance.abs()
            ),
            1,
        ));
    }

    if let Some(top) = analysis.top_categories.first() {
        insights.push(Insight::new(
            InsightType::Tip,
            "Top Spending Category",
            format!(
                "You've spent €{:.2} on {} ({} transactions). Review if all expenses are necessary.",
                top.total, top.category, top.count
            ),
            2,
        ));
    }

    if analysis.status_counts.pending > 0 {
        insights.push(Insight::new(
            InsightType::Warning,
            "Pending Transactions",
            format!(
                "You have {} pending transactions. Monitor these to ensure you have sufficient funds.",
                analysis.status_counts.pending
            ),
            3,
        ));
    }

    if analysis.net_balance > 0.0 {
        insights.push(Insight::new(
            InsightType::Opportunity,
            "Savings Opportunity",
            format!(
                "You have a positive balance of €{:.2}. Consider setting aside {:.0}% (€{:.2}) for savings.",
                analysis.net_balance,
                SAVINGS_SHARE * 100.0,
                analysis.net_balance * SAVINGS_SHARE
            ),
            2,
        ));
    }

    insights
}
