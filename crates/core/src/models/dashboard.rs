use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the ledger a dashboard feed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// One row of the recent-transactions feed. The category stays a plain
/// string here because the feed mixes income and expense categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

/// Aggregate totals for the dashboard. Built field by field from the
/// server payload, so a partially-shaped response degrades to zeros and
/// an empty feed instead of an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub recent_transactions: Vec<RecentTransaction>,
}
