use serde_json::Value;
use std::sync::Arc;

use crate::feedback::Notifier;
use crate::models::dashboard::DashboardSummary;
use crate::transport::traits::ApiTransport;

/// The dashboard: aggregate totals plus the recent-transactions feed.
/// Read-only — mutations happen on the income/expense screens, and this
/// screen simply re-fetches to catch up.
pub struct DashboardScreen {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    summary: DashboardSummary,
    loading: bool,
}

impl DashboardScreen {
    pub fn new(transport: Arc<dyn ApiTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            summary: DashboardSummary::default(),
            loading: true,
        }
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the aggregate summary. Field-by-field extraction: missing
    /// numerics become 0.0 and a non-array feed becomes empty, so a
    /// partially-shaped payload degrades instead of erroring. Transport
    /// failure zeroes the whole summary.
    pub async fn fetch(&mut self) {
        match self.transport.get_json("/user/dashboard", &[]).await {
            Ok(value) => {
                self.summary = Self::extract(&value);
            }
            Err(e) => {
                log::error!("fetch dashboard failed: {e}");
                self.notifier.error("Failed to fetch dashboard data");
                self.summary = DashboardSummary::default();
            }
        }
        self.loading = false;
    }

    fn extract(value: &Value) -> DashboardSummary {
        let recent_transactions = value
            .get("recentTransactions")
            .filter(|v| v.is_array())
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        DashboardSummary {
            total_income: number_or_zero(value.get("totalIncome")),
            total_expense: number_or_zero(value.get("totalExpense")),
            balance: number_or_zero(value.get("balance")),
            recent_transactions,
        }
    }
}

fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}
