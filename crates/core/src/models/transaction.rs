use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expense categories accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Rent,
    Other,
}

impl ExpenseCategory {
    /// All categories, in form-dropdown order.
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Shopping,
        ExpenseCategory::Bills,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Health,
        ExpenseCategory::Rent,
        ExpenseCategory::Other,
    ];
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        ExpenseCategory::Food
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// Income categories accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Business,
    Investment,
    Gift,
    Other,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 6] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelance,
        IncomeCategory::Business,
        IncomeCategory::Investment,
        IncomeCategory::Gift,
        IncomeCategory::Other,
    ];
}

impl Default for IncomeCategory {
    fn default() -> Self {
        IncomeCategory::Salary
    }
}

impl std::fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::Business => "Business",
            IncomeCategory::Investment => "Investment",
            IncomeCategory::Gift => "Gift",
            IncomeCategory::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// A single expense row. Owned by the server; the client only ever holds
/// a snapshot fetched from the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    /// Daily granularity, no time component.
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

/// A single income row. Same ownership rules as [`Expense`]; the
/// free-text field is called `source` on this side of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: i64,
    pub amount: f64,
    pub category: IncomeCategory,
    pub source: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}
