use chrono::NaiveDate;

/// Transient, uncommitted edit state for a create-or-update form.
///
/// `amount` stays the raw input string — the form submits the text-box
/// value verbatim and the server is the authority on its numeric shape.
/// Whether this draft creates or updates is decided by the owning
/// screen's `editing_id`, not by the draft itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft<C> {
    pub amount: String,
    pub category: C,
    /// Description (expenses) or source (incomes).
    pub detail: String,
    pub date: NaiveDate,
    pub note: String,
}

impl<C: Default> TransactionDraft<C> {
    /// Fresh draft: empty text fields, the default category, today's
    /// date.
    pub fn new() -> Self {
        Self {
            amount: String::new(),
            category: C::default(),
            detail: String::new(),
            date: today(),
            note: String::new(),
        }
    }
}

impl<C: Default> Default for TransactionDraft<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// List filters for a resource screen. `None` fields are omitted from
/// the query entirely — never sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter<C> {
    pub category: Option<C>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl<C: std::fmt::Display> ListFilter<C> {
    /// Query pairs for the set fields only.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(category) = &self.category {
            query.push(("category".to_string(), category.to_string()));
        }
        if let Some(date) = self.start_date {
            query.push(("startDate".to_string(), date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            query.push(("endDate".to_string(), date.format("%Y-%m-%d").to_string()));
        }
        query
    }

    /// `true` when no filter field is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}
