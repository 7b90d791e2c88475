use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::feedback::{ConfirmPrompt, Notifier};
use crate::models::draft::{ListFilter, TransactionDraft};
use crate::models::transaction::{Expense, ExpenseCategory, Income, IncomeCategory};
use crate::transport::traits::ApiTransport;

/// A server-owned transaction row that a [`ResourceScreen`] can manage.
///
/// Implemented by [`Income`] and [`Expense`]. The screen itself carries
/// the entire list/filter/submit/edit/delete cycle exactly once; a
/// record type only contributes its path, its wording, and the mapping
/// between itself and a form draft.
pub trait TransactionRecord: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Category enumeration for this resource's form and filter.
    type Category: Clone + Default + PartialEq + std::fmt::Display + Send + Sync;

    /// Collection path, e.g. `/expenses`.
    const PATH: &'static str;
    /// Lowercase singular for user-facing messages, e.g. "expense".
    const NOUN: &'static str;
    /// Capitalized singular, e.g. "Expense".
    const TITLE: &'static str;
    /// Wire name of the free-text field: "description" or "source".
    const DETAIL_FIELD: &'static str;

    fn id(&self) -> i64;

    /// Copy this record's fields into a form draft (edit mode).
    fn to_draft(&self) -> TransactionDraft<Self::Category>;
}

impl TransactionRecord for Expense {
    type Category = ExpenseCategory;

    const PATH: &'static str = "/expenses";
    const NOUN: &'static str = "expense";
    const TITLE: &'static str = "Expense";
    const DETAIL_FIELD: &'static str = "description";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> TransactionDraft<ExpenseCategory> {
        TransactionDraft {
            amount: self.amount.to_string(),
            category: self.category,
            detail: self.description.clone(),
            date: self.date,
            note: self.note.clone().unwrap_or_default(),
        }
    }
}

impl TransactionRecord for Income {
    type Category = IncomeCategory;

    const PATH: &'static str = "/incomes";
    const NOUN: &'static str = "income";
    const TITLE: &'static str = "Income";
    const DETAIL_FIELD: &'static str = "source";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> TransactionDraft<IncomeCategory> {
        TransactionDraft {
            amount: self.amount.to_string(),
            category: self.category,
            detail: self.source.clone(),
            date: self.date,
            note: self.note.clone().unwrap_or_default(),
        }
    }
}

/// Income management screen.
pub type IncomeScreen = ResourceScreen<Income>;
/// Expense management screen.
pub type ExpenseScreen = ResourceScreen<Expense>;

/// One resource screen: a local snapshot of a server collection plus the
/// transient form and filter state that drives it.
///
/// Consistency model: `records` is only ever a full snapshot from the
/// server. Every successful mutation is followed by a full re-fetch and
/// the list is never patched in place, so the local state is always a
/// server snapshot (possibly stale, never half-applied).
pub struct ResourceScreen<R: TransactionRecord> {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn ConfirmPrompt>,
    records: Vec<R>,
    filter: ListFilter<R::Category>,
    draft: TransactionDraft<R::Category>,
    editing_id: Option<i64>,
    loading: bool,
}

impl<R: TransactionRecord> ResourceScreen<R> {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        Self {
            transport,
            notifier,
            confirm,
            records: Vec::new(),
            filter: ListFilter::default(),
            draft: TransactionDraft::new(),
            editing_id: None,
            loading: true,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn draft(&self) -> &TransactionDraft<R::Category> {
        &self.draft
    }

    /// Form inputs write through here.
    pub fn draft_mut(&mut self) -> &mut TransactionDraft<R::Category> {
        &mut self.draft
    }

    pub fn filter(&self) -> &ListFilter<R::Category> {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut ListFilter<R::Category> {
        &mut self.filter
    }

    /// `Some(id)` while editing an existing record, `None` in create
    /// mode.
    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ── Fetch ───────────────────────────────────────────────────────

    /// Replace the local snapshot with a fresh server read, using only
    /// the non-empty filter fields as query parameters.
    ///
    /// A non-list payload is treated as an empty list (with a
    /// diagnostic), never as a crash. A failed request also empties the
    /// list — the view must not keep showing pre-failure rows.
    pub async fn fetch(&mut self) {
        let query = self.filter.to_query();
        match self.transport.get_json(R::PATH, &query).await {
            Ok(value) => {
                self.records = Self::parse_list(value);
            }
            Err(e) => {
                log::error!("fetch {} list failed: {e}", R::NOUN);
                self.notifier.error(&format!("Failed to fetch {}s", R::NOUN));
                self.records = Vec::new();
            }
        }
        self.loading = false;
    }

    fn parse_list(value: Value) -> Vec<R> {
        if !value.is_array() {
            log::warn!("{} endpoint did not return a list: {value}", R::PATH);
            return Vec::new();
        }
        match serde_json::from_value(value) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("could not decode {} list: {e}", R::NOUN);
                Vec::new()
            }
        }
    }

    /// Re-run the fetch with the current filter draft applied.
    pub async fn apply_filters(&mut self) {
        self.loading = true;
        self.fetch().await;
    }

    /// Reset every filter field and re-fetch the unfiltered list.
    pub async fn clear_filters(&mut self) {
        self.filter = ListFilter::default();
        self.loading = true;
        self.fetch().await;
    }

    // ── Create / Update ─────────────────────────────────────────────

    /// Create or update depending on `editing_id`. Returns `true` on
    /// success, which also resets the form to defaults and re-fetches
    /// the list. On failure the draft is preserved so no input is lost.
    ///
    /// Known gap: nothing prevents a second submission while an earlier
    /// one is unresolved. Within one task `&mut self` already makes
    /// that unrepresentable.
    pub async fn submit(&mut self) -> bool {
        if self.draft.amount.trim().is_empty() || self.draft.detail.trim().is_empty() {
            self.notifier.error("Please fill in all required fields");
            return false;
        }

        let body = self.draft_body();
        let (result, success_msg, default_err) = match self.editing_id {
            Some(id) => (
                self.transport
                    .put_json(&format!("{}/{id}", R::PATH), &body)
                    .await,
                format!("{} updated successfully", R::TITLE),
                format!("Failed to save {}", R::NOUN),
            ),
            None => (
                self.transport.post_json(R::PATH, &body).await,
                format!("{} added successfully", R::TITLE),
                format!("Failed to save {}", R::NOUN),
            ),
        };

        match result {
            Ok(_) => {
                self.draft = TransactionDraft::new();
                self.editing_id = None;
                self.notifier.success(&success_msg);
                self.fetch().await;
                true
            }
            Err(e) => {
                log::error!("save {} failed: {e}", R::NOUN);
                self.notifier.error(&e.message(&default_err));
                false
            }
        }
    }

    // The amount goes over the wire as the raw input string, exactly as
    // the form field holds it; the server validates its numeric shape.
    fn draft_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(
            "amount".to_string(),
            Value::String(self.draft.amount.trim().to_string()),
        );
        body.insert(
            "category".to_string(),
            Value::String(self.draft.category.to_string()),
        );
        body.insert(
            R::DETAIL_FIELD.to_string(),
            Value::String(self.draft.detail.clone()),
        );
        body.insert(
            "date".to_string(),
            Value::String(self.draft.date.format("%Y-%m-%d").to_string()),
        );
        body.insert("note".to_string(), Value::String(self.draft.note.clone()));
        Value::Object(body)
    }

    // ── Edit / Cancel ───────────────────────────────────────────────

    /// Load a record into the form for in-place editing. Pure UX state,
    /// no network.
    pub fn edit(&mut self, record: &R) {
        self.draft = record.to_draft();
        self.editing_id = Some(record.id());
    }

    /// Drop edit mode and reset the form to defaults. No network.
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.draft = TransactionDraft::new();
    }

    // ── Delete ──────────────────────────────────────────────────────

    /// Guarded delete. The confirm collaborator is asked first; declined
    /// means no request at all. On success the next fetch is
    /// authoritative (no client-side row removal beforehand); on failure
    /// the list is left as-is — possibly stale, never half-patched.
    pub async fn delete(&mut self, id: i64) -> bool {
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !self.confirm.confirm(&prompt) {
            return false;
        }

        match self.transport.delete(&format!("{}/{id}", R::PATH)).await {
            Ok(()) => {
                self.notifier
                    .success(&format!("{} deleted successfully", R::TITLE));
                self.fetch().await;
                true
            }
            Err(e) => {
                log::error!("delete {} {id} failed: {e}", R::NOUN);
                self.notifier.error(&format!("Failed to delete {}", R::NOUN));
                false
            }
        }
    }
}
