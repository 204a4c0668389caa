// ── Data views ──
//
// One `DataView` per list screen. It owns the store, the edit session
// and the load state, and exposes the intents a presentation layer
// raises. The presentation layer renders from `store()`/`session()` and
// never mutates either directly.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::filter::{self, CategoryFilter, Filter, LeadSearch};
use crate::ids::IdGenerator;
use crate::model::{Draft, Lead, Product, Record, RecordId};
use crate::session::{self, DeleteOutcome, EditMode, EditSession};
use crate::store::ListStore;

/// Progress of the one-shot remote load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded { count: usize, at: DateTime<Utc> },
    Failed { message: String, retryable: bool },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Store + edit session + load state for one record kind.
#[derive(Debug, Clone)]
pub struct DataView<R: Record, F: Filter<R>> {
    store: ListStore<R, F>,
    session: EditSession<R>,
    ids: IdGenerator,
    load: LoadState,
    selected: Option<RecordId>,
}

pub type LeadsView = DataView<Lead, LeadSearch>;
pub type ProductsView = DataView<Product, CategoryFilter>;

impl<R: Record, F: Filter<R>> Default for DataView<R, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, F: Filter<R>> DataView<R, F> {
    pub fn new() -> Self {
        Self {
            store: ListStore::new(),
            session: EditSession::new(),
            ids: IdGenerator::new(),
            load: LoadState::Idle,
            selected: None,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn store(&self) -> &ListStore<R, F> {
        &self.store
    }

    pub fn session(&self) -> &EditSession<R> {
        &self.session
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// `(shown, total)` for a "Showing X of Y" line.
    pub fn summary(&self) -> (usize, usize) {
        (self.store.filtered_len(), self.store.len())
    }

    pub fn selected(&self) -> Option<Arc<R>> {
        self.selected.and_then(|id| self.store.get(id))
    }

    // ── Load intents ─────────────────────────────────────────────────

    pub fn on_load_started(&mut self) {
        debug!(kind = R::KIND, "load started");
        self.load = LoadState::Loading;
    }

    /// Apply the outcome of a load. A failure leaves the current records
    /// alone; the view only reports it.
    pub fn on_load_finished(&mut self, result: Result<Vec<R>, CoreError>) {
        match result {
            Ok(records) => {
                let count = self.store.load(records);
                if self.selected.is_some_and(|id| !self.store.contains(id)) {
                    self.selected = None;
                }
                info!(kind = R::KIND, count, "records loaded");
                self.load = LoadState::Loaded {
                    count,
                    at: Utc::now(),
                };
            }
            Err(err) => {
                warn!(kind = R::KIND, error = %err, "load failed");
                self.load = LoadState::Failed {
                    retryable: err.is_retryable(),
                    message: err.to_string(),
                };
            }
        }
    }

    // ── Filter intents ───────────────────────────────────────────────

    pub fn on_criteria_change(&mut self, criteria: F) {
        self.store.set_criteria(criteria);
    }

    // ── Form intents ─────────────────────────────────────────────────

    pub fn on_form_open(&mut self) -> Result<(), CoreError> {
        self.session.start_create()
    }

    pub fn on_form_edit_request(&mut self, id: RecordId) -> Result<(), CoreError> {
        self.session.start_edit(&self.store, id)
    }

    pub fn on_field_change(
        &mut self,
        field: <R::Draft as Draft>::Field,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        self.session.set_field(field, value)
    }

    /// Submit `draft`. Use [`on_form_submit_current`](Self::on_form_submit_current)
    /// to submit what the session already holds.
    pub fn on_form_submit(&mut self, draft: R::Draft) -> Result<Arc<R>, CoreError> {
        let record = self.session.submit(&mut self.store, &mut self.ids, draft)?;
        self.selected = Some(record.id());
        Ok(record)
    }

    pub fn on_form_submit_current(&mut self) -> Result<Arc<R>, CoreError> {
        let draft = self.session.draft().clone();
        self.on_form_submit(draft)
    }

    pub fn on_form_cancel(&mut self) {
        self.session.cancel();
    }

    // ── Delete intent ────────────────────────────────────────────────

    pub fn on_delete_request(
        &mut self,
        id: RecordId,
        confirm: impl FnOnce(&R) -> bool,
    ) -> Result<DeleteOutcome<R>, CoreError> {
        let outcome = session::delete_record(&mut self.store, id, confirm)?;
        if matches!(outcome, DeleteOutcome::Removed(_)) {
            if self.selected == Some(id) {
                self.selected = None;
            }
            if self.session.mode() == EditMode::Editing(id) {
                self.session.cancel();
            }
        }
        Ok(outcome)
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn select(&mut self, id: RecordId) -> Result<Arc<R>, CoreError> {
        let record = self
            .store
            .get(id)
            .ok_or(CoreError::NotFound { kind: R::KIND, id })?;
        self.selected = Some(id);
        Ok(record)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

impl LeadsView {
    /// Search as the user types.
    pub fn on_search_change(&mut self, text: &str) {
        self.on_criteria_change(LeadSearch::new(text));
    }
}

impl ProductsView {
    /// Selector options derived from the full product list.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        filter::categories(self.store.all())
    }

    pub fn on_category_change(&mut self, token: &str) {
        self.on_criteria_change(CategoryFilter::from_token(token));
    }
}
