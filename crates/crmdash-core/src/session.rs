// ── Edit session state machine ──
//
//   Idle ──start_create──▶ Creating ──submit ok / cancel──▶ Idle
//   Idle ──start_edit(id)─▶ Editing(id) ──submit ok / cancel──▶ Idle
//
// A failed validation leaves the mode alone and keeps the draft, so the
// form reopens exactly as the user left it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CoreError, ValidationError};
use crate::filter::Filter;
use crate::ids::IdGenerator;
use crate::model::{Draft, Record, RecordId};
use crate::store::ListStore;

/// What the form is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Idle,
    Creating,
    Editing(RecordId),
}

impl EditMode {
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Creating => f.write_str("creating"),
            Self::Editing(id) => write!(f, "editing {id}"),
        }
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<R> {
    Removed(Arc<R>),
    /// The confirmation gate said no; nothing changed.
    Declined,
}

/// The create/edit form of one list.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct EditSession<R: Record> {
    mode: EditMode,
    draft: R::Draft,
    last_error: Option<ValidationError>,
}

impl<R: Record> Default for EditSession<R> {
    fn default() -> Self {
        Self {
            mode: EditMode::Idle,
            draft: R::Draft::default(),
            last_error: None,
        }
    }
}

impl<R: Record> EditSession<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    /// Validation error of the last failed submit, cleared on any
    /// transition or field change.
    pub fn last_error(&self) -> Option<&ValidationError> {
        self.last_error.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_open()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Open an empty form. From `Editing` the unsaved edit is discarded.
    pub fn start_create(&mut self) -> Result<(), CoreError> {
        if self.mode == EditMode::Creating {
            return Err(self.invalid("start a new record"));
        }
        self.enter(EditMode::Creating, R::Draft::default());
        Ok(())
    }

    /// Open the form pre-filled from the record with `id`.
    pub fn start_edit<F: Filter<R>>(
        &mut self,
        store: &ListStore<R, F>,
        id: RecordId,
    ) -> Result<(), CoreError> {
        let record = store
            .get(id)
            .ok_or(CoreError::NotFound { kind: R::KIND, id })?;
        self.enter(EditMode::Editing(id), record.to_draft());
        Ok(())
    }

    /// Update one draft field. Only valid while the form is open.
    pub fn set_field(
        &mut self,
        field: <R::Draft as Draft>::Field,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        if !self.is_open() {
            return Err(self.invalid("edit a field"));
        }
        self.draft.set(field, value.into());
        self.last_error = None;
        Ok(())
    }

    /// Validate `draft` and apply it to `store`.
    ///
    /// On success the session returns to `Idle` and the stored record is
    /// returned. On a validation error the mode is kept and the draft
    /// and error are retained for redisplay.
    pub fn submit<F: Filter<R>>(
        &mut self,
        store: &mut ListStore<R, F>,
        ids: &mut IdGenerator,
        draft: R::Draft,
    ) -> Result<Arc<R>, CoreError> {
        let mode = self.mode;
        if mode == EditMode::Idle {
            return Err(self.invalid("submit"));
        }

        let patch = match draft.validate() {
            Ok(patch) => patch,
            Err(err) => {
                debug!(kind = R::KIND, fields = ?err.fields, "draft rejected");
                self.draft = draft;
                self.last_error = Some(err.clone());
                return Err(err.into());
            }
        };

        let result = match mode {
            EditMode::Editing(id) => store.replace(id, patch),
            _ => {
                let id = ids.next_id(|candidate| store.contains(candidate));
                R::from_patch(id, patch)
                    .map_err(CoreError::from)
                    .and_then(|record| store.insert(record))
            }
        };

        match result {
            Ok(record) => {
                self.reset();
                Ok(record)
            }
            Err(err @ CoreError::NotFound { .. }) => {
                // Edited record vanished underneath the form.
                warn!(kind = R::KIND, %err, "closing form for missing record");
                self.reset();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Close the form and discard the draft. Idempotent.
    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!(kind = R::KIND, mode = %self.mode, "form cancelled");
        }
        self.reset();
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn enter(&mut self, mode: EditMode, draft: R::Draft) {
        debug!(kind = R::KIND, from = %self.mode, to = %mode, "form opened");
        self.mode = mode;
        self.draft = draft;
        self.last_error = None;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn invalid(&self, operation: &'static str) -> CoreError {
        warn!(kind = R::KIND, operation, mode = %self.mode, "rejected form transition");
        CoreError::InvalidState {
            operation,
            mode: self.mode.to_string(),
        }
    }
}

/// Remove the record with `id` after `confirm` approves it.
///
/// A missing record is reported before the gate is consulted.
pub fn delete_record<R: Record, F: Filter<R>>(
    store: &mut ListStore<R, F>,
    id: RecordId,
    confirm: impl FnOnce(&R) -> bool,
) -> Result<DeleteOutcome<R>, CoreError> {
    let record = store
        .get(id)
        .ok_or(CoreError::NotFound { kind: R::KIND, id })?;

    if !confirm(&record) {
        debug!(kind = R::KIND, %id, "delete declined");
        return Ok(DeleteOutcome::Declined);
    }

    store.remove(id).map(DeleteOutcome::Removed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::filter::{CategoryFilter, LeadSearch};
    use crate::model::{Lead, LeadDraft, LeadField, Product};

    type Store = ListStore<Lead, LeadSearch>;

    fn seeded() -> Store {
        let mut store = Store::new();
        store.load(vec![Lead {
            id: RecordId::new(1),
            name: "Ada".into(),
            email: "ada@x.io".into(),
            company: "Acme".into(),
            city: "Paris".into(),
        }]);
        store
    }

    fn valid_draft() -> LeadDraft {
        LeadDraft {
            name: "Bo".into(),
            email: "bo@x.io".into(),
            company: "Initech".into(),
            city: "Austin".into(),
        }
    }

    #[test]
    fn create_submit_returns_to_idle() {
        let mut store = seeded();
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Lead>::new();

        session.start_create().unwrap();
        assert_eq!(session.mode(), EditMode::Creating);

        let created = session.submit(&mut store, &mut ids, valid_draft()).unwrap();
        assert_eq!(session.mode(), EditMode::Idle);
        assert_eq!(store.all()[0].id, created.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn invalid_submit_keeps_mode_and_draft() {
        let mut store = seeded();
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Lead>::new();
        session.start_create().unwrap();

        let mut draft = valid_draft();
        draft.email = "nope".into();
        let err = session.submit(&mut store, &mut ids, draft.clone()).unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(session.mode(), EditMode::Creating);
        assert_eq!(session.draft(), &draft);
        assert_eq!(session.last_error().unwrap().fields, vec!["email"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_field_clears_last_error() {
        let mut store = seeded();
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Lead>::new();
        session.start_create().unwrap();
        let _ = session.submit(&mut store, &mut ids, LeadDraft::default());
        assert!(session.last_error().is_some());

        session.set_field(LeadField::Name, "Cy").unwrap();
        assert!(session.last_error().is_none());
        assert_eq!(session.draft().name, "Cy");
    }

    #[test]
    fn edit_prefills_and_replaces_in_place() {
        let mut store = seeded();
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Lead>::new();

        session.start_edit(&store, RecordId::new(1)).unwrap();
        assert_eq!(session.mode(), EditMode::Editing(RecordId::new(1)));
        assert_eq!(session.draft().name, "Ada");

        let mut draft = session.draft().clone();
        draft.city = "Lyon".into();
        let updated = session.submit(&mut store, &mut ids, draft).unwrap();

        assert_eq!(updated.id, RecordId::new(1));
        assert_eq!(store.get(RecordId::new(1)).unwrap().city, "Lyon");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn edit_of_vanished_record_resets() {
        let mut store = seeded();
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Lead>::new();
        session.start_edit(&store, RecordId::new(1)).unwrap();
        store.remove(RecordId::new(1)).unwrap();

        let err = session.submit(&mut store, &mut ids, valid_draft()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(session.mode(), EditMode::Idle);
        assert!(store.is_empty());
    }

    #[test]
    fn transitions_rejected_from_wrong_state() {
        let mut store = seeded();
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Lead>::new();

        assert!(matches!(
            session.submit(&mut store, &mut ids, valid_draft()),
            Err(CoreError::InvalidState { operation: "submit", .. })
        ));
        assert!(matches!(
            session.set_field(LeadField::Name, "x"),
            Err(CoreError::InvalidState { .. })
        ));

        session.start_create().unwrap();
        session.set_field(LeadField::Name, "kept").unwrap();
        assert!(matches!(
            session.start_create(),
            Err(CoreError::InvalidState { .. })
        ));
        assert_eq!(session.draft().name, "kept");
    }

    #[test]
    fn create_and_edit_replace_each_other() {
        let store = seeded();
        let mut session = EditSession::<Lead>::new();

        session.start_edit(&store, RecordId::new(1)).unwrap();
        session.set_field(LeadField::City, "Lyon").unwrap();
        session.start_create().unwrap();
        assert_eq!(session.mode(), EditMode::Creating);
        assert_eq!(session.draft(), &LeadDraft::default());

        session.set_field(LeadField::Name, "half typed").unwrap();
        session.start_edit(&store, RecordId::new(1)).unwrap();
        assert_eq!(session.mode(), EditMode::Editing(RecordId::new(1)));
        assert_eq!(session.draft(), &store.get(RecordId::new(1)).unwrap().to_draft());
    }

    #[test]
    fn edit_leaves_untouched_fields_byte_for_byte() {
        let mut store = Store::new();
        store.load(vec![Lead {
            id: RecordId::new(1),
            name: "Ann ".into(),
            email: "ann@x.io".into(),
            company: " Acme".into(),
            city: "Paris".into(),
        }]);
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Lead>::new();

        session.start_edit(&store, RecordId::new(1)).unwrap();
        let mut draft = session.draft().clone();
        draft.city = "Lyon".into();
        session.submit(&mut store, &mut ids, draft).unwrap();

        let lead = store.get(RecordId::new(1)).unwrap();
        assert_eq!(lead.name, "Ann ");
        assert_eq!(lead.company, " Acme");
        assert_eq!(lead.city, "Lyon");
    }

    #[test]
    fn product_price_edit_keeps_padded_title_and_description() {
        let mut store = ListStore::<Product, CategoryFilter>::new();
        store.load(vec![Product {
            id: RecordId::new(3),
            title: "Mens Casual Premium Slim Fit T-Shirts ".into(),
            price: 22.3,
            category: "men's clothing".into(),
            image: "https://img.test/3.jpg".into(),
            description: "Slim-fitting style ".into(),
            rating: None,
        }]);
        let mut ids = IdGenerator::new();
        let mut session = EditSession::<Product>::new();

        session.start_edit(&store, RecordId::new(3)).unwrap();
        let mut draft = session.draft().clone();
        draft.price = "19.99".into();
        session.submit(&mut store, &mut ids, draft).unwrap();

        let product = store.get(RecordId::new(3)).unwrap();
        assert_eq!(product.title, "Mens Casual Premium Slim Fit T-Shirts ");
        assert_eq!(product.description, "Slim-fitting style ");
        assert_eq!(product.image, "https://img.test/3.jpg");
        assert!((product.price - 19.99).abs() < f64::EPSILON);
    }

    #[test]
    fn start_edit_unknown_id_leaves_session_alone() {
        let store = seeded();
        let mut session = EditSession::<Lead>::new();
        let err = session.start_edit(&store, RecordId::new(99)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(session.mode(), EditMode::Idle);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut session = EditSession::<Lead>::new();
        session.cancel();
        session.start_create().unwrap();
        session.set_field(LeadField::City, "Rome").unwrap();
        session.cancel();
        session.cancel();

        assert_eq!(session.mode(), EditMode::Idle);
        assert_eq!(session.draft(), &LeadDraft::default());
    }

    #[test]
    fn delete_respects_confirmation() {
        let mut store = seeded();

        let declined = delete_record(&mut store, RecordId::new(1), |_| false).unwrap();
        assert_eq!(declined, DeleteOutcome::Declined);
        assert_eq!(store.len(), 1);

        let removed = delete_record(&mut store, RecordId::new(1), |lead| lead.name == "Ada").unwrap();
        assert!(matches!(removed, DeleteOutcome::Removed(ref l) if l.name == "Ada"));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_unknown_id_never_asks() {
        let mut store = seeded();
        let err = delete_record(&mut store, RecordId::new(7), |_| {
            panic!("gate must not be consulted")
        })
        .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn session_serializes_mode_and_draft() {
        let mut session = EditSession::<Lead>::new();
        session.start_create().unwrap();
        session.set_field(LeadField::Name, "Ada").unwrap();

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["mode"]["mode"], "creating");
        assert_eq!(json["draft"]["name"], "Ada");
    }
}
