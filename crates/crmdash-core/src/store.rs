// ── Generic list store ──
//
// Ordered, id-unique storage for one record kind plus the filtered view
// derived from it. Every mutation re-derives the filtered view and bumps
// the version before returning.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::filter::{self, Filter};
use crate::model::{Record, RecordId};

/// The single source of truth for one list screen.
///
/// `all` keeps display order: remote load order, with locally created
/// records prepended. Snapshots are `Arc`-shared, so handing them to a
/// renderer is a pointer copy; mutation is copy-on-write.
#[derive(Debug, Clone)]
pub struct ListStore<R: Record, F: Filter<R>> {
    all: Arc<Vec<Arc<R>>>,
    filtered: Arc<Vec<Arc<R>>>,
    criteria: F,
    version: u64,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, F: Filter<R>> Default for ListStore<R, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, F: Filter<R>> ListStore<R, F> {
    pub fn new() -> Self {
        Self {
            all: Arc::new(Vec::new()),
            filtered: Arc::new(Vec::new()),
            criteria: F::default(),
            version: 0,
            _record: PhantomData,
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Replace the whole list with `records`, keeping their order.
    ///
    /// A later record whose id was already seen is dropped. Returns the
    /// number of records kept.
    pub fn load(&mut self, records: Vec<R>) -> usize {
        let mut seen = HashSet::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());

        for record in records {
            let id = record.id();
            if seen.insert(id) {
                kept.push(Arc::new(record));
            } else {
                warn!(kind = R::KIND, %id, "dropping duplicate id from load");
            }
        }

        let count = kept.len();
        self.all = Arc::new(kept);
        self.refresh();
        debug!(kind = R::KIND, count, "store loaded");
        count
    }

    /// Prepend a new record.
    pub fn insert(&mut self, record: R) -> Result<Arc<R>, CoreError> {
        let id = record.id();
        if self.contains(id) {
            return Err(CoreError::DuplicateId { kind: R::KIND, id });
        }

        let record = Arc::new(record);
        Arc::make_mut(&mut self.all).insert(0, Arc::clone(&record));
        self.refresh();
        debug!(kind = R::KIND, %id, "record inserted");
        Ok(record)
    }

    /// Merge `patch` into the record with `id`, keeping its position.
    pub fn replace(&mut self, id: RecordId, patch: R::Patch) -> Result<Arc<R>, CoreError> {
        let slot = Arc::make_mut(&mut self.all)
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(CoreError::NotFound { kind: R::KIND, id })?;

        Arc::make_mut(slot).merge(patch);
        let updated = Arc::clone(slot);
        self.refresh();
        debug!(kind = R::KIND, %id, "record replaced");
        Ok(updated)
    }

    /// Remove the record with `id`.
    pub fn remove(&mut self, id: RecordId) -> Result<Arc<R>, CoreError> {
        let pos = self
            .all
            .iter()
            .position(|r| r.id() == id)
            .ok_or(CoreError::NotFound { kind: R::KIND, id })?;

        let removed = Arc::make_mut(&mut self.all).remove(pos);
        self.refresh();
        debug!(kind = R::KIND, %id, "record removed");
        Ok(removed)
    }

    /// Swap the filter criteria. The record list is untouched.
    pub fn set_criteria(&mut self, criteria: F) {
        self.criteria = criteria;
        self.refresh();
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn all(&self) -> &[Arc<R>] {
        &self.all
    }

    pub fn filtered(&self) -> &[Arc<R>] {
        &self.filtered
    }

    pub fn get(&self, id: RecordId) -> Option<Arc<R>> {
        self.all.iter().find(|r| r.id() == id).cloned()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.all.iter().any(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn criteria(&self) -> &F {
        &self.criteria
    }

    /// Bumped on every mutation, including criteria changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn refresh(&mut self) {
        self.filtered = Arc::new(filter::apply(&self.all, &self.criteria));
        self.version = self.version.wrapping_add(1);
    }
}
