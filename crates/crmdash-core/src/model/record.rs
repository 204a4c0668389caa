// ── Record identity and the generic record contract ──

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identity of a record within its list.
///
/// Remote records keep the id the server gave them; locally created ones
/// get a fresh id from [`IdGenerator`](crate::IdGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Form-side representation of a record: every field as raw text.
///
/// A draft is always safe to hold, whatever the user typed. Only
/// [`validate`](Draft::validate) turns it into a typed patch.
pub trait Draft: Clone + Default + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Field selector used by the form.
    type Field: Copy + Eq + fmt::Debug + Into<&'static str> + Send + Sync + 'static;
    /// Validated, typed counterpart of the draft.
    type Patch;

    /// Editable fields in form order.
    const FIELDS: &'static [Self::Field];

    fn value(&self, field: Self::Field) -> &str;

    fn set(&mut self, field: Self::Field, value: String);

    /// Human label for a field.
    fn label(field: Self::Field) -> &'static str;

    /// Check every field and produce a patch, or name every offending field.
    fn validate(&self) -> Result<Self::Patch, ValidationError>;
}

/// A record managed by a [`ListStore`](crate::ListStore).
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    type Draft: Draft<Patch = Self::Patch>;
    type Patch: Clone + fmt::Debug + Send + Sync + 'static;

    /// Lower-case noun used in errors and logs ("lead", "product").
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    /// Pre-fill a draft from this record (edit mode).
    fn to_draft(&self) -> Self::Draft;

    /// Build a brand-new record from a validated patch.
    fn from_patch(id: RecordId, patch: Self::Patch) -> Result<Self, ValidationError>;

    /// Overlay a patch onto this record. Fields the patch leaves `None`
    /// and fields the form does not edit keep their current value.
    fn merge(&mut self, patch: Self::Patch);
}

/// A required draft value, kept exactly as typed. Whitespace-only counts
/// as empty.
pub(crate) fn required(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_owned())
}

/// Assign `value` to `slot` when the patch carries one.
pub(crate) fn overlay<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}
