// ── Core error types ──
//
// User-facing errors from crmdash-core. Consumers never see HTTP status
// codes or JSON parse failures directly: `CoreError::fetch_failure`
// folds transport-layer errors into a single load failure that names
// the source it came from.

use serde::Serialize;
use thiserror::Error;

use crate::model::RecordId;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── Load errors ──────────────────────────────────────────────────
    #[error("Failed to load {source_name}: {reason}")]
    FetchFailure {
        source_name: String,
        reason: String,
        /// HTTP status code (if the server answered at all).
        status: Option<u16>,
    },

    #[error("Loading {source_name} was cancelled")]
    Cancelled { source_name: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: RecordId },

    #[error("{kind} {id} already exists")]
    DuplicateId { kind: &'static str, id: RecordId },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ── Session errors ───────────────────────────────────────────────
    #[error("Cannot {operation} while {mode}")]
    InvalidState {
        operation: &'static str,
        mode: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Translate a transport error from `source_name` into a load failure.
    pub fn fetch_failure(source_name: &str, err: &crmdash_api::Error) -> Self {
        Self::FetchFailure {
            source_name: source_name.to_owned(),
            reason: err.to_string(),
            status: err.status(),
        }
    }

    /// Whether retrying the same load could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::FetchFailure { status, .. } => {
                status.is_none_or(|s| s == 429 || (500..600).contains(&s))
            }
            Self::Cancelled { .. } => true,
            _ => false,
        }
    }
}

/// A submitted draft that failed validation.
///
/// `fields` holds the machine names of every offending field, in form
/// order, so the presentation layer can highlight all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Invalid {kind}: check {}", .fields.join(", "))]
pub struct ValidationError {
    pub kind: &'static str,
    pub fields: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(kind: &'static str, fields: Vec<&'static str>) -> Self {
        Self { kind, fields }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }
}
