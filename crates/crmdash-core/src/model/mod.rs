// ── Domain model ──
//
// Leads and products, plus the traits the generic list machinery is
// written against. Every record kind comes in three shapes: the record
// itself, a `Draft` (raw form text) and a `Patch` (validated values).

pub mod lead;
pub mod product;
pub mod record;

// ── Re-exports ──────────────────────────────────────────────────────

pub use lead::{Lead, LeadDraft, LeadField, LeadPatch};
pub use product::{Product, ProductDraft, ProductField, ProductPatch, Rating};
pub use record::{Draft, Record, RecordId};
