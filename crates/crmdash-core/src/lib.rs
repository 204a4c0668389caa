//! Client-side list management core between `crmdash-api` and the TUI.
//!
//! Both data views of the dashboard (leads, products) follow the same
//! pattern, implemented once here:
//!
//! - **[`ListStore`]**: ordered, id-unique collection of records plus the
//!   filtered view derived from it. Every mutation re-derives the filtered
//!   view before returning, so readers never observe a stale one.
//!
//! - **Filter engine** ([`filter`]): pure predicates ([`LeadSearch`],
//!   [`CategoryFilter`]) applied by a full, order-preserving re-scan.
//!
//! - **[`EditSession`]**: the create/edit form as an explicit state machine
//!   (`Idle`, `Creating`, `Editing(id)`) with a serializable draft. Submits
//!   validate, then mutate the store.
//!
//! - **[`DataView`]**: one store, one session and the load state, exposing
//!   presentation intents (`on_search_change`, `on_form_submit`, ...).
//!
//! - **Load boundary** ([`loader`]): the one-shot remote fetch as a
//!   cancellable tokio task. The store API itself stays synchronous.

pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod ids;
pub mod loader;
pub mod model;
pub mod session;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use crmdash_api::DemoClient;
pub use config::SourceConfig;
pub use error::{CoreError, ValidationError};
pub use filter::{CategoryFilter, Filter, LeadSearch};
pub use ids::IdGenerator;
pub use loader::{LeadSource, LoadHandle, ProductSource, RecordSource, spawn_load};
pub use session::{DeleteOutcome, EditMode, EditSession, delete_record};
pub use store::ListStore;
pub use view::{DataView, LeadsView, LoadState, ProductsView};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Draft, Lead, LeadDraft, LeadField, LeadPatch, Product, ProductDraft, ProductField,
    ProductPatch, Rating, Record, RecordId,
};
