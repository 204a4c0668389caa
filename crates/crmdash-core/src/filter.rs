// ── Filter predicates for list stores ──
//
// Pure functions of (record, criteria). The store re-scans the full list
// on every change; lists are small enough that indexing is not worth it.

use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::model::{Lead, Product};

/// Criteria a [`ListStore`](crate::ListStore) filters its records by.
///
/// `Default` is the criteria a fresh store starts with and must match
/// every record.
pub trait Filter<R>: Clone + Default + std::fmt::Debug + Send + Sync + 'static {
    fn matches(&self, record: &R) -> bool;
}

/// Keep the records matching `criteria`, in their original order.
pub fn apply<R, F: Filter<R>>(all: &[Arc<R>], criteria: &F) -> Vec<Arc<R>> {
    all.iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

// ── Leads: free-text search ──────────────────────────────────────────

/// Case-insensitive substring search over a lead's name and company.
///
/// The empty search matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSearch {
    /// Text as the user typed it.
    text: String,
    /// Lower-cased `text`, computed once.
    needle: String,
}

impl LeadSearch {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let needle = text.to_lowercase();
        Self { text, needle }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

impl Filter<Lead> for LeadSearch {
    fn matches(&self, lead: &Lead) -> bool {
        self.needle.is_empty()
            || lead.name.to_lowercase().contains(&self.needle)
            || lead.company.to_lowercase().contains(&self.needle)
    }
}

// ── Products: category selector ──────────────────────────────────────

/// Exact, case-sensitive category match, or the `All` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Token the sentinel is shown and selected by.
    pub const ALL_TOKEN: &'static str = "all";

    /// Parse a selector token. `"all"` is always the sentinel, even when
    /// a product category is literally named "all".
    pub fn from_token(token: &str) -> Self {
        if token == Self::ALL_TOKEN {
            Self::All
        } else {
            Self::Category(token.to_owned())
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::All => Self::ALL_TOKEN,
            Self::Category(name) => name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Filter<Product> for CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => product.category == *name,
        }
    }
}

/// Selector options for `products`: `All` first, then each distinct
/// category in order of first appearance.
pub fn categories(products: &[Arc<Product>]) -> Vec<CategoryFilter> {
    let distinct: IndexSet<&str> = products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| *c != CategoryFilter::ALL_TOKEN)
        .collect();

    std::iter::once(CategoryFilter::All)
        .chain(distinct.into_iter().map(|c| CategoryFilter::Category(c.to_owned())))
        .collect()
}
