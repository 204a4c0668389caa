//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use crmdash_core::{CoreError, Lead, Product, RecordId};

use crate::screen::ScreenId;

/// Which remote list an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Leads,
    Products,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [Self::Leads, Self::Products];

    pub fn label(self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Products => "products",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Destructive operation awaiting a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteLead { id: RecordId, name: String },
    DeleteProduct { id: RecordId, title: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteLead { name, .. } => write!(f, "Delete lead {name}?"),
            Self::DeleteProduct { title, .. } => write!(f, "Delete product {title}?"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ─────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Confirmation ──────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    /// The user answered a confirmation; `approved` is the gate's verdict.
    Confirmed {
        action: ConfirmAction,
        approved: bool,
    },

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,

    // ── Remote loads ──────────────────────────────────────────────
    RequestLoad(RecordKind),
    LoadStarted(RecordKind),
    LeadsLoaded(Result<Vec<Lead>, CoreError>),
    ProductsLoaded(Result<Vec<Product>, CoreError>),
}
