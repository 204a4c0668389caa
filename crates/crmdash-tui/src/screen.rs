//! Screen identifier enum.

use std::fmt;

/// Identifies each primary screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Home, // 1
    Leads,    // 2
    Products, // 3
}

impl ScreenId {
    /// All screens in sidebar order.
    pub const ALL: [ScreenId; 3] = [Self::Home, Self::Leads, Self::Products];

    pub fn number(self) -> u8 {
        match self {
            Self::Home => 1,
            Self::Leads => 2,
            Self::Products => 3,
        }
    }

    /// Screen from a numeric key (1-3). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Home),
            2 => Some(Self::Leads),
            3 => Some(Self::Products),
            _ => None,
        }
    }

    /// Next screen in sidebar order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in sidebar order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Leads => "Leads",
            Self::Products => "Products",
        }
    }

    /// Whether `/` opens the search line on this screen.
    pub fn searchable(self) -> bool {
        self == Self::Leads
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
