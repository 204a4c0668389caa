//! Reusable widgets shared by the list screens.

pub mod form;
pub mod sub_tabs;
