//! Horizontal tab row used inside screens (the product category selector).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// Renders a horizontal tab line with the active tab highlighted.
pub fn render_sub_tabs<'a, S: AsRef<str>>(labels: &'a [S], active_index: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }

        if i == active_index {
            spans.push(Span::styled(
                format!("[{}]", label.as_ref()),
                theme::tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label.as_ref(), theme::tab_inactive()));
        }
    }

    Line::from(spans)
}
