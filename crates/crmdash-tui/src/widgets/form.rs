//! Create/edit form panel.
//!
//! One `tui_input::Input` per editable field, in the draft's field order.
//! The inputs only carry cursor state; every change is handed back to the
//! caller so the edit session's draft stays the single source of truth.

use std::marker::PhantomData;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::{Input, InputRequest};

use crmdash_core::{Draft, ValidationError};

use crate::theme;

/// Map a key press to a text-editing request.
pub fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => Some(InputRequest::GoToStart),
        KeyCode::Char('e') if ctrl => Some(InputRequest::GoToEnd),
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

pub struct FormPanel<D: Draft> {
    inputs: Vec<Input>,
    focus: usize,
    _draft: PhantomData<fn() -> D>,
}

impl<D: Draft> FormPanel<D> {
    /// Mirror `draft` into fresh inputs, focus on the first field.
    pub fn from_draft(draft: &D) -> Self {
        let inputs = D::FIELDS
            .iter()
            .map(|&field| Input::new(draft.value(field).to_owned()))
            .collect();
        Self {
            inputs,
            focus: 0,
            _draft: PhantomData,
        }
    }

    pub fn focused_field(&self) -> Option<D::Field> {
        D::FIELDS.get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + 1) % self.inputs.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
        }
    }

    /// Apply `request` to the focused input. Returns the field and its new
    /// text when the value changed.
    pub fn edit(&mut self, request: InputRequest) -> Option<(D::Field, String)> {
        let field = self.focused_field()?;
        let input = self.inputs.get_mut(self.focus)?;
        let changed = input.handle(request)?;
        changed
            .value
            .then(|| (field, input.value().to_owned()))
    }

    pub fn value(&self, field: D::Field) -> Option<&str> {
        D::FIELDS
            .iter()
            .position(|&f| f == field)
            .and_then(|i| self.inputs.get(i))
            .map(Input::value)
    }

    /// Draw the panel. Fields named in `error` get a red border.
    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, error: Option<&ValidationError>) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> =
            D::FIELDS.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Min(1));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, (&field, input)) in D::FIELDS.iter().zip(&self.inputs).enumerate() {
            let name: &'static str = field.into();
            let failed = error.is_some_and(|e| e.has_field(name));
            self.render_field(frame, rows[i], D::label(field), input, i == self.focus, failed);
        }

        if let Some(err) = error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {err}"),
                    Style::default().fg(theme::FAILURE),
                )),
                rows[D::FIELDS.len()],
            );
        }

        let hints = Line::from(vec![
            Span::styled(" Tab ", theme::key_hint_key()),
            Span::styled("next  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[D::FIELDS.len() + 1]);
    }

    #[allow(clippy::unused_self)]
    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        input: &Input,
        active: bool,
        failed: bool,
    ) {
        let border = if failed {
            theme::border_error()
        } else if active {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let label_style = if active {
            Style::default().fg(theme::INFO)
        } else {
            Style::default().fg(theme::TEXT)
        };

        let block = Block::default()
            .title(Span::styled(format!(" {label} "), label_style))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = usize::from(inner.width.max(1));
        let scroll = input.visual_scroll(width.saturating_sub(1));
        let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
        frame.render_widget(
            Paragraph::new(input.value())
                .style(Style::default().fg(theme::INFO))
                .scroll((0, offset)),
            inner,
        );

        if active {
            let column = u16::try_from(input.visual_cursor().saturating_sub(scroll))
                .unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                inner.x.saturating_add(column).min(inner.right().saturating_sub(1)),
                inner.y,
            ));
        }
    }
}
