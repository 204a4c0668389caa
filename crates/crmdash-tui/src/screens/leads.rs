//! Leads screen: searchable lead table with an inline create/edit form.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crmdash_core::{Lead, LeadSearch};

use crate::action::{Action, ConfirmAction, RecordKind};
use crate::component::Component;
use crate::screens::records::{RecordList, TableRecord};
use crate::theme;

impl TableRecord for Lead {
    const HEADERS: &'static [&'static str] = &["Name", "Email", "Company", "City"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(1),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.company.clone(),
            self.city.clone(),
        ]
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn confirm_delete(&self) -> ConfirmAction {
        ConfirmAction::DeleteLead {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

pub struct LeadsScreen {
    focused: bool,
    list: RecordList<Lead, LeadSearch>,
}

impl LeadsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            list: RecordList::new(RecordKind::Leads),
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let (shown, total) = self.list.view().summary();
        let search = self.list.view().store().criteria();

        let mut spans = vec![Span::styled(
            format!(" Showing {shown} of {total} leads"),
            theme::title_style(),
        )];
        if !search.is_empty() {
            spans.push(Span::styled("   matching ", theme::key_hint()));
            spans.push(Span::styled(
                format!("\"{}\"", search.text()),
                Style::default().fg(theme::QUERY),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_hints(frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled(" j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("new  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}

impl Component for LeadsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.list.form_open() {
            return Ok(self.list.handle_form_key(key));
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.list.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.list.select_index(0);
                None
            }
            KeyCode::Char('G') => {
                self.list.select_last();
                None
            }
            KeyCode::Char('n') => self.list.open_create(),
            KeyCode::Char('e') | KeyCode::Enter => self.list.open_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.list.request_delete(),
            KeyCode::Char('r') => self.list.request_retry(),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.list.move_selection(1),
            MouseEventKind::ScrollUp => self.list.move_selection(-1),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        let follow_up = match action {
            Action::LoadStarted(RecordKind::Leads) => {
                self.list.load_started();
                None
            }
            Action::LeadsLoaded(result) => {
                self.list.apply_load(result.clone());
                None
            }
            Action::SearchInput(text) => {
                self.list.with_view(|view| view.on_search_change(text));
                None
            }
            Action::Confirmed {
                action: ConfirmAction::DeleteLead { id, .. },
                approved,
            } => self.list.resolve_delete(*id, *approved),
            Action::Tick => {
                self.list.tick();
                None
            }
            _ => None,
        };
        Ok(follow_up)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_summary(frame, rows[0]);
        self.list.render_body(frame, rows[1], self.focused);
        Self::render_hints(frame, rows[2]);
    }

    fn captures_input(&self) -> bool {
        self.list.form_open()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Leads"
    }
}
