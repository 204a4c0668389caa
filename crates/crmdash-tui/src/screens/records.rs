//! Shared machinery of the two list screens: a `DataView` plus the table
//! cursor, the form panel and the loading/error chrome around them.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tracing::debug;

use crmdash_core::{
    CoreError, DataView, DeleteOutcome, EditMode, Filter, LoadState, Record, RecordId,
};

use crate::action::{Action, ConfirmAction, Notification, RecordKind};
use crate::theme;
use crate::widgets::form::{FormPanel, input_request};

/// How a record shows up in a table.
pub trait TableRecord: Record {
    const HEADERS: &'static [&'static str];

    fn widths() -> Vec<Constraint>;

    fn cells(&self) -> Vec<String>;

    /// Short human name for toasts and confirmations.
    fn display_name(&self) -> &str;

    fn confirm_delete(&self) -> ConfirmAction;
}

pub struct RecordList<R: TableRecord, F: Filter<R>> {
    kind: RecordKind,
    view: DataView<R, F>,
    table_state: TableState,
    form: Option<FormPanel<R::Draft>>,
    throbber_state: ThrobberState,
}

impl<R: TableRecord, F: Filter<R>> RecordList<R, F> {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            view: DataView::new(),
            table_state: TableState::default(),
            form: None,
            throbber_state: ThrobberState::default(),
        }
    }

    pub fn view(&self) -> &DataView<R, F> {
        &self.view
    }

    pub fn form_open(&self) -> bool {
        self.form.is_some()
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn selected_record(&self) -> Option<Arc<R>> {
        let idx = self.table_state.selected()?;
        self.view.store().filtered().get(idx).cloned()
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.view.store().filtered_len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.select_index(next);
    }

    pub fn select_last(&mut self) {
        let len = self.view.store().filtered_len();
        if len > 0 {
            self.select_index(len - 1);
        }
    }

    pub fn select_index(&mut self, idx: usize) {
        let id = self.view.store().filtered().get(idx).map(|r| r.id());
        if let Some(id) = id {
            // The id comes straight from the filtered view, so this cannot miss.
            let _ = self.view.select(id);
            self.table_state.select(Some(idx));
        }
    }

    /// Re-anchor the table cursor after the filtered view changed. The
    /// view's selected record wins when it is still visible; otherwise the
    /// cursor stays at the same row, clamped.
    fn sync_selection(&mut self) {
        let filtered = self.view.store().filtered();
        if filtered.is_empty() {
            self.table_state.select(None);
            self.view.clear_selection();
            return;
        }
        let anchored = self
            .view
            .selected()
            .and_then(|sel| filtered.iter().position(|r| r.id() == sel.id()));
        let idx = anchored
            .unwrap_or_else(|| self.table_state.selected().unwrap_or(0).min(filtered.len() - 1));
        self.select_index(idx);
    }

    // ── Intents ──────────────────────────────────────────────────────

    pub fn load_started(&mut self) {
        self.view.on_load_started();
    }

    pub fn apply_load(&mut self, result: Result<Vec<R>, CoreError>) {
        self.view.on_load_finished(result);
        self.sync_selection();
    }

    /// Run a filter intent against the view, then re-anchor the cursor.
    pub fn with_view<T>(&mut self, intent: impl FnOnce(&mut DataView<R, F>) -> T) -> T {
        let out = intent(&mut self.view);
        self.sync_selection();
        out
    }

    /// `r` on the error panel. Only offered after a failed load.
    pub fn request_retry(&self) -> Option<Action> {
        matches!(self.view.load_state(), LoadState::Failed { .. })
            .then_some(Action::RequestLoad(self.kind))
    }

    pub fn open_create(&mut self) -> Option<Action> {
        match self.view.on_form_open() {
            Ok(()) => {
                self.form = Some(FormPanel::from_draft(self.view.session().draft()));
                None
            }
            Err(err) => Some(Action::Notify(Notification::error(err.to_string()))),
        }
    }

    pub fn open_edit(&mut self) -> Option<Action> {
        let record = self.selected_record()?;
        match self.view.on_form_edit_request(record.id()) {
            Ok(()) => {
                self.form = Some(FormPanel::from_draft(self.view.session().draft()));
                None
            }
            Err(err) => Some(Action::Notify(Notification::error(err.to_string()))),
        }
    }

    pub fn request_delete(&self) -> Option<Action> {
        self.selected_record()
            .map(|record| Action::ShowConfirm(record.confirm_delete()))
    }

    /// Run the delete with the user's answer as the confirmation gate.
    pub fn resolve_delete(&mut self, id: RecordId, approved: bool) -> Option<Action> {
        let outcome = self.view.on_delete_request(id, |_| approved);
        self.close_form_if_idle();
        self.sync_selection();
        match outcome {
            Ok(DeleteOutcome::Removed(record)) => Some(Action::Notify(Notification::success(
                format!("Deleted {} {}", R::KIND, record.display_name()),
            ))),
            Ok(DeleteOutcome::Declined) => {
                debug!(kind = R::KIND, %id, "delete kept");
                None
            }
            Err(err) => Some(Action::Notify(Notification::error(err.to_string()))),
        }
    }

    /// Keys while the form panel is open.
    pub fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let form = self.form.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.view.on_form_cancel();
                self.form = None;
                None
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => {
                form.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus_prev();
                None
            }
            _ => {
                let (field, value) = form.edit(input_request(key)?)?;
                self.view
                    .on_field_change(field, value)
                    .err()
                    .map(|err| Action::Notify(Notification::error(err.to_string())))
            }
        }
    }

    fn submit_form(&mut self) -> Option<Action> {
        let verb = match self.view.session().mode() {
            EditMode::Editing(_) => "Updated",
            EditMode::Creating | EditMode::Idle => "Created",
        };
        let result = self.view.on_form_submit_current();
        self.close_form_if_idle();
        self.sync_selection();
        match result {
            Ok(record) => Some(Action::Notify(Notification::success(format!(
                "{verb} {} {}",
                R::KIND,
                record.display_name()
            )))),
            Err(err) => Some(Action::Notify(Notification::error(err.to_string()))),
        }
    }

    fn close_form_if_idle(&mut self) {
        if !self.view.session().is_open() {
            self.form = None;
        }
    }

    pub fn tick(&mut self) {
        if self.view.load_state().is_loading() {
            self.throbber_state.calc_next();
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Throbber, error panel and table stacked in `area`; the form panel
    /// docks on the right while open.
    pub fn render_body(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (list_area, form_area) = if self.form.is_some() && area.width >= 80 {
            let cols = Layout::horizontal([Constraint::Min(30), Constraint::Length(46)]).split(area);
            (cols[0], Some(cols[1]))
        } else if self.form.is_some() {
            (area, Some(area))
        } else {
            (area, None)
        };

        match self.view.load_state() {
            LoadState::Loading if self.view.store().is_empty() => {
                self.render_loading(frame, list_area);
            }
            LoadState::Failed { message, .. } => {
                let rows =
                    Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).split(list_area);
                self.render_error(frame, rows[0], message);
                self.render_table(frame, rows[1], focused);
            }
            _ => self.render_table(frame, list_area, focused),
        }

        if let (Some(form), Some(form_area)) = (&self.form, form_area) {
            let title = match self.view.session().mode() {
                EditMode::Editing(id) => format!("Edit {} #{id}", R::KIND),
                EditMode::Creating | EditMode::Idle => format!("New {}", R::KIND),
            };
            form.render(frame, form_area, &title, self.view.session().last_error());
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        let throbber = Throbber::default()
            .label(format!("  Loading {}...", self.kind.label()))
            .style(Style::default().fg(theme::INFO))
            .throbber_style(Style::default().fg(theme::ACCENT));

        frame.render_stateful_widget(throbber, rows[1], &mut self.throbber_state.clone());
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, message: &str) {
        let block = Block::default()
            .title(format!(" Could not load {} ", self.kind.label()))
            .title_style(Style::default().fg(theme::FAILURE))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_error());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(
                format!(" {message}"),
                Style::default().fg(theme::TEXT),
            )),
            Line::from(vec![
                Span::styled(" r ", theme::key_hint_key()),
                Span::styled("retry", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);

        let header = Row::new(R::HEADERS.iter().map(|h| Cell::from(*h))).style(theme::table_header());
        let rows: Vec<Row> = self
            .view
            .store()
            .filtered()
            .iter()
            .map(|record| Row::new(record.cells()).style(theme::table_row()))
            .collect();

        let table = Table::new(rows, R::widths())
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }
}
