//! Products screen: category tabs over the catalog, a detail panel and the
//! same create/edit/delete flow as leads.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crmdash_core::{CategoryFilter, Product};

use crate::action::{Action, ConfirmAction, RecordKind};
use crate::component::Component;
use crate::screens::records::{RecordList, TableRecord};
use crate::theme;
use crate::widgets::sub_tabs;

impl TableRecord for Product {
    const HEADERS: &'static [&'static str] = &["Title", "Category", "Price", "Rating"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Fill(4),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(8),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.category.clone(),
            self.display_price(),
            self.rating
                .map_or_else(|| "─".into(), |r| format!("{:.1}★", r.rate)),
        ]
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn confirm_delete(&self) -> ConfirmAction {
        ConfirmAction::DeleteProduct {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

fn category_label(category: &CategoryFilter) -> &str {
    if category.is_all() {
        "All"
    } else {
        category.token()
    }
}

pub struct ProductsScreen {
    focused: bool,
    list: RecordList<Product, CategoryFilter>,
    detail_open: bool,
}

impl ProductsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            list: RecordList::new(RecordKind::Products),
            detail_open: false,
        }
    }

    /// Step the category selector; `forward` wraps past the last category.
    fn cycle_category(&mut self, forward: bool) {
        let categories = self.list.view().categories();
        let len = categories.len();
        let current = categories
            .iter()
            .position(|c| c == self.list.view().store().criteria())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        if let Some(target) = categories.get(next) {
            let token = target.token().to_owned();
            self.list
                .with_view(|view| view.on_category_change(&token));
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.detail_open = false;
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.list.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list.move_selection(-1);
                None
            }
            KeyCode::Char('e') => {
                self.detail_open = false;
                self.list.open_edit()
            }
            KeyCode::Char('d') => self.list.request_delete(),
            _ => None,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let categories = self.list.view().categories();
        let current = self.list.view().store().criteria();
        let active = categories
            .iter()
            .position(|c| c == current)
            .unwrap_or(usize::MAX);
        let labels: Vec<&str> = categories.iter().map(category_label).collect();
        let mut tabs = sub_tabs::render_sub_tabs(&labels, active);
        tabs.spans.insert(0, Span::raw(" "));
        frame.render_widget(Paragraph::new(tabs), rows[0]);

        let (shown, _) = self.list.view().summary();
        let mut spans = vec![Span::styled(
            format!(" Showing {shown} products"),
            theme::title_style(),
        )];
        if !current.is_all() {
            spans.push(Span::styled("   in ", theme::key_hint()));
            spans.push(Span::styled(
                current.token().to_owned(),
                Style::default().fg(theme::QUERY),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
    }

    fn render_detail(frame: &mut Frame, area: Rect, product: &Product) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", product.title))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = |text: &'static str| Span::styled(text, Style::default().fg(theme::TEXT));
        let value = |text: String| Span::styled(text, Style::default().fg(theme::INFO));

        let rating = product.rating.map_or_else(
            || "no ratings yet".to_owned(),
            |r| format!("{:.1} ★  ({} reviews)", r.rate, r.count),
        );
        let image = if product.image.is_empty() {
            "─".to_owned()
        } else {
            product.image.clone()
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![label("  Price      "), value(product.display_price())]),
            Line::from(vec![label("  Rating     "), value(rating)]),
            Line::from(vec![label("  Category   "), value(product.category.clone())]),
            Line::from(vec![label("  Image      "), value(image)]),
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", product.description),
                Style::default().fg(theme::TEXT),
            )),
        ];

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), rows[0]);

        let hints = Line::from(vec![
            Span::styled("  e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[1]);
    }

    fn render_hints(frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled(" j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("h/l ", theme::key_hint_key()),
            Span::styled("category  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("details  ", theme::key_hint()),
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

impl Component for ProductsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.list.form_open() {
            return Ok(self.list.handle_form_key(key));
        }
        if self.detail_open {
            return Ok(self.handle_detail_key(key));
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
            KeyCode::Char('l' | ']') | KeyCode::Right => {
                self.cycle_category(true);
                None
            }
            KeyCode::Char('h' | '[') | KeyCode::Left => {
                self.cycle_category(false);
                None
            }
            KeyCode::Enter => {
                self.detail_open = self.list.selected_record().is_some();
                None
            }
            KeyCode::Char('n') => self.list.open_create(),
            KeyCode::Char('e') => self.list.open_edit(),
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
            Action::LoadStarted(RecordKind::Products) => {
                self.list.load_started();
                None
            }
            Action::ProductsLoaded(result) => {
                self.list.apply_load(result.clone());
                None
            }
            Action::Confirmed {
                action: ConfirmAction::DeleteProduct { id, .. },
                approved,
            } => {
                let follow_up = self.list.resolve_delete(*id, *approved);
                if self.list.selected_record().is_none() {
                    self.detail_open = false;
                }
                follow_up
            }
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
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_header(frame, rows[0]);
        self.list.render_body(frame, rows[1], self.focused && !self.detail_open);
        Self::render_hints(frame, rows[2]);

        if self.detail_open {
            if let Some(product) = self.list.selected_record() {
                let body = rows[1];
                let width = 56u16.min(body.width);
                let detail = Rect::new(body.right() - width, body.y, width, body.height);
                Self::render_detail(frame, detail, &product);
            }
        }
    }

    fn captures_input(&self) -> bool {
        self.list.form_open() || self.detail_open
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Products"
    }
}
