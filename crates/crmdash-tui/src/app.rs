//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tui_input::Input;

use crmdash_core::DemoClient;

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel, RecordKind};
use crate::component::Component;
use crate::data_bridge::DataBridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::form::input_request;

/// How long a toast stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

const SIDEBAR_MIN_WIDTH: u16 = 70;

/// Per-source load status shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoadBadge {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Search line visibility. The text survives closing the line so it
    /// keeps mirroring the active lead search.
    search_active: bool,
    search: Input,
    terminal_size: (u16, u16),
    /// Components dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// The main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Remote loads. `None` runs the UI without a backend.
    bridge: Option<DataBridge>,
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    loads: HashMap<RecordKind, LoadBadge>,
}

impl App {
    pub fn new(client: Option<DemoClient>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let data_cancel = CancellationToken::new();
        let bridge =
            client.map(|client| DataBridge::new(client, action_tx.clone(), data_cancel.clone()));

        Self {
            active_screen: ScreenId::Home,
            previous_screen: None,
            screens: create_screens().into_iter().collect(),
            running: true,
            help_visible: false,
            search_active: false,
            search: Input::default(),
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            bridge,
            data_cancel,
            pending_confirm: None,
            notification: None,
            loads: HashMap::new(),
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
            debug!(screen = screen.id(), "screen mounted");
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        for kind in RecordKind::ALL {
            self.action_tx.send(Action::RequestLoad(kind))?;
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if self.search_active {
            return Ok(self.handle_search_key(key));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // A form or detail panel owns the keyboard
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if screen.captures_input() {
                return screen.handle_key_event(key);
            }
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('/')) if self.active_screen.searchable() => {
                return Ok(Some(Action::OpenSearch));
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = u8::try_from(c).map_or(0, |b| b - b'0');
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                return Ok(Some(if self.notification.is_some() {
                    Action::DismissNotification
                } else {
                    Action::GoBack
                }));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Keys while the search line is open. Every edit is forwarded as
    /// `SearchInput` so the list narrows as the user types.
    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.search.reset();
                let _ = self.action_tx.send(Action::SearchInput(String::new()));
                Some(Action::CloseSearch)
            }
            KeyCode::Enter => Some(Action::SearchSubmit),
            _ => {
                let changed = self.search.handle(input_request(key)?)?;
                changed
                    .value
                    .then(|| Action::SearchInput(self.search.value().to_owned()))
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::OpenSearch => {
                self.search_active = true;
            }

            Action::CloseSearch | Action::SearchSubmit => {
                self.search_active = false;
            }

            // ── Confirmation ──────────────────────────────────────────
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes | Action::ConfirmNo => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.action_tx.send(Action::Confirmed {
                        action: confirm,
                        approved: matches!(action, Action::ConfirmYes),
                    })?;
                }
            }

            // ── Notifications ─────────────────────────────────────────
            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            // ── Loads ─────────────────────────────────────────────────
            Action::RequestLoad(kind) => {
                if let Some(bridge) = &self.bridge {
                    info!(source = kind.label(), "requesting load");
                    bridge.load(*kind);
                }
            }

            Action::LoadStarted(kind) => {
                self.loads.insert(*kind, LoadBadge::Loading);
                self.broadcast(action)?;
            }

            Action::LeadsLoaded(result) => {
                self.loads.insert(RecordKind::Leads, badge_for(result.is_ok()));
                self.broadcast(action)?;
            }

            Action::ProductsLoaded(result) => {
                self.loads.insert(RecordKind::Products, badge_for(result.is_ok()));
                self.broadcast(action)?;
            }

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, created)| created.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                self.broadcast(action)?;
            }

            Action::SearchInput(_) | Action::Confirmed { .. } => {
                self.broadcast(action)?;
            }

            Action::Render => {}
        }

        Ok(())
    }

    /// Hand `action` to every screen, queueing any follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        // Narrow terminals drop the sidebar; number keys still switch screens
        let sidebar = if self.terminal_size.0 < SIDEBAR_MIN_WIDTH { 0 } else { 18 };
        let cols =
            Layout::horizontal([Constraint::Length(sidebar), Constraint::Min(1)]).split(rows[0]);

        if sidebar > 0 {
            self.render_sidebar(frame, cols[0]);
        }

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, cols[1]);
        }

        self.render_status_bar(frame, rows[1]);

        // Overlays, last = topmost
        if let Some((ref notif, _)) = self.notification {
            render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" crmdash ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let marker = if id == self.active_screen { "▸" } else { " " };
                Line::from(vec![
                    Span::styled(format!("{marker}{} ", id.number()), theme::key_hint()),
                    Span::styled(id.label(), style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let prefix = " / ";
            let line = Line::from(vec![
                Span::styled(prefix, Style::default().fg(theme::ACCENT)),
                Span::styled(self.search.value(), Style::default().fg(theme::INFO)),
                Span::styled("   Esc clear  Enter done", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);

            let offset = u16::try_from(prefix.len() + self.search.visual_cursor())
                .unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                area.x.saturating_add(offset).min(area.right().saturating_sub(1)),
                area.y,
            ));
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for kind in RecordKind::ALL {
            let (glyph, text, color) = match self.loads.get(&kind).copied().unwrap_or_default() {
                LoadBadge::Idle => ("○", "idle", theme::MUTED),
                LoadBadge::Loading => ("◐", "loading", theme::WARN),
                LoadBadge::Ready => ("●", "ready", theme::OK),
                LoadBadge::Failed => ("✗", "failed", theme::FAILURE),
            };
            spans.push(Span::styled(
                format!("{} {glyph} {text}  ", kind.label()),
                Style::default().fg(color),
            ));
        }
        spans.push(Span::styled("│ ? help  1-3 screens  q quit", theme::key_hint()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn badge_for(ok: bool) -> LoadBadge {
    if ok { LoadBadge::Ready } else { LoadBadge::Failed }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 60, 22);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::PANEL_BG));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let section = |title: &'static str| {
        [
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::INFO),
            )),
            Line::from(Span::styled(
                format!("  {}", "─".repeat(title.chars().count())),
                theme::key_hint(),
            )),
        ]
    };
    let entry = |keys: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
            Span::styled(text, theme::key_hint()),
        ])
    };

    let mut help_text = vec![Line::from("")];
    help_text.extend(section("Navigation"));
    help_text.extend([
        entry("1-3", "Jump to screen"),
        entry("Tab", "Next screen"),
        entry("j/k ↑/↓", "Move up/down"),
        entry("Esc", "Back / close"),
    ]);
    help_text.push(Line::from(""));
    help_text.extend(section("Lists"));
    help_text.extend([
        entry("/", "Search leads"),
        entry("h/l [/]", "Product category"),
        entry("Enter", "Product details"),
        entry("n e d", "New / edit / delete"),
        entry("r", "Retry a failed load"),
    ]);
    help_text.push(Line::from(""));
    help_text.extend(section("Form"));
    help_text.extend([
        entry("Tab ↑/↓", "Move between fields"),
        entry("Enter", "Save"),
        entry("Esc", "Cancel"),
    ]);
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "                         Esc or ? to close",
        theme::key_hint(),
    )));

    frame.render_widget(Paragraph::new(help_text), inner);
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog_area = centered(area, 50, 5);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::WARN))
        .style(Style::default().bg(theme::PANEL_BG));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            format!("  {confirm}"),
            Style::default().fg(theme::TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
    let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16;

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (border_color, icon) = match notif.level {
        NotificationLevel::Success => (theme::OK, "✓"),
        NotificationLevel::Error => (theme::FAILURE, "✗"),
    };

    frame.render_widget(Clear, toast_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::PANEL_BG));

    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(notif.message.as_str(), Style::default().fg(theme::TEXT)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
