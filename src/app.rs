use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arboard::Clipboard;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use tracing::{debug, error, info};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, NavAction, SearchAction, TableAction, TableConfig};
use crate::dashboard::{DashboardScreen, Summary};
use crate::screen::{ResourceScreen, Screen, ScreenEvent};
use crate::source::Dataset;
use crate::tui::{Event, Tui};
use crate::ui::{Component, Handled};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

const STATUS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
    created_at: Instant,
}

impl Status {
    fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Info)
    }

    fn error(message: impl Into<String>) -> Self {
        Self::new(message, StatusKind::Error)
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= STATUS_DURATION
    }
}

pub struct App {
    screens: Vec<Box<dyn Screen>>,
    active: usize,
    theme: Theme,
    resolver: Arc<KeyResolver>,
    export_dir: PathBuf,
    status: Option<Status>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(
        dataset: Dataset,
        table: &TableConfig,
        resolver: Arc<KeyResolver>,
        theme: Theme,
        export_dir: PathBuf,
    ) -> Self {
        let summary = Summary::from_dataset(&dataset);
        let screens: Vec<Box<dyn Screen>> = vec![
            Box::new(DashboardScreen::new(summary)),
            Box::new(ResourceScreen::new(dataset.users, table, Arc::clone(&resolver))),
            Box::new(ResourceScreen::new(dataset.products, table, Arc::clone(&resolver))),
            Box::new(ResourceScreen::new(dataset.categories, table, Arc::clone(&resolver))),
            Box::new(ResourceScreen::new(dataset.orders, table, Arc::clone(&resolver))),
        ];
        Self {
            screens,
            active: 0,
            theme,
            resolver,
            export_dir,
            status: None,
            should_quit: false,
            should_suspend: false,
        }
    }

    /// Switch to tab `index`, ignoring out-of-range values.
    pub fn select_tab(&mut self, index: usize) {
        if index < self.screens.len() {
            self.active = index;
        }
    }

    pub const fn active_tab(&self) -> usize {
        self.active
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub const fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Drop the status message once it has been shown long enough.
    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired_at(now)) {
            self.status = None;
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(30.0, 4.0)?;
        tui.enter()?;

        while !self.should_quit {
            let Some(event) = tui.next_event().await else {
                break;
            };
            self.handle_event(&mut tui, event)?;

            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.enter()?;
                tui.clear()?;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Suspend => self.should_suspend = true,
            Event::Render => {
                tui.draw(|frame| self.render(frame))?;
            }
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                tui.draw(|frame| self.render(frame))?;
            }
            Event::Key(key) => self.handle_key(key)?,
            Event::Error(message) => {
                error!(%message, "Terminal event error");
                self.status = Some(Status::error(message));
            }
            Event::Tick => self.expire_status(Instant::now()),
            Event::Init => {}
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if !self.screens[self.active].captures_input() {
            if self.resolver.matches_global(&key, GlobalAction::Quit) {
                self.should_quit = true;
                return Ok(());
            }
            if self.resolver.matches_global(&key, GlobalAction::NextView) {
                self.active = (self.active + 1) % self.screens.len();
                return Ok(());
            }
            if self.resolver.matches_global(&key, GlobalAction::PreviousView) {
                self.active = (self.active + self.screens.len() - 1) % self.screens.len();
                return Ok(());
            }
            if self.resolver.matches_global(&key, GlobalAction::Export) {
                self.export();
                return Ok(());
            }
            if self.resolver.matches_global(&key, GlobalAction::Copy) {
                self.copy();
                return Ok(());
            }
        }

        match self.screens[self.active].handle_key(key)? {
            Handled::Event(ScreenEvent::Status(message)) => {
                self.status = Some(Status::info(message));
            }
            Handled::Consumed => {}
            Handled::Ignored => debug!(?key, "Unhandled key"),
        }
        Ok(())
    }

    fn export(&mut self) {
        let screen = &self.screens[self.active];
        self.status = Some(match screen.export(&self.export_dir) {
            Ok((path, count)) => Status::info(format!(
                "Exported {count} {} to {}",
                screen.title().to_lowercase(),
                path.display()
            )),
            Err(e) => {
                error!(error = ?e, "Export failed");
                Status::error(format!("Export failed: {e}"))
            }
        });
    }

    fn copy(&mut self) {
        let screen = &self.screens[self.active];
        let result = screen.copy_text().and_then(|(text, count)| {
            let mut clipboard = Clipboard::new()?;
            clipboard.set_text(text)?;
            Ok(count)
        });
        self.status = Some(match result {
            Ok(count) => {
                info!(count, "Copied rows to clipboard");
                Status::info(format!("Copied {count} rows to the clipboard"))
            }
            Err(e) => {
                error!(error = ?e, "Clipboard copy failed");
                Status::error(format!("Copy failed: {e}"))
            }
        });
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [tabs_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let titles: Vec<&str> = self.screens.iter().map(|s| s.title()).collect();
        let tabs = Tabs::new(titles)
            .select(self.active)
            .style(Style::default().fg(self.theme.subtext0))
            .highlight_style(
                Style::default()
                    .fg(self.theme.mauve)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        frame.render_widget(tabs, tabs_area);

        let theme = self.theme;
        self.screens[self.active].render(frame, body_area, &theme);

        frame.render_widget(Paragraph::new(self.status_line()), status_area);
    }

    fn status_line(&self) -> Line<'static> {
        if let Some(status) = &self.status {
            let color = match status.kind {
                StatusKind::Info => self.theme.green,
                StatusKind::Error => self.theme.red,
            };
            return Line::from(Span::styled(
                status.message.clone(),
                Style::default().fg(color),
            ));
        }

        let r = &self.resolver;
        let hints = [
            (r.display_table(TableAction::ToggleSelect), "select"),
            (r.display_table(TableAction::SelectAll), "all"),
            (r.display_table(TableAction::Sort), "sort"),
            (r.display_nav(NavAction::Select), "open"),
            (r.display_search(SearchAction::Toggle), "search"),
            (r.display_search(SearchAction::Filter), "filter"),
            (r.display_global(GlobalAction::Export), "export"),
            (r.display_global(GlobalAction::Copy), "copy"),
            (r.display_global(GlobalAction::Quit), "quit"),
        ];
        let key_style = Style::default().fg(self.theme.blue);
        let label_style = Style::default().fg(self.theme.muted());
        let spans: Vec<Span<'static>> = hints
            .into_iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key, key_style),
                    Span::styled(format!(" {label}  "), label_style),
                ]
            })
            .collect();
        Line::from(spans)
    }
}
