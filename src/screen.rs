//! A tab of the console: one record type in a [`DataTable`], plus the search
//! box and the data source the table pages through.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tracing::{debug, info};

use crate::Theme;
use crate::config::{KeyResolver, SearchAction, TableConfig};
use crate::export;
use crate::model::Resource;
use crate::search::Matcher;
use crate::table::{
    Column, DataTable, Pagination, PagingKind, SelectionMode, SortMode, SortState, TableEvent,
};
use crate::ui::{Component, Handled, Result};

/// Something the app should tell the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    Status(String),
}

/// A tab the app can switch to.
pub trait Screen: Component<Output = ScreenEvent> {
    fn title(&self) -> &'static str;

    /// `true` while the screen wants raw keystrokes (search input), so global
    /// shortcuts must not fire.
    fn captures_input(&self) -> bool;

    /// Write the rows to export into `<dir>/<name>.csv`. Returns the path and
    /// the number of rows written.
    fn export(&self, dir: &Path) -> color_eyre::Result<(PathBuf, usize)>;

    /// CSV text for the clipboard and the number of rows in it.
    fn copy_text(&self) -> color_eyre::Result<(String, usize)>;
}

pub struct ResourceScreen<R: Resource> {
    records: Vec<R>,
    /// Records passing the search filter, in display order when the screen
    /// does the sorting.
    filtered: Vec<R>,
    columns: Vec<Column<R>>,
    table: DataTable<R, R::Key>,
    /// Host-owned copy of the selection, pushed back into the table.
    selection: Vec<R>,
    sort: Option<SortState>,
    paging: PagingKind,
    sort_mode: SortMode,
    query: String,
    searching: bool,
    /// Index into `R::facet_values()` of the active facet filter.
    facet: Option<usize>,
    matcher: Matcher,
    resolver: Arc<KeyResolver>,
}

impl<R: Resource> ResourceScreen<R> {
    pub fn new(records: Vec<R>, config: &TableConfig, resolver: Arc<KeyResolver>) -> Self {
        let pagination = Pagination::from_kind(config.paging, config.items_per_page);
        let table = DataTable::new(R::columns(), Vec::new(), R::key, Arc::clone(&resolver))
            .with_title(R::TITLE)
            .with_selection(SelectionMode::Controlled)
            .with_pagination(pagination)
            .with_sort_mode(config.sorting);

        let mut screen = Self {
            filtered: records.clone(),
            records,
            columns: R::columns(),
            table,
            selection: Vec::new(),
            sort: None,
            paging: config.paging,
            sort_mode: config.sorting,
            query: String::new(),
            searching: false,
            facet: None,
            matcher: Matcher::new(),
            resolver,
        };
        screen.refresh(true);
        screen
    }

    pub const fn table(&self) -> &DataTable<R, R::Key> {
        &self.table
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &[R] {
        &self.selection
    }

    /// Rows an export would write: the selection, or every filtered row when
    /// nothing is selected.
    pub fn export_rows(&self) -> &[R] {
        if self.selection.is_empty() {
            &self.filtered
        } else {
            &self.selection
        }
    }

    /// Active facet value, e.g. `DMJ` on the users screen.
    pub fn facet(&self) -> Option<String> {
        self.facet.and_then(|i| R::facet_values().get(i).cloned())
    }

    /// Step the facet filter to its next value, wrapping back to no filter,
    /// and go back to the first page. Returns `false` when `R` has no facet.
    pub fn cycle_facet(&mut self) -> bool {
        let count = R::facet_values().len();
        if count == 0 {
            return false;
        }
        self.facet = match self.facet {
            None => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
        };
        debug!(facet = ?self.facet(), "Facet filter changed");
        self.apply_filter();
        true
    }

    /// Replace the search query and go back to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.apply_filter();
    }

    /// `true` when rows are ordered here rather than inside the table.
    const fn sorts_rows(&self) -> bool {
        matches!(self.sort_mode, SortMode::Host) || matches!(self.paging, PagingKind::Host)
    }

    fn apply_filter(&mut self) {
        self.filtered = self.matcher.filter(&self.records, &self.query);
        if let Some(value) = self.facet() {
            self.filtered.retain(|r| r.facet().as_ref() == Some(&value));
        }
        let visible: Vec<R::Key> = self.filtered.iter().map(R::key).collect();
        let before = self.selection.len();
        self.selection.retain(|r| visible.contains(&r.key()));
        if self.selection.len() != before {
            debug!(
                dropped = before - self.selection.len(),
                "Pruned selection after filter"
            );
        }
        self.table.sync_selection(&self.selection);
        self.refresh(true);
        debug!(query = %self.query, matches = self.filtered.len(), "Filter applied");
    }

    /// Order `filtered` by the current sort when the table does not.
    fn sort_filtered(&mut self) {
        if !self.sorts_rows() {
            return;
        }
        let Some(sort) = self.sort else {
            return;
        };
        let Some(column) = self.columns.iter().find(|c| c.id == sort.column_id) else {
            return;
        };
        self.filtered
            .sort_by(|a, b| sort.direction.apply(column.compare(a, b)));
    }

    /// Push `filtered` into the table, either whole or as the requested page.
    fn refresh(&mut self, first_page: bool) {
        self.sort_filtered();
        match *self.table.pagination() {
            Pagination::Host { current_page, .. } => {
                let page = if first_page { 1 } else { current_page };
                self.serve_page(page);
            }
            Pagination::Client { .. } => {
                self.table.set_data(self.filtered.clone());
                if first_page {
                    self.table.go_to_page(1);
                }
            }
            Pagination::Disabled => self.table.set_data(self.filtered.clone()),
        }
        self.update_title();
    }

    /// Answer a page request with the matching slice of `filtered`.
    fn serve_page(&mut self, page: usize) {
        let per_page = self.table.pagination().items_per_page();
        let total = self.filtered.len();
        let start = page.saturating_sub(1).saturating_mul(per_page).min(total);
        let end = (start + per_page).min(total);
        debug!(page, start, end, total, "Serving page");
        self.table
            .set_host_page(page, self.filtered[start..end].to_vec(), total);
    }

    fn update_title(&mut self) {
        let mut parts = vec![format!("{} ({})", R::TITLE, self.filtered.len())];
        if let (Some(name), Some(value)) = (R::FACET, self.facet()) {
            parts.push(format!("{name}: {value}"));
        }
        if !self.selection.is_empty() {
            parts.push(format!("{} selected", self.selection.len()));
        }
        self.table.set_title(format!(" {} ", parts.join(" · ")));
    }

    fn on_table_event(&mut self, event: TableEvent<R>) -> Handled<ScreenEvent> {
        match event {
            TableEvent::RowActivated(row) => {
                info!(resource = R::NAME, key = %row.key(), "Row activated");
                Handled::Event(ScreenEvent::Status(format!(
                    "Opened {} #{}",
                    R::TITLE,
                    row.key()
                )))
            }
            TableEvent::SortChanged(sort) => {
                self.sort = Some(sort);
                if self.sorts_rows() {
                    self.refresh(false);
                }
                Handled::Consumed
            }
            TableEvent::SelectionChanged(rows) => {
                self.selection = rows;
                self.table.sync_selection(&self.selection);
                self.update_title();
                Handled::Consumed
            }
            TableEvent::PageRequested(page) => {
                self.serve_page(page);
                Handled::Consumed
            }
            TableEvent::PageChanged(page) => {
                debug!(page, "Client page changed");
                Handled::Consumed
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Handled<ScreenEvent> {
        if self.resolver.matches_search(&key, SearchAction::Exit) {
            self.searching = false;
            self.set_query("");
            return Handled::Consumed;
        }
        match key.code {
            KeyCode::Enter => self.searching = false,
            KeyCode::Backspace => {
                self.query.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.apply_filter();
            }
            _ => return Handled::Ignored,
        }
        Handled::Consumed
    }

    fn search_line(&self, theme: &Theme) -> Line<'static> {
        let prompt_style = Style::default()
            .fg(theme.mauve)
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled("/ ", prompt_style),
            Span::styled(self.query.clone(), Style::default().fg(theme.text)),
        ];
        if self.searching {
            spans.push(Span::styled("█", Style::default().fg(theme.lavender)));
        } else {
            spans.push(Span::styled(
                format!(
                    "  ({} to clear)",
                    self.resolver.display_search(SearchAction::Exit)
                ),
                Style::default().fg(theme.muted()),
            ));
        }
        Line::from(spans)
    }
}

impl<R: Resource> Component for ResourceScreen<R> {
    type Output = ScreenEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<ScreenEvent>> {
        if self.searching {
            return Ok(self.handle_search_key(key));
        }
        if self.resolver.matches_search(&key, SearchAction::Toggle) {
            self.searching = true;
            return Ok(Handled::Consumed);
        }
        if self.resolver.matches_search(&key, SearchAction::Filter) {
            return Ok(if self.cycle_facet() {
                Handled::Consumed
            } else {
                Handled::Ignored
            });
        }
        if !self.query.is_empty() && self.resolver.matches_search(&key, SearchAction::Exit) {
            self.set_query("");
            return Ok(Handled::Consumed);
        }

        Ok(match self.table.handle_key(key)? {
            Handled::Event(event) => self.on_table_event(event),
            Handled::Consumed => Handled::Consumed,
            Handled::Ignored => Handled::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.searching || !self.query.is_empty() {
            let [search_area, table_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
            frame.render_widget(Paragraph::new(self.search_line(theme)), search_area);
            self.table.render(frame, table_area, theme);
        } else {
            self.table.render(frame, area, theme);
        }
    }
}

impl<R: Resource> Screen for ResourceScreen<R> {
    fn title(&self) -> &'static str {
        R::TITLE
    }

    fn captures_input(&self) -> bool {
        self.searching
    }

    fn export(&self, dir: &Path) -> color_eyre::Result<(PathBuf, usize)> {
        let rows = self.export_rows();
        let path = export::export_path::<R>(dir);
        export::export_to_file(&path, rows)?;
        Ok((path, rows.len()))
    }

    fn copy_text(&self) -> color_eyre::Result<(String, usize)> {
        let rows = self.export_rows();
        Ok((export::to_csv_string(rows)?, rows.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, User};
    use crate::source::Dataset;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn config(paging: PagingKind) -> TableConfig {
        TableConfig {
            items_per_page: 10,
            paging,
            sorting: SortMode::Local,
        }
    }

    fn categories(paging: PagingKind) -> ResourceScreen<Category> {
        ResourceScreen::new(
            Dataset::demo().categories,
            &config(paging),
            Arc::new(KeyResolver::default()),
        )
    }

    fn visible_ids(screen: &ResourceScreen<Category>) -> Vec<u32> {
        screen.table().visible_rows().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_host_paging_round_trip() {
        let mut screen = categories(PagingKind::Host);
        assert_eq!(visible_ids(&screen), (1..=10).collect::<Vec<_>>());
        assert_eq!(screen.table().total_pages(), 4);

        screen.handle_key(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(screen.table().pagination().current_page(), 2);
        assert_eq!(visible_ids(&screen), (11..=20).collect::<Vec<_>>());

        screen.handle_key(key(KeyCode::Char(']'))).unwrap();
        assert_eq!(screen.table().pagination().current_page(), 4);
        assert_eq!(visible_ids(&screen), (31..=36).collect::<Vec<_>>());
    }

    #[test]
    fn test_search_filters_and_resets_page() {
        let mut screen = categories(PagingKind::Host);
        screen.handle_key(key(KeyCode::Char(']'))).unwrap();
        assert_eq!(screen.table().pagination().current_page(), 4);

        screen.handle_key(key(KeyCode::Char('/'))).unwrap();
        assert!(screen.captures_input());
        for c in "studio".chars() {
            screen.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        screen.handle_key(key(KeyCode::Enter)).unwrap();

        assert!(!screen.captures_input());
        assert_eq!(screen.query(), "studio");
        assert_eq!(screen.table().pagination().current_page(), 1);
        assert_eq!(visible_ids(&screen), vec![2]);
        assert!(screen.table().page_nav().is_none());

        screen.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(screen.query(), "");
        assert_eq!(screen.table().total_pages(), 4);
    }

    #[test]
    fn test_search_with_no_match_shows_placeholder() {
        let mut screen = categories(PagingKind::Client);
        screen.set_query("zzzz");

        assert!(screen.table().visible_rows().is_empty());
        assert_eq!(screen.table().total_pages(), 0);
        assert!(matches!(
            screen.table().body(),
            crate::table::Body::Placeholder { colspan: 3 }
        ));
    }

    #[test]
    fn test_host_paged_sort_orders_all_rows() {
        let mut screen = categories(PagingKind::Host);
        // Focus starts on the first sortable column (ID); sort twice for desc.
        screen.handle_key(key(KeyCode::Char('s'))).unwrap();
        screen.handle_key(key(KeyCode::Char('s'))).unwrap();

        assert_eq!(visible_ids(&screen), (27..=36).rev().collect::<Vec<_>>());
        assert_eq!(screen.table().pagination().current_page(), 1);
    }

    #[test]
    fn test_selection_is_kept_across_pages_and_exported() {
        let mut screen = categories(PagingKind::Host);
        screen.handle_key(key(KeyCode::Char(' '))).unwrap();
        screen.handle_key(key(KeyCode::Char('l'))).unwrap();
        screen.handle_key(key(KeyCode::Char(' '))).unwrap();

        let ids: Vec<u32> = screen.selection().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 11]);
        assert!(screen.table().is_selected(&screen.selection()[0].clone()));

        let (text, count) = screen.copy_text().unwrap();
        assert_eq!(count, 2);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_filter_prunes_hidden_selection() {
        let mut screen = categories(PagingKind::Host);
        screen.handle_key(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(screen.selection().len(), 10);

        screen.set_query("Microphones");

        let ids: Vec<u32> = screen.selection().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(screen.table().selected().len(), 1);
    }

    #[test]
    fn test_export_without_selection_writes_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut screen = ResourceScreen::new(
            Dataset::demo().users,
            &config(PagingKind::Client),
            Arc::new(KeyResolver::default()),
        );
        screen.set_query("auditeur.fr");

        let (path, count) = screen.export(dir.path()).unwrap();

        assert_eq!(count, 5);
        assert!(path.ends_with("users.csv"));
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written.lines().count(), 6);
    }

    fn users(items_per_page: usize) -> ResourceScreen<User> {
        ResourceScreen::new(
            Dataset::demo().users,
            &TableConfig {
                items_per_page,
                paging: PagingKind::Host,
                sorting: SortMode::Local,
            },
            Arc::new(KeyResolver::default()),
        )
    }

    fn user_ids(screen: &ResourceScreen<User>) -> Vec<u32> {
        screen.table().visible_rows().iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_role_filter_cycles_and_resets_page() {
        let mut screen = users(3);
        screen.handle_key(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(screen.table().pagination().current_page(), 2);

        screen.handle_key(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(screen.facet().as_deref(), Some("DMJ"));
        assert_eq!(screen.table().pagination().current_page(), 1);
        assert_eq!(screen.table().total_pages(), 2);
        assert_eq!(user_ids(&screen), vec![1, 2, 3]);

        screen.handle_key(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(screen.facet().as_deref(), Some("Auditeur"));
        assert_eq!(user_ids(&screen), vec![6, 7, 8]);

        screen.handle_key(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(screen.facet(), None);
        assert_eq!(screen.table().total_pages(), 4);
    }

    #[test]
    fn test_role_filter_composes_with_search() {
        let mut screen = users(10);
        screen.set_query("radio.fr");
        assert_eq!(screen.export_rows().len(), 4);

        screen.cycle_facet();
        assert_eq!(screen.export_rows().len(), 4);

        screen.cycle_facet();
        assert!(screen.export_rows().is_empty());
        assert!(matches!(
            screen.table().body(),
            crate::table::Body::Placeholder { .. }
        ));

        screen.set_query("");
        assert_eq!(screen.export_rows().len(), 5);
        assert!(screen.export_rows().iter().all(|u| u.role == crate::model::Role::Listener));
    }

    #[test]
    fn test_facet_key_ignored_without_facet() {
        let mut screen = categories(PagingKind::Host);
        let handled = screen.handle_key(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(handled, Handled::Ignored);
        assert_eq!(screen.facet(), None);
    }

    #[test]
    fn test_row_activation_reports_status() {
        let mut screen: ResourceScreen<User> = ResourceScreen::new(
            Dataset::demo().users,
            &config(PagingKind::None),
            Arc::new(KeyResolver::default()),
        );
        screen.handle_key(key(KeyCode::Char('j'))).unwrap();
        let handled = screen.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            handled,
            Handled::Event(ScreenEvent::Status("Opened Users #2".to_string()))
        );
    }
}
