//! Generic paginated, sortable, multi-select table.
//!
//! [`DataTable`] is polymorphic over the row type `T` and a key type `K`
//! produced by a caller-supplied key extractor. Rows flow in through
//! [`DataTable::new`], [`DataTable::set_data`] and
//! [`DataTable::set_host_page`]; everything the host needs to react to flows
//! out as [`TableEvent`] values.

mod column;
mod pagination;
mod selection;
mod sort;

pub use column::Column;
pub use pagination::{
    DEFAULT_ITEMS_PER_PAGE, PageNav, Pagination, PagingKind, WINDOW_SIZE, page_window,
};
pub use selection::{Coverage, Selection, SelectionMode};
pub use sort::{SortDirection, SortMode, SortState};

use std::hash::Hash;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::debug;

use crate::Theme;
use crate::config::{KeyResolver, NavAction, TableAction};
use crate::ui::{Component, Handled, Result};

pub const EMPTY_PLACEHOLDER: &str = "No items found";

/// Event emitted by [`DataTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<T> {
    /// A row was activated (Enter pressed).
    RowActivated(T),
    /// A sortable header was activated; carries the new sort state.
    SortChanged(SortState),
    /// The selection changed; carries every selected row.
    SelectionChanged(Vec<T>),
    /// Host-paged table asks for a page. The host answers with
    /// [`DataTable::set_host_page`].
    PageRequested(usize),
    /// Client-paged table moved to a page.
    PageChanged(usize),
}

/// Rows that make up the table body.
#[derive(Debug, PartialEq, Eq)]
pub enum Body<'a, T> {
    /// Single placeholder row spanning `colspan` columns.
    Placeholder { colspan: usize },
    Rows(Vec<&'a T>),
}

impl<T> Body<'_, T> {
    pub fn row_count(&self) -> usize {
        match self {
            Self::Placeholder { .. } => 1,
            Self::Rows(rows) => rows.len(),
        }
    }
}

type KeyFn<T, K> = Box<dyn Fn(&T) -> K>;

pub struct DataTable<T, K> {
    columns: Vec<Column<T>>,
    data: Vec<T>,
    key_of: KeyFn<T, K>,
    /// Display order as indices into `data`.
    order: Vec<usize>,
    sort: Option<SortState>,
    sort_mode: SortMode,
    selection_mode: SelectionMode,
    selection: Selection<T, K>,
    pagination: Pagination,
    state: TableState,
    focused_column: usize,
    title: Option<String>,
    resolver: Arc<KeyResolver>,
}

impl<T: Clone, K: Eq + Hash + Clone> DataTable<T, K> {
    pub fn new(
        columns: Vec<Column<T>>,
        data: Vec<T>,
        key_of: impl Fn(&T) -> K + 'static,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let focused_column = columns.iter().position(|c| c.sortable).unwrap_or(0);
        let mut table = Self {
            columns,
            data,
            key_of: Box::new(key_of),
            order: Vec::new(),
            sort: None,
            sort_mode: SortMode::default(),
            selection_mode: SelectionMode::default(),
            selection: Selection::default(),
            pagination: Pagination::default(),
            state: TableState::default(),
            focused_column,
            title: None,
            resolver,
        };
        table.reorder();
        table.reset_cursor();
        table
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_selection(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self.reorder();
        self.reset_cursor();
        self
    }

    #[must_use]
    pub fn with_sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self.reorder();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub const fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Currently selected rows, in selection order.
    pub fn selected(&self) -> &[T] {
        self.selection.rows()
    }

    pub fn is_selected(&self, row: &T) -> bool {
        self.selection.contains(&(self.key_of)(row))
    }

    /// State of the select-all checkbox.
    pub fn select_all_state(&self) -> Coverage {
        self.selection.coverage(&self.data, &self.key_of)
    }

    pub fn focused_column(&self) -> Option<&Column<T>> {
        self.columns.get(self.focused_column)
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.data.len())
    }

    /// Page controls, or `None` when none should be drawn.
    pub fn page_nav(&self) -> Option<PageNav> {
        self.pagination.nav(self.data.len())
    }

    /// Rows shown on the current page, in display order.
    pub fn visible_rows(&self) -> Vec<&T> {
        let range = self.pagination.visible_range(self.order.len());
        self.order[range].iter().map(|&i| &self.data[i]).collect()
    }

    pub fn body(&self) -> Body<'_, T> {
        let rows = self.visible_rows();
        if rows.is_empty() {
            Body::Placeholder {
                colspan: self.columns.len() + usize::from(self.selection_mode.is_enabled()),
            }
        } else {
            Body::Rows(rows)
        }
    }

    /// Row under the cursor.
    pub fn cursor_row(&self) -> Option<&T> {
        self.state
            .selected()
            .and_then(|i| self.visible_rows().get(i).copied())
    }

    /// Replace the rows. Client paging is pulled back into range if the
    /// data shrank.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        if let Pagination::Client { current_page, .. } = self.pagination {
            let last = self.total_pages().max(1);
            if current_page > last {
                self.pagination.set_current_page(last);
            }
        }
        self.reorder();
        self.clamp_cursor();
    }

    /// Install the page the host fetched in answer to
    /// [`TableEvent::PageRequested`]. Rows are shown exactly as given.
    pub fn set_host_page(&mut self, page: usize, rows: Vec<T>, total_items: usize) {
        self.pagination.set_current_page(page.max(1));
        self.pagination.set_total_items(total_items);
        self.data = rows;
        self.reorder();
        self.reset_cursor();
    }

    /// Overwrite the local selection with the host's copy. Only honoured in
    /// [`SelectionMode::Controlled`].
    pub fn sync_selection(&mut self, rows: &[T]) -> bool {
        if self.selection_mode != SelectionMode::Controlled {
            debug!(mode = ?self.selection_mode, "Ignoring selection sync");
            return false;
        }
        self.selection = Selection::from_rows(rows, &self.key_of);
        true
    }

    /// Activate the header of `column_id`.
    ///
    /// Unknown and non-sortable columns are ignored.
    pub fn request_sort(&mut self, column_id: &str) -> Option<TableEvent<T>> {
        let Some(column) = self.columns.iter().find(|c| c.id == column_id) else {
            debug!(column_id, "Sort requested for unknown column");
            return None;
        };
        if !column.sortable {
            debug!(column_id, "Sort requested for unsortable column");
            return None;
        }
        let next = SortState::toggled(self.sort, column.id);
        self.sort = Some(next);
        self.reorder();
        debug!(column = next.column_id, direction = %next.direction, "Sort changed");
        Some(TableEvent::SortChanged(next))
    }

    /// Clear the selection if it covers every row of `data`, otherwise select
    /// exactly `data`.
    ///
    /// For host-paged tables `data` is the current page only.
    pub fn toggle_select_all(&mut self) -> Option<TableEvent<T>> {
        if !self.selection_mode.is_enabled() {
            return None;
        }
        if self.selection.covers(&self.data, &self.key_of) {
            self.selection.clear();
        } else {
            self.selection = Selection::from_rows(&self.data, &self.key_of);
        }
        debug!(selected = self.selection.len(), "Select all toggled");
        Some(self.selection_event())
    }

    /// Flip the selection of `row`.
    pub fn toggle_select(&mut self, row: &T) -> Option<TableEvent<T>> {
        if !self.selection_mode.is_enabled() {
            return None;
        }
        self.selection.toggle(row, &self.key_of);
        Some(self.selection_event())
    }

    /// Navigate to `page` (1-based). Pages outside `1..=total_pages` are
    /// ignored.
    pub fn go_to_page(&mut self, page: usize) -> Option<TableEvent<T>> {
        let total_pages = self.total_pages();
        if !(1..=total_pages).contains(&page) {
            debug!(page, total_pages, "Page out of range");
            return None;
        }
        match self.pagination {
            Pagination::Disabled => None,
            Pagination::Host { .. } => Some(TableEvent::PageRequested(page)),
            Pagination::Client { current_page, .. } => {
                if current_page == page {
                    return None;
                }
                self.pagination.set_current_page(page);
                self.reset_cursor();
                Some(TableEvent::PageChanged(page))
            }
        }
    }

    fn selection_event(&self) -> TableEvent<T> {
        TableEvent::SelectionChanged(self.selection.rows().to_vec())
    }

    /// Rebuild the display order. Host-paged tables and host sorting keep the
    /// rows exactly as supplied.
    fn reorder(&mut self) {
        self.order = (0..self.data.len()).collect();
        if self.sort_mode == SortMode::Host || self.pagination.is_host() {
            return;
        }
        let Some(sort) = self.sort else {
            return;
        };
        let Some(column) = self.columns.iter().find(|c| c.id == sort.column_id) else {
            return;
        };
        let data = &self.data;
        self.order
            .sort_by(|&a, &b| sort.direction.apply(column.compare(&data[a], &data[b])));
    }

    fn visible_len(&self) -> usize {
        self.pagination.visible_range(self.order.len()).len()
    }

    fn reset_cursor(&mut self) {
        let first = (self.visible_len() > 0).then_some(0);
        self.state.select(first);
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn move_cursor(&mut self, action: NavAction) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let current = self.state.selected().unwrap_or(0);
        let next = match action {
            NavAction::Up => current.saturating_sub(1),
            NavAction::Down => (current + 1).min(len - 1),
            NavAction::Home => 0,
            NavAction::End => len - 1,
            NavAction::Select => current,
        };
        self.state.select(Some(next));
    }

    fn move_column_focus(&mut self, forward: bool) -> bool {
        let sortable: Vec<usize> = (0..self.columns.len())
            .filter(|&i| self.columns[i].sortable)
            .collect();
        if sortable.is_empty() {
            return false;
        }
        let position = sortable.iter().position(|&i| i == self.focused_column);
        let next = match (position, forward) {
            (Some(p), true) => (p + 1) % sortable.len(),
            (Some(p), false) => (p + sortable.len() - 1) % sortable.len(),
            (None, _) => 0,
        };
        self.focused_column = sortable[next];
        true
    }

    fn handle_page_key(&mut self, action: TableAction) -> Handled<TableEvent<T>> {
        if !self.pagination.is_enabled() {
            return Handled::Ignored;
        }
        let Some(nav) = self.page_nav() else {
            return Handled::Consumed;
        };
        let (enabled, target) = match action {
            TableAction::FirstPage => (nav.first_enabled, 1),
            TableAction::PreviousPage => (nav.previous_enabled, nav.current.saturating_sub(1)),
            TableAction::NextPage => (nav.next_enabled, nav.current + 1),
            TableAction::LastPage => (nav.last_enabled, nav.total_pages),
            _ => return Handled::Ignored,
        };
        if !enabled {
            return Handled::Consumed;
        }
        self.go_to_page(target).map_or(Handled::Consumed, Handled::Event)
    }

    fn checkbox(coverage: Coverage) -> &'static str {
        match coverage {
            Coverage::All => "[x]",
            Coverage::Partial => "[-]",
            Coverage::None => "[ ]",
        }
    }

    fn header_row(&self, theme: &Theme) -> Row<'static> {
        let base = Style::default()
            .fg(theme.header())
            .add_modifier(Modifier::BOLD);
        let mut cells = Vec::with_capacity(self.columns.len() + 1);
        if self.selection_mode.is_enabled() {
            cells.push(Cell::from(Self::checkbox(self.select_all_state())).style(base));
        }
        for (i, column) in self.columns.iter().enumerate() {
            let indicator = match self.sort {
                Some(sort) if sort.column_id == column.id => sort.direction.indicator(),
                _ => "",
            };
            let mut style = base;
            if column.sortable && i == self.focused_column {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            cells.push(Cell::from(format!("{}{indicator}", column.header)).style(style));
        }
        Row::new(cells).height(1).style(Style::default().bg(theme.surface0))
    }

    fn body_rows(&self, theme: &Theme) -> Vec<Row<'static>> {
        let Body::Rows(rows) = self.body() else {
            return Vec::new();
        };
        rows.into_iter()
            .map(|row| {
                let selected = self.is_selected(row);
                let mut cells = Vec::with_capacity(self.columns.len() + 1);
                if self.selection_mode.is_enabled() {
                    cells.push(Cell::from(if selected { "[x]" } else { "[ ]" }));
                }
                cells.extend(self.columns.iter().map(|c| Cell::from(c.value(row))));
                let style = if selected {
                    Style::default().fg(theme.text).bg(theme.selected_bg())
                } else {
                    Style::default().fg(theme.text)
                };
                Row::new(cells).style(style)
            })
            .collect()
    }

    fn widths(&self) -> Vec<Constraint> {
        let mut widths = Vec::with_capacity(self.columns.len() + 1);
        if self.selection_mode.is_enabled() {
            widths.push(Constraint::Length(3));
        }
        widths.extend(self.columns.iter().map(|c| c.constraint));
        widths
    }

    fn footer_line(nav: &PageNav, theme: &Theme) -> Line<'static> {
        let enabled = Style::default().fg(theme.text);
        let disabled = Style::default().fg(theme.muted());
        let control = |label: &'static str, on: bool| {
            Span::styled(format!(" {label} "), if on { enabled } else { disabled })
        };

        let mut spans = vec![
            Span::styled(
                format!(
                    "Showing {} to {} of {} results  ",
                    nav.showing_from, nav.showing_to, nav.total_items
                ),
                Style::default().fg(theme.subtext0),
            ),
            control("«", nav.first_enabled),
            control("‹", nav.previous_enabled),
        ];
        for &page in &nav.window {
            spans.push(if page == nav.current {
                Span::styled(
                    format!("[{page}]"),
                    Style::default()
                        .fg(theme.blue)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {page} "), enabled)
            });
        }
        spans.push(control("›", nav.next_enabled));
        spans.push(control("»", nav.last_enabled));
        Line::from(spans)
    }
}

impl<T: Clone, K: Eq + Hash + Clone> Component for DataTable<T, K> {
    type Output = TableEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        let r = Arc::clone(&self.resolver);

        for action in [NavAction::Up, NavAction::Down, NavAction::Home, NavAction::End] {
            if r.matches_nav(&key, action) {
                self.move_cursor(action);
                return Ok(Handled::Consumed);
            }
        }
        if r.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .cursor_row()
                .cloned()
                .map_or(Handled::Ignored, |row| TableEvent::RowActivated(row).into()));
        }

        if r.matches_table(&key, TableAction::ToggleSelect) {
            let Some(row) = self.cursor_row().cloned() else {
                return Ok(Handled::Ignored);
            };
            return Ok(self.toggle_select(&row).map_or(Handled::Ignored, Handled::Event));
        }
        if r.matches_table(&key, TableAction::SelectAll) {
            return Ok(self.toggle_select_all().map_or(Handled::Ignored, Handled::Event));
        }
        if r.matches_table(&key, TableAction::NextColumn) {
            return Ok(if self.move_column_focus(true) {
                Handled::Consumed
            } else {
                Handled::Ignored
            });
        }
        if r.matches_table(&key, TableAction::PreviousColumn) {
            return Ok(if self.move_column_focus(false) {
                Handled::Consumed
            } else {
                Handled::Ignored
            });
        }
        if r.matches_table(&key, TableAction::Sort) {
            let Some(id) = self.focused_column().map(|c| c.id) else {
                return Ok(Handled::Ignored);
            };
            return Ok(self.request_sort(id).map_or(Handled::Ignored, Handled::Event));
        }

        for action in [
            TableAction::FirstPage,
            TableAction::PreviousPage,
            TableAction::NextPage,
            TableAction::LastPage,
        ] {
            if r.matches_table(&key, action) {
                return Ok(self.handle_page_key(action));
            }
        }

        Ok(Handled::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let nav = self.page_nav();
        let (table_area, footer_area) = if nav.is_some() {
            let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let inner = if let Some(title) = &self.title {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border()))
                .title(title.as_str())
                .title_style(
                    Style::default()
                        .fg(theme.mauve)
                        .add_modifier(Modifier::BOLD),
                );
            let inner = block.inner(table_area);
            frame.render_widget(block, table_area);
            inner
        } else {
            table_area
        };

        let header = self.header_row(theme);
        let rows = self.body_rows(theme);
        let is_empty = rows.is_empty();
        let table = Table::new(rows, self.widths())
            .header(header)
            .row_highlight_style(
                Style::default()
                    .bg(theme.cursor_bg())
                    .fg(theme.lavender)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(table, inner, &mut self.state);

        if is_empty && inner.height > 1 {
            let placeholder = Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(EMPTY_PLACEHOLDER)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.subtext0)),
                placeholder,
            );
        }

        if let (Some(nav), Some(footer_area)) = (nav, footer_area) {
            frame.render_widget(Paragraph::new(Self::footer_line(&nav, theme)), footer_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        name: String,
        price: u32,
    }

    fn items(n: u32) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                name: format!("item-{id:02}"),
                price: (id * 37) % 11,
            })
            .collect()
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("id", "ID", |i: &Item| format!("#{}", i.id)).sort_by_key(|i| i.id),
            Column::new("name", "Name", |i: &Item| i.name.clone()).sortable(),
            Column::new("price", "Price", |i: &Item| i.price.to_string()).sort_by_key(|i| i.price),
            Column::new("note", "Note", |_: &Item| String::new()),
        ]
    }

    fn table(data: Vec<Item>) -> DataTable<Item, u32> {
        DataTable::new(columns(), data, |i: &Item| i.id, Arc::new(KeyResolver::default()))
    }

    fn press(table: &mut DataTable<Item, u32>, code: KeyCode) -> Handled<TableEvent<Item>> {
        table
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn selected_ids(event: Option<TableEvent<Item>>) -> Vec<u32> {
        match event {
            Some(TableEvent::SelectionChanged(rows)) => rows.iter().map(|r| r.id).collect(),
            other => panic!("expected selection change, got {other:?}"),
        }
    }

    fn render_lines(table: &mut DataTable<Item, u32>, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                table.render(frame, area, &theme);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(usize::from(width))
            .map(|line| line.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_sort_toggle_sequence() {
        let mut table = table(items(3));
        assert_eq!(table.sort_state(), None);

        table.request_sort("name");
        assert_eq!(
            table.sort_state(),
            Some(SortState::new("name", SortDirection::Asc))
        );
        table.request_sort("name");
        assert_eq!(
            table.sort_state(),
            Some(SortState::new("name", SortDirection::Desc))
        );
        let event = table.request_sort("price");
        assert_eq!(
            event,
            Some(TableEvent::SortChanged(SortState::new(
                "price",
                SortDirection::Asc
            )))
        );
    }

    #[test]
    fn test_sort_ignores_unknown_and_unsortable_columns() {
        let mut table = table(items(3));
        assert_eq!(table.request_sort("note"), None);
        assert_eq!(table.request_sort("missing"), None);
        assert_eq!(table.sort_state(), None);
    }

    #[test]
    fn test_local_sort_reorders_rows() {
        let mut table = table(items(12)).with_pagination(Pagination::client(5));
        table.request_sort("id");
        table.request_sort("id");

        let ids: Vec<u32> = table.visible_rows().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![12, 11, 10, 9, 8]);
    }

    #[test]
    fn test_local_sort_is_stable() {
        let mut table = table(items(22));
        table.request_sort("price");
        let rows = table.visible_rows();
        for pair in rows.windows(2) {
            assert!(pair[0].price <= pair[1].price);
            if pair[0].price == pair[1].price {
                assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn test_host_sorting_only_reports() {
        let data = items(5);
        let mut table = table(data.clone()).with_sort_mode(SortMode::Host);
        table.request_sort("id");
        table.request_sort("id");

        let rows: Vec<Item> = table.visible_rows().into_iter().cloned().collect();
        assert_eq!(rows, data);
    }

    #[test]
    fn test_select_all_twice_restores_selection() {
        let mut table = table(items(4)).with_selection(SelectionMode::Uncontrolled);
        assert_eq!(selected_ids(table.toggle_select_all()), vec![1, 2, 3, 4]);
        assert_eq!(table.select_all_state(), Coverage::All);

        assert!(selected_ids(table.toggle_select_all()).is_empty());
        assert_eq!(table.select_all_state(), Coverage::None);

        assert_eq!(selected_ids(table.toggle_select_all()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_header_unchecked_when_data_emptied() {
        let mut table = table(items(3)).with_selection(SelectionMode::Uncontrolled);
        table.toggle_select_all();
        table.set_data(Vec::new());

        assert_eq!(table.selected().len(), 3);
        assert_eq!(table.select_all_state(), Coverage::None);
    }

    #[test]
    fn test_select_all_overwrites_partial_selection() {
        let data = items(10);
        let mut table = table(data.clone()).with_selection(SelectionMode::Uncontrolled);
        table.toggle_select(&data[1]);
        table.toggle_select(&data[3]);
        assert_eq!(table.select_all_state(), Coverage::Partial);

        let ids = selected_ids(table.toggle_select_all());
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_toggle_select_flips_key_membership() {
        let data = items(6);
        let mut table = table(data.clone()).with_selection(SelectionMode::Uncontrolled);
        table.toggle_select(&data[2]);

        for row in &data {
            let before = table.is_selected(row);
            let ids = selected_ids(table.toggle_select(row));
            assert_eq!(ids.contains(&row.id), !before);
        }
    }

    #[test]
    fn test_select_all_checked_when_every_row_toggled() {
        let data = items(3);
        let mut table = table(data.clone()).with_selection(SelectionMode::Uncontrolled);
        for row in &data {
            table.toggle_select(row);
        }
        assert_eq!(table.select_all_state(), Coverage::All);
        table.toggle_select(&data[0]);
        assert_eq!(table.select_all_state(), Coverage::Partial);
    }

    #[test]
    fn test_selection_disabled_emits_nothing() {
        let data = items(3);
        let mut table = table(data.clone());
        assert_eq!(table.toggle_select_all(), None);
        assert_eq!(table.toggle_select(&data[0]), None);
        assert_eq!(press(&mut table, KeyCode::Char(' ')), Handled::Ignored);
    }

    #[test]
    fn test_duplicate_keys_do_not_panic() {
        let mut data = items(3);
        data.push(Item {
            id: 2,
            name: "duplicate".to_string(),
            price: 0,
        });
        let mut table = table(data.clone()).with_selection(SelectionMode::Uncontrolled);

        let ids = selected_ids(table.toggle_select_all());
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(table.selected()[1].name, "item-02");
        assert!(table.is_selected(&data[3]));
        assert!(selected_ids(table.toggle_select_all()).is_empty());
    }

    #[test]
    fn test_controlled_selection_follows_host() {
        let data = items(5);
        let mut table = table(data.clone()).with_selection(SelectionMode::Controlled);
        table.toggle_select(&data[0]);

        assert!(table.sync_selection(&data[3..]));
        let ids: Vec<u32> = table.selected().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 5]);
        assert!(!table.is_selected(&data[0]));
    }

    #[test]
    fn test_uncontrolled_selection_ignores_sync() {
        let data = items(5);
        let mut table = table(data.clone()).with_selection(SelectionMode::Uncontrolled);
        table.toggle_select(&data[0]);

        assert!(!table.sync_selection(&data[3..]));
        assert!(table.is_selected(&data[0]));
    }

    #[test]
    fn test_host_select_all_covers_current_page_only() {
        let data = items(20);
        let mut table = table(data[..10].to_vec())
            .with_selection(SelectionMode::Controlled)
            .with_pagination(Pagination::host(10, 20));
        table.sync_selection(&data[15..16]);

        let ids = selected_ids(table.toggle_select_all());
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_host_paging_forwards_requests_without_slicing() {
        let data = items(10);
        let mut table = table(data.clone()).with_pagination(Pagination::host(5, 23));

        let rows: Vec<Item> = table.visible_rows().into_iter().cloned().collect();
        assert_eq!(rows, data);
        assert_eq!(table.total_pages(), 5);

        assert_eq!(table.go_to_page(2), Some(TableEvent::PageRequested(2)));
        assert_eq!(table.pagination().current_page(), 1);
        assert_eq!(table.go_to_page(0), None);
        assert_eq!(table.go_to_page(6), None);

        table.set_host_page(2, items(5), 23);
        assert_eq!(table.pagination().current_page(), 2);
        assert_eq!(table.visible_rows().len(), 5);
    }

    #[test]
    fn test_client_paging_slices_locally() {
        let mut table = table(items(23)).with_pagination(Pagination::client(10));
        assert_eq!(table.visible_rows().len(), 10);

        assert_eq!(table.go_to_page(3), Some(TableEvent::PageChanged(3)));
        let ids: Vec<u32> = table.visible_rows().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![21, 22, 23]);
        assert_eq!(table.go_to_page(3), None);
        assert_eq!(table.go_to_page(4), None);
    }

    #[test]
    fn test_client_page_clamped_when_data_shrinks() {
        let mut table = table(items(23)).with_pagination(Pagination::client(10));
        table.go_to_page(3);
        table.set_data(items(12));
        assert_eq!(table.pagination().current_page(), 2);
        assert_eq!(table.cursor_row().map(|i| i.id), Some(11));
    }

    #[test]
    fn test_boundary_keys_do_not_navigate() {
        let mut table = table(items(10)).with_pagination(Pagination::host(10, 23));
        assert_eq!(press(&mut table, KeyCode::Left), Handled::Consumed);
        assert_eq!(press(&mut table, KeyCode::Char('[')), Handled::Consumed);
        assert_eq!(
            press(&mut table, KeyCode::Right),
            Handled::Event(TableEvent::PageRequested(2))
        );
        assert_eq!(
            press(&mut table, KeyCode::Char(']')),
            Handled::Event(TableEvent::PageRequested(3))
        );

        table.set_host_page(3, items(3), 23);
        assert_eq!(press(&mut table, KeyCode::Right), Handled::Consumed);
        assert_eq!(press(&mut table, KeyCode::Char(']')), Handled::Consumed);
        assert_eq!(
            press(&mut table, KeyCode::Left),
            Handled::Event(TableEvent::PageRequested(2))
        );
    }

    #[test]
    fn test_empty_data_renders_one_placeholder_row() {
        for mode in [SelectionMode::Disabled, SelectionMode::Uncontrolled] {
            for pagination in [Pagination::Disabled, Pagination::client(10), Pagination::host(10, 0)] {
                let table = table(Vec::new())
                    .with_selection(mode)
                    .with_pagination(pagination);
                assert_eq!(table.body().row_count(), 1);
                assert_eq!(table.page_nav(), None);
            }
        }

        let table = table(Vec::new()).with_selection(SelectionMode::Uncontrolled);
        assert_eq!(table.body(), Body::Placeholder { colspan: 5 });
    }

    #[test]
    fn test_keyboard_activation_and_selection() {
        let mut table = table(items(3)).with_selection(SelectionMode::Uncontrolled);
        press(&mut table, KeyCode::Down);
        assert_eq!(
            press(&mut table, KeyCode::Enter).event().map(|e| match e {
                TableEvent::RowActivated(row) => row.id,
                _ => 0,
            }),
            Some(2)
        );

        match press(&mut table, KeyCode::Char(' ')) {
            Handled::Event(TableEvent::SelectionChanged(rows)) => assert_eq!(rows[0].id, 2),
            other => panic!("unexpected {other:?}"),
        }
        assert!(press(&mut table, KeyCode::Char('a')).is_consumed());
        assert_eq!(table.select_all_state(), Coverage::All);
    }

    #[test]
    fn test_column_focus_skips_unsortable_columns() {
        let mut table = table(items(3));
        assert_eq!(table.focused_column().map(|c| c.id), Some("id"));
        press(&mut table, KeyCode::Char('<'));
        assert_eq!(table.focused_column().map(|c| c.id), Some("price"));
        press(&mut table, KeyCode::Char('>'));
        press(&mut table, KeyCode::Char('>'));
        assert_eq!(table.focused_column().map(|c| c.id), Some("name"));
        assert_eq!(
            press(&mut table, KeyCode::Char('s')),
            Handled::Event(TableEvent::SortChanged(SortState::new(
                "name",
                SortDirection::Asc
            )))
        );
    }

    #[test]
    fn test_render_empty_state() {
        let mut table = table(Vec::new())
            .with_selection(SelectionMode::Uncontrolled)
            .with_pagination(Pagination::client(10))
            .with_title("Users");
        let lines = render_lines(&mut table, 60, 8);

        assert!(lines.iter().any(|l| l.contains(EMPTY_PLACEHOLDER)));
        assert!(!lines.iter().any(|l| l.contains("Showing")));
    }

    #[test]
    fn test_render_pagination_footer() {
        let mut table = table(items(10))
            .with_selection(SelectionMode::Uncontrolled)
            .with_pagination(Pagination::host(10, 23));
        table.request_sort("id");
        let lines = render_lines(&mut table, 80, 14);

        assert!(lines[0].contains("[ ]"));
        assert!(lines[0].contains("ID"));
        assert!(lines.iter().any(|l| l.contains("#10")));
        let footer = lines.last().unwrap();
        assert!(footer.contains("Showing 1 to 10 of 23 results"));
        assert!(footer.contains("[1]"));
        assert!(footer.contains(" 2 "));
        assert!(footer.contains(" 3 "));
        assert!(!footer.contains(" 4 "));
    }
}
