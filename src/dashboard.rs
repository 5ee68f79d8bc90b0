//! Landing tab with catalogue totals and the latest orders.

use std::path::{Path, PathBuf};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::Theme;
use crate::export;
use crate::model::{Order, OrderStatus, format_price};
use crate::screen::{Screen, ScreenEvent};
use crate::source::Dataset;
use crate::ui::Component;

const RECENT_ORDERS: usize = 5;
const CSV_HEADERS: [&str; 2] = ["Metric", "Value"];

/// Figures shown on the dashboard, computed once from a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub products: usize,
    pub categories: usize,
    pub users: usize,
    pub orders: usize,
    pub pending_orders: usize,
    pub revenue: f64,
    /// Newest first.
    pub recent_orders: Vec<Order>,
}

impl Summary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut recent_orders = dataset.orders.clone();
        recent_orders.sort_by(|a, b| b.date.cmp(&a.date));
        recent_orders.truncate(RECENT_ORDERS);

        Self {
            products: dataset.products.len(),
            categories: dataset.categories.len(),
            users: dataset.users.len(),
            orders: dataset.orders.len(),
            pending_orders: dataset
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            revenue: dataset.orders.iter().map(|o| o.total).sum(),
            recent_orders,
        }
    }

    /// Label and formatted value of every headline figure.
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Products", self.products.to_string()),
            ("Total Revenue", format_price(self.revenue)),
            ("Total Users", self.users.to_string()),
            ("Total Orders", self.orders.to_string()),
            ("Categories", self.categories.to_string()),
            ("Pending Orders", self.pending_orders.to_string()),
        ]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.metrics()
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value])
            .collect()
    }
}

pub struct DashboardScreen {
    summary: Summary,
}

impl DashboardScreen {
    pub const fn new(summary: Summary) -> Self {
        Self { summary }
    }

    fn block(title: &str, theme: &Theme) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()))
            .title(format!(" {title} "))
            .title_style(Style::default().fg(theme.subtext0))
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let metrics = self.summary.metrics();
        let areas = Layout::horizontal(vec![Constraint::Fill(1); metrics.len()]).split(area);
        for ((label, value), area) in metrics.into_iter().zip(areas.iter()) {
            let card = Paragraph::new(Line::from(value))
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(theme.text)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Self::block(label, theme));
            frame.render_widget(card, *area);
        }
    }

    fn render_recent(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = self.summary.recent_orders.iter().map(|o| {
            let status_color = match o.status {
                OrderStatus::Pending => theme.yellow,
                OrderStatus::Shipped => theme.blue,
                OrderStatus::Delivered => theme.green,
            };
            Row::new(vec![
                Cell::from(format!("#{}", o.id)),
                Cell::from(o.date.format("%Y-%m-%d").to_string()),
                Cell::from(o.status.to_string()).style(Style::default().fg(status_color)),
                Cell::from(format_price(o.total)),
            ])
            .style(Style::default().fg(theme.text))
        });
        let header = Row::new(["Order", "Date", "Status", "Total"]).style(
            Style::default()
                .fg(theme.header())
                .add_modifier(Modifier::BOLD),
        );
        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .block(Self::block("Recent Orders", theme));
        frame.render_widget(table, area);
    }
}

impl Component for DashboardScreen {
    type Output = ScreenEvent;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [cards_area, recent_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        self.render_cards(frame, cards_area, theme);
        self.render_recent(frame, recent_area, theme);
    }
}

impl Screen for DashboardScreen {
    fn title(&self) -> &'static str {
        "Dashboard"
    }

    fn captures_input(&self) -> bool {
        false
    }

    fn export(&self, dir: &Path) -> color_eyre::Result<(PathBuf, usize)> {
        let path = dir.join("dashboard.csv");
        let records = self.summary.records();
        let count = records.len();
        export::export_records_to_file(&path, &CSV_HEADERS, records)?;
        Ok((path, count))
    }

    fn copy_text(&self) -> color_eyre::Result<(String, usize)> {
        let records = self.summary.records();
        let count = records.len();
        Ok((export::records_to_string(&CSV_HEADERS, records)?, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_summary_counts_demo_dataset() {
        let dataset = Dataset::demo();
        let summary = Summary::from_dataset(&dataset);

        assert_eq!(summary.products, 15);
        assert_eq!(summary.categories, 36);
        assert_eq!(summary.users, 10);
        assert_eq!(summary.orders, 10);
        // Demo statuses cycle shipped, delivered, pending by order id.
        assert_eq!(summary.pending_orders, 3);
        let revenue: f64 = dataset.orders.iter().map(|o| o.total).sum();
        assert!((summary.revenue - revenue).abs() < 1e-9);
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let summary = Summary::from_dataset(&Dataset::demo());
        let ids: Vec<u32> = summary.recent_orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_pending_counts_only_pending_orders() {
        let mut dataset = Dataset::demo();
        for order in &mut dataset.orders {
            order.status = OrderStatus::Delivered;
        }
        dataset.orders[0].status = OrderStatus::Pending;
        dataset.users.clear();

        let summary = Summary::from_dataset(&dataset);
        assert_eq!(summary.pending_orders, 1);
        assert_eq!(summary.users, 0);
    }

    #[test]
    fn test_copy_text_lists_metrics() {
        let screen = DashboardScreen::new(Summary::from_dataset(&Dataset::demo()));
        let (text, count) = screen.copy_text().unwrap();

        assert_eq!(count, 6);
        assert!(text.starts_with("Metric,Value\n"));
        assert!(text.contains("Pending Orders,3\n"));
        assert!(text.contains("Total Products,15\n"));
    }

    #[test]
    fn test_render_shows_cards() {
        let mut screen = DashboardScreen::new(Summary::from_dataset(&Dataset::demo()));
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                screen.render(frame, area, &Theme::default());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Pending Orders"));
        assert!(text.contains("Recent Orders"));
        assert!(text.contains("#10"));
    }
}
