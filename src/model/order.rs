use std::fmt;

use chrono::{DateTime, Utc};
use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::model::{Product, Resource, format_price};
use crate::table::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[serde(rename = "en_attente")]
    Pending,
    Shipped,
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Shipped => f.write_str("Shipped"),
            Self::Delivered => f.write_str("Delivered"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: u32,
    pub order_id: u32,
    pub product_id: u32,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u32,
    /// Account that placed the order.
    pub dmj_id: u32,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: f64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

impl Resource for Order {
    type Key = u32;

    const NAME: &'static str = "orders";
    const TITLE: &'static str = "Orders";

    fn key(&self) -> u32 {
        self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("id", "Order", |o: &Self| format!("#{}", o.id))
                .width(Constraint::Length(8))
                .sort_by_key(|o| o.id),
            Column::new("date", "Date", |o: &Self| o.date.format("%Y-%m-%d %H:%M").to_string())
                .width(Constraint::Length(18))
                .sort_by_key(|o| o.date),
            Column::new("customer", "Customer", |o: &Self| format!("#{}", o.dmj_id))
                .width(Constraint::Length(10))
                .sort_by_key(|o| o.dmj_id),
            Column::new("items", "Items", |o: &Self| o.item_count().to_string())
                .width(Constraint::Length(7))
                .sort_by_key(Self::item_count),
            Column::new("status", "Status", |o: &Self| o.status.to_string())
                .width(Constraint::Length(10))
                .sort_by_key(|o| o.status),
            Column::new("total", "Total", |o: &Self| format_price(o.total))
                .width(Constraint::Length(12))
                .sort_with(|a, b| a.total.total_cmp(&b.total)),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
        ]
    }

    const FACET: Option<&'static str> = Some("Status");

    fn facet_values() -> Vec<String> {
        [OrderStatus::Pending, OrderStatus::Shipped, OrderStatus::Delivered]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn facet(&self) -> Option<String> {
        Some(self.status.to_string())
    }

    fn csv_headers() -> &'static [&'static str] {
        &["ID", "Customer", "Date", "Status", "Items", "Total"]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.dmj_id.to_string(),
            self.date.to_rfc3339(),
            self.status.to_string(),
            self.item_count().to_string(),
            format!("{:.2}", self.total),
        ]
    }
}
