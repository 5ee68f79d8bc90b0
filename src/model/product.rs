use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::model::{Category, Resource, format_price};
use crate::table::Column;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: u32,
    /// Resolved from `category_id` after loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Product {
    pub fn category_name(&self) -> String {
        self.category
            .as_ref()
            .map_or_else(|| format!("#{}", self.category_id), |c| c.name.clone())
    }
}

impl Resource for Product {
    type Key = u32;

    const NAME: &'static str = "products";
    const TITLE: &'static str = "Products";

    fn key(&self) -> u32 {
        self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("id", "ID", |p: &Self| format!("#{}", p.id))
                .width(Constraint::Length(6))
                .sort_by_key(|p| p.id),
            Column::new("name", "Name", |p: &Self| p.name.clone())
                .width(Constraint::Fill(2))
                .sortable(),
            Column::new("category", "Category", Self::category_name).sortable(),
            Column::new("price", "Price", |p: &Self| format_price(p.price))
                .width(Constraint::Length(12))
                .sort_with(|a, b| a.price.total_cmp(&b.price)),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone(), self.category_name()]
    }

    fn csv_headers() -> &'static [&'static str] {
        &["ID", "Name", "Description", "Price", "Category"]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            format!("{:.2}", self.price),
            self.category_name(),
        ]
    }
}
