use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::model::Resource;
use crate::table::Column;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

impl Resource for Category {
    type Key = u32;

    const NAME: &'static str = "categories";
    const TITLE: &'static str = "Categories";

    fn key(&self) -> u32 {
        self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("id", "ID", |c: &Self| format!("#{}", c.id))
                .width(Constraint::Length(6))
                .sort_by_key(|c| c.id),
            Column::new("name", "Name", |c: &Self| c.name.clone()).sortable(),
        ]
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn csv_headers() -> &'static [&'static str] {
        &["ID", "Name"]
    }

    fn csv_record(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}
