//! Catalogue records served by the Quantum Radio backend.
//!
//! - [`User`] - staff (`dmj`) and listener (`auditeur`) accounts
//! - [`Product`] / [`Category`] - the radio-equipment catalogue
//! - [`Order`] - orders with their line items
//!
//! Each record implements [`Resource`], which binds it to its table columns,
//! search fields and CSV layout.

pub mod category;
pub mod order;
pub mod product;
pub mod user;

use std::fmt;
use std::hash::Hash;

pub use category::Category;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use user::{Role, User};

use crate::table::Column;

/// A record type the console can list in a table.
pub trait Resource: Clone + 'static {
    type Key: Eq + Hash + Clone + fmt::Display + 'static;

    /// Lowercase plural used for file names (`users.json`, `users.csv`).
    const NAME: &'static str;
    /// Title shown above the table.
    const TITLE: &'static str;

    fn key(&self) -> Self::Key;

    fn columns() -> Vec<Column<Self>>;

    /// Text the search box matches against.
    fn search_fields(&self) -> Vec<String>;

    fn csv_headers() -> &'static [&'static str];

    /// Field the screen's filter key cycles through (e.g. a user's role).
    const FACET: Option<&'static str> = None;

    /// Values of [`Self::FACET`], in cycling order.
    fn facet_values() -> Vec<String> {
        Vec::new()
    }

    fn facet(&self) -> Option<String> {
        None
    }

    fn csv_record(&self) -> Vec<String>;
}

/// Format a price the way the storefront shows it.
pub fn format_price(price: f64) -> String {
    format!("{price:.2} €")
}
