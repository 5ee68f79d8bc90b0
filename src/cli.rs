use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::table::{PagingKind, SortMode};

/// Tab opened first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DatasetKind {
    Dashboard,
    #[default]
    Users,
    Products,
    Categories,
    Orders,
}

impl DatasetKind {
    /// Tab position in the app.
    pub const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Users => 1,
            Self::Products => 2,
            Self::Categories => 3,
            Self::Orders => 4,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "quantum-admin",
    version,
    about = "Terminal admin console for the Quantum Radio catalogue"
)]
pub struct Args {
    /// Tab to open first
    #[arg(short, long, value_enum, default_value_t)]
    pub dataset: DatasetKind,

    /// Directory holding JSON exports (users.json, products.json, ...)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Who slices rows into pages
    #[arg(long, value_enum)]
    pub paging: Option<PagingKind>,

    /// Who orders rows when a column is sorted
    #[arg(long, value_enum)]
    pub sorting: Option<SortMode>,

    /// Theme name (e.g. "Catppuccin Latte")
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Directory CSV exports are written to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["quantum-admin"]);
        assert_eq!(args.dataset, DatasetKind::Users);
        assert_eq!(args.dataset.index(), 1);
        assert_eq!(args.paging, None);
        assert_eq!(args.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "quantum-admin",
            "--dataset",
            "orders",
            "--page-size",
            "25",
            "--paging",
            "client",
            "--sorting",
            "host",
        ]);
        assert_eq!(args.dataset.index(), 4);
        assert_eq!(args.page_size, Some(25));
        assert_eq!(args.paging, Some(PagingKind::Client));
        assert_eq!(args.sorting, Some(SortMode::Host));
    }
}
