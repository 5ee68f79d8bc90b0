//! Sort-state tracking for table columns.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Apply this direction to an ascending ordering.
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// The column a table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortState {
    pub column_id: &'static str,
    pub direction: SortDirection,
}

impl SortState {
    pub const fn new(column_id: &'static str, direction: SortDirection) -> Self {
        Self {
            column_id,
            direction,
        }
    }

    /// Next state after the header of `column_id` is activated.
    ///
    /// Repeating the ascending column flips it to descending; anything else
    /// (no sort, another column, or a descending sort on this column) lands on
    /// ascending.
    pub fn toggled(current: Option<Self>, column_id: &'static str) -> Self {
        let direction = match current {
            Some(state) if state.column_id == column_id && state.direction == SortDirection::Asc => {
                SortDirection::Desc
            }
            _ => SortDirection::Asc,
        };
        Self::new(column_id, direction)
    }
}

/// Who is responsible for reordering rows once a sort is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// The table orders its rows with the column's comparator.
    #[default]
    Local,
    /// The table only reports the request; the host feeds sorted data.
    Host,
}
