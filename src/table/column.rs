//! Column descriptors: header, width, cell text and sort comparator.

use std::cmp::Ordering;
use std::fmt;

use ratatui::layout::Constraint;

type Accessor<T> = Box<dyn Fn(&T) -> String>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// Declarative mapping from a row to one displayed cell.
pub struct Column<T> {
    pub id: &'static str,
    pub header: String,
    pub constraint: Constraint,
    pub sortable: bool,
    accessor: Accessor<T>,
    comparator: Option<Comparator<T>>,
}

impl<T> Column<T> {
    pub fn new(
        id: &'static str,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            id,
            header: header.into(),
            constraint: Constraint::Fill(1),
            sortable: false,
            accessor: Box::new(accessor),
            comparator: None,
        }
    }

    #[must_use]
    pub fn width(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Mark the column sortable by its displayed text.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Mark the column sortable by a typed key instead of its displayed text,
    /// so that `#10` sorts after `#9`.
    #[must_use]
    pub fn sort_by_key<V, F>(mut self, key: F) -> Self
    where
        T: 'static,
        V: Ord + 'static,
        F: Fn(&T) -> V + 'static,
    {
        self.sortable = true;
        self.comparator = Some(Box::new(move |a, b| key(a).cmp(&key(b))));
        self
    }

    /// Mark the column sortable by an explicit comparator.
    #[must_use]
    pub fn sort_with(mut self, compare: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.sortable = true;
        self.comparator = Some(Box::new(compare));
        self
    }

    pub fn value(&self, row: &T) -> String {
        (self.accessor)(row)
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match &self.comparator {
            Some(cmp) => cmp(a, b),
            None => self.value(a).cmp(&self.value(b)),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}
