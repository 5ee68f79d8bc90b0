//! Multi-row selection keyed by a caller-supplied key.
//!
//! Rows are identified by their key only. When several rows share a key the
//! first one seen is canonical and the rest are ignored.

use std::collections::HashSet;
use std::hash::Hash;

/// Whether and how a table tracks selected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection column.
    #[default]
    Disabled,
    /// The table owns the selection; changes are still reported.
    Uncontrolled,
    /// The host owns the selection and overwrites the table's mirror with
    /// `DataTable::sync_selection` whenever its copy changes.
    Controlled,
}

impl SelectionMode {
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Checkbox state of the select-all control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    None,
    Partial,
    All,
}

/// Insertion-ordered set of rows, unique by key.
#[derive(Debug, Clone)]
pub struct Selection<T, K> {
    rows: Vec<T>,
    keys: HashSet<K>,
}

impl<T, K> Default for Selection<T, K> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            keys: HashSet::new(),
        }
    }
}

impl<T: Clone, K: Eq + Hash + Clone> Selection<T, K> {
    /// Build a selection from rows, keeping the first row for each key.
    pub fn from_rows<'a, I>(rows: I, key_of: impl Fn(&T) -> K) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut selection = Self::default();
        for row in rows {
            selection.insert(row, &key_of);
        }
        selection
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.keys.clear();
    }

    /// Flip membership of `row`. Returns true if the row is now selected.
    pub fn toggle(&mut self, row: &T, key_of: impl Fn(&T) -> K) -> bool {
        let key = key_of(row);
        if self.keys.remove(&key) {
            self.rows.retain(|r| key_of(r) != key);
            false
        } else {
            self.keys.insert(key);
            self.rows.push(row.clone());
            true
        }
    }

    /// Checkbox state relative to `data`.
    pub fn coverage(&self, data: &[T], key_of: impl Fn(&T) -> K) -> Coverage {
        if self.is_empty() || data.is_empty() {
            return Coverage::None;
        }
        let covered = data.iter().filter(|row| self.contains(&key_of(row))).count();
        if covered == data.len() {
            Coverage::All
        } else if covered == 0 {
            Coverage::None
        } else {
            Coverage::Partial
        }
    }

    /// True if every row of `data` is selected.
    pub fn covers(&self, data: &[T], key_of: impl Fn(&T) -> K) -> bool {
        data.iter().all(|row| self.contains(&key_of(row)))
    }

    fn insert(&mut self, row: &T, key_of: impl Fn(&T) -> K) {
        if self.keys.insert(key_of(row)) {
            self.rows.push(row.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        label: &'static str,
    }

    fn item(id: u32, label: &'static str) -> Item {
        Item { id, label }
    }

    fn key(item: &Item) -> u32 {
        item.id
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = Selection::default();
        let row = item(1, "a");

        assert!(selection.toggle(&row, key));
        assert!(selection.contains(&1));
        assert!(!selection.toggle(&row, key));
        assert!(!selection.contains(&1));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_membership_follows_key_not_value() {
        let mut selection = Selection::default();
        selection.toggle(&item(1, "before"), key);

        // A structurally different row with the same key deselects.
        assert!(!selection.toggle(&item(1, "after"), key));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_duplicate_keys_keep_first_row() {
        let data = vec![item(1, "first"), item(1, "second"), item(2, "other")];
        let selection = Selection::from_rows(&data, key);

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.rows()[0].label, "first");
        assert!(selection.covers(&data, key));
    }

    #[test]
    fn test_coverage() {
        let data = vec![item(1, "a"), item(2, "b")];
        let mut selection = Selection::default();
        assert_eq!(selection.coverage(&data, key), Coverage::None);

        selection.toggle(&data[0], key);
        assert_eq!(selection.coverage(&data, key), Coverage::Partial);

        selection.toggle(&data[1], key);
        assert_eq!(selection.coverage(&data, key), Coverage::All);

        // Rows from another page are selected but none of these are.
        let other_page = vec![item(3, "c")];
        assert_eq!(selection.coverage(&other_page, key), Coverage::None);
    }

    #[test]
    fn test_coverage_of_empty_page_is_none() {
        let data = vec![item(1, "a")];
        let mut selection = Selection::default();
        selection.toggle(&data[0], key);

        assert_eq!(selection.coverage(&[], key), Coverage::None);
    }
}
