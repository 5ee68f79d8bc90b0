//! Pagination state and page-button windowing.

use std::ops::Range;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Maximum number of numbered page buttons shown at once.
pub const WINDOW_SIZE: usize = 5;

/// Who slices rows into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// All rows on one unbounded page, no navigation controls.
    #[default]
    Disabled,
    /// The table slices its rows into pages itself.
    Client {
        current_page: usize,
        items_per_page: usize,
    },
    /// The host supplies one page of rows at a time and the total count;
    /// the table only forwards navigation requests.
    Host {
        current_page: usize,
        items_per_page: usize,
        total_items: usize,
    },
}

/// Paging style selectable from config and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PagingKind {
    None,
    Client,
    #[default]
    Host,
}

impl Pagination {
    pub const fn client(items_per_page: usize) -> Self {
        Self::Client {
            current_page: 1,
            items_per_page,
        }
    }

    pub const fn host(items_per_page: usize, total_items: usize) -> Self {
        Self::Host {
            current_page: 1,
            items_per_page,
            total_items,
        }
    }

    pub const fn from_kind(kind: PagingKind, items_per_page: usize) -> Self {
        match kind {
            PagingKind::None => Self::Disabled,
            PagingKind::Client => Self::client(items_per_page),
            PagingKind::Host => Self::host(items_per_page, 0),
        }
    }

    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    pub const fn is_host(&self) -> bool {
        matches!(self, Self::Host { .. })
    }

    pub const fn current_page(&self) -> usize {
        match self {
            Self::Disabled => 1,
            Self::Client { current_page, .. } | Self::Host { current_page, .. } => *current_page,
        }
    }

    /// Page size, never below one.
    pub fn items_per_page(&self) -> usize {
        match self {
            Self::Disabled => usize::MAX,
            Self::Client { items_per_page, .. } | Self::Host { items_per_page, .. } => {
                (*items_per_page).max(1)
            }
        }
    }

    /// Number of rows across all pages. `data_len` is used unless the host
    /// supplied a total.
    pub const fn total_items(&self, data_len: usize) -> usize {
        match self {
            Self::Host { total_items, .. } => *total_items,
            _ => data_len,
        }
    }

    pub fn total_pages(&self, data_len: usize) -> usize {
        match self {
            Self::Disabled => usize::from(data_len > 0),
            _ => self.total_items(data_len).div_ceil(self.items_per_page()),
        }
    }

    /// Row range of `data` shown on the current page. Host pages are shown
    /// in full since the host already sliced them.
    pub fn visible_range(&self, data_len: usize) -> Range<usize> {
        match self {
            Self::Disabled | Self::Host { .. } => 0..data_len,
            Self::Client { .. } => {
                let per_page = self.items_per_page();
                let start = (self.current_page().saturating_sub(1))
                    .saturating_mul(per_page)
                    .min(data_len);
                let end = start.saturating_add(per_page).min(data_len);
                start..end
            }
        }
    }

    pub(crate) fn set_current_page(&mut self, page: usize) {
        match self {
            Self::Disabled => {}
            Self::Client { current_page, .. } | Self::Host { current_page, .. } => {
                *current_page = page;
            }
        }
    }

    pub(crate) fn set_total_items(&mut self, total: usize) {
        if let Self::Host { total_items, .. } = self {
            *total_items = total;
        }
    }

    /// Navigation controls for the current page, or `None` when there is at
    /// most one page and no controls should be drawn.
    pub fn nav(&self, data_len: usize) -> Option<PageNav> {
        if !self.is_enabled() {
            return None;
        }
        let total_pages = self.total_pages(data_len);
        if total_pages <= 1 {
            return None;
        }
        let current = self.current_page();
        let total_items = self.total_items(data_len);
        let per_page = self.items_per_page();
        Some(PageNav {
            current,
            total_pages,
            window: page_window(current, total_pages),
            first_enabled: current != 1,
            previous_enabled: current != 1,
            next_enabled: current != total_pages,
            last_enabled: current != total_pages,
            showing_from: current.saturating_sub(1).saturating_mul(per_page).saturating_add(1),
            showing_to: current.saturating_mul(per_page).min(total_items),
            total_items,
        })
    }
}

/// Everything the footer needs to draw the page controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNav {
    pub current: usize,
    pub total_pages: usize,
    pub window: Vec<usize>,
    pub first_enabled: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    pub showing_from: usize,
    pub showing_to: usize,
    pub total_items: usize,
}

/// Numbered page buttons around `current`.
///
/// Shows up to [`WINDOW_SIZE`] pages centred on `current`, anchored to the
/// first pages near the start and to the last pages near the end. Pages
/// outside `1..=total_pages` are dropped rather than clamped, so a button
/// never appears twice.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    let count = WINDOW_SIZE.min(total_pages);
    let (current, total, count) = (
        i64::try_from(current).unwrap_or(i64::MAX),
        i64::try_from(total_pages).unwrap_or(i64::MAX),
        i64::try_from(count).unwrap_or(0),
    );

    let start = if current < 3 {
        1
    } else if current > total - 2 {
        total - count + 1
    } else {
        current - 2
    };

    (start..start + count)
        .filter(|page| (1..=total).contains(page))
        .filter_map(|page| usize::try_from(page).ok())
        .collect()
}
