//! Search and pagination over the cached index
//!
//! [`SearchState`] is a plain value owned by the caller and passed into
//! every page load. [`page`] is a pure function of the index and that
//! state, so repeated or concurrent calls never interfere.

use serde::{Deserialize, Serialize};

use super::index::{CatalogEntryRef, CatalogIndex};

/// Default number of entries per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Query, current page (1-based) and page size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchState {
    /// Fresh state: empty query, first page
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Jump to a page; page numbers below 1 become 1
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.submit_search(query);
        self
    }

    /// Set the query from user input and go back to the first page
    pub fn submit_search(&mut self, input: &str) {
        self.query = input.trim().to_string();
        self.page = 1;
    }

    /// Same as submitting an empty query
    pub fn clear_search(&mut self) {
        self.submit_search("");
    }

    /// Move back one page if not on the first; returns whether it moved
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Move forward one page if below `total_pages`; returns whether it moved
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page < total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

/// One page of matches plus the size of the whole match set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    pub items: Vec<CatalogEntryRef>,
    pub total_matched: usize,
}

impl PageSlice {
    /// Nothing matched the query at all (distinct from an out-of-range page)
    pub fn is_no_results(&self) -> bool {
        self.total_matched == 0
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        page_count(self.total_matched, page_size)
    }
}

/// Number of pages needed for `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Filter the index by the state's query and cut out the requested page
///
/// A page past the end yields an empty slice, not an error.
pub fn page(index: &CatalogIndex, state: &SearchState) -> PageSlice {
    let matched = index.search(&state.query);
    let total_matched = matched.len();

    if state.page == 0 || state.page_size == 0 {
        return PageSlice {
            items: Vec::new(),
            total_matched,
        };
    }

    let items = matched
        .into_iter()
        .skip((state.page - 1).saturating_mul(state.page_size))
        .take(state.page_size)
        .cloned()
        .collect();

    PageSlice {
        items,
        total_matched,
    }
}

/// Enabled state of the previous/next controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationControls {
    pub page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    pub fn new(page: usize, total_pages: usize) -> Self {
        Self {
            page,
            total_pages,
            prev_enabled: page > 1,
            next_enabled: total_pages > 0 && page < total_pages,
        }
    }

    /// Both controls disabled (no results)
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }
}
