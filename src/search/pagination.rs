//! Page arithmetic for the results listing.
//!
//! Nothing here performs I/O or can fail: page counts, the "showing X-Y of Z"
//! range and the compact list of page links are pure functions of the
//! current filters and the provider's result totals.

use serde::Serialize;
use std::fmt;

use super::{QueryTarget, SearchFilters};

/// Path of the results listing page
pub const RESULTS_PATH: &str = "/recipes";

/// One slot in the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "page")]
pub enum PaginationEntry {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PaginationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationEntry::Page(page) => write!(f, "{page}"),
            PaginationEntry::Ellipsis => f.write_str("…"),
        }
    }
}

/// Number of pages needed for `total_results`; zero when there are no results
pub fn compute_page_count(total_results: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_results.div_ceil(page_size)
}

/// One-based `(start, end)` positions of the items shown on a page
pub fn compute_display_range(offset: u32, items_returned: u32, total_results: u32) -> (u32, u32) {
    let start = offset.saturating_add(1);
    let end = offset.saturating_add(items_returned).min(total_results);
    (start, end)
}

/// Compact pagination control: first page, last page, the current page with
/// its neighbours, and an ellipsis for each elided run.
pub fn build_pagination_entries(current_page: u32, total_pages: u32) -> Vec<PaginationEntry> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current_page.max(1);
    let mut entries = vec![PaginationEntry::Page(1)];

    if current > 3 {
        entries.push(PaginationEntry::Ellipsis);
    }

    let first = current.saturating_sub(1).max(2);
    let last = total_pages
        .saturating_sub(1)
        .min(current.saturating_add(1));
    for page in first..=last {
        if page == 1 || page == total_pages {
            continue;
        }
        entries.push(PaginationEntry::Page(page));
    }

    if current.saturating_add(2) < total_pages {
        entries.push(PaginationEntry::Ellipsis);
    }

    if total_pages > 1 {
        entries.push(PaginationEntry::Page(total_pages));
    }

    entries
}

/// Link to `page` of the results listing for the same filters
pub fn build_page_url(page: u32, filters: &SearchFilters) -> String {
    format!(
        "{RESULTS_PATH}?{}",
        filters.with_page(page).to_query_string(QueryTarget::Link)
    )
}

/// Previous-page link, if there is a previous page
pub fn previous_page_url(current_page: u32, filters: &SearchFilters) -> Option<String> {
    (current_page > 1).then(|| build_page_url(current_page - 1, filters))
}

/// Next-page link, if there is a next page
pub fn next_page_url(current_page: u32, total_pages: u32, filters: &SearchFilters) -> Option<String> {
    (current_page < total_pages).then(|| build_page_url(current_page + 1, filters))
}
