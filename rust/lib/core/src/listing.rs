//! Client-side search and pagination over a fetched list.

use serde::Serialize;

use crate::resource::Searchable;

/// Rows per page when the user has not picked a size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Case-insensitive substring match across the record's search fields.
/// A blank query matches everything.
pub fn matches<T: Searchable>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, query)).collect()
}

/// `ceil(total / page_size)`; a page size of 0 counts as 1.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// One page of a (filtered) list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub page_count: usize,
    /// Number of rows across all pages.
    pub total: usize,
}

/// Slice out a 1-based page. Out-of-range pages clamp to the nearest
/// valid page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PageView<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let page_count = page_count(total, page_size);
    let page = page.clamp(1, page_count.max(1));
    let start = (page - 1) * page_size;
    let items = items.iter().skip(start).take(page_size).cloned().collect();
    PageView { items, page, page_count, total }
}

/// Filter then paginate.
pub fn search_page<T: Searchable + Clone>(
    items: &[T],
    query: &str,
    page: usize,
    page_size: usize,
) -> PageView<T> {
    let filtered: Vec<T> = filter(items, query).into_iter().cloned().collect();
    paginate(&filtered, page, page_size)
}
