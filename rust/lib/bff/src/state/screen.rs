//! List and editor state shared by the CRUD screens.
//!
//! A collection's screen lives under its collection name:
//! `customers/list`, `customers/editor`, and so on.

use serde::Serialize;
use stockdesk_core::listing::{page_count, DEFAULT_PAGE_SIZE};
use stockdesk_core::{search_page, PageView, Resource, Searchable};

/// Fetched rows plus the search box and pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// What the user typed; becomes `query` once typing settles.
    pub input: String,
    pub query: String,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Resource> ListPage<T> {
    pub fn path() -> String {
        format!("{}/list", T::COLLECTION)
    }
}

impl<T> ListPage<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            input: String::new(),
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
            loading: false,
            error: None,
        }
    }
}

impl<T: Searchable + Clone> ListPage<T> {
    /// The visible page: rows matching `query`, then paginated.
    pub fn view(&self) -> PageView<T> {
        search_page(&self.items, &self.query, self.page, self.page_size)
    }

    /// Move to `page`, clamped to the pages the current filter yields.
    pub fn go_to(&mut self, page: usize) {
        let matching = self
            .items
            .iter()
            .filter(|item| stockdesk_core::listing::matches(*item, &self.query))
            .count();
        self.page = page.clamp(1, page_count(matching, self.page_size).max(1));
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Add/edit modal for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorState<T> {
    pub open: bool,
    /// Id of the record being edited; `None` while adding.
    pub editing: Option<String>,
    pub draft: T,
    pub busy: bool,
    pub error: Option<String>,
}

impl<T: Resource> EditorState<T> {
    pub fn path() -> String {
        format!("{}/editor", T::COLLECTION)
    }
}

impl<T: Default> EditorState<T> {
    pub fn closed() -> Self {
        Self { open: false, editing: None, draft: T::default(), busy: false, error: None }
    }

    pub fn adding() -> Self {
        Self { open: true, ..Self::closed() }
    }

    pub fn editing(id: impl Into<String>, draft: T) -> Self {
        Self { open: true, editing: Some(id.into()), draft, busy: false, error: None }
    }
}
