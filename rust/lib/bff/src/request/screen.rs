//! Requests shared by every list screen.
//!
//! These are routed per collection: `LoadReq` goes to `customers/load`,
//! `vendors/load`, ... Build the path with [`screen_path`].

use stockdesk_core::Resource;

pub const LOAD: &str = "load";
pub const SEARCH: &str = "search";
pub const PAGE: &str = "page";
pub const OPEN: &str = "open";
pub const CLOSE: &str = "close";
pub const SAVE: &str = "save";
pub const DELETE: &str = "delete";

/// `{collection}/{action}`.
pub fn screen_path<T: Resource>(action: &str) -> String {
    format!("{}/{}", T::COLLECTION, action)
}

/// Fetch the collection.
#[derive(Debug, Clone, Default)]
pub struct LoadReq;

/// Search box input. Applied once typing pauses.
#[derive(Debug, Clone)]
pub struct SearchReq {
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct PageReq {
    pub page: usize,
}

/// Open the editor: `None` to add, `Some(id)` to edit.
#[derive(Debug, Clone, Default)]
pub struct OpenReq {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CloseReq;

/// Submit the editor. Creates when the record has no id.
#[derive(Debug, Clone)]
pub struct SaveReq<T> {
    pub record: T,
}

#[derive(Debug, Clone)]
pub struct DeleteReq {
    pub id: String,
}

/// Fetch pricing and stock for one product.
#[derive(Debug, Clone)]
pub struct ProductInfoReq {
    pub product_id: String,
}

impl ProductInfoReq {
    pub const PATH: &'static str = "products/info";
}

/// Fetch units and categories.
#[derive(Debug, Clone, Default)]
pub struct LookupLoadReq;

impl LookupLoadReq {
    pub const PATH: &'static str = "lookup/load";
}
