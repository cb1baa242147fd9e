//! Traits every screen record implements.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record served by one REST collection.
///
/// `COLLECTION` is both the API path segment (`/customers`) and the state
/// prefix the front end keeps the screen under (`customers/list`).
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Human label used in toasts ("Customer saved").
    const LABEL: &'static str;

    fn id(&self) -> &str;

    /// Drop the id so the record is sent as a new one.
    fn clear_id(&mut self);

    /// Records without an id have not been created on the backend yet.
    fn is_new(&self) -> bool {
        self.id().is_empty()
    }
}

/// A record the list screens can search.
pub trait Searchable {
    /// Fields the search box matches against.
    fn search_fields(&self) -> Vec<&str>;
}
