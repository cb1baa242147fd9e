//! List and editor handlers, generic over the collection.
//!
//! The same code drives customers, vendors, products and users, and the
//! list half of sales, purchases and dues.

use stockdesk_core::{Resource, Searchable};
use stockdesk_flux::StateStore;
use tracing::debug;

use crate::handlers::helpers::{get_or, message_or, report_failure, toast_success};
use crate::handlers::BffContext;
use crate::request::*;
use crate::state::*;

fn list_state<T: Resource>(ctx: &BffContext, store: &StateStore) -> ListPage<T> {
    get_or(store, &ListPage::<T>::path(), || ListPage::new(ctx.settings.page_size))
}

fn editor_state<T: Resource + Default>(store: &StateStore) -> EditorState<T> {
    get_or(store, &EditorState::<T>::path(), EditorState::closed)
}

/// Handle `{collection}/load`.
pub async fn handle_load<T: Resource + Searchable>(ctx: &BffContext, store: &StateStore) {
    let path = ListPage::<T>::path();
    let mut list = list_state::<T>(ctx, store);
    list.loading = true;
    list.error = None;
    store.set(&path, list);

    let result = ctx.api.resource::<T>().list().await;

    // Re-read: a search may have landed while the request was in flight.
    let mut list = list_state::<T>(ctx, store);
    list.loading = false;
    match result {
        Ok(items) => {
            debug!(collection = T::COLLECTION, rows = items.len(), "list loaded");
            list.items = items;
            let page = list.page;
            list.go_to(page);
            store.set(&path, list);
        }
        Err(err) => {
            list.error = Some(err.user_message());
            store.set(&path, list);
            report_failure(ctx, store, &err);
        }
    }
}

/// Handle `{collection}/search`.
pub async fn handle_search<T: Resource + Searchable>(req: &SearchReq, ctx: &BffContext, store: &StateStore) {
    let path = ListPage::<T>::path();
    let mut list = list_state::<T>(ctx, store);
    list.input = req.query.clone();
    store.set(&path, list);

    if !ctx.debounce().settle(&path, ctx.settings.search_debounce).await {
        return;
    }

    let mut list = list_state::<T>(ctx, store);
    list.query = list.input.trim().to_string();
    list.page = 1;
    store.set(&path, list);
}

/// Handle `{collection}/page`.
pub fn handle_page<T: Resource + Searchable>(req: &PageReq, ctx: &BffContext, store: &StateStore) {
    let path = ListPage::<T>::path();
    let mut list = list_state::<T>(ctx, store);
    list.go_to(req.page);
    store.set(&path, list);
}

/// Handle `{collection}/open`.
pub async fn handle_open<T: Resource + Default>(req: &OpenReq, ctx: &BffContext, store: &StateStore) {
    let path = EditorState::<T>::path();
    let Some(id) = req.id.as_deref() else {
        store.set(&path, EditorState::<T>::adding());
        return;
    };

    let cached = store
        .get_as::<ListPage<T>>(&ListPage::<T>::path())
        .and_then(|list| list.items.into_iter().find(|item| item.id() == id));
    let record = match cached {
        Some(record) => record,
        None => match ctx.api.resource::<T>().get(id).await {
            Ok(record) => record,
            Err(err) => {
                report_failure(ctx, store, &err);
                return;
            }
        },
    };
    store.set(&path, EditorState::editing(id, record));
}

/// Handle `{collection}/close`.
pub fn handle_close<T: Resource + Default>(store: &StateStore) {
    store.set(&EditorState::<T>::path(), EditorState::<T>::closed());
}

/// Handle `{collection}/save`: POST when the editor was opened for a new
/// record, PUT to the opened record otherwise.
pub async fn handle_save<T>(req: SaveReq<T>, ctx: &BffContext, store: &StateStore)
where
    T: Resource + Searchable + Default,
{
    let path = EditorState::<T>::path();
    let mut editor = editor_state::<T>(store);
    let mut record = req.record;
    // Adding never targets an existing id; editing keeps its target even
    // if the form dropped it.
    let target = editor.editing.clone();
    let creating = target.is_none();
    if creating && !record.is_new() {
        debug!(collection = T::COLLECTION, id = record.id(), "dropping id from new record");
        record.clear_id();
    }

    editor.open = true;
    editor.busy = true;
    editor.error = None;
    editor.draft = record.clone();
    store.set(&path, editor.clone());

    let client = ctx.api.resource::<T>();
    let result = match &target {
        Some(id) => client.update(id, &record).await,
        None => client.create(&record).await,
    };
    match result {
        Ok(reply) => {
            store.set(&path, EditorState::<T>::closed());
            let verb = if creating { "added" } else { "updated" };
            toast_success(store, message_or(reply.message, || format!("{} {}", T::LABEL, verb)));
            handle_load::<T>(ctx, store).await;
        }
        Err(err) => {
            editor.busy = false;
            editor.error = Some(err.user_message());
            store.set(&path, editor);
            report_failure(ctx, store, &err);
        }
    }
}

/// Handle `{collection}/delete`.
pub async fn handle_delete<T: Resource + Searchable>(req: &DeleteReq, ctx: &BffContext, store: &StateStore) {
    match ctx.api.resource::<T>().delete(&req.id).await {
        Ok(reply) => {
            toast_success(store, message_or(reply.message, || format!("{} deleted", T::LABEL)));
            handle_load::<T>(ctx, store).await;
        }
        Err(err) => report_failure(ctx, store, &err),
    }
}

/// Handle `products/info`.
pub async fn handle_product_info(req: &ProductInfoReq, ctx: &BffContext, store: &StateStore) {
    match ctx.api.product_info(&req.product_id).await {
        Ok(info) => store.set(&product_info_path(&req.product_id), info),
        Err(err) => report_failure(ctx, store, &err),
    }
}

/// Handle `lookup/load`.
pub async fn handle_lookup_load(ctx: &BffContext, store: &StateStore) {
    let (units, categories) = tokio::join!(ctx.api.units(), ctx.api.categories());
    match units {
        Ok(units) => store.set(Units::PATH, Units(units)),
        Err(err) => report_failure(ctx, store, &err),
    }
    match categories {
        Ok(categories) => store.set(Categories::PATH, Categories(categories)),
        Err(err) => report_failure(ctx, store, &err),
    }
}
