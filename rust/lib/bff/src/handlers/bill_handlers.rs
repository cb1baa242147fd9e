//! Bill entry handler implementations.
//!
//! Sales and purchases share one form. Picking a product fetches its
//! pricing once per bill; the draft then fills cost, unit and GST into
//! every row holding that product.

use stockdesk_client::ApiError;
use stockdesk_core::{
    BillDraft, CoreError, Pricing, Product, Purchase, RowEdit, Sale, Transaction, TransactionKind,
};
use stockdesk_flux::StateStore;
use tracing::{debug, warn};

use crate::handlers::helpers::{get_or, message_or, report_failure, toast_error, toast_success};
use crate::handlers::{screen_handlers, BffContext};
use crate::request::*;
use crate::state::*;

fn bill_state(kind: TransactionKind, store: &StateStore) -> BillState {
    get_or(store, &BillState::path(kind), || BillState::new(kind))
}

fn set_bill(kind: TransactionKind, store: &StateStore, state: BillState) {
    store.set(&BillState::path(kind), state);
}

/// Apply a local edit, surfacing a bad row index on the form.
fn update_draft<F>(kind: TransactionKind, store: &StateStore, f: F) -> bool
where
    F: FnOnce(&mut BillDraft) -> Result<(), CoreError>,
{
    let mut state = bill_state(kind, store);
    match f(&mut state.draft) {
        Ok(()) => {
            state.error = None;
            set_bill(kind, store, state);
            true
        }
        Err(err) => {
            state.error = Some(err.to_string());
            set_bill(kind, store, state);
            toast_error(store, err.to_string());
            false
        }
    }
}

/// Handle `{c}/bill/new`.
pub fn handle_new(kind: TransactionKind, store: &StateStore) {
    set_bill(kind, store, BillState::new(kind));
}

/// Handle `{c}/bill/load`: open an existing bill.
pub async fn handle_load(kind: TransactionKind, req: &BillLoadReq, ctx: &BffContext, store: &StateStore) {
    let fetched: Result<Transaction, ApiError> = match kind {
        TransactionKind::Sale => ctx.api.resource::<Sale>().get(&req.transaction_id).await.map(|s| s.0),
        TransactionKind::Purchase => ctx.api.resource::<Purchase>().get(&req.transaction_id).await.map(|p| p.0),
    };
    match fetched {
        Ok(mut tx) => {
            if tx.transaction_id.is_empty() {
                tx.transaction_id = req.transaction_id.clone();
            }
            set_bill(kind, store, BillState::from_draft(BillDraft::from_transaction(kind, &tx)));
            let missing = bill_state(kind, store).draft.missing_pricing();
            // A line whose product can no longer be priced keeps its saved cost.
            for product_id in missing {
                match ensure_pricing(kind, &product_id, ctx, store).await {
                    Ok(()) => {}
                    Err(err) if err.is_unauthorized() => {
                        report_failure(ctx, store, &err);
                        return;
                    }
                    Err(err) => warn!(product_id = %product_id, error = %err, "no pricing for bill line"),
                }
            }
        }
        Err(err) => report_failure(ctx, store, &err),
    }
}

/// Handle `{c}/bill/edit`.
pub async fn handle_edit(kind: TransactionKind, req: BillEditReq, ctx: &BffContext, store: &StateStore) {
    let product_id = match &req.edit {
        RowEdit::Product(id) => Some(id.clone()),
        _ => None,
    };
    let mut needs_lookup = false;
    let ok = update_draft(kind, store, |draft| {
        needs_lookup = draft.edit(req.index, req.edit)?;
        Ok(())
    });
    if !ok || !needs_lookup {
        return;
    }
    if let Some(product_id) = product_id {
        if let Err(err) = ensure_pricing(kind, &product_id, ctx, store).await {
            report_failure(ctx, store, &err);
        }
    }
}

/// Handle `{c}/bill/add-row`.
pub fn handle_add_row(kind: TransactionKind, store: &StateStore) {
    update_draft(kind, store, |draft| {
        draft.add_row();
        Ok(())
    });
}

/// Handle `{c}/bill/remove-row`.
pub fn handle_remove_row(kind: TransactionKind, req: &BillRemoveRowReq, store: &StateStore) {
    update_draft(kind, store, |draft| draft.remove_row(req.index));
}

/// Handle `{c}/bill/header`.
pub fn handle_header(kind: TransactionKind, req: BillHeaderReq, store: &StateStore) {
    update_draft(kind, store, |draft| {
        if let Some(party_id) = req.party_id {
            draft.party_id = party_id;
        }
        if let Some(party_name) = req.party_name {
            draft.party_name = party_name;
        }
        if let Some(bill_name) = req.bill_name {
            draft.bill_name = bill_name;
        }
        if let Some(date) = req.date {
            draft.date = date;
        }
        if let Some(mode) = req.payment_mode {
            draft.payment_mode = mode;
        }
        if let Some(discount) = req.absolute_discount {
            draft.set_absolute_discount(discount);
        }
        if let Some(paid) = req.paid_amount {
            draft.set_paid(paid);
        }
        Ok(())
    });
}

/// Handle `{c}/bill/submit`: validate, POST (or PUT when editing),
/// then start a fresh bill and refresh the list.
pub async fn handle_submit(kind: TransactionKind, ctx: &BffContext, store: &StateStore) {
    let mut state = bill_state(kind, store);
    let tx = match state.draft.to_transaction() {
        Ok(tx) => tx,
        Err(err) => {
            state.error = Some(err.to_string());
            set_bill(kind, store, state);
            toast_error(store, err.to_string());
            return;
        }
    };

    state.busy = true;
    state.error = None;
    set_bill(kind, store, state.clone());

    let creating = tx.transaction_id.is_empty();
    let result = match kind {
        TransactionKind::Sale => ctx.api.resource::<Sale>().save(&Sale(tx)).await.map(|r| r.message),
        TransactionKind::Purchase => ctx.api.resource::<Purchase>().save(&Purchase(tx)).await.map(|r| r.message),
    };

    match result {
        Ok(message) => {
            let label = match kind {
                TransactionKind::Sale => "Sale",
                TransactionKind::Purchase => "Purchase",
            };
            let verb = if creating { "recorded" } else { "updated" };
            toast_success(store, message_or(message, || format!("{} {}", label, verb)));
            set_bill(kind, store, BillState::new(kind));
            match kind {
                TransactionKind::Sale => screen_handlers::handle_load::<Sale>(ctx, store).await,
                TransactionKind::Purchase => screen_handlers::handle_load::<Purchase>(ctx, store).await,
            }
        }
        Err(err) => {
            state.busy = false;
            state.error = Some(err.user_message());
            set_bill(kind, store, state);
            report_failure(ctx, store, &err);
        }
    }
}

/// Fetch pricing for `product_id` unless this bill already has it.
async fn ensure_pricing(
    kind: TransactionKind,
    product_id: &str,
    ctx: &BffContext,
    store: &StateStore,
) -> Result<(), ApiError> {
    if bill_state(kind, store).draft.has_pricing(product_id) {
        return Ok(());
    }

    let cached = store
        .get_as::<ListPage<Product>>(&ListPage::<Product>::path())
        .and_then(|list| list.items.into_iter().find(|p| p.id == product_id));
    let product = match cached {
        Some(product) => product,
        None => ctx.api.resource::<Product>().get(product_id).await?,
    };
    let info = ctx.api.product_info(product_id).await?;
    store.set(&product_info_path(product_id), info.clone());

    let pricing = Pricing::new(kind, &product, &info);
    debug!(product_id, base_cost = pricing.base_cost, "pricing cached for bill");

    // Re-read: the user may have kept editing while we fetched.
    let mut state = bill_state(kind, store);
    state.draft.apply_pricing(product_id, pricing);
    set_bill(kind, store, state);
    Ok(())
}
