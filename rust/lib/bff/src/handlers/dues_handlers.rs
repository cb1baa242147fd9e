//! Dues handler implementations.

use stockdesk_core::{round2, DueRecord};
use stockdesk_flux::StateStore;

use crate::handlers::helpers::{message_or, report_failure, toast_error, toast_success};
use crate::handlers::{screen_handlers, BffContext};
use crate::request::*;
use crate::state::*;

/// Handle `dues/pay`.
pub async fn handle_pay(req: &PayDueReq, ctx: &BffContext, store: &StateStore) {
    let amount = req.payment.amount;
    if amount.is_nan() || amount <= 0.0 {
        toast_error(store, "Payment amount must be greater than zero");
        return;
    }
    let known = store
        .get_as::<ListPage<DueRecord>>(&ListPage::<DueRecord>::path())
        .and_then(|list| list.items.into_iter().find(|d| d.id == req.due_id));
    if let Some(due) = known {
        if round2(amount) > due.outstanding() {
            toast_error(store, format!("Payment exceeds the outstanding {:.2}", due.outstanding()));
            return;
        }
    }

    match ctx.api.record_payment(&req.due_id, &req.payment).await {
        Ok(reply) => {
            toast_success(store, message_or(reply.message, || "Payment recorded".into()));
            screen_handlers::handle_load::<DueRecord>(ctx, store).await;
        }
        Err(err) => report_failure(ctx, store, &err),
    }
}
