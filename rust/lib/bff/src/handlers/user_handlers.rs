//! User administration handler implementations.

use stockdesk_core::User;
use stockdesk_flux::StateStore;
use tracing::info;

use crate::handlers::helpers::{message_or, report_failure, toast_error, toast_success};
use crate::handlers::{screen_handlers, BffContext};
use crate::request::*;

const NOT_ALLOWED: &str = "You are not allowed to manage users";

/// The signed-in user may manage others. Unknown users are let through
/// and left to the server to judge.
fn may_manage(ctx: &BffContext) -> bool {
    ctx.session.user().is_none_or(|u| u.rid.can_manage_users())
}

fn is_self(ctx: &BffContext, user_id: &str) -> bool {
    ctx.session.user().is_some_and(|u| !u.id.is_empty() && u.id == user_id)
}

/// Handle `users/block`.
pub async fn handle_block(req: &BlockUserReq, ctx: &BffContext, store: &StateStore) {
    if !may_manage(ctx) {
        toast_error(store, NOT_ALLOWED);
        return;
    }
    if req.blocked && is_self(ctx, &req.id) {
        toast_error(store, "You cannot block yourself");
        return;
    }
    match ctx.api.set_user_blocked(&req.id, req.blocked).await {
        Ok(reply) => {
            info!(user = %req.id, blocked = req.blocked, "user block state changed");
            let verb = if req.blocked { "blocked" } else { "unblocked" };
            toast_success(store, message_or(reply.message, || format!("User {}", verb)));
            screen_handlers::handle_load::<User>(ctx, store).await;
        }
        Err(err) => report_failure(ctx, store, &err),
    }
}

/// Handle `users/role`.
pub async fn handle_role(req: &ChangeRoleReq, ctx: &BffContext, store: &StateStore) {
    if !may_manage(ctx) {
        toast_error(store, NOT_ALLOWED);
        return;
    }
    match ctx.api.set_user_role(&req.id, req.role).await {
        Ok(reply) => {
            info!(user = %req.id, role = %req.role, "user role changed");
            toast_success(store, message_or(reply.message, || format!("Role changed to {}", req.role)));
            screen_handlers::handle_load::<User>(ctx, store).await;
        }
        Err(err) => report_failure(ctx, store, &err),
    }
}
