//! Auth handler implementations.

use stockdesk_client::ApiError;
use stockdesk_flux::StateStore;
use tracing::{debug, info};

use crate::handlers::helpers::{message_or, toast_error, toast_success};
use crate::handlers::BffContext;
use crate::request::*;
use crate::state::*;

/// Every screen's state lives under one of these.
const SCREEN_PREFIXES: &[&str] = &[
    "customers", "vendors", "products", "users", "sales", "purchases", "dues", "lookup", "profile",
];

/// Handle `auth/login`.
pub async fn handle_login(req: &LoginReq, ctx: &BffContext, store: &StateStore) {
    if req.email.trim().is_empty() || req.password.is_empty() {
        store.set(AuthState::PATH, AuthState::signed_out(Some("Email and password are required".into())));
        return;
    }

    store.set(AuthState::PATH, AuthState { busy: true, ..AuthState::signed_out(None) });

    match ctx.api.login(req.email.trim(), &req.password).await {
        Ok(reply) => {
            ctx.session.save_login(&reply.data);
            store.set(AuthState::PATH, AuthState::signed_in(reply.data.user.clone()));
            store.set(AppRoute::PATH, AppRoute::home());
            toast_success(store, message_or(reply.message, || "Logged in".into()));
        }
        Err(err) => {
            let message = match &err {
                ApiError::Auth(message) => message.clone(),
                other => other.user_message(),
            };
            info!(email = %req.email, error = %err, "login failed");
            store.set(AuthState::PATH, AuthState::signed_out(Some(message.clone())));
            toast_error(store, message);
        }
    }
}

/// Handle `auth/logout`.
pub async fn handle_logout(ctx: &BffContext, store: &StateStore) {
    if ctx.session.is_authenticated() {
        // The server side is best effort; the local session ends regardless.
        if let Err(err) = ctx.api.logout().await {
            debug!(error = %err, "logout call failed");
        }
    }
    ctx.session.clear();
    store.set(AuthState::PATH, AuthState::signed_out(None));
    store.set(AppRoute::PATH, AppRoute::login());
    clear_screens(store);
}

fn clear_screens(store: &StateStore) {
    for prefix in SCREEN_PREFIXES {
        for (path, _) in store.scan(prefix) {
            store.remove(&path);
        }
    }
}
