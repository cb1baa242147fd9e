//! Shared helpers for handlers.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use stockdesk_client::ApiError;
use stockdesk_flux::StateStore;
use tracing::warn;

use crate::handlers::BffContext;
use crate::state::*;

pub const SESSION_EXPIRED: &str = "Session expired, please log in again";

/// Typed read with a fallback for missing state.
pub fn get_or<T: Any + Clone>(store: &StateStore, path: &str, default: impl FnOnce() -> T) -> T {
    store.get_as::<T>(path).unwrap_or_else(default)
}

pub fn toast_success(store: &StateStore, message: impl Into<String>) {
    store.set(Toast::PATH, Toast::success(message));
}

pub fn toast_error(store: &StateStore, message: impl Into<String>) {
    store.set(Toast::PATH, Toast::error(message));
}

/// The server's message when it sent one, else `fallback`.
pub fn message_or(message: Option<String>, fallback: impl FnOnce() -> String) -> String {
    message.filter(|m| !m.trim().is_empty()).unwrap_or_else(fallback)
}

/// Surface a failed call. A 401 also ends the session and sends the
/// user back to the login screen.
pub fn report_failure(ctx: &BffContext, store: &StateStore, err: &ApiError) {
    if err.is_unauthorized() {
        warn!("server rejected the session token, signing out");
        ctx.session.clear_auth();
        store.set(AuthState::PATH, AuthState::signed_out(Some(SESSION_EXPIRED.to_string())));
        store.set(AppRoute::PATH, AppRoute::login());
        toast_error(store, SESSION_EXPIRED);
        return;
    }
    warn!(error = %err, "request failed");
    toast_error(store, err.user_message());
}

/// Last-input-wins debouncing, keyed by screen.
#[derive(Default)]
pub struct Debouncer {
    generations: Mutex<HashMap<String, u64>>,
}

impl Debouncer {
    /// Wait out `delay`. Returns `false` if another call for the same key
    /// arrived meanwhile; that later call owns the input now.
    pub async fn settle(&self, key: &str, delay: Duration) -> bool {
        let mine = {
            let mut generations = self.generations.lock().unwrap_or_else(PoisonError::into_inner);
            let generation = generations.entry(key.to_string()).or_insert(0);
            *generation += 1;
            *generation
        };
        tokio::time::sleep(delay).await;
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .is_some_and(|g| *g == mine)
    }
}
