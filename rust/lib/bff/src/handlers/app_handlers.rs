//! App lifecycle handler implementations.

use stockdesk_flux::StateStore;
use tracing::debug;

use crate::handlers::BffContext;
use crate::state::*;

/// Handle `app/initialize`.
pub async fn handle_initialize(ctx: &BffContext, store: &StateStore) {
    let company = ctx.session.company();
    store.set(CompanyBanner::PATH, CompanyBanner::from_company(company.as_ref()));

    if ctx.session.is_authenticated() {
        debug!("restoring stored session");
        store.set(AuthState::PATH, AuthState::signed_in(ctx.session.user()));
        store.set(AppRoute::PATH, AppRoute::home());
    } else {
        store.set(AuthState::PATH, AuthState::signed_out(None));
        store.set(AppRoute::PATH, AppRoute::login());
    }
}
