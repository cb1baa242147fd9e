//! Profile handler implementations.

use stockdesk_flux::StateStore;

use crate::handlers::helpers::{get_or, message_or, report_failure, toast_error, toast_success};
use crate::handlers::BffContext;
use crate::request::*;
use crate::state::*;

fn page(store: &StateStore) -> ProfilePage {
    get_or(store, ProfilePage::PATH, ProfilePage::default)
}

/// Handle `profile/load`.
pub async fn handle_load(ctx: &BffContext, store: &StateStore) {
    store.set(ProfilePage::PATH, ProfilePage { loading: true, error: None, ..page(store) });
    match ctx.api.profile().await {
        Ok(profile) => store.set(ProfilePage::PATH, ProfilePage { profile, ..ProfilePage::default() }),
        Err(err) => {
            store.set(
                ProfilePage::PATH,
                ProfilePage { loading: false, error: Some(err.user_message()), ..page(store) },
            );
            report_failure(ctx, store, &err);
        }
    }
}

/// Handle `profile/save`.
pub async fn handle_save(req: ProfileSaveReq, ctx: &BffContext, store: &StateStore) {
    let profile = req.profile;
    if profile.name.trim().is_empty() {
        store.set(ProfilePage::PATH, ProfilePage { error: Some("Name is required".into()), ..page(store) });
        toast_error(store, "Name is required");
        return;
    }
    store.set(ProfilePage::PATH, ProfilePage { busy: true, error: None, ..page(store) });

    match ctx.api.update_profile(&profile).await {
        Ok(reply) => {
            let saved = reply.data.unwrap_or_else(|| profile.clone());
            // Keep the stored user in step so the header shows the new name.
            if let Some(mut user) = ctx.session.user() {
                user.name = saved.name.clone();
                user.email = saved.email.clone();
                user.mobile = saved.mobile.clone();
                user.country = saved.country.clone();
                ctx.session.set_user(&user);
                let mut auth = get_or(store, AuthState::PATH, || AuthState::signed_in(None));
                auth.user = Some(user);
                store.set(AuthState::PATH, auth);
            }
            store.set(ProfilePage::PATH, ProfilePage { profile: saved, ..ProfilePage::default() });
            toast_success(store, message_or(reply.message, || "Profile updated".into()));
        }
        Err(err) => {
            store.set(
                ProfilePage::PATH,
                ProfilePage { busy: false, error: Some(err.user_message()), ..page(store) },
            );
            report_failure(ctx, store, &err);
        }
    }
}

fn check_password(req: &PasswordChangeReq) -> Result<(), &'static str> {
    if req.current.is_empty() {
        return Err("Enter your current password");
    }
    if req.new.chars().count() < 6 {
        return Err("New password must be at least 6 characters");
    }
    if req.new != req.confirm {
        return Err("Passwords do not match");
    }
    if req.new == req.current {
        return Err("New password must differ from the current one");
    }
    Ok(())
}

/// Handle `profile/password`.
pub async fn handle_password(req: &PasswordChangeReq, ctx: &BffContext, store: &StateStore) {
    if let Err(message) = check_password(req) {
        store.set(ProfilePage::PATH, ProfilePage { error: Some(message.into()), ..page(store) });
        toast_error(store, message);
        return;
    }
    store.set(ProfilePage::PATH, ProfilePage { busy: true, error: None, ..page(store) });
    match ctx.api.change_password(&req.current, &req.new).await {
        Ok(reply) => {
            store.set(ProfilePage::PATH, ProfilePage { busy: false, ..page(store) });
            toast_success(store, message_or(reply.message, || "Password changed".into()));
        }
        Err(err) => {
            store.set(
                ProfilePage::PATH,
                ProfilePage { busy: false, error: Some(err.user_message()), ..page(store) },
            );
            report_failure(ctx, store, &err);
        }
    }
}
