//! Login / logout / status commands.

use anyhow::Result;
use stockdesk_bff::request::{LoginReq, LogoutReq, ProfileLoadReq};
use stockdesk_bff::state::{AuthState, CompanyBanner};

use crate::render::{print_json, Output};
use crate::shell::Shell;

/// Login to the current context's server. The token, user and company
/// are saved to the context.
pub async fn login(shell: &Shell, email: String, password: String) -> Result<()> {
    shell.emit(LoginReq::PATH, LoginReq { email, password }).await?;

    let auth: Option<AuthState> = shell.get(AuthState::PATH);
    match auth {
        Some(state) if state.is_authenticated() => {
            let who = state
                .user
                .map(|u| if u.name.is_empty() { u.email } else { u.name })
                .unwrap_or_else(|| "user".to_string());
            let banner = shell.banner();
            if banner.name.is_empty() {
                println!("Logged in as {}.", who);
            } else {
                println!("Logged in as {} ({}, {}).", who, banner.name, banner.currency);
            }
            Ok(())
        }
        Some(state) => anyhow::bail!("Login failed: {}", state.error.unwrap_or_else(|| "unknown error".into())),
        None => anyhow::bail!("Login failed."),
    }
}

/// Logout: end the server session and clear the saved one.
pub async fn logout(shell: &Shell) -> Result<()> {
    let was_logged_in = shell.is_logged_in();
    shell.emit(LogoutReq::PATH, LogoutReq).await?;
    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Show the current context and check the saved session is still valid.
pub async fn status(shell: &Shell, context: &str, server: &str) -> Result<()> {
    let banner: CompanyBanner = shell.banner();
    let auth: Option<AuthState> = shell.get(AuthState::PATH);
    let user = auth.as_ref().and_then(|a| a.user.clone());

    let session = if !shell.is_logged_in() {
        "not logged in".to_string()
    } else {
        let checked = shell.emit(ProfileLoadReq::PATH, ProfileLoadReq).await;
        match checked {
            // A 401 logs the session out before the toast comes back.
            _ if !shell.is_logged_in() => "expired".to_string(),
            Ok(()) => "valid".to_string(),
            Err(err) => format!("error ({})", err),
        }
    };

    if shell.output() == Output::Json {
        return print_json(&serde_json::json!({
            "context": context,
            "server": server,
            "session": session,
            "user": user,
            "company": banner,
        }));
    }

    println!("Context:   {}", context);
    println!("Server:    {}", server);
    println!("Session:   {}", session);
    if let Some(user) = user {
        println!("User:      {} <{}> ({})", user.name, user.email, user.rid);
    }
    if !banner.name.is_empty() {
        println!("Company:   {}", banner.name);
    }
    println!("Currency:  {} ({})", banner.currency, banner.symbol);
    Ok(())
}
