//! Auth state, stored at `auth/state`.

use serde::Serialize;
use stockdesk_core::User;

/// Authentication state. The UI reads this to decide what to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub phase: AuthPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthPhase {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub const PATH: &'static str = "auth/state";

    pub fn signed_out(error: Option<String>) -> Self {
        Self { phase: AuthPhase::Unauthenticated, user: None, busy: false, error }
    }

    pub fn signed_in(user: Option<User>) -> Self {
        Self { phase: AuthPhase::Authenticated, user, busy: false, error: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }
}
