use serde::{Deserialize, Serialize};
use serde_json::Value;
use stockdesk_core::{Company, User};
use tracing::info;

use crate::api::ApiClient;
use crate::envelope::Reply;
use crate::error::ApiError;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// What a successful login hands back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginData {
    #[serde(alias = "access_token", alias = "authToken")]
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, alias = "selectedCompany")]
    pub company: Option<Company>,
}

impl ApiClient {
    /// `POST /auth/login`. Bad credentials surface as [`ApiError::Auth`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Reply<LoginData>, ApiError> {
        let reply: Reply<LoginData> = self
            .post("auth/login", &LoginRequest { email, password })
            .await
            .map_err(|e| match e {
                ApiError::Server { status: 400 | 401 | 403, message } => ApiError::Auth(message),
                ApiError::Rejected(message) => ApiError::Auth(message),
                other => other,
            })?;
        if reply.data.token.is_empty() {
            return Err(ApiError::Auth("server returned no token".to_string()));
        }
        info!(email, "logged in");
        Ok(reply)
    }

    /// `POST /auth/logout`.
    pub async fn logout(&self) -> Result<Reply<Value>, ApiError> {
        self.post("auth/logout", &Value::Null).await
    }
}
