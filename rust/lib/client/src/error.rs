use thiserror::Error;

/// Client-side API error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// 2xx response whose envelope reports failure.
    #[error("{0}")]
    Rejected(String),

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),

    /// Still 429 after the retry budget.
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// The session token is missing, expired or revoked.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Server { status, .. } => format!("request failed ({})", status),
            ApiError::Rejected(message) => message.clone(),
            ApiError::Network(_) => "could not reach the server".to_string(),
            ApiError::Auth(message) => message.clone(),
            ApiError::Decode(_) => "unexpected response from the server".to_string(),
            ApiError::RateLimited { .. } => "server is busy, try again shortly".to_string(),
        }
    }
}
