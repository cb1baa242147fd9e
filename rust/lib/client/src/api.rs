use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::envelope::{self, Reply};
use crate::error::ApiError;
use crate::retry::{with_backoff, RetryPolicy};
use crate::token::TokenSource;

/// Authenticated JSON client for the backend REST API.
///
/// Every request carries the bearer token from the [`TokenSource`],
/// retries on 429 per the [`RetryPolicy`], and unwraps the response
/// envelope.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Reply<R>, ApiError> {
        let url = self.url(path);
        let token = self.token_source.token().await?;
        let resp = with_backoff(&self.retry, || {
            let mut req = self.http.request(method.clone(), &url);
            if let Some(token) = &token {
                req = req.bearer_auth(token);
            }
            if let Some(body) = &body {
                req = req.json(body);
            }
            req.send()
        })
        .await?;
        debug!(%method, %url, status = resp.status().as_u16(), "api call");
        Self::parse(resp).await
    }

    /// Map HTTP errors to `ApiError`, then open the envelope.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<Reply<R>, ApiError> {
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let mut message = envelope::error_message(&text);
            if message.is_empty() {
                message = status.canonical_reason().unwrap_or_default().to_string();
            }
            return Err(ApiError::Server { status: status.as_u16(), message });
        }
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(format!("response body: {}", e)))?
        };
        envelope::decode(body)
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("request body: {}", e)))
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<Reply<R>, ApiError> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<Reply<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(Method::POST, path, Some(Self::encode(body)?)).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<Reply<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(Method::PUT, path, Some(Self::encode(body)?)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Reply<Value>, ApiError> {
        self.execute(Method::DELETE, path, None).await
    }
}
