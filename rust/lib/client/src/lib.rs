//! StockDesk HTTP client.
//!
//! Talks to the inventory backend's REST API. Authentication is handled
//! by pluggable [`TokenSource`] implementations; every call retries on
//! 429 and unwraps the `{status, message, data}` envelope.
//!
//! # Usage
//!
//! ```ignore
//! use stockdesk_client::{ApiClient, SharedToken};
//! use stockdesk_core::Customer;
//!
//! let token = SharedToken::default();
//! let api = ApiClient::new("http://localhost:8080/api", Arc::new(token.clone()));
//! token.set(api.login("owner@acme.in", "secret").await?.data.token);
//! let customers = api.resource::<Customer>().list().await?;
//! ```

mod api;
mod auth;
mod endpoints;
pub mod envelope;
mod error;
mod resource;
mod retry;
mod token;

pub use api::ApiClient;
pub use auth::LoginData;
pub use envelope::Reply;
pub use error::ApiError;
pub use resource::ResourceClient;
pub use retry::{with_backoff, RetryPolicy};
pub use token::{NoAuth, SharedToken, StaticToken, TokenSource};

#[cfg(test)]
mod client_test;
