use std::future::Future;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Response, StatusCode};
use tracing::warn;

use crate::error::ApiError;

/// Backoff for `429 Too Many Requests`. Other statuses are never retried.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    /// Delay before retry number `attempt` (0-based). A server
    /// `Retry-After` wins over the doubling schedule; both are capped.
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let delay = retry_after.unwrap_or_else(|| {
            self.base_delay
                .checked_mul(2u32.saturating_pow(attempt))
                .unwrap_or(self.max_delay)
        });
        delay.min(self.max_delay)
    }
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn retry_after(resp: &Response) -> Option<Duration> {
    resp.headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Send with `send`, retrying while the server answers 429.
///
/// `send` builds a fresh request each time.
pub async fn with_backoff<F, Fut>(policy: &RetryPolicy, mut send: F) -> Result<Response, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 0u32;
    loop {
        let resp = send().await?;
        if resp.status() != StatusCode::TOO_MANY_REQUESTS {
            return Ok(resp);
        }
        if attempt >= policy.max_retries {
            return Err(ApiError::RateLimited { attempts: attempt + 1 });
        }
        let delay = policy.delay_for(attempt, retry_after(&resp));
        warn!(url = %resp.url(), attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "rate limited, backing off");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
