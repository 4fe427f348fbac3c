use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{error, warn};

use crate::config::FETCH_TIMEOUT_SECS;

/// Shared HTTP client with the fixed per-request timeout.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
}

/// Retry `op` up to `max_attempts` times with a fixed delay between attempts,
/// returning the last error once attempts are exhausted. Network flakiness is
/// the dominant fault mode on a multi-hundred-page crawl, so every content
/// page fetch goes through this wrapper.
pub async fn with_retry<T, E, F, Fut>(max_attempts: u32, delay: Duration, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                if attempt >= max_attempts {
                    error!("All {} attempts failed.", max_attempts);
                    return Err(e);
                }
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Fetch one URL as text, retrying transport failures. Non-2xx responses are
/// raised as errors so they go through the same retry path as timeouts.
pub async fn fetch_html(
    client: &Client,
    url: &str,
    max_attempts: u32,
    delay: Duration,
) -> reqwest::Result<String> {
    with_retry(max_attempts, delay, move || async move {
        let response = client.get(url).send().await?;
        response.error_for_status()?.text().await
    })
    .await
}
