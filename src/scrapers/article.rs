//! Single-article fetcher.

use crate::error::ArticleError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default per-request timeout for article pages.
pub const DEFAULT_ARTICLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch one article page and return its raw markup.
///
/// The request is bounded by `timeout`. A non-success status is logged but
/// the body is still returned, so error pages go through extraction like any
/// other page.
///
/// # Errors
///
/// - [`ArticleError::Timeout`] if the request does not complete within `timeout`
/// - [`ArticleError::Parse`] if the body cannot be decoded as text
/// - [`ArticleError::Network`] on any other transport failure
#[instrument(level = "info", skip(client, timeout), fields(%url))]
pub async fn fetch_article(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String, ArticleError> {
    let classify = |source: reqwest::Error| {
        if source.is_timeout() {
            ArticleError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if source.is_decode() {
            ArticleError::Parse {
                url: url.to_string(),
                reason: source.to_string(),
            }
        } else {
            ArticleError::Network {
                url: url.to_string(),
                source,
            }
        }
    };

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        warn!(%status, "Article returned a non-success status; extracting anyway");
    }

    let body = response.text().await.map_err(classify)?;
    debug!(bytes = body.len(), "Fetched article markup");
    Ok(body)
}
