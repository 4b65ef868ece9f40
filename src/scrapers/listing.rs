//! Listing page indexer.
//!
//! Scrapes the listing page and keeps every anchor whose `href` contains the
//! article path marker (e.g. `/news/articles/`). Relative hrefs are resolved
//! against the listing URL, so `/news/articles/c1` on
//! `https://www.bbc.com/news` becomes `https://www.bbc.com/news/articles/c1`.

use crate::error::ListingError;
use crate::models::CandidateLink;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// Fetch the listing page and return up to `limit` candidate article links.
///
/// # Returns
///
/// Candidate links in document order. Repeated hrefs are kept as-is. A
/// non-success HTTP status yields an empty list rather than an error.
///
/// # Errors
///
/// Returns [`ListingError::InvalidUrl`] if `listing_url` does not parse and
/// [`ListingError::Transport`] if the request or the body read fails. Callers
/// should treat the latter as fatal for the run.
#[instrument(level = "info", skip(client, marker, timeout), fields(%marker))]
pub async fn fetch_listing(
    client: &Client,
    listing_url: &str,
    marker: &str,
    limit: usize,
    timeout: Option<Duration>,
) -> Result<Vec<CandidateLink>, ListingError> {
    let base_url = Url::parse(listing_url).map_err(|source| ListingError::InvalidUrl {
        url: listing_url.to_string(),
        source,
    })?;

    let mut request = client.get(base_url.clone());
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let transport = |source: reqwest::Error| ListingError::Transport {
        url: listing_url.to_string(),
        source,
    };
    let response = request.send().await.map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        warn!(%status, "Listing page returned a non-success status; no candidates");
        return Ok(Vec::new());
    }

    let html = response.text().await.map_err(transport)?;
    let links = extract_candidate_links(&html, &base_url, marker, limit);

    info!(count = links.len(), source = listing_url, "Indexed article URLs");
    debug!(urls = ?links.iter().map(CandidateLink::as_str).collect::<Vec<_>>(), "Candidate URLs");

    Ok(links)
}

/// Select qualifying anchors from listing markup and resolve them against `base_url`.
pub fn extract_candidate_links(
    html: &str,
    base_url: &Url,
    marker: &str,
    limit: usize,
) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.contains(marker))
        .filter_map(|href| match base_url.join(href) {
            Ok(resolved) => Some(CandidateLink::new(resolved)),
            Err(e) => {
                debug!(%href, error = %e, "Skipping unresolvable href");
                None
            }
        })
        .take(limit)
        .collect()
}
