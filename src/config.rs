//! Pipeline configuration.
//!
//! Defaults reproduce the fixed behaviour of the digest: the BBC News listing,
//! `/news/articles/` links, ten candidates, a ten second article timeout, no
//! listing timeout and one article at a time.

use crate::models::SummaryBounds;
use crate::scrapers::article::DEFAULT_ARTICLE_TIMEOUT;
use std::time::Duration;

pub const DEFAULT_LISTING_URL: &str = "https://www.bbc.com/news";
pub const DEFAULT_ARTICLE_MARKER: &str = "/news/articles/";
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;
/// Page heading for the default listing.
pub const DEFAULT_HEADING: &str = "BBC News Summaries";

/// Settings for one [`crate::pipeline::Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Substring an anchor's `href` must contain to count as an article link.
    pub article_marker: String,
    /// Maximum number of candidates taken from the listing.
    pub candidate_limit: usize,
    /// Per-request timeout for article pages.
    pub article_timeout: Duration,
    /// Timeout for the listing request; `None` waits indefinitely.
    pub listing_timeout: Option<Duration>,
    /// Number of candidates processed at once. Output order does not depend on it.
    pub concurrency: usize,
    pub summary_bounds: SummaryBounds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            article_marker: DEFAULT_ARTICLE_MARKER.to_string(),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            article_timeout: DEFAULT_ARTICLE_TIMEOUT,
            listing_timeout: None,
            concurrency: 1,
            summary_bounds: SummaryBounds::default(),
        }
    }
}
