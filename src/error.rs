//! Error types for the ingestion pipeline.
//!
//! The pipeline distinguishes two failure scopes:
//!
//! - [`ListingError`]: the listing page itself could not be retrieved. A
//!   non-success HTTP status is *not* an error (it yields an empty candidate
//!   list); only transport failures end up here, and they abort the run.
//! - [`ArticleError`]: one candidate failed somewhere between fetch and
//!   summary. The orchestrator logs it and moves on to the next candidate.

use std::time::Duration;
use thiserror::Error;

/// Failure to retrieve the listing page.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing url {url:?} is not a valid absolute URL: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to fetch listing {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure while processing a single candidate article.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("timed out after {timeout:?} fetching {url}")]
    Timeout { url: String, timeout: Duration },

    #[error("could not read article body from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("summarizer failed for {url}: {source}")]
    Model {
        url: String,
        #[source]
        source: SummarizeError,
    },
}

impl ArticleError {
    /// Short label used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            ArticleError::Network { .. } => "network",
            ArticleError::Timeout { .. } => "timeout",
            ArticleError::Parse { .. } => "parse",
            ArticleError::Model { .. } => "model",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ArticleError::Network { url, .. }
            | ArticleError::Timeout { url, .. }
            | ArticleError::Parse { url, .. }
            | ArticleError::Model { url, .. } => url,
        }
    }
}

/// Failure raised by a [`crate::summarizer::Summarizer`] backend.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarizer backend error: {0}")]
    Backend(String),

    #[error("summarizer returned an empty summary")]
    EmptyResponse,

    #[error("invalid summary bounds: min_length {min} > max_length {max} or max_length is 0")]
    InvalidBounds { min: usize, max: usize },
}
