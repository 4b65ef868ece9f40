//! Data models for the digest pipeline.
//!
//! This module defines the core data structures used throughout the application:
//! - [`CandidateLink`]: An absolute article URL discovered on the listing page
//! - [`SummaryBounds`]: Length limits handed to the summarizer
//! - [`ArticleRecord`]: A finished, timestamped record ready for display
//! - [`Digest`]: One run's records, as written to the JSON output

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Format used for [`ArticleRecord::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An absolute URL referencing a single article page.
///
/// Produced by the listing fetcher and consumed once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink(Url);

impl CandidateLink {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CandidateLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Length limits and decoding mode for a summary.
///
/// Lengths are counted in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    pub min_length: usize,
    pub max_length: usize,
    /// Ask the backend for repeatable output (no sampling).
    pub deterministic: bool,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length: 200,
            deterministic: true,
        }
    }
}

/// A summarized article, ready for display.
///
/// Records are created by the orchestrator only once the article has been
/// fetched, extracted and summarized without error, and are never modified
/// afterwards; the fields are private and exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    title: String,
    summary: String,
    link: String,
    /// Local time the record was finalized, in [`TIMESTAMP_FORMAT`].
    timestamp: String,
}

impl ArticleRecord {
    pub fn new(title: String, summary: String, link: String, timestamp: String) -> Self {
        Self {
            title,
            summary,
            link,
            timestamp,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// The output of a single pipeline run.
///
/// Each execution (or refresh) produces one `Digest`, which is rendered to
/// HTML and optionally serialized to JSON.
#[derive(Debug, Deserialize, Serialize)]
pub struct Digest {
    /// The listing page the candidates were discovered on.
    pub listing_url: String,
    /// Local time the run finished, in [`TIMESTAMP_FORMAT`].
    pub generated_at: String,
    /// Records in candidate order.
    pub articles: Vec<ArticleRecord>,
}
