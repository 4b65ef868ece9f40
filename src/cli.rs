//! Command-line interface definitions for Headline Digest.
//!
//! Every option has a default, so running the binary with no arguments
//! summarizes the BBC News listing once with the LLM backend and prints the
//! rendered page to stdout.

use crate::config::{
    DEFAULT_ARTICLE_MARKER, DEFAULT_CANDIDATE_LIMIT, DEFAULT_HEADING, DEFAULT_LISTING_URL,
    PipelineConfig,
};
use crate::models::SummaryBounds;
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Which summarizer backend to build at startup.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummarizerKind {
    /// Abstractive summaries from an OpenAI-compatible LLM (awful_aj config)
    Llm,
    /// Leading sentences of the article, no network
    Lead,
}

/// Command-line arguments for the Headline Digest application.
///
/// # Examples
///
/// ```sh
/// # One run, page to stdout
/// headline_digest
///
/// # Offline summaries, page and JSON to disk
/// headline_digest --summarizer lead -o digest.html -j ./json
///
/// # Re-run every 10 minutes until Ctrl-C
/// headline_digest -o digest.html --refresh-secs 600
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page to discover articles on
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Substring an article link's href must contain
    #[arg(long, default_value = DEFAULT_ARTICLE_MARKER)]
    pub article_marker: String,

    /// Maximum number of articles taken from the listing
    #[arg(long, default_value_t = DEFAULT_CANDIDATE_LIMIT)]
    pub limit: usize,

    /// Timeout for each article request, in seconds
    #[arg(long, default_value_t = 10)]
    pub article_timeout_secs: u64,

    /// Timeout for the listing request, in seconds (no timeout when omitted)
    #[arg(long)]
    pub listing_timeout_secs: Option<u64>,

    /// Number of articles processed at once; output order is unaffected
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Summarizer backend
    #[arg(long, value_enum, default_value_t = SummarizerKind::Llm)]
    pub summarizer: SummarizerKind,

    /// Optional path to the LLM config.yaml file
    #[arg(short, long, env = "HEADLINE_DIGEST_CONFIG")]
    pub config: Option<String>,

    /// Name of the LLM chat template
    #[arg(long, default_value = "news_summarizer")]
    pub template: String,

    /// Heading shown at the top of the rendered page
    #[arg(long, default_value = DEFAULT_HEADING)]
    pub heading: String,

    /// Write the rendered HTML page here instead of stdout
    #[arg(short = 'o', long)]
    pub html_output: Option<String>,

    /// Also write each run's digest as JSON under this directory
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Re-run the pipeline every N seconds until interrupted
    #[arg(long)]
    pub refresh_secs: Option<u64>,
}

impl Cli {
    /// Pipeline settings derived from the flags.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            article_marker: self.article_marker.clone(),
            candidate_limit: self.limit,
            article_timeout: Duration::from_secs(self.article_timeout_secs),
            listing_timeout: self.listing_timeout_secs.map(Duration::from_secs),
            concurrency: usize::from(self.concurrency),
            summary_bounds: SummaryBounds::default(),
        }
    }
}
