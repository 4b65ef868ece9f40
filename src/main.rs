//! # Headline Digest
//!
//! Fetches a news outlet's listing page, summarizes the latest articles, and
//! renders them as an HTML digest.
//!
//! ## Usage
//!
//! ```sh
//! headline_digest -o digest.html
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: Discover up to ten article URLs on the listing page
//! 2. **Fetching**: Download each article with a per-request timeout
//! 3. **Extraction**: Pull out the headline and paragraph text
//! 4. **Summarization**: Condense the body through the configured summarizer
//! 5. **Output**: Render the records as HTML (and optionally JSON)
//!
//! A failing article is logged and skipped; the rest of the run continues.

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::pin::pin;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod summarizer;
mod utils;

use api::LlmSummarizer;
use cli::{Cli, SummarizerKind};
use outputs::{html, json};
use pipeline::Pipeline;
use summarizer::{LeadSummarizer, Summarizer};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // stdout may carry the rendered page, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("headline_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Some(ref dir) = args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    let client = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    let client = client.build()?;
    let config = args.pipeline_config();

    // The summarizer is built once and reused by every refresh.
    match args.summarizer {
        SummarizerKind::Llm => {
            let summarizer = LlmSummarizer::load(
                args.config.as_deref(),
                &args.template,
                config.summary_bounds.deterministic,
            )
            .await?;
            run_loop(&args, Pipeline::new(client, config, summarizer)).await
        }
        SummarizerKind::Lead => run_loop(&args, Pipeline::new(client, config, LeadSummarizer)).await,
    }
}

/// Run once, or every `--refresh-secs` until Ctrl-C.
///
/// In one-shot mode a listing failure is returned (non-zero exit). In refresh
/// mode it only ends that refresh; the next tick runs again from scratch.
async fn run_loop<S: Summarizer>(args: &Cli, pipeline: Pipeline<S>) -> Result<(), Box<dyn Error>> {
    let Some(refresh_secs) = args.refresh_secs else {
        return run_once(args, &pipeline).await;
    };

    let period = Duration::from_secs(refresh_secs.max(1));
    let runs = refresh_loop(args, &pipeline, period, tokio::signal::ctrl_c()).await;
    info!(runs, "Refresh loop stopped");
    Ok(())
}

/// Re-run the pipeline every `period` until `shutdown` resolves.
///
/// `shutdown` is polled both while a run is in flight and while sleeping, and
/// is created once so a signal arriving mid-run is never missed. Returns the
/// number of runs started.
async fn refresh_loop<S, F>(args: &Cli, pipeline: &Pipeline<S>, period: Duration, shutdown: F) -> usize
where
    S: Summarizer,
    F: Future,
{
    let mut shutdown = pin!(shutdown);
    let mut runs = 0usize;
    info!(?period, "Refreshing until interrupted");

    loop {
        runs += 1;
        tokio::select! {
            result = run_once(args, pipeline) => {
                if let Err(e) = result {
                    error!(run = runs, error = %e, "Refresh failed; waiting for the next one");
                }
            }
            _ = &mut shutdown => {
                info!(run = runs, "Interrupted during a run; stopping refresh loop");
                return runs;
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            _ = &mut shutdown => {
                info!("Interrupted; stopping refresh loop");
                return runs;
            }
        }
    }
}

/// One full pipeline invocation followed by output.
///
/// A listing transport failure is returned as an error; output write failures
/// are logged and do not fail the run.
#[instrument(level = "info", skip_all, fields(listing_url = %args.listing_url))]
async fn run_once<S: Summarizer>(args: &Cli, pipeline: &Pipeline<S>) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    let digest = match pipeline.run(&args.listing_url).await {
        Ok(digest) => digest,
        Err(e) => {
            error!(error = %e, "Listing fetch failed; aborting run");
            return Err(e.into());
        }
    };
    if digest.articles.is_empty() {
        warn!("Run produced no articles");
    }

    let page = html::render_document(&digest.articles, &args.heading);
    match &args.html_output {
        Some(path) => match fs::write(path, &page).await {
            Ok(()) => info!(%path, "Wrote HTML digest"),
            Err(e) => error!(%path, error = %e, "Failed writing HTML digest"),
        },
        None => println!("{page}"),
    }

    if let Some(ref dir) = args.json_output_dir {
        if let Err(e) = json::write_digest(&digest, dir).await {
            error!(error = %e, "Failed to write JSON digest");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = digest.articles.len(),
        limit = pipeline.config().candidate_limit,
        "Run complete"
    );
    Ok(())
}
