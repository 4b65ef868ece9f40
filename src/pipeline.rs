//! Ingestion pipeline: listing discovery, article fetch, extraction,
//! summarization and record assembly.
//!
//! A failure while processing one candidate never aborts the run: it is logged
//! with its [`ArticleError::kind`] and the candidate is dropped. Only a
//! transport failure on the listing page itself propagates to the caller.
//!
//! Candidates go through a `futures` stream with `buffered`, which keeps
//! results in candidate order. With the default concurrency of one, articles
//! are fetched strictly one after another.

use crate::config::PipelineConfig;
use crate::error::{ArticleError, ListingError};
use crate::models::{ArticleRecord, CandidateLink, Digest};
use crate::scrapers::{article, extract, listing};
use crate::summarizer::Summarizer;
use crate::utils::now_timestamp;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// The orchestrator. Holds the HTTP client and the summarizer for the lifetime
/// of the process; each call to [`Pipeline::orchestrate`] fetches everything
/// from scratch.
#[derive(Debug)]
pub struct Pipeline<S> {
    client: Client,
    config: PipelineConfig,
    summarizer: S,
}

impl<S: Summarizer> Pipeline<S> {
    pub fn new(client: Client, config: PipelineConfig, summarizer: S) -> Self {
        Self {
            client,
            config,
            summarizer,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline and return records in candidate order.
    ///
    /// # Returns
    ///
    /// At most `candidate_limit` records, one per candidate that made it
    /// through fetch, extraction and summarization. An empty listing (including
    /// a listing page with a non-success status) gives an empty vector without
    /// any article being fetched.
    ///
    /// # Errors
    ///
    /// Only listing-level failures; see [`listing::fetch_listing`].
    #[instrument(level = "info", skip(self))]
    pub async fn orchestrate(&self, listing_url: &str) -> Result<Vec<ArticleRecord>, ListingError> {
        let t0 = Instant::now();
        let candidates = listing::fetch_listing(
            &self.client,
            listing_url,
            &self.config.article_marker,
            self.config.candidate_limit,
            self.config.listing_timeout,
        )
        .await?;

        if candidates.is_empty() {
            info!("No candidate articles; nothing to process");
            return Ok(Vec::new());
        }

        let total = candidates.len();
        let outcomes: Vec<(usize, Result<ArticleRecord, ArticleError>)> =
            stream::iter(candidates.iter().enumerate())
                .map(|(index, link)| async move {
                    debug!(index, url = %link, "Processing candidate");
                    (index, self.process_candidate(link).await)
                })
                .buffered(self.config.concurrency.max(1))
                .collect()
                .await;

        let mut records = Vec::with_capacity(total);
        let mut failures: BTreeMap<&'static str, usize> = BTreeMap::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(record) => {
                    info!(index, url = %record.link(), "Successfully processed article");
                    records.push(record);
                }
                Err(e) => {
                    warn!(index, kind = e.kind(), url = %e.url(), error = %e, "Skipping article");
                    *failures.entry(e.kind()).or_default() += 1;
                }
            }
        }

        let elapsed = t0.elapsed();
        info!(
            candidates = total,
            successful = records.len(),
            failed = total - records.len(),
            ?failures,
            elapsed_ms = elapsed.as_millis() as u64,
            "Completed article processing"
        );

        Ok(records)
    }

    /// Run the pipeline and wrap the result in a [`Digest`].
    pub async fn run(&self, listing_url: &str) -> Result<Digest, ListingError> {
        let articles = self.orchestrate(listing_url).await?;
        Ok(Digest {
            listing_url: listing_url.to_string(),
            generated_at: now_timestamp(),
            articles,
        })
    }

    /// Fetch, extract and summarize one candidate.
    async fn process_candidate(&self, link: &CandidateLink) -> Result<ArticleRecord, ArticleError> {
        let url = link.as_str();
        let markup = article::fetch_article(&self.client, url, self.config.article_timeout).await?;

        let title = extract::extract_title(&markup);
        let body = extract::extract_body(&markup);
        debug!(%url, %title, body_bytes = body.len(), "Extracted article");

        let summary = self
            .summarizer
            .summarize(&body, &self.config.summary_bounds)
            .await
            .map_err(|source| ArticleError::Model {
                url: url.to_string(),
                source,
            })?;

        Ok(ArticleRecord::new(
            title,
            summary,
            url.to_string(),
            now_timestamp(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SummarizeError;
    use crate::models::SummaryBounds;
    use crate::outputs::html::{NO_ARTICLES_NOTICE, render_page};
    use crate::scrapers::extract::{DEFAULT_BODY, DEFAULT_TITLE};
    use crate::summarizer::clamp_words;
    use httpmock::{Method::GET, Mock, MockServer};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Deterministic stand-in for a model: echoes the first words of its input
    /// and remembers every input it was given.
    #[derive(Debug, Default)]
    struct StubSummarizer {
        inputs: Mutex<Vec<String>>,
    }

    impl StubSummarizer {
        fn inputs(&self) -> Vec<String> {
            self.inputs.lock().unwrap().clone()
        }
    }

    impl Summarizer for StubSummarizer {
        async fn summarize(
            &self,
            text: &str,
            _bounds: &SummaryBounds,
        ) -> Result<String, SummarizeError> {
            self.inputs.lock().unwrap().push(text.to_string());
            if text.contains("MODEL_FAILS") {
                return Err(SummarizeError::Backend("stub failure".to_string()));
            }
            Ok(format!("Summary: {}", clamp_words(text, 6)))
        }
    }

    fn article_html(title: Option<&str>, paragraphs: &[&str]) -> String {
        let heading = title.map(|t| format!("<h1>{t}</h1>")).unwrap_or_default();
        let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
        format!("<html><body>{heading}{body}</body></html>")
    }

    fn listing_html(slugs: &[&str]) -> String {
        let mut html = String::from(r#"<html><body><a href="/sport">Sport</a>"#);
        for slug in slugs {
            html.push_str(&format!(r#"<a href="/news/articles/{slug}">{slug}</a>"#));
        }
        html.push_str("</body></html>");
        html
    }

    fn mock_listing<'a>(server: &'a MockServer, slugs: &[&str]) -> Mock<'a> {
        let body = listing_html(slugs);
        server.mock(|when, then| {
            when.method(GET).path("/news");
            then.status(200).header("content-type", "text/html").body(&body);
        })
    }

    fn mock_article<'a>(server: &'a MockServer, slug: &str, html: String) -> Mock<'a> {
        let path = format!("/news/articles/{slug}");
        server.mock(|when, then| {
            when.method(GET).path(&path);
            then.status(200).header("content-type", "text/html").body(&html);
        })
    }

    fn pipeline(config: PipelineConfig) -> Pipeline<StubSummarizer> {
        Pipeline::new(Client::new(), config, StubSummarizer::default())
    }

    #[tokio::test]
    async fn listing_not_found_yields_no_articles_page() {
        let server = MockServer::start();
        let listing = server.mock(|when, then| {
            when.method(GET).path("/news");
            then.status(404).body(listing_html(&["a1"]));
        });
        let article = mock_article(&server, "a1", article_html(Some("Never"), &["fetched"]));

        let p = pipeline(PipelineConfig::default());
        let records = p.orchestrate(&server.url("/news")).await.unwrap();

        listing.assert();
        assert_eq!(article.hits(), 0);
        assert!(records.is_empty());
        assert!(p.summarizer.inputs().is_empty());

        let page = render_page(&records, "News Summaries");
        assert!(page.contains(NO_ARTICLES_NOTICE));
        assert!(!page.contains("Read More"));
    }

    #[tokio::test]
    async fn listing_without_qualifying_links_fetches_nothing() {
        let server = MockServer::start();
        mock_listing(&server, &[]);

        let p = pipeline(PipelineConfig::default());
        let records = p.orchestrate(&server.url("/news")).await.unwrap();
        assert!(records.is_empty());
        assert!(p.summarizer.inputs().is_empty());
    }

    #[tokio::test]
    async fn listing_transport_error_propagates() {
        let p = pipeline(PipelineConfig::default());
        let err = p.orchestrate("http://127.0.0.1:9/news").await.unwrap_err();
        assert!(matches!(err, ListingError::Transport { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn slow_listing_past_timeout_is_a_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/news");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body(listing_html(&["a1"]));
        });
        let article = mock_article(&server, "a1", article_html(Some("Never"), &["fetched"]));

        let p = pipeline(PipelineConfig {
            listing_timeout: Some(Duration::from_millis(200)),
            ..PipelineConfig::default()
        });
        let err = p.orchestrate(&server.url("/news")).await.unwrap_err();

        assert!(matches!(err, ListingError::Transport { .. }), "got {err:?}");
        assert_eq!(article.hits(), 0);
        assert!(p.summarizer.inputs().is_empty());
    }

    #[tokio::test]
    async fn three_links_all_succeed() {
        let server = MockServer::start();
        mock_listing(&server, &["a1", "a2", "a3"]);
        mock_article(&server, "a1", article_html(Some("Flood warning issued"), &["Rivers rose overnight."]));
        mock_article(&server, "a2", article_html(Some("Election results"), &["Votes were counted.", "Turnout was high."]));
        mock_article(&server, "a3", article_html(Some("New bridge opens"), &["Traffic eased."]));

        let p = pipeline(PipelineConfig::default());
        let records = p.orchestrate(&server.url("/news")).await.unwrap();

        assert_eq!(records.len(), 3);
        let titles: Vec<&str> = records.iter().map(ArticleRecord::title).collect();
        assert_eq!(titles, vec!["Flood warning issued", "Election results", "New bridge opens"]);
        assert_eq!(records[0].link(), server.url("/news/articles/a1"));
        assert_eq!(records[1].summary(), "Summary: Votes were counted. Turnout was high.");
        for record in &records {
            assert_ne!(record.title(), DEFAULT_TITLE);
            assert!(!record.summary().contains(DEFAULT_BODY));
            assert!(!record.timestamp().is_empty());
        }
    }

    #[tokio::test]
    async fn timed_out_article_is_skipped_and_order_kept() {
        let server = MockServer::start();
        mock_listing(&server, &["a1", "a2", "a3"]);
        mock_article(&server, "a1", article_html(Some("First"), &["One."]));
        let slow = server.mock(|when, then| {
            when.method(GET).path("/news/articles/a2");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body(article_html(Some("Second"), &["Two."]));
        });
        let third = mock_article(&server, "a3", article_html(Some("Third"), &["Three."]));

        let p = pipeline(PipelineConfig {
            article_timeout: Duration::from_millis(200),
            ..PipelineConfig::default()
        });
        let records = p.orchestrate(&server.url("/news")).await.unwrap();

        slow.assert();
        third.assert();
        let titles: Vec<&str> = records.iter().map(ArticleRecord::title).collect();
        assert_eq!(titles, vec!["First", "Third"]);
        assert_eq!(records[1].link(), server.url("/news/articles/a3"));
    }

    #[tokio::test]
    async fn summarizer_failure_skips_only_that_article() {
        let server = MockServer::start();
        mock_listing(&server, &["a1", "a2"]);
        mock_article(&server, "a1", article_html(Some("Broken"), &["MODEL_FAILS here."]));
        mock_article(&server, "a2", article_html(Some("Fine"), &["All good."]));

        let p = pipeline(PipelineConfig::default());
        let records = p.orchestrate(&server.url("/news")).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Fine");
        assert_eq!(p.summarizer.inputs().len(), 2);
    }

    #[tokio::test]
    async fn missing_heading_defaults_title() {
        let server = MockServer::start();
        mock_listing(&server, &["a1"]);
        mock_article(&server, "a1", article_html(None, &["Body without heading."]));

        let p = pipeline(PipelineConfig::default());
        let records = p.orchestrate(&server.url("/news")).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn empty_paragraphs_send_placeholder_to_summarizer() {
        let server = MockServer::start();
        mock_listing(&server, &["a1"]);
        mock_article(&server, "a1", article_html(Some("Photo story"), &["", ""]));

        let p = pipeline(PipelineConfig::default());
        let records = p.orchestrate(&server.url("/news")).await.unwrap();

        assert_eq!(p.summarizer.inputs(), vec![DEFAULT_BODY.to_string()]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary(), format!("Summary: {DEFAULT_BODY}"));
    }

    #[tokio::test]
    async fn output_capped_at_limit_and_ordered_under_concurrency() {
        let server = MockServer::start();
        let slugs: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        let slug_refs: Vec<&str> = slugs.iter().map(String::as_str).collect();
        mock_listing(&server, &slug_refs);
        let mut mocks = Vec::new();
        for (i, slug) in slugs.iter().enumerate() {
            let html = article_html(Some(&format!("Story {i}")), &["Text."]);
            mocks.push(mock_article(&server, slug, html));
        }

        let p = pipeline(PipelineConfig {
            concurrency: 4,
            ..PipelineConfig::default()
        });
        let records = p.orchestrate(&server.url("/news")).await.unwrap();

        assert_eq!(records.len(), 10);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.title(), format!("Story {i}"));
        }
        assert_eq!(mocks[10].hits(), 0);
        assert_eq!(mocks[11].hits(), 0);
    }

    #[tokio::test]
    async fn repeated_runs_give_identical_records_apart_from_timestamp() {
        let server = MockServer::start();
        mock_listing(&server, &["a1", "a2"]);
        mock_article(&server, "a1", article_html(Some("One"), &["First body."]));
        mock_article(&server, "a2", article_html(Some("Two"), &["Second body."]));

        let p = pipeline(PipelineConfig::default());
        let triples = |records: Vec<ArticleRecord>| {
            records
                .iter()
                .map(|r| (r.title().to_string(), r.summary().to_string(), r.link().to_string()))
                .collect::<Vec<_>>()
        };
        let first = triples(p.orchestrate(&server.url("/news")).await.unwrap());
        let second = triples(p.orchestrate(&server.url("/news")).await.unwrap());

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn run_wraps_records_in_digest() {
        let server = MockServer::start();
        mock_listing(&server, &["a1"]);
        mock_article(&server, "a1", article_html(Some("Only"), &["Body."]));

        let p = pipeline(PipelineConfig::default());
        let digest = p.run(&server.url("/news")).await.unwrap();

        assert_eq!(digest.listing_url, server.url("/news"));
        assert_eq!(digest.articles.len(), 1);
        assert!(!digest.generated_at.is_empty());
    }
}
