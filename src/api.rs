//! LLM-backed summarizer.
//!
//! This module adapts the `awful_aj` client to the [`Summarizer`] trait. The
//! configuration (endpoint, model, sampling settings) and the chat template are
//! loaded once at startup and reused for every article, so one
//! [`LlmSummarizer`] serves every refresh for the life of the process.
//!
//! # Failure Handling
//!
//! There is no retry: a failed request surfaces as
//! [`SummarizeError::Backend`] and the orchestrator skips that article.
//!
//! # Determinism
//!
//! `awful_aj::api::ask` takes no per-request sampling override, so repeatable
//! output depends on `config.yaml` setting greedy decoding (temperature 0).
//! When deterministic summaries are requested, [`LlmSummarizer::load`] warns
//! that the guarantee rests on that configuration.

use crate::error::SummarizeError;
use crate::models::SummaryBounds;
use crate::summarizer::{Summarizer, clamp_words, validate_bounds};
use crate::utils::truncate_for_log;
use awful_aj::api::ask;
use awful_aj::{config, config::AwfulJadeConfig, config_dir, template, template::ChatTemplate};
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Summarizer that sends article text to an OpenAI-compatible LLM.
#[derive(Debug)]
pub struct LlmSummarizer {
    /// LLM configuration (API keys, endpoints, model settings).
    config: AwfulJadeConfig,
    /// Chat template defining the conversation structure.
    template: ChatTemplate,
}

impl LlmSummarizer {
    pub fn new(config: AwfulJadeConfig, template: ChatTemplate) -> Self {
        Self { config, template }
    }

    /// Load the configuration and chat template from disk.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Path to `config.yaml`; defaults to the `awful_aj`
    ///   config directory when `None`
    /// * `template_name` - Name of the chat template to load
    /// * `deterministic` - Whether callers will ask for repeatable summaries
    #[instrument(level = "info", skip_all, fields(%template_name, deterministic))]
    pub async fn load(
        config_path: Option<&str>,
        template_name: &str,
        deterministic: bool,
    ) -> Result<Self, Box<dyn Error>> {
        let template = template::load_template(template_name).await?;
        info!("Loaded summarizer template");

        let config_path = match config_path {
            Some(path) => path.to_string(),
            None => config_dir()?
                .join("config.yaml")
                .to_str()
                .ok_or("config directory is not valid UTF-8")?
                .to_string(),
        };
        let config = config::load_config(&config_path)?;
        info!(%config_path, "Loaded summarizer configuration");
        if let Some(notice) = determinism_notice(deterministic) {
            warn!(%config_path, "{notice}");
        }

        Ok(Self::new(config, template))
    }
}

/// Warning to log when repeatable summaries are requested from the LLM backend.
///
/// The backend cannot force greedy decoding itself, so any deterministic request
/// is only as good as the sampling settings in `config.yaml`.
pub fn determinism_notice(deterministic: bool) -> Option<&'static str> {
    deterministic.then_some(
        "Deterministic summaries requested; the LLM client has no per-request sampling \
         override, so output repeats only if config.yaml sets temperature to 0",
    )
}

/// Build the user message sent to the model.
pub fn build_prompt(text: &str, bounds: &SummaryBounds) -> String {
    format!(
        "Summarize the following news article in {} to {} words. \
         Reply with the summary only, as plain prose.\n\n{}",
        bounds.min_length, bounds.max_length, text
    )
}

impl Summarizer for LlmSummarizer {
    #[instrument(level = "info", skip_all, fields(input_bytes = text.len(), deterministic = bounds.deterministic))]
    async fn summarize(
        &self,
        text: &str,
        bounds: &SummaryBounds,
    ) -> Result<String, SummarizeError> {
        validate_bounds(bounds)?;

        let t0 = Instant::now();
        let res = ask(&self.config, build_prompt(text, bounds), &self.template, None, None)
            .await
            .map_err(|e| SummarizeError::Backend(e.to_string()));
        let dt = t0.elapsed();

        let response = match res {
            Ok(response) => response,
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "API call failed");
                return Err(e);
            }
        };
        debug!(
            elapsed_ms = dt.as_millis() as u128,
            response_preview = %truncate_for_log(&response, 120),
            "API call succeeded"
        );

        normalize_response(&response, bounds)
    }
}

/// Trim a model response and cap it at `bounds.max_length` words.
pub fn normalize_response(response: &str, bounds: &SummaryBounds) -> Result<String, SummarizeError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(SummarizeError::EmptyResponse);
    }

    let words = trimmed.split_whitespace().count();
    if words > bounds.max_length {
        warn!(words, max = bounds.max_length, "Summary over length; clamping");
        return Ok(clamp_words(trimmed, bounds.max_length));
    }
    if words < bounds.min_length {
        debug!(words, min = bounds.min_length, "Summary under minimum length");
    }

    Ok(trimmed.to_string())
}
