//! Summarization capability.
//!
//! The orchestrator depends on [`Summarizer`] rather than on a concrete model,
//! so the backend is chosen once at startup and tests can substitute a stub.
//!
//! # Backends
//!
//! - [`crate::api::LlmSummarizer`]: abstractive summaries from an
//!   OpenAI-compatible endpoint
//! - [`LeadSummarizer`]: deterministic lead-text summaries, no network

use crate::error::SummarizeError;
use crate::models::SummaryBounds;

/// Converts body text into a summary within the given bounds.
///
/// Implementations must be repeatable when `bounds.deterministic` is set: the
/// same text and bounds give the same summary on the same instance.
pub trait Summarizer {
    async fn summarize(&self, text: &str, bounds: &SummaryBounds)
    -> Result<String, SummarizeError>;
}

/// Reject bounds no backend can satisfy.
pub fn validate_bounds(bounds: &SummaryBounds) -> Result<(), SummarizeError> {
    if bounds.max_length == 0 || bounds.min_length > bounds.max_length {
        return Err(SummarizeError::InvalidBounds {
            min: bounds.min_length,
            max: bounds.max_length,
        });
    }
    Ok(())
}

/// Cut `text` to at most `max_words` whitespace-separated words.
pub fn clamp_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Offline summarizer that keeps the leading words of the text.
///
/// Takes up to `max_length` words and, when a sentence ends somewhere at or
/// after `min_length` words, stops at the last such sentence end. Always
/// deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeadSummarizer;

impl Summarizer for LeadSummarizer {
    async fn summarize(
        &self,
        text: &str,
        bounds: &SummaryBounds,
    ) -> Result<String, SummarizeError> {
        validate_bounds(bounds)?;

        let words: Vec<&str> = text.split_whitespace().take(bounds.max_length).collect();
        if words.is_empty() {
            return Err(SummarizeError::EmptyResponse);
        }

        let cut = words
            .iter()
            .enumerate()
            .skip(bounds.min_length.saturating_sub(1))
            .filter(|(_, w)| w.ends_with(['.', '!', '?']))
            .map(|(i, _)| i + 1)
            .last()
            .unwrap_or(words.len());

        Ok(words[..cut].join(" "))
    }
}
