//! Title and body extraction from article markup.
//!
//! Extraction never fails: missing pieces fall back to [`DEFAULT_TITLE`] and
//! [`DEFAULT_BODY`], so the summarizer always receives non-empty input.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Title used when the page has no `h1`.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Body used when the page has no paragraph text.
pub const DEFAULT_BODY: &str = "No content available.";

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("static selector"));
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("static selector"));

/// Text of the first `h1` in the markup, or `"Untitled"` if there is none.
pub fn extract_title(markup: &str) -> String {
    title_of(&Html::parse_document(markup))
}

/// Text of every `p` joined by a single space, or `"No content available."`
/// when that text is empty or whitespace-only.
pub fn extract_body(markup: &str) -> String {
    body_of(&Html::parse_document(markup))
}

fn title_of(document: &Html) -> String {
    match document.select(&HEADING_SELECTOR).next() {
        Some(heading) => heading.text().collect::<String>().trim().to_string(),
        None => DEFAULT_TITLE.to_string(),
    }
}

fn body_of(document: &Html) -> String {
    let body = document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<String>())
        .join(" ");

    if body.trim().is_empty() {
        DEFAULT_BODY.to_string()
    } else {
        body
    }
}
