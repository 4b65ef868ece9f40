//! HTML rendering of article records.
//!
//! The page is a header followed by one card per record. An empty record list
//! renders only the [`NO_ARTICLES_NOTICE`] so readers can tell "nothing found"
//! apart from an error. All record text is escaped before it is embedded.

use crate::models::ArticleRecord;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Message shown when a run produced no records.
pub const NO_ARTICLES_NOTICE: &str = "No articles found. Please try again later.";

/// Render records as an HTML fragment.
///
/// # Arguments
///
/// * `records` - Records in display order
/// * `heading` - Page heading shown above the cards
pub fn render_page(records: &[ArticleRecord], heading: &str) -> String {
    if records.is_empty() {
        return format!(
            r#"<h3 style="text-align: center; color: red;">{NO_ARTICLES_NOTICE}</h3>"#
        );
    }

    let mut html = format!(
        r#"<div style="text-align: center; padding: 20px; background-color: #f0f2f5; border-radius: 10px;">
    <h1 style="font-size: 2.2em; margin-bottom: 10px; color: #1a73e8;">{}</h1>
</div>"#,
        encode_text(heading)
    );

    for record in records {
        html.push_str(&render_card(record));
    }
    html
}

/// Wrap a fragment from [`render_page`] in a complete HTML document.
pub fn render_document(records: &[ArticleRecord], heading: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        encode_text(heading),
        render_page(records, heading)
    )
}

fn render_card(record: &ArticleRecord) -> String {
    let mut card = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        card,
        r#"
<div style="background-color: white; border-radius: 10px; padding: 20px; margin: 10px auto; max-width: 800px; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);">
    <h3 style="color: #1a73e8; font-size: 1.3em; margin-bottom: 15px;">{title}</h3>
    <p style="color: #4a5568; font-size: 0.95em; margin-bottom: 15px;">{summary}</p>
    <div style="color: #94a3b8; font-size: 0.85em; margin-bottom: 12px;">
        <strong>Published:</strong> {timestamp}
    </div>
    <a href="{link}" target="_blank" rel="noopener" style="background-color: #1a73e8; color: white; padding: 8px 18px; text-decoration: none; border-radius: 5px; display: block; margin-top: 10px;">Read More →</a>
</div>"#,
        title = encode_text(record.title()),
        summary = encode_text(record.summary()),
        timestamp = encode_text(record.timestamp()),
        link = encode_double_quoted_attribute(record.link()),
    );
    card
}
