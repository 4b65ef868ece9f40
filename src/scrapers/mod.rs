//! Scrapers for the listing page and individual articles.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing**: [`listing::fetch_listing`] discovers article URLs on the
//!    listing page
//! 2. **Fetching**: [`article::fetch_article`] downloads one article page, and
//!    [`extract`] pulls its title and body text out of the markup
//!
//! Indexing is soft on HTTP status (a non-success listing yields no
//! candidates) but hard on transport errors. Article fetches always return a
//! typed [`crate::error::ArticleError`] so the caller can log and skip.

pub mod article;
pub mod extract;
pub mod listing;
