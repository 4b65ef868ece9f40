//! Output generation for rendered pages and JSON digests.
//!
//! # Submodules
//!
//! - [`html`]: Renders records as an HTML page, or the "no articles" notice
//! - [`json`]: Writes a run's [`crate::models::Digest`] to disk
//!
//! # Output Structure
//!
//! ```text
//! digest.html                # --html-output, or stdout when omitted
//!
//! json_output_dir/
//! └── 2025-05-06/
//!     └── 14-30-05.json      # one file per run
//! ```

pub mod html;
pub mod json;
