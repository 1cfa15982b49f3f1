//! # xhrpack
//!
//! Extract messages and their images from captured XHR responses, cache the
//! images locally, and render the result as JSON, CSV and human-readable
//! reports.
//!
//! ## Overview
//!
//! A capture tool saves the JSON bodies of a web app's message API calls into
//! one dump file. Each message carries its content as a JSON-encoded array of
//! typed parts (`text`, `pic`, ...) stored inside a string field, sometimes
//! followed by trailing garbage. xhrpack:
//!
//! 1. walks the dump and decodes every payload, recovering the leading array
//!    when the string has trailing data
//! 2. downloads each image once into a content-addressed cache directory
//! 3. writes one record per message to JSON and CSV
//! 4. renders the JSON as an HTML page, a Word document or Markdown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xhrpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let report = run(&ExtractConfig::new().with_input("xhr_data.json"))?;
//!     println!("{} records", report.record_count());
//!
//!     write_report(
//!         "messages_with_local_paths.json",
//!         "report.html",
//!         ReportFormat::Html,
//!         &ReportConfig::new(),
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - dump walking and payload decoding
//! - [`fetch`] - [`ImageFetcher`](fetch::ImageFetcher) and the
//!   [`ImageSource`](fetch::ImageSource) seam
//! - [`core`] - the extraction pipeline and output writers
//! - [`report`] - HTML, Word and Markdown renderers
//! - [`config`] - [`ExtractConfig`](config::ExtractConfig),
//!   [`FetchConfig`](config::FetchConfig)
//! - [`error`] - [`XhrpackError`], [`Result`]
//! - [`prelude`] - convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `full` | Everything below (default) | all |
//! | `fetch` | HTTP image source | `reqwest` |
//! | `csv-output` | CSV writer | `csv` |
//! | `report` | HTML / Word / Markdown reports | `docx-rs`, `image` |
//! | `cli` | `xhrpack` binary | `clap`, `tracing-subscriber` |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod parsing;
pub mod record;
#[cfg(feature = "report")]
pub mod report;

// Re-export the main types at the crate root for convenience
pub use error::{Result, XhrpackError};
pub use record::NormalizedRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use xhrpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::NormalizedRecord;

    // Error types
    pub use crate::error::{FetchError, Result, XhrpackError};

    // Configuration
    pub use crate::config::{ExtractConfig, FetchConfig};

    // Parsing
    pub use crate::parsing::{NormalizedMessage, PayloadDecode, decode_payload, normalize};

    // Fetching
    pub use crate::fetch::{FetchedImage, ImageFetcher, ImageSource};

    // Pipeline
    #[cfg(feature = "fetch")]
    pub use crate::core::run;
    pub use crate::core::{ExtractionReport, ProcessingStats, extract_records, run_with_source};

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    pub use crate::core::output::{read_records, to_json, write_json};

    // Reports
    #[cfg(feature = "report")]
    pub use crate::report::{ReportConfig, ReportFormat, render_docx, render_html, render_markdown, write_report};
}
