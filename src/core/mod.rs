//! Core processing logic for xhrpack.
//!
//! This module contains:
//! - [`processor`] - The extraction pipeline and its statistics
//! - [`output`] - Format writers (JSON, CSV)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "fetch")]
//! # fn example() -> xhrpack::Result<()> {
//! use xhrpack::config::ExtractConfig;
//! use xhrpack::core::run;
//!
//! let report = run(&ExtractConfig::new())?;
//! println!("{} records, {} images failed", report.record_count(), report.stats.images_failed);
//! # Ok(())
//! # }
//! ```

pub mod output;
pub mod processor;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
pub use output::{read_records, to_json, write_json};

#[cfg(feature = "fetch")]
pub use processor::run;
pub use processor::{ExtractionReport, ProcessingStats, extract_records, run_with_source};
