//! Output format writers.
//!
//! This module provides writers for the two extraction outputs:
//! - [`write_json`] / [`to_json`] - indented JSON array, the form report
//!   renderers read back with [`read_records`]
//! - [`write_csv`] / [`to_csv`] - one flattened row per record - requires
//!   `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> xhrpack::Result<()> {
//! use xhrpack::core::output::{write_csv, write_json, read_records};
//! use xhrpack::NormalizedRecord;
//!
//! let records = vec![NormalizedRecord::new("hello")];
//!
//! write_json(&records, "messages_with_local_paths.json")?;
//! write_csv(&records, "messages.csv")?;
//!
//! let back = read_records("messages_with_local_paths.json")?;
//! assert_eq!(back, records);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{
    CSV_HEADER, LIST_SEPARATOR, flatten_text, split_joined, to_csv, write_csv,
};
pub use json_writer::{from_json, read_records, to_json, write_json};
