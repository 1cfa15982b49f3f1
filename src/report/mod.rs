//! Human-readable reports over the extraction output.
//!
//! Reports consume only the JSON written by the extraction stage, loaded
//! through [`read_records`](crate::core::output::read_records). Three forms
//! are available:
//! - [`ReportFormat::Html`] - a standalone page with one card per record
//! - [`ReportFormat::Docx`] - a Word document with embedded images
//! - [`ReportFormat::Markdown`] - a document with one section per record
//!
//! # Example
//!
//! ```rust,no_run
//! use xhrpack::report::{ReportConfig, ReportFormat, write_report};
//!
//! let format = ReportFormat::from_path("report.md")?;
//! write_report(
//!     "messages_with_local_paths.json",
//!     "report.md",
//!     format,
//!     &ReportConfig::new(),
//! )?;
//! # Ok::<(), xhrpack::XhrpackError>(())
//! ```

mod docx;
mod html;
mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::NormalizedRecord;
use crate::core::output::read_records;
use crate::error::{Result, XhrpackError};

pub use docx::render_docx;
pub use html::{escape_html, render_html};
pub use markdown::render_markdown;

/// Default report title.
pub const DEFAULT_TITLE: &str = "Message Report";

/// Default HTML report path.
pub const DEFAULT_HTML_OUTPUT: &str = "report.html";

/// Default Word report path.
pub const DEFAULT_DOCX_OUTPUT: &str = "report.docx";

/// Default Markdown report path.
pub const DEFAULT_MARKDOWN_OUTPUT: &str = "report.md";

const UNKNOWN_ID: &str = "unknown id";
const UNKNOWN_TIME: &str = "unknown time";

/// Report output format.
///
/// # Example
///
/// ```rust
/// use xhrpack::report::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("md").unwrap();
/// assert_eq!(format, ReportFormat::Markdown);
/// assert_eq!(format.extension(), "md");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Standalone HTML page
    #[default]
    Html,

    /// Word document
    Docx,

    /// Markdown document
    Markdown,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Docx => "docx",
            ReportFormat::Markdown => "md",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["html", "htm", "docx", "word", "markdown", "md"]
    }

    /// Returns the default output path for this format.
    pub fn default_output(&self) -> &'static str {
        match self {
            ReportFormat::Html => DEFAULT_HTML_OUTPUT,
            ReportFormat::Docx => DEFAULT_DOCX_OUTPUT,
            ReportFormat::Markdown => DEFAULT_MARKDOWN_OUTPUT,
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xhrpack::report::ReportFormat;
    ///
    /// assert_eq!(ReportFormat::from_path("out/report.HTML").unwrap(), ReportFormat::Html);
    /// assert_eq!(ReportFormat::from_path("report.docx").unwrap(), ReportFormat::Docx);
    /// assert!(ReportFormat::from_path("report.pdf").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "html" | "htm" => Ok(ReportFormat::Html),
            "docx" => Ok(ReportFormat::Docx),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            _ => Err(XhrpackError::invalid_format(
                "report",
                format!("Unknown file extension: '.{ext}'. Expected one of: html, docx, md"),
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "HTML"),
            ReportFormat::Docx => write!(f, "Word"),
            ReportFormat::Markdown => write!(f, "Markdown"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(ReportFormat::Html),
            "docx" | "word" => Ok(ReportFormat::Docx),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Unknown report format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Settings shared by all renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Page or document title.
    pub title: String,
    /// Directory relative image paths are resolved against when checking
    /// that the file exists. `None` means the working directory.
    pub base_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            base_dir: None,
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Where a recorded image path points on disk.
    ///
    /// Backslashes are read as separators; relative paths are joined onto
    /// [`base_dir`](Self::base_dir) when one is set.
    pub fn resolve_image(&self, recorded: &str) -> PathBuf {
        let path = PathBuf::from(forward_slashes(recorded));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }

    /// Returns `true` if a recorded image path points at an existing file.
    pub fn image_exists(&self, recorded: &str) -> bool {
        self.resolve_image(recorded).is_file()
    }
}

/// Renders records in the given format, returning the file contents.
pub fn render(
    records: &[NormalizedRecord],
    format: ReportFormat,
    config: &ReportConfig,
) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Html => Ok(render_html(records, config).into_bytes()),
        ReportFormat::Docx => render_docx(records, config),
        ReportFormat::Markdown => Ok(render_markdown(records, config).into_bytes()),
    }
}

/// Loads the extraction JSON and writes a report.
///
/// A missing input file is [`XhrpackError::MissingInput`]; the output is not
/// created in that case. Returns the number of records rendered.
pub fn write_report(
    input_json: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    format: ReportFormat,
    config: &ReportConfig,
) -> Result<usize> {
    let records = read_records(input_json)?;
    let rendered = render(&records, format, config)?;
    fs::write(output_path, rendered)?;
    Ok(records.len())
}

/// Header line shared by all renderers: `ID: <id> | Time: <createtime>`.
fn header_line(record: &NormalizedRecord) -> String {
    format!(
        "ID: {} | Time: {}",
        display_value(&record.id, UNKNOWN_ID),
        display_value(&record.createtime, UNKNOWN_TIME)
    )
}

fn display_value(value: &Value, placeholder: &str) -> String {
    match value {
        Value::Null => placeholder.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Recorded paths may use either separator; reports always use `/`.
fn forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
