//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level argument structure
//! - [`Command`] - the `extract` and `report` subcommands
//! - [`ReportFormat`] - report format option, convertible to
//!   [`report::ReportFormat`](crate::report::ReportFormat)

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_CSV_OUTPUT, DEFAULT_IMAGE_DIR, DEFAULT_INPUT, DEFAULT_JSON_OUTPUT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ExtractConfig, FetchConfig,
};

/// Extract messages and images from captured XHR responses, then render
/// them as reports.
#[derive(Parser, Debug, Clone)]
#[command(name = "xhrpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    xhrpack extract
    xhrpack extract capture.json --images cache/ --json out.json --csv out.csv
    xhrpack report
    xhrpack report --format docx
    xhrpack report --format markdown -o report.md")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline stages.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract records from an XHR dump and download their images
    Extract(ExtractArgs),

    /// Render the extracted JSON as an HTML, Word or Markdown report
    Report(ReportArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Path to the captured XHR dump
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Image cache directory
    #[arg(long = "images", value_name = "DIR", default_value = DEFAULT_IMAGE_DIR)]
    pub image_dir: PathBuf,

    /// JSON output path
    #[arg(long = "json", value_name = "PATH", default_value = DEFAULT_JSON_OUTPUT)]
    pub json_output: PathBuf,

    /// CSV output path
    #[arg(long = "csv", value_name = "PATH", default_value = DEFAULT_CSV_OUTPUT)]
    pub csv_output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent with image requests
    #[arg(long, value_name = "UA", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl From<&ExtractArgs> for ExtractConfig {
    fn from(args: &ExtractArgs) -> Self {
        ExtractConfig::new()
            .with_input(&args.input)
            .with_image_dir(&args.image_dir)
            .with_json_output(&args.json_output)
            .with_csv_output(&args.csv_output)
            .with_fetch(
                FetchConfig::new()
                    .with_timeout_secs(args.timeout)
                    .with_user_agent(&args.user_agent),
            )
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// Extraction JSON to read
    #[arg(default_value = DEFAULT_JSON_OUTPUT)]
    pub input: PathBuf,

    /// Report path (defaults to report.html, report.docx or report.md)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format; inferred from --output when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Page or document title
    #[arg(long, default_value = crate::report::DEFAULT_TITLE)]
    pub title: String,

    /// Directory relative image paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Standalone HTML page
    #[default]
    #[value(alias = "htm")]
    Html,

    /// Word document with embedded images
    #[value(alias = "word")]
    Docx,

    /// Markdown document
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::report::ReportFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<ReportFormat> for crate::report::ReportFormat {
    fn from(format: ReportFormat) -> crate::report::ReportFormat {
        match format {
            ReportFormat::Html => crate::report::ReportFormat::Html,
            ReportFormat::Docx => crate::report::ReportFormat::Docx,
            ReportFormat::Markdown => crate::report::ReportFormat::Markdown,
        }
    }
}
