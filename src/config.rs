//! Configuration types for extraction and fetching.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. Defaults match the file layout the
//! capture tooling produces:
//!
//! | Setting | Default |
//! |---------|---------|
//! | input dump | `xhr_data.json` |
//! | image cache | `downloaded_images/` |
//! | JSON output | `messages_with_local_paths.json` |
//! | CSV output | `messages.csv` |
//! | request timeout | 10 s |
//!
//! # Example
//!
//! ```rust
//! use xhrpack::config::{ExtractConfig, FetchConfig};
//!
//! let config = ExtractConfig::new()
//!     .with_input("capture/xhr_data.json")
//!     .with_image_dir("out/images")
//!     .with_fetch(FetchConfig::new().with_timeout_secs(5));
//!
//! assert_eq!(config.fetch.timeout_secs, 5);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default path of the captured dump.
pub const DEFAULT_INPUT: &str = "xhr_data.json";
/// Default image cache directory.
pub const DEFAULT_IMAGE_DIR: &str = "downloaded_images";
/// Default path of the full JSON output.
pub const DEFAULT_JSON_OUTPUT: &str = "messages_with_local_paths.json";
/// Default path of the flattened CSV output.
pub const DEFAULT_CSV_OUTPUT: &str = "messages.csv";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Browser-like user agent; some image hosts refuse bare clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration for image downloads.
///
/// Downloads are single attempts with no retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Captured dump to read
    pub input: PathBuf,

    /// Image cache directory, created if missing
    pub image_dir: PathBuf,

    /// Full JSON output path
    pub json_output: PathBuf,

    /// Flattened CSV output path
    pub csv_output: PathBuf,

    /// Download settings
    pub fetch: FetchConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            json_output: PathBuf::from(DEFAULT_JSON_OUTPUT),
            csv_output: PathBuf::from(DEFAULT_CSV_OUTPUT),
            fetch: FetchConfig::default(),
        }
    }
}

impl ExtractConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dump path.
    #[must_use]
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    /// Sets the image cache directory.
    #[must_use]
    pub fn with_image_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_dir = path.into();
        self
    }

    /// Sets the JSON output path.
    #[must_use]
    pub fn with_json_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_output = path.into();
        self
    }

    /// Sets the CSV output path.
    #[must_use]
    pub fn with_csv_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_output = path.into();
        self
    }

    /// Sets the download settings.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }
}
