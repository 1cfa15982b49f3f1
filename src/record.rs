//! The normalized per-message record.
//!
//! This module provides [`NormalizedRecord`], the stable output unit of an
//! extraction run. It is written to the JSON and CSV outputs and is the only
//! thing report renderers ever read.
//!
//! # Examples
//!
//! ```
//! use xhrpack::NormalizedRecord;
//! use serde_json::json;
//!
//! let record = NormalizedRecord::new("hello")
//!     .with_id(json!(42))
//!     .with_remote_pic_urls(vec!["https://img.example/a.png".into()]);
//!
//! assert_eq!(record.text(), "hello");
//! assert!(record.has_images());
//! assert_eq!(record.missing_downloads(), 1);
//! ```
//!
//! ## Serialization
//!
//! `id` and `createtime` are opaque values and are always written, as `null`
//! when the source item did not carry them:
//!
//! ```
//! use xhrpack::NormalizedRecord;
//!
//! let json = serde_json::to_string(&NormalizedRecord::new(""))?;
//! assert!(json.contains(r#""id":null"#));
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized message extracted from a dump.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `Value` | Source identifier, passed through unchanged |
/// | `createtime` | `Value` | Source timestamp, passed through unchanged |
/// | `text` | `String` | Trimmed text parts joined by `\n` |
/// | `remote_pic_urls` | `Vec<String>` | Every image URL, in order, duplicates kept |
/// | `local_pic_paths` | `Vec<String>` | Cached path of every URL that downloaded |
///
/// `local_pic_paths` has no positional correspondence with `remote_pic_urls`:
/// a failed download is simply absent, so the list may be shorter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Opaque message identifier.
    #[serde(default)]
    pub id: Value,

    /// Opaque creation timestamp, in whatever form the source used.
    #[serde(default)]
    pub createtime: Value,

    /// Message text. Empty when the message had no text parts.
    #[serde(default)]
    pub text: String,

    /// Remote image URLs in discovery order.
    #[serde(default)]
    pub remote_pic_urls: Vec<String>,

    /// Local paths of the images that were fetched or found in the cache.
    #[serde(default)]
    pub local_pic_paths: Vec<String>,
}

impl NormalizedRecord {
    /// Creates a record with the given text and no metadata or images.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the identifier.
    #[must_use]
    pub fn with_id(mut self, id: Value) -> Self {
        self.id = id;
        self
    }

    /// Builder method to set the creation time.
    #[must_use]
    pub fn with_createtime(mut self, createtime: Value) -> Self {
        self.createtime = createtime;
        self
    }

    /// Builder method to set the remote image URLs.
    #[must_use]
    pub fn with_remote_pic_urls(mut self, urls: Vec<String>) -> Self {
        self.remote_pic_urls = urls;
        self
    }

    /// Builder method to set the local image paths.
    #[must_use]
    pub fn with_local_pic_paths(mut self, paths: Vec<String>) -> Self {
        self.local_pic_paths = paths;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the message referenced at least one image.
    pub fn has_images(&self) -> bool {
        !self.remote_pic_urls.is_empty()
    }

    /// Number of referenced images that have no local copy.
    pub fn missing_downloads(&self) -> usize {
        self.remote_pic_urls
            .len()
            .saturating_sub(self.local_pic_paths.len())
    }
}
