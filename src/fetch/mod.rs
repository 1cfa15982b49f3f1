//! Image fetching into a content-addressed cache directory.
//!
//! [`ImageFetcher`] owns the cache directory it writes to; nothing here reads
//! a global path. Given a URL it either finds an existing `img_<hash>.*` file
//! (no request at all) or downloads once, resolves the extension and stores
//! the body.
//!
//! # Example
//!
//! ```rust
//! use xhrpack::error::FetchError;
//! use xhrpack::fetch::{FetchedImage, ImageFetcher, ImageSource};
//!
//! struct Static;
//!
//! impl ImageSource for Static {
//!     fn get(&self, _url: &str) -> Result<FetchedImage, FetchError> {
//!         Ok(FetchedImage::new(vec![0xff, 0xd8], Some("image/webp")))
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut fetcher = ImageFetcher::new(dir.path(), Static);
//!
//! let path = fetcher.fetch_or_skip("https://cdn.example/photo").unwrap();
//! assert_eq!(path.extension().unwrap(), "webp");
//! assert_eq!(fetcher.stats().downloaded, 1);
//! ```

pub mod naming;
pub mod source;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::FetchError;

pub use source::{FetchedImage, ImageSource};

#[cfg(feature = "fetch")]
pub use source::HttpImageSource;

/// How many characters of a URL go into a failure diagnostic.
const LOG_URL_CHARS: usize = 50;

/// Counters for one fetcher's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// URLs answered from an existing cache file.
    pub cached: usize,
    /// URLs downloaded and written.
    pub downloaded: usize,
    /// URLs that failed (network, status or write error).
    pub failed: usize,
}

/// Downloads images into a cache directory, at most once per URL.
pub struct ImageFetcher<S> {
    dir: PathBuf,
    source: S,
    stats: FetchStats,
}

impl<S: ImageSource> ImageFetcher<S> {
    /// Creates a fetcher writing into `dir`.
    ///
    /// The directory is not created here; see [`ensure_dir`](Self::ensure_dir).
    pub fn new(dir: impl Into<PathBuf>, source: S) -> Self {
        Self {
            dir: dir.into(),
            source,
            stats: FetchStats::default(),
        }
    }

    /// Creates the cache directory if it does not exist.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    /// Fetches one URL into the cache.
    ///
    /// Returns `Ok(None)` for a blank URL, `Ok(Some(path))` for a cache hit or
    /// a successful download.
    pub fn fetch(&mut self, url: &str) -> Result<Option<PathBuf>, FetchError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(None);
        }

        let hash = naming::url_hash(url);
        let url_ext = naming::extension_from_url(url);

        if let Some(hit) = self.find_cached(&hash, url_ext) {
            debug!(path = %hit.display(), "image cache hit");
            self.stats.cached += 1;
            return Ok(Some(hit));
        }

        match self.download(url, &hash) {
            Ok(path) => {
                self.stats.downloaded += 1;
                Ok(Some(path))
            }
            Err(err) => {
                self.stats.failed += 1;
                Err(err)
            }
        }
    }

    /// Like [`fetch`](Self::fetch), but logs failures and returns `None`.
    pub fn fetch_or_skip(&mut self, url: &str) -> Option<PathBuf> {
        match self.fetch(url) {
            Ok(path) => path,
            Err(err) => {
                warn!(url = %truncate_url(url.trim()), error = %err, "image download failed");
                None
            }
        }
    }

    /// Looks for an existing cache file for `hash`.
    ///
    /// With a trusted URL suffix the name is fully determined; otherwise any
    /// `img_<hash>.*` file counts, since its extension came from whatever
    /// content type the first download reported.
    fn find_cached(&self, hash: &str, url_ext: Option<&str>) -> Option<PathBuf> {
        if let Some(ext) = url_ext {
            let path = self.dir.join(naming::file_name(hash, ext));
            return path.is_file().then_some(path);
        }

        let prefix = format!("{}{hash}.", naming::FILE_PREFIX);
        let entries = fs::read_dir(&self.dir).ok()?;
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(&prefix))
            .min()
            .map(|name| self.dir.join(name))
    }

    fn download(&self, url: &str, hash: &str) -> Result<PathBuf, FetchError> {
        let image = self.source.get(url)?;

        let ext = naming::resolve_extension(url, image.content_type.as_deref());
        let name = naming::file_name(hash, ext);
        let path = self.dir.join(&name);

        if path.is_file() {
            return Ok(path);
        }

        // A truncated file must never carry the cache name. The temp file is
        // deleted on drop, so every error path below cleans up.
        let mut partial = tempfile::Builder::new()
            .prefix(&format!(".{name}."))
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        partial.write_all(&image.bytes)?;
        partial.persist(&path).map_err(|err| err.error)?;

        debug!(path = %path.display(), bytes = image.bytes.len(), "image downloaded");
        Ok(path)
    }
}

/// Shortens a URL for diagnostics, on a character boundary.
pub fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(LOG_URL_CHARS) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}
