//! The extraction pipeline: dump in, records and output files out.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::NormalizedRecord;
use crate::config::ExtractConfig;
use crate::error::{Result, XhrpackError};
use crate::fetch::{ImageFetcher, ImageSource};
use crate::parsing::{RawMessageItem, normalize, parse_entries};

use super::output::write_json;
#[cfg(feature = "csv-output")]
use super::output::write_csv;

/// Statistics about one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Message items found in well-shaped entries.
    pub items_seen: usize,
    /// Records emitted.
    pub records: usize,
    /// Items dropped because their payload could not be decoded.
    pub dropped: usize,
    /// Items whose payload only decoded through bracket recovery.
    pub recovered: usize,
    /// Image URLs discovered across all records.
    pub urls: usize,
    /// URLs answered from the image cache.
    pub images_cached: usize,
    /// URLs downloaded during this pass.
    pub images_downloaded: usize,
    /// URLs whose download failed.
    pub images_failed: usize,
}

impl ProcessingStats {
    /// Percentage of discovered URLs that ended up with a local file.
    pub fn image_coverage(&self) -> f64 {
        if self.urls == 0 {
            return 100.0;
        }
        let local = self.images_cached + self.images_downloaded;
        local as f64 / self.urls as f64 * 100.0
    }
}

/// Turns message items into records, fetching every image along the way.
///
/// Items are processed in order and images are fetched one at a time in
/// discovery order. A failed image only removes that path from the record.
pub fn extract_records<S: ImageSource>(
    items: &[RawMessageItem],
    fetcher: &mut ImageFetcher<S>,
) -> (Vec<NormalizedRecord>, ProcessingStats) {
    let before = fetcher.stats();
    let mut stats = ProcessingStats {
        items_seen: items.len(),
        ..ProcessingStats::default()
    };
    let mut records = Vec::with_capacity(items.len());

    for item in items {
        let Some(message) = normalize(item) else {
            debug!(id = %item.id, "dropping item with undecodable payload");
            stats.dropped += 1;
            continue;
        };
        if message.recovered {
            warn!(id = %item.id, "payload decoded only after trimming trailing data");
            stats.recovered += 1;
        }

        stats.urls += message.pic_urls.len();
        let local_paths: Vec<String> = message
            .pic_urls
            .iter()
            .filter_map(|url| fetcher.fetch_or_skip(url))
            .map(|path| path.to_string_lossy().into_owned())
            .collect();

        records.push(message.into_record(local_paths));
    }

    let after = fetcher.stats();
    stats.records = records.len();
    stats.images_cached = after.cached - before.cached;
    stats.images_downloaded = after.downloaded - before.downloaded;
    stats.images_failed = after.failed - before.failed;

    (records, stats)
}

/// Outcome of a full extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    /// Where the JSON output was written.
    pub json_output: PathBuf,
    /// Where the CSV output was written, when CSV output is enabled.
    pub csv_output: Option<PathBuf>,
    /// The image cache directory used.
    pub image_dir: PathBuf,
    pub stats: ProcessingStats,
}

impl ExtractionReport {
    /// Number of records written.
    pub fn record_count(&self) -> usize {
        self.stats.records
    }
}

/// Runs extraction with an explicit image source.
///
/// Reads the dump, creates the image directory, extracts records and writes
/// the JSON output, then the CSV output. A missing dump aborts before
/// anything is created.
pub fn run_with_source<S: ImageSource>(
    config: &ExtractConfig,
    source: S,
) -> Result<ExtractionReport> {
    if !config.input.exists() {
        return Err(XhrpackError::missing_input(&config.input));
    }
    let content = fs::read_to_string(&config.input)?;
    let items = parse_entries(&content)?;

    let mut fetcher = ImageFetcher::new(&config.image_dir, source);
    fetcher.ensure_dir()?;

    let (records, stats) = extract_records(&items, &mut fetcher);

    write_json(&records, &config.json_output)?;

    #[cfg(feature = "csv-output")]
    let csv_output = {
        write_csv(&records, &config.csv_output)?;
        Some(config.csv_output.clone())
    };
    #[cfg(not(feature = "csv-output"))]
    let csv_output = None;

    Ok(ExtractionReport {
        json_output: config.json_output.clone(),
        csv_output,
        image_dir: config.image_dir.clone(),
        stats,
    })
}

/// Runs extraction, downloading images over HTTP.
///
/// # Example
///
/// ```rust,no_run
/// use xhrpack::config::ExtractConfig;
/// use xhrpack::core::run;
///
/// let report = run(&ExtractConfig::new().with_input("xhr_data.json"))?;
/// println!("{} records", report.record_count());
/// # Ok::<(), xhrpack::XhrpackError>(())
/// ```
#[cfg(feature = "fetch")]
pub fn run(config: &ExtractConfig) -> Result<ExtractionReport> {
    let source = crate::fetch::HttpImageSource::new(&config.fetch)?;
    run_with_source(config, source)
}
