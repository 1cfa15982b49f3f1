//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::Value;

use crate::NormalizedRecord;
use crate::error::Result;

/// Column order of the flattened output.
pub const CSV_HEADER: [&str; 5] = [
    "id",
    "createtime",
    "text",
    "remote_pic_urls",
    "local_pic_paths",
];

/// Separator used to join list fields into one cell.
pub const LIST_SEPARATOR: &str = "; ";

/// Writes records to CSV, one row per record.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `id`, `createtime`, `text`, `remote_pic_urls`, `local_pic_paths`
/// - `text`: every `\n` and `\r` replaced by a space
/// - List columns: joined with `"; "`
/// - Encoding: UTF-8
pub fn write_csv(records: &[NormalizedRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let csv = to_csv(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;
    Ok(())
}

/// Converts records to the CSV string written by [`write_csv`].
pub fn to_csv(records: &[NormalizedRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(build_row(record))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Build CSV row for a single record.
fn build_row(record: &NormalizedRecord) -> [String; 5] {
    [
        cell_value(&record.id),
        cell_value(&record.createtime),
        flatten_text(&record.text),
        record.remote_pic_urls.join(LIST_SEPARATOR),
        record.local_pic_paths.join(LIST_SEPARATOR),
    ]
}

/// Renders an opaque JSON value as a cell: strings bare, `null` empty,
/// anything else in compact JSON form.
fn cell_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replaces line breaks with spaces so a record stays on one line.
///
/// # Example
///
/// ```
/// use xhrpack::core::output::flatten_text;
///
/// assert_eq!(flatten_text("line1\nline2"), "line1 line2");
/// assert_eq!(flatten_text("a\r\nb"), "a  b");
/// ```
pub fn flatten_text(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Splits a joined list cell back into its items.
///
/// # Example
///
/// ```
/// use xhrpack::core::output::split_joined;
///
/// assert_eq!(split_joined("a.png; b.png"), vec!["a.png", "b.png"]);
/// assert!(split_joined("").is_empty());
/// ```
pub fn split_joined(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(LIST_SEPARATOR).map(ToString::to_string).collect()
}
