//! JSON output writer and reader.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::NormalizedRecord;
use crate::error::{Result, XhrpackError};

/// Writes records to a JSON file as an indented array.
///
/// # Format
/// ```json
/// [
///   {
///     "id": 1,
///     "createtime": "2024-01-15 10:30:00",
///     "text": "hello",
///     "remote_pic_urls": ["https://cdn.example/a.png"],
///     "local_pic_paths": ["downloaded_images/img_0a1b2c3d4e.png"]
///   }
/// ]
/// ```
///
/// Non-ASCII text is written as-is, not `\u` escaped.
pub fn write_json(records: &[NormalizedRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to the JSON array string written by [`write_json`].
pub fn to_json(records: &[NormalizedRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Loads records previously written by [`write_json`].
///
/// A missing file is reported as [`XhrpackError::MissingInput`] so report
/// stages can tell "run extraction first" apart from a corrupt file.
pub fn read_records(input_path: impl AsRef<Path>) -> Result<Vec<NormalizedRecord>> {
    let path = input_path.as_ref();
    if !path.exists() {
        return Err(XhrpackError::missing_input(path));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Parses records from a JSON array string.
pub fn from_json(content: &str) -> Result<Vec<NormalizedRecord>> {
    Ok(serde_json::from_str(content)?)
}
