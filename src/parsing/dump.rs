//! Walking the captured XHR dump.
//!
//! The dump is a JSON array of captured responses. Only responses shaped like
//! a message page are of interest:
//!
//! ```json
//! [
//!   {
//!     "data": {
//!       "list": [
//!         {"id": 1, "createtime": "2024-01-15 10:30", "msg": "[{\"type\":\"text\",\"msg\":\"hi\"}]"}
//!       ]
//!     }
//!   },
//!   {"code": 401, "message": "unauthorized"}
//! ]
//! ```
//!
//! Anything else (error responses, other endpoints, non-object items) is
//! skipped without complaint.

use serde_json::Value;
use tracing::debug;

use super::payload::{ContentPart, decode_payload};
use crate::NormalizedRecord;
use crate::error::{Result, XhrpackError};

/// One message item of a `data.list` page.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessageItem {
    /// Opaque identifier (`null` when absent).
    pub id: Value,
    /// Opaque creation time (`null` when absent).
    pub createtime: Value,
    /// The JSON-encoded part array, still as a string.
    pub msg: String,
}

impl RawMessageItem {
    /// Reads an item out of a `data.list` element.
    ///
    /// Returns `None` for elements that are not objects. A missing or
    /// non-string `msg` reads as the empty string.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            id: obj.get("id").cloned().unwrap_or(Value::Null),
            createtime: obj.get("createtime").cloned().unwrap_or(Value::Null),
            msg: obj
                .get("msg")
                .and_then(Value::as_str)
                .map(ToString::to_string)
                .unwrap_or_default(),
        })
    }
}

/// A message whose payload decoded, before any image is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMessage {
    pub id: Value,
    pub createtime: Value,
    /// Trimmed, non-empty text fragments in payload order.
    pub texts: Vec<String>,
    /// Trimmed, non-empty image URLs in payload order, duplicates kept.
    pub pic_urls: Vec<String>,
    /// Whether the recovery heuristic was needed to decode the payload.
    pub recovered: bool,
}

impl NormalizedMessage {
    /// Text fragments joined by newlines.
    pub fn text(&self) -> String {
        self.texts.join("\n")
    }

    /// Finishes the record once images have been fetched.
    pub fn into_record(self, local_pic_paths: Vec<String>) -> NormalizedRecord {
        let text = self.text();
        NormalizedRecord {
            id: self.id,
            createtime: self.createtime,
            text,
            remote_pic_urls: self.pic_urls,
            local_pic_paths,
        }
    }
}

/// Normalizes one message item.
///
/// Returns `None` only when the payload is unrecoverable. A message with no
/// text or no images still yields a value, with empty lists.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xhrpack::parsing::{RawMessageItem, normalize};
///
/// let item = RawMessageItem::from_value(&json!({
///     "id": 7,
///     "msg": r#"[{"type":"text","msg":" hi "},{"type":"pic","url":"https://a/b.png"}]"#
/// })).unwrap();
///
/// let message = normalize(&item).unwrap();
/// assert_eq!(message.text(), "hi");
/// assert_eq!(message.pic_urls, vec!["https://a/b.png"]);
/// ```
pub fn normalize(item: &RawMessageItem) -> Option<NormalizedMessage> {
    let decoded = decode_payload(&item.msg);
    let recovered = decoded.is_recovered();
    let parts = decoded.into_parts()?;

    let mut texts = Vec::new();
    let mut pic_urls = Vec::new();

    for part in parts {
        match part {
            ContentPart::Text(raw) => {
                let text = raw.trim();
                if !text.is_empty() {
                    texts.push(text.to_string());
                }
            }
            ContentPart::Pic(raw) => {
                let url = raw.trim();
                if !url.is_empty() {
                    pic_urls.push(url.to_string());
                }
            }
            ContentPart::Unknown => {}
        }
    }

    Some(NormalizedMessage {
        id: item.id.clone(),
        createtime: item.createtime.clone(),
        texts,
        pic_urls,
        recovered,
    })
}

/// Collects every message item of every well-shaped entry, in order.
///
/// Fails only when the top level is not an array.
pub fn collect_items(dump: &Value) -> Result<Vec<RawMessageItem>> {
    let entries = dump
        .as_array()
        .ok_or_else(|| XhrpackError::invalid_format("XHR dump", "top level is not an array"))?;

    let mut items = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(list) = entry
            .get("data")
            .and_then(|data| data.get("list"))
            .and_then(Value::as_array)
        else {
            debug!(index, "skipping entry without data.list");
            continue;
        };

        items.extend(list.iter().filter_map(RawMessageItem::from_value));
    }

    Ok(items)
}

/// Parses dump text and collects its message items.
///
/// # Example
///
/// ```
/// use xhrpack::parsing::parse_entries;
///
/// let dump = r#"[{"data":{"list":[{"id":1,"msg":"[]"}]}}, {"status":"error"}]"#;
/// let items = parse_entries(dump)?;
/// assert_eq!(items.len(), 1);
/// # Ok::<(), xhrpack::XhrpackError>(())
/// ```
pub fn parse_entries(content: &str) -> Result<Vec<RawMessageItem>> {
    let dump: Value = serde_json::from_str(content)?;
    collect_items(&dump)
}
