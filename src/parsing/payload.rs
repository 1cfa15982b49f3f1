//! Decoding of the JSON-within-JSON `msg` payload.
//!
//! Each message item carries its content as a *string* holding a JSON array
//! of parts:
//!
//! ```json
//! "[{\"type\":\"text\",\"msg\":\"hello\"},{\"type\":\"pic\",\"url\":\"https://...\"}]"
//! ```
//!
//! Captured payloads are sometimes cut short or followed by garbage, so
//! decoding is tolerant: a strict parse first, then a recovery pass that keeps
//! only the leading bracketed span.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Leading `[...]` span, greedy, not crossing newlines.
static LEADING_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\[.*\])").expect("leading array pattern is valid")
});

/// One decoded fragment of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// `{"type": "text", "msg": ...}`, raw (untrimmed) text.
    Text(String),
    /// `{"type": "pic", "url": ...}`, raw (untrimmed) URL.
    Pic(String),
    /// Any other part kind, or an element that is not an object.
    Unknown,
}

impl ContentPart {
    /// Classifies a single JSON element of the payload array.
    ///
    /// Missing or non-string `msg`/`url` fields decode as empty strings and are
    /// dropped later by the normalizer.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use xhrpack::parsing::ContentPart;
    ///
    /// let part = ContentPart::from_value(&json!({"type": "pic", "url": "https://a/b.png"}));
    /// assert_eq!(part, ContentPart::Pic("https://a/b.png".into()));
    ///
    /// assert_eq!(ContentPart::from_value(&json!({"type": "voice"})), ContentPart::Unknown);
    /// assert_eq!(ContentPart::from_value(&json!(7)), ContentPart::Unknown);
    /// ```
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return ContentPart::Unknown;
        };

        match obj.get("type").and_then(Value::as_str) {
            Some("text") => ContentPart::Text(string_field(obj, "msg")),
            Some("pic") => ContentPart::Pic(string_field(obj, "url")),
            _ => ContentPart::Unknown,
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Outcome of decoding a `msg` payload string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadDecode {
    /// The whole string was a valid JSON array.
    Strict(Vec<ContentPart>),
    /// Only the leading `[...]` span parsed.
    Recovered(Vec<ContentPart>),
    /// Neither pass produced a JSON array; the item is dropped.
    Unrecoverable,
}

impl PayloadDecode {
    /// Returns the decoded parts, or `None` if the payload was unrecoverable.
    pub fn into_parts(self) -> Option<Vec<ContentPart>> {
        match self {
            PayloadDecode::Strict(parts) | PayloadDecode::Recovered(parts) => Some(parts),
            PayloadDecode::Unrecoverable => None,
        }
    }

    /// Returns `true` if the recovery heuristic was needed.
    pub fn is_recovered(&self) -> bool {
        matches!(self, PayloadDecode::Recovered(_))
    }

    /// Returns `true` if the payload could not be decoded at all.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, PayloadDecode::Unrecoverable)
    }
}

/// Decodes a raw `msg` payload string into content parts.
///
/// A payload that is valid JSON but not an array (e.g. `"42"`) is treated as
/// a strict failure and goes through recovery like any other malformed input.
///
/// # Example
///
/// ```
/// use xhrpack::parsing::{ContentPart, PayloadDecode, decode_payload};
///
/// let decoded = decode_payload(r#"[{"type":"text","msg":"hi"}]garbage"#);
/// assert_eq!(decoded, PayloadDecode::Recovered(vec![ContentPart::Text("hi".into())]));
///
/// assert!(decode_payload("not json at all").is_unrecoverable());
/// ```
pub fn decode_payload(raw: &str) -> PayloadDecode {
    if let Some(parts) = parse_parts(raw) {
        return PayloadDecode::Strict(parts);
    }

    LEADING_ARRAY
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|span| parse_parts(span.as_str()))
        .map_or(PayloadDecode::Unrecoverable, PayloadDecode::Recovered)
}

fn parse_parts(candidate: &str) -> Option<Vec<ContentPart>> {
    serde_json::from_str::<Vec<Value>>(candidate)
        .ok()
        .map(|values| values.iter().map(ContentPart::from_value).collect())
}
