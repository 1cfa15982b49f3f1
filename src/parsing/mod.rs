//! Payload normalization.
//!
//! This module turns the raw dump into normalized messages:
//! - [`dump`] - walks `[{data: {list: [...]}}]` and reads message items
//! - [`payload`] - decodes the JSON-within-JSON `msg` string into parts
//!
//! Normalization never fails per item: malformed entries are skipped and
//! unrecoverable payloads make [`normalize`] return `None`.

pub mod dump;
pub mod payload;

pub use dump::{
    NormalizedMessage, RawMessageItem, collect_items, normalize, parse_entries,
};
pub use payload::{ContentPart, PayloadDecode, decode_payload};
