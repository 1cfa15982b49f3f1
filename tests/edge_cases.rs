//! Edge case tests for xhrpack
//!
//! These tests cover boundary conditions of payload decoding, dump walking
//! and image naming that the unit tests only touch in isolation.

use serde_json::json;
use xhrpack::fetch::naming::{resolve_extension, url_hash};
use xhrpack::fetch::truncate_url;
use xhrpack::parsing::{PayloadDecode, RawMessageItem, collect_items, decode_payload, normalize};

fn item(msg: &str) -> RawMessageItem {
    RawMessageItem {
        id: json!(1),
        createtime: json!("t"),
        msg: msg.to_string(),
    }
}

// =========================================================================
// Payload decoding
// =========================================================================

#[test]
fn test_recovery_examples() {
    let message = normalize(&item(r#"[{"type":"text","msg":"hi"}]garbage"#)).unwrap();
    assert_eq!(message.text(), "hi");
    assert!(message.recovered);

    assert!(normalize(&item("not json at all")).is_none());
}

#[test]
fn test_leading_whitespace_before_array() {
    let message = normalize(&item("  \n [{\"type\":\"text\",\"msg\":\"x\"}]")).unwrap();
    assert_eq!(message.text(), "x");
    assert!(!message.recovered);
}

#[test]
fn test_empty_and_whitespace_payloads() {
    assert!(normalize(&item("")).is_none());
    assert!(normalize(&item("   ")).is_none());

    let empty = normalize(&item("[]")).unwrap();
    assert_eq!(empty.text(), "");
    assert!(empty.pic_urls.is_empty());
}

#[test]
fn test_valid_json_that_is_not_an_array() {
    assert!(matches!(decode_payload(r#"{"type":"text"}"#), PayloadDecode::Unrecoverable));
    assert!(matches!(decode_payload("42"), PayloadDecode::Unrecoverable));
}

#[test]
fn test_trailing_array_makes_greedy_span_invalid() {
    // The greedy span runs to the last `]` and swallows the garbage between.
    let raw = r#"[{"type":"text","msg":"a"}] junk [1]"#;
    assert!(normalize(&item(raw)).is_none());
}

#[test]
fn test_unicode_and_emoji_text() {
    let raw = json!([
        {"type": "text", "msg": "Привет"},
        {"type": "text", "msg": "日本語 🎉"},
        {"type": "text", "msg": "\u{200B}"}
    ])
    .to_string();
    let message = normalize(&item(&raw)).unwrap();
    // Zero-width space is not whitespace for trimming purposes.
    assert_eq!(message.texts.len(), 3);
    assert_eq!(message.texts[1], "日本語 🎉");
}

#[test]
fn test_parts_with_wrong_field_types() {
    let raw = json!([
        {"type": "text", "msg": 5},
        {"type": "pic", "url": null},
        {"type": "pic"},
        {"msg": "no type"},
        "bare string",
        {"type": "text", "msg": "kept"}
    ])
    .to_string();
    let message = normalize(&item(&raw)).unwrap();
    assert_eq!(message.text(), "kept");
    assert!(message.pic_urls.is_empty());
}

#[test]
fn test_duplicate_urls_are_kept() {
    let raw = json!([
        {"type": "pic", "url": "https://a/x.png"},
        {"type": "pic", "url": "https://a/x.png"}
    ])
    .to_string();
    let message = normalize(&item(&raw)).unwrap();
    assert_eq!(message.pic_urls.len(), 2);
}

// =========================================================================
// Dump walking
// =========================================================================

#[test]
fn test_collect_items_skips_malformed_entries() {
    let dump = json!([
        {"data": {"list": [{"id": 1, "msg": "[]"}]}},
        {"data": {"list": "oops"}},
        {"data": null},
        {"list": [{"id": 99, "msg": "[]"}]},
        "string entry",
        {"data": {"list": [7, {"id": 2}]}}
    ]);

    let items = collect_items(&dump).unwrap();
    let ids: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);
    // Missing msg reads as empty and will not decode.
    assert_eq!(items[1].msg, "");
    assert!(normalize(&items[1]).is_none());
}

#[test]
fn test_collect_items_non_array_top_level() {
    assert!(collect_items(&json!({"data": {}})).unwrap_err().is_invalid_format());
    assert!(collect_items(&json!(null)).unwrap_err().is_invalid_format());
}

#[test]
fn test_missing_id_and_createtime_are_null() {
    let dump = json!([{"data": {"list": [{"msg": "[]"}]}}]);
    let items = collect_items(&dump).unwrap();
    assert!(items[0].id.is_null());
    assert!(items[0].createtime.is_null());
}

// =========================================================================
// Image naming
// =========================================================================

#[test]
fn test_extension_rules() {
    assert_eq!(resolve_extension("https://cdn/a.png", Some("image/jpeg")), ".png");
    assert_eq!(resolve_extension("https://cdn/a", Some("image/webp")), ".webp");
    assert_eq!(resolve_extension("https://cdn/a", None), ".jpg");
    assert_eq!(resolve_extension("https://cdn/a.php", Some("text/html")), ".jpg");
    assert_eq!(resolve_extension("https://cdn/a.GIF?v=2#frag", None), ".gif");
}

#[test]
fn test_hash_depends_on_whole_url() {
    assert_ne!(url_hash("https://cdn/a.png"), url_hash("https://cdn/a.png?v=2"));
    assert_eq!(url_hash("https://cdn/a.png"), url_hash("https://cdn/a.png"));
}

#[test]
fn test_truncate_url_multibyte() {
    let url = "https://例え.jp/".to_string() + &"画".repeat(100);
    let cut = truncate_url(&url);
    assert!(cut.ends_with("..."));
    assert!(cut.len() < url.len());
}
