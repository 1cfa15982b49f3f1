//! End-to-end extraction tests with an in-memory image source.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::{TempDir, tempdir};
use xhrpack::prelude::*;

/// Serves URLs from a fixed table and records every request.
struct TableSource {
    table: Vec<(&'static str, &'static str)>,
    requests: RefCell<Vec<String>>,
}

impl TableSource {
    fn new(table: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            table,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl ImageSource for TableSource {
    fn get(&self, url: &str) -> std::result::Result<FetchedImage, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.table
            .iter()
            .find(|(known, _)| *known == url)
            .map(|(_, content_type)| FetchedImage::new(url.as_bytes().to_vec(), Some(*content_type)))
            .ok_or_else(|| FetchError::status(404))
    }
}

fn config_in(dir: &TempDir, dump: &str) -> ExtractConfig {
    let input = dir.path().join("xhr_data.json");
    fs::write(&input, dump).unwrap();
    ExtractConfig::new()
        .with_input(input)
        .with_image_dir(dir.path().join("downloaded_images"))
        .with_json_output(dir.path().join("messages_with_local_paths.json"))
        .with_csv_output(dir.path().join("messages.csv"))
}

fn dump_of(items: serde_json::Value) -> String {
    json!([{"data": {"list": items}}]).to_string()
}

fn payload(parts: serde_json::Value) -> String {
    parts.to_string()
}

#[test]
fn test_failed_image_leaves_text_only_record() {
    let dir = tempdir().unwrap();
    let dump = json!([
        {"data": {"list": [{
            "id": 1,
            "createtime": "2024-01-15 10:30:00",
            "msg": payload(json!([
                {"type": "text", "msg": "hello"},
                {"type": "pic", "url": "https://cdn.example/missing.png"}
            ]))
        }]}},
        {"code": 500, "message": "server error"}
    ]);
    let config = config_in(&dir, &dump.to_string());

    let report = run_with_source(&config, TableSource::new(vec![])).unwrap();
    assert_eq!(report.record_count(), 1);
    assert_eq!(report.stats.images_failed, 1);

    let records = read_records(&config.json_output).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "hello");
    assert_eq!(records[0].remote_pic_urls, vec!["https://cdn.example/missing.png"]);
    assert!(records[0].local_pic_paths.is_empty());

    assert_eq!(fs::read_dir(&config.image_dir).unwrap().count(), 0);
}

#[test]
fn test_outputs_agree_and_preserve_order() {
    let dir = tempdir().unwrap();
    let dump = dump_of(json!([
        {"id": 1, "createtime": 100, "msg": payload(json!([
            {"type": "text", "msg": " first "},
            {"type": "pic", "url": "https://cdn.example/a.png"},
            {"type": "text", "msg": "second"},
            {"type": "pic", "url": "https://cdn.example/b"}
        ]))},
        {"id": 2, "createtime": 200, "msg": "not json at all"},
        {"id": 3, "createtime": null, "msg": payload(json!([{"type": "video", "url": "v"}]))}
    ]));
    let config = config_in(&dir, &dump);
    let source = TableSource::new(vec![
        ("https://cdn.example/a.png", "image/gif"),
        ("https://cdn.example/b", "image/webp"),
    ]);

    let report = run_with_source(&config, &source).unwrap();
    assert_eq!(report.stats.items_seen, 3);
    assert_eq!(report.stats.dropped, 1);
    assert_eq!(report.stats.images_downloaded, 2);

    let records = read_records(&config.json_output).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text, "first\nsecond");
    assert_eq!(records[0].local_pic_paths.len(), 2);
    // URL suffix wins over content type; content type fills in otherwise.
    assert!(records[0].local_pic_paths[0].ends_with(".png"));
    assert!(records[0].local_pic_paths[1].ends_with(".webp"));
    assert_eq!(records[1].id, json!(3));
    assert_eq!(records[1].text, "");
    assert!(records[1].remote_pic_urls.is_empty());

    let csv = fs::read_to_string(report.csv_output.unwrap()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("id,createtime,text,remote_pic_urls,local_pic_paths"));
    assert!(lines.next().unwrap().starts_with("1,100,first second,"));
    assert_eq!(lines.next(), Some("3,,,,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_rerun_uses_cache_without_requests() {
    let dir = tempdir().unwrap();
    let dump = dump_of(json!([
        {"id": 1, "msg": payload(json!([
            {"type": "pic", "url": "https://cdn.example/a.png"},
            {"type": "pic", "url": "https://cdn.example/no-ext"}
        ]))}
    ]));
    let config = config_in(&dir, &dump);
    let table = vec![
        ("https://cdn.example/a.png", "image/png"),
        ("https://cdn.example/no-ext", "image/avif"),
    ];

    let first = TableSource::new(table.clone());
    run_with_source(&config, &first).unwrap();
    assert_eq!(first.requests.borrow().len(), 2);
    let first_records = read_records(&config.json_output).unwrap();

    let second = TableSource::new(table);
    let report = run_with_source(&config, &second).unwrap();
    assert!(second.requests.borrow().is_empty());
    assert_eq!(report.stats.images_cached, 2);
    assert_eq!(read_records(&config.json_output).unwrap(), first_records);
}

#[test]
fn test_recovered_payload_is_kept() {
    let dir = tempdir().unwrap();
    let dump = dump_of(json!([
        {"id": "x", "msg": r#"[{"type":"text","msg":"hi"}]garbage"#}
    ]));
    let config = config_in(&dir, &dump);

    let report = run_with_source(&config, TableSource::new(vec![])).unwrap();
    assert_eq!(report.stats.recovered, 1);

    let records = read_records(&config.json_output).unwrap();
    assert_eq!(records[0].text, "hi");
    assert_eq!(records[0].id, json!("x"));
}

#[test]
fn test_top_level_object_is_invalid_format() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, r#"{"data": {"list": []}}"#);

    let err = run_with_source(&config, TableSource::new(vec![])).unwrap_err();
    assert!(err.is_invalid_format());
    assert!(!config.json_output.exists());
}

#[test]
fn test_broken_dump_is_json_error() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, "[{\"data\": ");

    let err = run_with_source(&config, TableSource::new(vec![])).unwrap_err();
    assert!(err.is_json());
}

#[test]
fn test_empty_dump_writes_empty_outputs() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, "[]");

    let report = run_with_source(&config, TableSource::new(vec![])).unwrap();
    assert_eq!(report.record_count(), 0);
    assert!(Path::new(&config.image_dir).is_dir());
    assert_eq!(fs::read_to_string(&config.json_output).unwrap(), "[]");
}

#[test]
fn test_report_from_extraction_output() {
    let dir = tempdir().unwrap();
    let dump = dump_of(json!([
        {"id": 9, "createtime": "t", "msg": payload(json!([
            {"type": "text", "msg": "caption"},
            {"type": "pic", "url": "https://cdn.example/a.png"}
        ]))}
    ]));
    let config = config_in(&dir, &dump);
    run_with_source(&config, TableSource::new(vec![("https://cdn.example/a.png", "image/png")]))
        .unwrap();

    let html_path = dir.path().join("report.html");
    let count = write_report(
        &config.json_output,
        &html_path,
        ReportFormat::Html,
        &ReportConfig::new(),
    )
    .unwrap();
    assert_eq!(count, 1);

    let html = fs::read_to_string(html_path).unwrap();
    assert!(html.contains("ID: 9 | Time: t"));
    assert!(html.contains("caption"));
    // Paths recorded under an absolute image dir resolve without a base dir.
    assert!(html.contains("<img src="));
}

#[test]
fn test_opaque_values_pass_through_unchanged() {
    let dir = tempdir().unwrap();
    let dump = r#"[{"data":{"list":[
        {"id":123456789012345678901234,"createtime":{"z":1,"a":2},"msg":"[{\"type\":\"text\",\"msg\":\"big\"}]"}
    ]}}]"#;
    let config = config_in(&dir, dump);

    run_with_source(&config, TableSource::new(vec![])).unwrap();

    let json = fs::read_to_string(&config.json_output).unwrap();
    assert!(json.contains(r#""id": 123456789012345678901234,"#));
    let records = read_records(&config.json_output).unwrap();
    assert_eq!(records[0].id.to_string(), "123456789012345678901234");
    assert_eq!(records[0].createtime.to_string(), r#"{"z":1,"a":2}"#);

    let mut reader = csv::Reader::from_path(&config.csv_output).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[0], "123456789012345678901234");
    assert_eq!(&row[1], r#"{"z":1,"a":2}"#);
    assert_eq!(&row[2], "big");
}
