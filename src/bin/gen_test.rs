//! Synthetic XHR dump generator for stress testing xhrpack.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [image-host]
//! Example: cargo run --features gen-test --bin gen_test -- 50000 heavy_xhr.json http://127.0.0.1:8000

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Messages per captured page.
const PAGE_SIZE: usize = 20;

const TEXTS: &[&str] = &[
    "Normal message with some text",
    "Message with \"quotes\" and 'apostrophes'",
    "Message with, commas; and semicolons",
    "Line one\nLine two\r\nLine three",
    "Кириллица: Привет мир!",
    "日本語: こんにちは",
    "Mixed: Hello Привет 你好 🌍",
    "<b>markup</b> & entities",
    "   ",
    "",
];

const PIC_EXTENSIONS: &[&str] = &[".png", ".jpg", ".gif", ".webp", "", "?size=large", ".bin"];

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_xhr.json");
    let host = args
        .get(3)
        .map(|s| s.as_str())
        .unwrap_or("https://img.example.invalid");

    println!("🧪 XHR Dump Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Images:   {}", host);
    println!();

    let file = File::create(output).expect("Failed to create output file");
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();

    let mut entries = Vec::new();
    let mut page = Vec::with_capacity(PAGE_SIZE);
    for i in 0..count {
        page.push(generate_item(&mut rng, i, host));
        if page.len() == PAGE_SIZE {
            entries.push(json!({"code": 0, "data": {"list": std::mem::take(&mut page)}}));
        }
        // Responses the extractor must skip.
        if i % 97 == 50 {
            entries.push(generate_noise_entry(&mut rng));
        }
    }
    if !page.is_empty() {
        entries.push(json!({"code": 0, "data": {"list": page}}));
    }

    serde_json::to_writer(&mut writer, &entries).expect("Failed to write dump");
    writer.flush().expect("Failed to flush output");

    let elapsed = start.elapsed();
    let bytes = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);

    println!("✅ Done!");
    println!("   Entries: {}", entries.len());
    println!("   Size:    {:.2} MB", bytes as f64 / 1_000_000.0);
    println!("   Time:    {:.2}s", elapsed.as_secs_f64());
}

fn generate_item(rng: &mut impl Rng, index: usize, host: &str) -> Value {
    let mut parts = Vec::new();
    for _ in 0..rng.gen_range(0..=3) {
        parts.push(json!({"type": "text", "msg": TEXTS.choose(rng).unwrap()}));
    }
    for p in 0..rng.gen_range(0..=2) {
        // Small URL pool so repeated images exercise the cache.
        let ext = PIC_EXTENSIONS.choose(rng).unwrap();
        let url = format!("{host}/pics/{}/{p}{ext}", index % 50);
        parts.push(json!({"type": "pic", "url": url}));
    }
    if index % 13 == 0 {
        parts.push(json!({"type": "video", "url": format!("{host}/v/{index}.mp4")}));
    }
    parts.shuffle(rng);

    let encoded = Value::Array(parts).to_string();
    let msg = match index % 40 {
        // Trailing garbage after the array
        7 => format!("{encoded}<!-- truncated -->"),
        // Not JSON at all
        19 => "not json at all".to_string(),
        // Cut off mid-array
        31 => encoded.chars().take(encoded.chars().count() / 2).collect(),
        _ => encoded,
    };

    let mut item = json!({
        "id": 1_000_000 + index,
        "createtime": format!("2024-01-{:02} {:02}:{:02}:00", index % 28 + 1, index % 24, index % 60),
        "msg": msg,
    });
    if index % 53 == 0 {
        item["createtime"] = Value::Null;
    }
    item
}

fn generate_noise_entry(rng: &mut impl Rng) -> Value {
    match rng.gen_range(0..5) {
        0 => json!({"code": 401, "message": "unauthorized"}),
        1 => json!({"data": {"list": "not a list"}}),
        2 => json!({"data": null}),
        3 => json!("bare string"),
        _ => json!({"data": {"list": [42, null, "x"]}}),
    }
}
