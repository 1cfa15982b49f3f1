//! Standalone HTML page renderer.

use std::fmt::Write;

use super::{ReportConfig, forward_slashes, header_line};
use crate::NormalizedRecord;

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; background: #f9f9f9; }
        .message { background: white; border: 1px solid #ddd; border-radius: 8px; padding: 16px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.05); }
        .id-time { color: #666; font-size: 0.9em; margin-bottom: 8px; }
        .text { margin: 10px 0; line-height: 1.5; }
        .images { margin-top: 10px; }
        .images img { max-width: 300px; height: auto; margin: 5px; border: 1px solid #eee; border-radius: 4px; }
        .missing { color: #a33; font-style: italic; margin: 5px; }
        h1 { color: #333; }
";

/// Escapes the five characters that are significant in HTML text and
/// attribute values.
///
/// # Example
///
/// ```
/// use xhrpack::report::escape_html;
///
/// assert_eq!(escape_html(r#"<b>"a" & 'b'</b>"#), "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders records as a standalone HTML page, one card per record.
pub fn render_html(records: &[NormalizedRecord], config: &ReportConfig) -> String {
    let title = escape_html(&config.title);
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    <title>{title}</title>\n    <style>\n{STYLE}    </style>\n</head>\n<body>\n    <h1>{title}</h1>\n"
    );

    for record in records {
        push_card(&mut html, record, config);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_card(html: &mut String, record: &NormalizedRecord, config: &ReportConfig) {
    let text = escape_html(&record.text).replace('\n', "<br>");

    let _ = writeln!(html, "    <div class=\"message\">");
    let _ = writeln!(
        html,
        "        <div class=\"id-time\">{}</div>",
        escape_html(&header_line(record))
    );
    let _ = writeln!(html, "        <div class=\"text\">{text}</div>");

    if !record.local_pic_paths.is_empty() {
        let _ = writeln!(html, "        <div class=\"images\">");
        for path in &record.local_pic_paths {
            let src = escape_html(&forward_slashes(path));
            if config.image_exists(path) {
                let _ = writeln!(html, "            <img src=\"{src}\" alt=\"image\">");
            } else {
                let _ = writeln!(html, "            <div class=\"missing\">missing image: {src}</div>");
            }
        }
        let _ = writeln!(html, "        </div>");
    }

    let _ = writeln!(html, "    </div>");
}
