//! Markdown document renderer.

use std::fmt::Write;

use super::{ReportConfig, forward_slashes, header_line};
use crate::NormalizedRecord;

/// Renders records as a Markdown document.
///
/// Each record becomes a level-2 section: one paragraph per non-blank text
/// line, then an image link per existing file or a `[missing image: ..]`
/// line for a path that does not resolve.
///
/// Blank text lines are dropped. Markdown already separates paragraphs with
/// an empty line, so an extra one would not render. Use
/// [`render_docx`](super::render_docx) when blank lines must survive as
/// paragraphs of their own.
///
/// # Example
///
/// ```
/// use xhrpack::NormalizedRecord;
/// use xhrpack::report::{ReportConfig, render_markdown};
///
/// let md = render_markdown(&[NormalizedRecord::new("hi")], &ReportConfig::new());
/// assert!(md.starts_with("# Message Report\n"));
/// assert!(md.contains("## ID: unknown id | Time: unknown time\n\nhi\n"));
/// ```
pub fn render_markdown(records: &[NormalizedRecord], config: &ReportConfig) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}", config.title);

    for record in records {
        let _ = write!(md, "\n## {}\n", header_line(record));

        for line in record.text.lines().filter(|line| !line.trim().is_empty()) {
            let _ = write!(md, "\n{line}\n");
        }

        for path in &record.local_pic_paths {
            let target = forward_slashes(path);
            if config.image_exists(path) {
                let _ = write!(md, "\n![image]({})\n", link_target(&target));
            } else {
                let _ = write!(md, "\n[missing image: {target}]\n");
            }
        }
    }

    md
}

/// Wraps a link destination in angle brackets when it contains spaces.
fn link_target(path: &str) -> String {
    if path.contains(' ') {
        format!("<{path}>")
    } else {
        path.to_string()
    }
}
