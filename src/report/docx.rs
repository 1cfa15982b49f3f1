//! Word document renderer.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Pic, Run, Style, StyleType};
use image::ImageFormat;
use tracing::warn;

use super::{ReportConfig, forward_slashes, header_line};
use crate::NormalizedRecord;
use crate::error::{Result, XhrpackError};

/// English Metric Units per inch.
const EMU_PER_INCH: u64 = 914_400;

/// Embedded images are scaled to this width, height kept proportional.
const IMAGE_WIDTH_INCHES: u64 = 4;

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading2";

/// Renders records as a `.docx` document.
///
/// The document opens with a title paragraph. Each record then gets a
/// "Heading 2" header line, one paragraph per text line (blank lines
/// included), its images embedded 4 inches wide and an empty separator
/// paragraph. A path that does not resolve becomes a
/// `[missing image: ..]` paragraph; a file that exists but cannot be decoded
/// becomes `[unreadable image: ..]`.
pub fn render_docx(records: &[NormalizedRecord], config: &ReportConfig) -> Result<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name("Title")
                .size(52),
        )
        .add_style(
            Style::new(HEADING_STYLE, StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_paragraph(text_paragraph(&config.title).style(TITLE_STYLE));

    for record in records {
        docx = docx.add_paragraph(text_paragraph(&header_line(record)).style(HEADING_STYLE));

        for line in text_lines(&record.text) {
            docx = docx.add_paragraph(text_paragraph(line));
        }

        for path in &record.local_pic_paths {
            docx = docx.add_paragraph(image_paragraph(path, config));
        }

        docx = docx.add_paragraph(Paragraph::new());
    }

    let mut out = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut out)
        .map_err(|err| XhrpackError::report(err.to_string()))?;
    Ok(out.into_inner())
}

/// Splits record text into paragraph lines. Empty text yields nothing.
fn text_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn image_paragraph(recorded: &str, config: &ReportConfig) -> Paragraph {
    let shown = forward_slashes(recorded);
    if !config.image_exists(recorded) {
        return text_paragraph(&format!("[missing image: {shown}]"));
    }

    match load_picture(&config.resolve_image(recorded)) {
        Ok(pic) => Paragraph::new().add_run(Run::new().add_image(pic)),
        Err(err) => {
            warn!(path = %shown, error = %err, "image could not be embedded");
            text_paragraph(&format!("[unreadable image: {shown}]"))
        }
    }
}

/// Decodes an image file and re-encodes it as PNG for embedding.
fn load_picture(path: &Path) -> std::result::Result<Pic, image::ImageError> {
    let bytes = fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)?;
    let (width, height) = (decoded.width(), decoded.height());

    let mut png = Cursor::new(Vec::new());
    decoded.write_to(&mut png, ImageFormat::Png)?;

    let (width_emu, height_emu) = emu_size(width, height);
    Ok(Pic::new_with_dimensions(png.into_inner(), width, height).size(width_emu, height_emu))
}

/// Display size in EMU for an image of `width` x `height` pixels.
fn emu_size(width: u32, height: u32) -> (u32, u32) {
    let width_emu = IMAGE_WIDTH_INCHES * EMU_PER_INCH;
    let height_emu = width_emu * u64::from(height) / u64::from(width.max(1));
    (
        u32::try_from(width_emu).unwrap_or(u32::MAX),
        u32::try_from(height_emu).unwrap_or(u32::MAX),
    )
}
