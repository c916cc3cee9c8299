use printpdf::{BuiltinFont, Mm, PdfDocument};
use rand::distributions::{Alphanumeric, DistString};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{ExpungementError, Result};
use crate::models::{EligibilityReport, ExportedDocument};

pub const FILE_ID_LEN: usize = 8;

// A4 portrait
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
// left, right and top
const MARGIN_MM: f32 = 10.0;
// automatic page break this far from the bottom edge
const BOTTOM_BREAK_MM: f32 = 20.0;
// gap between the margin and the text on both sides of a line
const CELL_PADDING_MM: f32 = 1.0;
const LINE_HEIGHT_MM: f32 = 10.0;
// baseline sits this far below the top of its row
const BASELINE_OFFSET_MM: f32 = 7.0;
const FONT_SIZE_PT: f32 = 12.0;

const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM;
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Printable line width in glyph units (1/1000 em at the body font size)
const MAX_LINE_UNITS: u32 = (TEXT_WIDTH_MM * PT_PER_MM * 1000.0 / FONT_SIZE_PT) as u32;

pub const LINES_PER_PAGE: usize =
    ((PAGE_HEIGHT_MM - MARGIN_MM - BOTTOM_BREAK_MM) / LINE_HEIGHT_MM) as usize;

/// Helvetica advance widths (AFM, 1/1000 em) indexed by Latin-1 code point.
/// Control characters fall back to the space width.
const HELVETICA_WIDTHS: [u16; 256] = [
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 278,
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Writes eligibility reports as paginated PDF summaries.
///
/// Documents land in `dir` as `expungement_summary_<id>.pdf` and are never
/// removed by the exporter.
#[derive(Debug, Clone)]
pub struct DocumentExporter {
    dir: PathBuf,
}

impl DocumentExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn export(
        &self,
        charge: &str,
        report: &EligibilityReport,
    ) -> Result<ExportedDocument> {
        let file_id = generate_file_id();
        let file_name = file_name_for(&file_id);
        let body = format!("Expungement Summary for {}\n\n{}", charge, report.as_str());

        // fail before touching the directory so a bad report leaves nothing behind
        ensure_encodable(&body)?;
        let pages = layout_pages(&body);
        let bytes = render_pdf(&pages)?;

        fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&file_name);
        // create_new: an id collision errors instead of replacing another summary
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        tracing::info!(
            "Exported summary {} ({} pages, {} bytes)",
            file_id,
            pages.len(),
            bytes.len()
        );

        Ok(ExportedDocument {
            file_id,
            file_name,
            path,
            body,
            page_count: pages.len(),
        })
    }

    /// Read back a previously exported document as `(file_name, bytes)`
    pub async fn open(&self, file_id: &str) -> Result<(String, Vec<u8>)> {
        if !is_valid_file_id(file_id) {
            return Err(ExpungementError::NotFound(format!(
                "malformed document id '{file_id}'"
            )));
        }

        let file_name = file_name_for(file_id);
        match fs::read(self.dir.join(&file_name)).await {
            Ok(bytes) => Ok((file_name, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                ExpungementError::NotFound(format!("document '{file_id}'")),
            ),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn generate_file_id() -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), FILE_ID_LEN)
}

pub fn is_valid_file_id(file_id: &str) -> bool {
    file_id.len() == FILE_ID_LEN && file_id.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn file_name_for(file_id: &str) -> String {
    format!("expungement_summary_{file_id}.pdf")
}

/// The built-in Helvetica only covers Latin-1
fn ensure_encodable(text: &str) -> Result<()> {
    match text.chars().enumerate().find(|(_, c)| u32::from(*c) > 0xFF) {
        Some((position, ch)) => Err(ExpungementError::UnsupportedCharacter { ch, position }),
        None => Ok(()),
    }
}

fn glyph_units(c: char) -> u32 {
    // non Latin-1 is rejected before layout; measure it like a space anyway
    let index = u32::from(c);
    if index < 256 {
        u32::from(HELVETICA_WIDTHS[index as usize])
    } else {
        u32::from(HELVETICA_WIDTHS[usize::from(b' ')])
    }
}

/// Rendered width of `text` in points at the body font size
pub fn text_width_pt(text: &str) -> f32 {
    let units: u32 = text.chars().map(glyph_units).sum();
    units as f32 * FONT_SIZE_PT / 1000.0
}

pub fn max_line_width_pt() -> f32 {
    MAX_LINE_UNITS as f32 * FONT_SIZE_PT / 1000.0
}

/// Wrap `text` to the printable width and split it into pages.
///
/// Lines break at the last space that fits, or mid-word when a word alone
/// is wider than a line. Explicit newlines and runs of spaces are kept.
pub fn layout_pages(text: &str) -> Vec<Vec<String>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), &mut lines);
    }

    lines
        .chunks(LINES_PER_PAGE)
        .map(|page| page.to_vec())
        .collect()
}

fn wrap_paragraph(paragraph: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut start = 0;
    let mut last_space = None;
    let mut width = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == ' ' {
            last_space = Some(i);
        }
        width += glyph_units(c);

        if width > MAX_LINE_UNITS {
            match last_space {
                // break at the space, which is dropped
                Some(space) if space > start => {
                    out.push(chars[start..space].iter().collect());
                    start = space + 1;
                }
                // no usable space: split the word, always taking at least one char
                _ => {
                    let end = if i == start { i + 1 } else { i };
                    out.push(chars[start..end].iter().collect());
                    start = end;
                }
            }
            i = start;
            last_space = None;
            width = 0;
            continue;
        }
        i += 1;
    }

    out.push(chars[start..].iter().collect());
}

fn render_pdf(pages: &[Vec<String>]) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Expungement Summary",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExpungementError::Pdf(e.to_string()))?;

    for (index, lines) in pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            // blank lines still take their row
            if line.is_empty() {
                continue;
            }
            let y = PAGE_HEIGHT_MM - MARGIN_MM - row as f32 * LINE_HEIGHT_MM - BASELINE_OFFSET_MM;
            layer.use_text(
                line.clone(),
                FONT_SIZE_PT,
                Mm(MARGIN_MM + CELL_PADDING_MM),
                Mm(y),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExpungementError::Pdf(e.to_string()))
}
