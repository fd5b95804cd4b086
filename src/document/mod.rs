//! Page model and document access.
//!
//! The masker only needs four capabilities from a PDF engine: image
//! placements, a blocks → lines → spans text layout, applying redaction
//! regions, and writing the result. [`Document`] captures exactly that so
//! the matching logic can run against an in-memory fake; [`MuPdfDocument`]
//! is the real implementation.

pub mod backend;
mod paint;

pub use backend::MuPdfDocument;

use crate::error::{MaskerError, MaskerResult};
use std::path::Path;

/// Axis-aligned rectangle in page coordinates (points, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// Fill painted over a redacted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Text redactions
    Black,
    /// Image redactions
    White,
}

impl Fill {
    /// RGB components in the 0.0..=1.0 range.
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            Self::Black => [0.0, 0.0, 0.0],
            Self::White => [1.0, 1.0, 1.0],
        }
    }
}

/// A rectangle scheduled for irreversible removal on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedactionRegion {
    pub rect: Rect,
    pub fill: Fill,
}

impl RedactionRegion {
    pub fn text(rect: Rect) -> Self {
        Self {
            rect,
            fill: Fill::Black,
        }
    }

    pub fn image(rect: Rect) -> Self {
        Self {
            rect,
            fill: Fill::White,
        }
    }

    /// Image regions remove the whole image they touch, not just the
    /// covered pixels.
    pub fn is_image(&self) -> bool {
        self.fill == Fill::White
    }
}

/// Affine transform `[a b c d e f]` in PDF matrix order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The inverse transform, or `None` if the matrix is singular.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON {
            return None;
        }

        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Transform {
            a,
            b,
            c,
            d,
            e: -(self.e * a + self.f * c),
            f: -(self.e * b + self.f * d),
        })
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Bounding box of the transformed corners.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.apply(rect.x0, rect.y0),
            self.apply(rect.x1, rect.y0),
            self.apply(rect.x0, rect.y1),
            self.apply(rect.x1, rect.y1),
        ];

        corners.iter().skip(1).fold(
            Rect::new(corners[0].0, corners[0].1, corners[0].0, corners[0].1),
            |acc, &(x, y)| acc.union(&Rect::new(x, y, x, y)),
        )
    }
}

/// Run of text sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bbox: Rect,
}

impl Span {
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Concatenated span text, no separator.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// Text layout of one page in extraction order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    pub blocks: Vec<Block>,
}

impl TextLayout {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.lines.is_empty())
    }
}

/// A document opened for masking.
///
/// Pages are addressed by 0-based index. Implementations own their
/// underlying handle and release it on drop.
pub trait Document {
    fn page_count(&self) -> usize;

    /// One rectangle per placement of every image on the page.
    fn image_rects(&mut self, page: usize) -> MaskerResult<Vec<Rect>>;

    fn text_layout(&mut self, page: usize) -> MaskerResult<TextLayout>;

    /// Removes the content under `regions` and paints their fill.
    ///
    /// Text regions remove the text they overlap. Image regions remove
    /// every image they touch.
    fn apply_redactions(&mut self, page: usize, regions: &[RedactionRegion]) -> MaskerResult<()>;

    /// Writes the (possibly modified) document to `output`.
    fn save(&mut self, output: &Path) -> MaskerResult<()>;
}

/// A positioned character as reported by a text extraction engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub bbox: Rect,
    pub size: f32,
}

/// Groups the characters of one line into spans.
///
/// A new span starts whenever the font size changes; this is the style
/// attribute the extraction engine exposes per character.
pub fn group_into_spans(glyphs: impl IntoIterator<Item = Glyph>) -> Vec<Span> {
    const SIZE_TOLERANCE: f32 = 0.01;

    let mut spans: Vec<Span> = Vec::new();
    let mut current_size: Option<f32> = None;

    for glyph in glyphs {
        let same_style =
            current_size.is_some_and(|size| (size - glyph.size).abs() <= SIZE_TOLERANCE);

        if same_style {
            if let Some(span) = spans.last_mut() {
                span.text.push(glyph.ch);
                span.bbox = span.bbox.union(&glyph.bbox);
                continue;
            }
        }

        spans.push(Span::new(glyph.ch.to_string(), glyph.bbox));
        current_size = Some(glyph.size);
    }

    spans
}

/// Extracts the plain text of a PDF for inspection.
pub fn extract_text(input: &Path) -> MaskerResult<String> {
    let bytes = std::fs::read(input).map_err(|e| MaskerError::Io {
        path: input.to_path_buf(),
        source: e,
    })?;

    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| MaskerError::TextExtraction {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Writes `output` through a temporary file in the same directory.
///
/// `write` receives the staging path; the destination only appears once
/// it returns successfully.
pub(crate) fn write_staged<F>(output: &Path, write: F) -> MaskerResult<()>
where
    F: FnOnce(&Path) -> MaskerResult<()>,
{
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let staged = tempfile::Builder::new()
        .prefix(".pii-masker-")
        .suffix(".pdf")
        .tempfile_in(dir)
        .map_err(|e| MaskerError::OutputWrite {
            path: output.to_path_buf(),
            reason: e.to_string(),
        })?;

    write(staged.path())?;

    staged
        .persist(output)
        .map_err(|e| MaskerError::OutputWrite {
            path: output.to_path_buf(),
            reason: e.error.to_string(),
        })?;

    Ok(())
}
