//! MuPDF-backed document.
//!
//! Text layout and image placements come from MuPDF's structured text
//! device. Redactions go through MuPDF's redaction API, which removes the
//! covered text and the touched images from the content stream. The fill
//! boxes are painted onto the saved file afterwards.

use super::paint::{paint_fills, PageFills};
use super::{
    group_into_spans, write_staged, Block, Document, Glyph, Line, Rect, RedactionRegion,
    TextLayout, Transform,
};
use crate::error::{MaskerError, MaskerResult};
use std::path::{Path, PathBuf};

use mupdf::pdf::{PdfAnnotation, PdfAnnotationType, PdfDocument, PdfPage};
use mupdf::{Matrix, Page, Quad, Rect as MuRect, TextBlockType, TextPage, TextPageFlags};

/// A PDF opened with MuPDF for masking.
///
/// **Security**: redacted regions are removed from the content stream, not
/// just covered, so the text cannot be extracted from the output.
pub struct MuPdfDocument {
    source: PathBuf,
    doc: PdfDocument,
    page_count: usize,
    fills: Vec<PageFills>,
}

impl MuPdfDocument {
    /// Opens a PDF file.
    ///
    /// Fails with [`MaskerError::InputError`] if MuPDF cannot parse it.
    pub fn open(path: &Path) -> MaskerResult<Self> {
        if !path.exists() {
            return Err(MaskerError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Input file does not exist",
                ),
            });
        }

        let path_str = path.to_str().ok_or_else(|| MaskerError::InvalidInput {
            parameter: "input".to_string(),
            reason: "Path contains invalid UTF-8".to_string(),
        })?;

        let doc = PdfDocument::open(path_str).map_err(|e| MaskerError::InputError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let page_count = doc.page_count().map_err(|e| MaskerError::InputError {
            path: path.to_path_buf(),
            reason: format!("Failed to get page count: {}", e),
        })?;

        Ok(Self {
            source: path.to_path_buf(),
            doc,
            page_count: usize::try_from(page_count).unwrap_or(0),
            fills: Vec::new(),
        })
    }

    /// Whether any redactions have been applied since opening.
    pub fn is_modified(&self) -> bool {
        !self.fills.is_empty()
    }

    fn load_page(&self, page: usize) -> Result<Page, mupdf::Error> {
        // page_count came from an i32, so every valid index fits
        self.doc.load_page(page as i32)
    }

    fn text_page(&self, page: usize, options: TextPageFlags) -> MaskerResult<TextPage> {
        let extraction_error = |e: mupdf::Error| MaskerError::PageExtraction {
            page: page + 1,
            reason: e.to_string(),
        };

        self.load_page(page)
            .map_err(extraction_error)?
            .to_text_page(options)
            .map_err(extraction_error)
    }
}

impl Document for MuPdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn image_rects(&mut self, page: usize) -> MaskerResult<Vec<Rect>> {
        let text_page = self.text_page(page, TextPageFlags::PRESERVE_IMAGES)?;

        // Each placement of an image shows up as its own image block
        Ok(text_page
            .blocks()
            .filter(|block| matches!(block.r#type(), TextBlockType::Image))
            .map(|block| from_mu_rect(block.bounds()))
            .filter(|rect| !rect.is_empty())
            .collect())
    }

    fn text_layout(&mut self, page: usize) -> MaskerResult<TextLayout> {
        let text_page = self.text_page(page, TextPageFlags::PRESERVE_WHITESPACE)?;

        let blocks = text_page
            .blocks()
            .filter(|block| matches!(block.r#type(), TextBlockType::Text))
            .map(|block| {
                let lines = block
                    .lines()
                    .map(|line| {
                        let glyphs = line.chars().filter_map(|c| {
                            c.char().map(|ch| Glyph {
                                ch,
                                bbox: quad_bounds(&c.quad()),
                                size: c.size(),
                            })
                        });
                        Line::new(group_into_spans(glyphs))
                    })
                    .collect();
                Block::new(lines)
            })
            .collect();

        Ok(TextLayout::new(blocks))
    }

    fn apply_redactions(&mut self, page: usize, regions: &[RedactionRegion]) -> MaskerResult<()> {
        if regions.is_empty() {
            return Ok(());
        }

        let page_number = page + 1;
        let redaction_error = |reason: String| MaskerError::Redaction {
            page: page_number,
            reason,
        };

        let loaded = self
            .load_page(page)
            .map_err(|e| redaction_error(format!("Failed to load page: {}", e)))?;

        let mut pdf_page = PdfPage::try_from(loaded)
            .map_err(|_| redaction_error("Not a PDF page".to_string()))?;

        let to_user_space = pdf_page
            .ctm()
            .map_err(|e| redaction_error(format!("Failed to read page transform: {}", e)))
            .map(from_mu_matrix)?
            .invert()
            .ok_or_else(|| redaction_error("Page transform is not invertible".to_string()))?;

        let mut create = |rect: &Rect| -> MaskerResult<PdfAnnotation> {
            let annot = pdf_page
                .create_annotation(PdfAnnotationType::Redact)
                .map_err(|e| redaction_error(format!("Failed to create annotation: {}", e)))?;
            unsafe { ffi::set_annotation_rect(&annot, to_mu_rect(rect)) };
            Ok(annot)
        };

        // Applied one at a time, before any text annotation exists, so the
        // image removal only sees this region
        for region in regions.iter().filter(|r| r.is_image()) {
            let annot = create(&region.rect)?;
            unsafe { ffi::apply_removing_images(&annot) };
        }

        let mut has_text = false;
        for region in regions.iter().filter(|r| !r.is_image()) {
            create(&region.rect)?;
            has_text = true;
        }

        if has_text {
            pdf_page
                .redact()
                .map_err(|e| redaction_error(e.to_string()))?;
        }

        self.fills.push(PageFills {
            page,
            to_user_space,
            regions: regions.to_vec(),
        });
        Ok(())
    }

    fn save(&mut self, output: &Path) -> MaskerResult<()> {
        write_staged(output, |staged| {
            if self.fills.is_empty() {
                // Nothing changed: keep the original bytes
                std::fs::copy(&self.source, staged).map_err(|e| MaskerError::OutputWrite {
                    path: output.to_path_buf(),
                    reason: e.to_string(),
                })?;
                return Ok(());
            }

            let staged_str = staged.to_str().ok_or_else(|| MaskerError::InvalidInput {
                parameter: "output".to_string(),
                reason: "Path contains invalid UTF-8".to_string(),
            })?;

            self.doc
                .save(staged_str)
                .map_err(|e| MaskerError::OutputWrite {
                    path: output.to_path_buf(),
                    reason: e.to_string(),
                })?;

            paint_fills(staged, output, &self.fills)
        })
    }
}

fn from_mu_matrix(m: Matrix) -> Transform {
    Transform::new(m.a, m.b, m.c, m.d, m.e, m.f)
}

fn from_mu_rect(rect: MuRect) -> Rect {
    Rect::new(rect.x0, rect.y0, rect.x1, rect.y1)
}

fn to_mu_rect(rect: &Rect) -> MuRect {
    MuRect {
        x0: rect.x0,
        y0: rect.y0,
        x1: rect.x1,
        y1: rect.y1,
    }
}

fn quad_bounds(quad: &Quad) -> Rect {
    Rect {
        x0: quad.ul.x.min(quad.ll.x).min(quad.ur.x).min(quad.lr.x),
        y0: quad.ul.y.min(quad.ll.y).min(quad.ur.y).min(quad.lr.y),
        x1: quad.ul.x.max(quad.ll.x).max(quad.ur.x).max(quad.lr.x),
        y1: quad.ul.y.max(quad.ll.y).max(quad.ur.y).max(quad.lr.y),
    }
}

/// FFI helpers for MuPDF redaction features not exposed by the safe API.
mod ffi {
    use mupdf::pdf::PdfAnnotation;
    use mupdf::{Context, Rect};
    use std::os::raw::c_int;

    #[repr(C)]
    struct PdfAnnotRaw {
        inner: *mut mupdf_sys::pdf_annot,
    }

    /// The calling thread's MuPDF context, shared with the safe API.
    fn context() -> *mut mupdf_sys::fz_context {
        // `Context` only wraps the thread-local context pointer
        unsafe { std::mem::transmute::<Context, *mut mupdf_sys::fz_context>(Context::get()) }
    }

    /// Sets the rectangle for a PDF annotation via FFI.
    ///
    /// # Safety
    /// The annotation must be valid and belong to a page of a document
    /// opened on this thread.
    pub unsafe fn set_annotation_rect(annot: &PdfAnnotation, rect: Rect) {
        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let fz_rect = mupdf_sys::fz_rect {
            x0: rect.x0,
            y0: rect.y0,
            x1: rect.x1,
            y1: rect.y1,
        };

        mupdf_sys::pdf_set_annot_rect(context(), annot_raw.inner, fz_rect);
    }

    /// Applies one redaction annotation, removing every image it touches
    /// along with the text under it. The annotation is deleted from the
    /// page.
    ///
    /// # Safety
    /// Same requirements as [`set_annotation_rect`].
    pub unsafe fn apply_removing_images(annot: &PdfAnnotation) {
        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let mut options = mupdf_sys::pdf_redact_options {
            black_boxes: 0,
            image_method: mupdf_sys::PDF_REDACT_IMAGE_REMOVE as c_int,
            line_art: mupdf_sys::PDF_REDACT_LINE_ART_NONE as c_int,
            text: mupdf_sys::PDF_REDACT_TEXT_REMOVE as c_int,
        };

        mupdf_sys::pdf_apply_redaction(context(), annot_raw.inner, &mut options);
    }
}
