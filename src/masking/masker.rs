//! The contact masker.
//!
//! Walks every page of a document, covers image placements, plans each
//! text block line by line and applies the collected regions page by page.

use super::config::MaskerConfig;
use super::detector::{ContactDetector, RegexContactDetector};
use super::planner::{plan_lines, LineDecision};
use super::result::MaskingResult;
use crate::document::{Document, MuPdfDocument, RedactionRegion, TextLayout};
use crate::error::{MaskerError, MaskerResult};
use std::path::Path;
use tracing::{debug, info, warn};

/// Regions collected for a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRedactions {
    pub regions: Vec<RedactionRegion>,
    pub images: usize,
    pub spans: usize,
}

impl PageRedactions {
    pub fn count(&self) -> usize {
        self.regions.len()
    }
}

/// Redacts contact information from PDF documents.
pub struct ContactMasker {
    config: MaskerConfig,
    detector: Box<dyn ContactDetector>,
}

impl ContactMasker {
    /// Creates a masker using the regex detector built from `config`.
    pub fn new(config: MaskerConfig) -> MaskerResult<Self> {
        config.validate()?;
        let detector = RegexContactDetector::from_config(&config);
        Ok(Self::with_detector(config, Box::new(detector)))
    }

    /// Creates a masker with a caller-supplied detector.
    pub fn with_detector(config: MaskerConfig, detector: Box<dyn ContactDetector>) -> Self {
        Self { config, detector }
    }

    pub fn config(&self) -> &MaskerConfig {
        &self.config
    }

    /// Masks `input` and writes the result to `output`.
    ///
    /// Nothing is written if the input cannot be opened or a page fails
    /// to be redacted.
    pub fn mask(&self, input: &Path, output: &Path) -> MaskerResult<MaskingResult> {
        let mut doc = MuPdfDocument::open(input)?;
        let result = self.mask_document(&mut doc)?;
        doc.save(output)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            redacted = result.items_redacted,
            "Masking complete"
        );
        Ok(result)
    }

    /// Masks an in-memory PDF and returns the redacted bytes.
    pub fn mask_bytes(&self, input: &[u8]) -> MaskerResult<(Vec<u8>, MaskingResult)> {
        let scratch = scratch_dir_in(&std::env::temp_dir())?;
        let input_path = scratch.path().join("input.pdf");
        let output_path = scratch.path().join("output.pdf");

        std::fs::write(&input_path, input).map_err(|e| MaskerError::Io {
            path: input_path.clone(),
            source: e,
        })?;

        let result = self.mask(&input_path, &output_path)?;

        let bytes = std::fs::read(&output_path).map_err(|e| MaskerError::Io {
            path: output_path.clone(),
            source: e,
        })?;
        Ok((bytes, result))
    }

    /// Masks every page of an open document in place.
    ///
    /// Pages whose layout cannot be read are skipped with zero redactions.
    pub fn mask_document(&self, doc: &mut dyn Document) -> MaskerResult<MaskingResult> {
        let mut result = MaskingResult::default();

        for page in 0..doc.page_count() {
            let page_number = page + 1;
            result.pages_processed += 1;

            let redactions = match self.collect_page(doc, page) {
                Ok(redactions) => redactions,
                Err(e) if e.is_page_local() => {
                    warn!(page = page_number, error = %e, "Skipping page");
                    result.pages_skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if redactions.count() == 0 {
                continue;
            }

            doc.apply_redactions(page, &redactions.regions)?;
            info!("Page {}: redacted {} items", page_number, redactions.count());

            result.items_redacted += redactions.count();
            result.images_redacted += redactions.images;
            result.spans_redacted += redactions.spans;
            result.pages_modified += 1;
        }

        Ok(result)
    }

    /// Gathers image and text regions for one page without applying them.
    pub fn collect_page(
        &self,
        doc: &mut dyn Document,
        page: usize,
    ) -> MaskerResult<PageRedactions> {
        let mut redactions = PageRedactions::default();

        if self.config.remove_photos {
            for rect in doc.image_rects(page)? {
                redactions.regions.push(RedactionRegion::image(rect));
                redactions.images += 1;
            }
        }

        let layout = doc.text_layout(page)?;
        let text_regions = self.plan_layout(&layout, page + 1);
        redactions.spans = text_regions.len();
        redactions.regions.extend(text_regions);

        Ok(redactions)
    }

    /// One black region per span of every line the detector flags.
    pub fn plan_layout(&self, layout: &TextLayout, page_number: usize) -> Vec<RedactionRegion> {
        let mut regions = Vec::new();

        for block in &layout.blocks {
            let texts: Vec<String> = block.lines.iter().map(|line| line.text()).collect();
            let plan = plan_lines(self.detector.as_ref(), &texts);

            for (idx, decision) in plan.iter().enumerate() {
                if !decision.redacts_line() {
                    continue;
                }

                match decision {
                    LineDecision::Redact(kind) | LineDecision::RedactWithNext(kind) => {
                        debug!(page = page_number, line = idx, kind = %kind, "Contact line");
                    }
                    _ => {}
                }

                regions.extend(
                    block.lines[idx]
                        .spans
                        .iter()
                        .map(|span| RedactionRegion::text(span.bbox)),
                );
            }
        }

        regions
    }
}

fn scratch_dir_in(parent: &Path) -> MaskerResult<tempfile::TempDir> {
    tempfile::tempdir_in(parent).map_err(|e| MaskerError::Io {
        path: parent.to_path_buf(),
        source: e,
    })
}
