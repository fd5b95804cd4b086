//! Statistics about a masking run.

use crate::report::format_report;

/// Outcome of masking one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskingResult {
    /// Total regions redacted (image placements plus text spans)
    pub items_redacted: usize,

    /// Image placements covered
    pub images_redacted: usize,

    /// Text spans covered
    pub spans_redacted: usize,

    /// Pages visited
    pub pages_processed: usize,

    /// Pages with at least one redaction
    pub pages_modified: usize,

    /// Pages skipped because their layout could not be read
    pub pages_skipped: usize,
}

impl MaskingResult {
    /// Returns true if any redactions were applied.
    pub fn has_redactions(&self) -> bool {
        self.items_redacted > 0
    }

    /// Human-readable summary of the run.
    pub fn report(&self) -> String {
        format_report(self.items_redacted)
    }

    /// The `(count, report)` pair returned to UI callers.
    pub fn into_parts(self) -> (usize, String) {
        let report = self.report();
        (self.items_redacted, report)
    }
}
