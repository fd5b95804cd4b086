//! Contact PII masking for PDF résumés.
//!
//! This library finds contact details on each page of a PDF (emails,
//! phone numbers, LinkedIn profile URLs, optionally postal addresses and
//! landmark directions), covers embedded photos, and uses MuPDF's
//! redaction API to physically remove the matched content.
//!
//! # Features
//!
//! - **Secure Redaction**: Covered text and image pixels are removed, not just overlaid
//! - **Span Precision**: Only the spans of matching lines are covered
//! - **Wrapped URLs**: LinkedIn URLs broken across two lines are caught with a one-line look-ahead
//! - **Pluggable Detection**: The pattern set sits behind [`ContactDetector`]
//!
//! # Architecture
//!
//! - [`domain`]: Contact patterns and text normalization
//! - [`document`]: Page model and the MuPDF backend
//! - [`masking`]: Line planning and the masking pipeline
//! - [`report`]: Report formatting
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use pii_masker::{ContactMasker, MaskerConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let masker = ContactMasker::new(MaskerConfig::default())?;
//! let result = masker.mask(Path::new("resume.pdf"), Path::new("masked_resume.pdf"))?;
//!
//! print!("{}", result.report());
//! # Ok(())
//! # }
//! ```
//!
//! # Pattern Matching
//!
//! ```
//! use pii_masker::domain::{PatternMatcher, PhoneNumberMatcher};
//!
//! let matcher = PhoneNumberMatcher::new();
//! let phones = matcher.extract_all("Call (555) 234-5678 or 555-987-6543");
//! assert_eq!(phones.len(), 2);
//! ```

pub mod document;
pub mod domain;
pub mod error;
pub mod masking;
pub mod report;

pub use document::{extract_text, Document, MuPdfDocument, RedactionRegion, TextLayout};
pub use domain::{fix_contact_formatting, ContactKind, PatternMatcher};
pub use error::{MaskerError, MaskerResult};
pub use masking::{
    ContactDetector, ContactMasker, MaskerConfig, MaskingResult, RegexContactDetector,
};
pub use report::format_report;

use std::path::Path;

/// Masks emails, phone numbers and LinkedIn URLs in `input`, optionally
/// covering photos, and writes the result to `output`.
///
/// Returns the number of redacted items and the report text.
pub fn mask_contact_info_in_pdf(
    input: &Path,
    output: &Path,
    remove_photos: bool,
) -> MaskerResult<(usize, String)> {
    let config = MaskerConfig::default().with_remove_photos(remove_photos);
    let masker = ContactMasker::new(config)?;
    Ok(masker.mask(input, output)?.into_parts())
}
