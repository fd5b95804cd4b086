//! Phone number domain logic.
//!
//! Résumés carry numbers in many national formats, so the matcher accepts
//! an optional country code followed by a 3-3-4 digit grouping with the
//! usual separators.

use super::{ContactKind, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// Phone number pattern matcher.
///
/// Supports formats such as:
/// - (555) 123-4567
/// - 555-123-4567
/// - 555.123.4567
/// - +1 555 123 4567
#[derive(Debug, Clone)]
pub struct PhoneNumberMatcher;

impl PhoneNumberMatcher {
    /// Creates a new phone number matcher.
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b")
                .expect("Valid phone number regex")
        });
        &PATTERN
    }
}

impl Default for PhoneNumberMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for PhoneNumberMatcher {
    fn kind(&self) -> ContactKind {
        ContactKind::Phone
    }

    fn patterns(&self) -> Vec<&Regex> {
        vec![Self::regex()]
    }
}
