//! Email address detection.

use super::{ContactKind, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// Email address pattern matcher.
///
/// Matches `local@domain.tld` with a TLD of at least two letters.
#[derive(Debug, Clone, Default)]
pub struct EmailMatcher;

impl EmailMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}\b").expect("Valid email regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for EmailMatcher {
    fn kind(&self) -> ContactKind {
        ContactKind::Email
    }

    fn patterns(&self) -> Vec<&Regex> {
        vec![Self::regex()]
    }
}
