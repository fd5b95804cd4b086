//! LinkedIn profile URL detection.

use super::{ContactKind, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// LinkedIn profile URL matcher.
///
/// Scheme and `www.` are optional and matching is case-insensitive. PDF
/// layout frequently wraps these URLs, so callers test the concatenation
/// of two adjacent lines.
#[derive(Debug, Clone, Default)]
pub struct LinkedInMatcher;

impl LinkedInMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+")
                .expect("Valid LinkedIn regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for LinkedInMatcher {
    fn kind(&self) -> ContactKind {
        ContactKind::LinkedIn
    }

    fn patterns(&self) -> Vec<&Regex> {
        vec![Self::regex()]
    }
}
