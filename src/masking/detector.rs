//! Line classification against the contact pattern set.

use super::config::MaskerConfig;
use crate::domain::{
    fix_contact_formatting, ContactKind, EmailMatcher, LandmarkMatcher, LinkedInMatcher,
    PatternMatcher, PhoneNumberMatcher, PostalAddressMatcher,
};
use std::borrow::Cow;

/// Decides whether lines of text carry contact information.
///
/// The masker receives a detector through its constructor, so tests (or a
/// scoring NLP engine) can stand in for the regex set.
pub trait ContactDetector: Send + Sync {
    /// Classifies a single line; the first matching kind wins.
    fn classify_line(&self, text: &str) -> Option<ContactKind>;

    /// Classifies a match that wraps from `current` onto `next`.
    fn classify_wrapped(&self, current: &str, next: &str) -> Option<ContactKind>;
}

/// Regex-backed detector.
///
/// Single-line precedence: email, phone, postal address (optional),
/// landmark (optional). Wrapped lines are tested for LinkedIn URLs.
pub struct RegexContactDetector {
    line_matchers: Vec<Box<dyn PatternMatcher>>,
    wrapped_matcher: LinkedInMatcher,
    normalize: bool,
}

impl RegexContactDetector {
    /// Email and phone detection only, no normalization.
    pub fn new() -> Self {
        Self::from_config(&MaskerConfig::default())
    }

    pub fn from_config(config: &MaskerConfig) -> Self {
        let mut line_matchers: Vec<Box<dyn PatternMatcher>> =
            vec![Box::new(EmailMatcher::new()), Box::new(PhoneNumberMatcher::new())];

        if config.detect_addresses {
            line_matchers.push(Box::new(PostalAddressMatcher::new()));
        }
        if config.detect_landmarks {
            line_matchers.push(Box::new(LandmarkMatcher::new()));
        }

        Self {
            line_matchers,
            wrapped_matcher: LinkedInMatcher::new(),
            normalize: config.normalize_text,
        }
    }

    /// Kinds checked on single lines, in precedence order.
    pub fn line_kinds(&self) -> Vec<ContactKind> {
        self.line_matchers.iter().map(|m| m.kind()).collect()
    }

    fn prepare<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.normalize {
            Cow::Owned(fix_contact_formatting(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl Default for RegexContactDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactDetector for RegexContactDetector {
    fn classify_line(&self, text: &str) -> Option<ContactKind> {
        let text = self.prepare(text);
        self.line_matchers
            .iter()
            .find(|m| m.is_match(&text))
            .map(|m| m.kind())
    }

    fn classify_wrapped(&self, current: &str, next: &str) -> Option<ContactKind> {
        let joined = format!("{}{}", current, next);
        let joined = self.prepare(&joined);
        self.wrapped_matcher
            .is_match(&joined)
            .then(|| self.wrapped_matcher.kind())
    }
}
