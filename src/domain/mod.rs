//! Contact information patterns.
//!
//! This module contains the classifiers that decide whether a line of
//! extracted PDF text carries contact details: emails, phone numbers,
//! LinkedIn profile URLs, postal addresses and landmark-style directions.

pub mod address;
pub mod email;
pub mod linkedin;
pub mod normalize;
pub mod phone;

pub use address::{LandmarkMatcher, PostalAddressMatcher};
pub use email::EmailMatcher;
pub use linkedin::LinkedInMatcher;
pub use normalize::fix_contact_formatting;
pub use phone::PhoneNumberMatcher;

use regex::Regex;
use std::fmt;

/// Category of contact information found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    Email,
    Phone,
    PostalAddress,
    Landmark,
    LinkedIn,
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PostalAddress => "postal address",
            Self::Landmark => "landmark",
            Self::LinkedIn => "linkedin",
        };
        f.write_str(name)
    }
}

/// Trait for pattern matching strategies.
pub trait PatternMatcher: Send + Sync {
    /// The kind of contact this matcher detects.
    fn kind(&self) -> ContactKind;

    /// Patterns tried in order; any hit counts as a match.
    fn patterns(&self) -> Vec<&Regex>;

    fn is_match(&self, text: &str) -> bool {
        self.patterns().iter().any(|p| p.is_match(text))
    }

    fn extract_all<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut found: Vec<_> = self
            .patterns()
            .iter()
            .flat_map(|p| p.find_iter(text))
            .collect();
        found.sort_by_key(|m| m.start());
        found.into_iter().map(|m| m.as_str()).collect()
    }
}
