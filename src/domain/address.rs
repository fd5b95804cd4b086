//! Postal address and landmark detection.
//!
//! Two address shapes are recognized: US style
//! (`221 Baker Street, Springfield, IL 62704`) and the regional style
//! common on Indian résumés (`No. 12, MG Road, Bengaluru - 560001`).
//! Landmark keywords catch directions such as "near City Mall" that give a
//! location away without a full address.

use super::{ContactKind, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// Postal address matcher (US and regional styles).
#[derive(Debug, Clone, Default)]
pub struct PostalAddressMatcher;

impl PostalAddressMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Number, street words, street-type token, city, state code, ZIP.
    fn us_regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(concat!(
                r"\b\d{1,6}[A-Za-z]?\s+",
                r"(?:[A-Za-z][A-Za-z.'-]*\s+){0,4}",
                r"(?i:street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|",
                r"way|place|pl|terrace|ter|circle|cir|parkway|pkwy|highway|hwy)\b\.?",
                r"(?:\s+(?i:apt|suite|ste|unit)\.?\s*[A-Za-z0-9-]+)?",
                r",?\s+[A-Za-z][A-Za-z .'-]*,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?\b",
            ))
            .expect("Valid US address regex")
        });
        &PATTERN
    }

    /// `No. N, area[, area...], City - PIN` with a six digit PIN code.
    fn regional_regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(concat!(
                r"\b(?i:no)\.?\s*\d+[A-Za-z]?(?:/\d+)?,\s*",
                r"(?:[A-Za-z0-9][A-Za-z0-9 .'/-]*,\s*)+",
                r"[A-Za-z][A-Za-z .'-]*?\s*-\s*\d{6}\b",
            ))
            .expect("Valid regional address regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for PostalAddressMatcher {
    fn kind(&self) -> ContactKind {
        ContactKind::PostalAddress
    }

    fn patterns(&self) -> Vec<&Regex> {
        vec![Self::us_regex(), Self::regional_regex()]
    }
}

/// Landmark keyword matcher ("near", "beside", "opposite", ...).
///
/// A keyword must start a word but may be the prefix of a longer one, so
/// "Nearby" and "Behind-the-mall" count while "linear" does not.
#[derive(Debug, Clone, Default)]
pub struct LandmarkMatcher;

impl LandmarkMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?i)\b(?:near|beside|opposite|behind|next\s+to|adjacent\s+to|landmark)",
            )
            .expect("Valid landmark regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for LandmarkMatcher {
    fn kind(&self) -> ContactKind {
        ContactKind::Landmark
    }

    fn patterns(&self) -> Vec<&Regex> {
        vec![Self::regex()]
    }
}
