//! Cleanup of contact details fragmented by PDF text extraction.
//!
//! Extraction sometimes splits an address or number into several runs
//! separated by spaces or line breaks. These substitutions glue the common
//! cases back together; they are best-effort and never required for
//! matching well-formed text.

use once_cell::sync::Lazy;
use regex::Regex;

static BROKEN_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\w.%+-]+)\s*@\s*([\w-]+(?:\.[\w-]+)*)\s*\.\s*([A-Za-z]{2,})\b")
        .expect("Valid broken email regex")
});

static BROKEN_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\(?\d{3}\)?)[.\s-]?(\d{3})[.\s-]?(\d{4})").expect("Valid broken phone regex")
});

static BROKEN_INTL_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3})[\s-]?(\d{3,4})[\s-]?(\d{3,4})[\s-]?(\d{3,4})")
        .expect("Valid broken international phone regex")
});

/// Rewrites broken emails and phone numbers into canonical forms.
///
/// - `john . doe@example . com` → `john . doe@example.com`
/// - `555 123\n4567` → `555-123-4567`
/// - `+44 1234 567 8901` → `+44-1234-567-8901`
pub fn fix_contact_formatting(text: &str) -> String {
    let text = BROKEN_EMAIL.replace_all(text, "${1}@${2}.${3}");
    let text = BROKEN_PHONE.replace_all(&text, "${1}-${2}-${3}");
    BROKEN_INTL_PHONE
        .replace_all(&text, "${1}-${2}-${3}-${4}")
        .into_owned()
}
