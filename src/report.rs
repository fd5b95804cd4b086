//! Plain-text masking report.

pub const REPORT_TITLE: &str = "Contact Masking Report";

/// Formats the two-line report for a redaction count.
pub fn format_report(count: usize) -> String {
    format!("{}\nTotal items redacted: {}\n", REPORT_TITLE, count)
}
