//! Per-block line planning with one-line look-ahead.
//!
//! Lines are visited in extraction order. A line either matches on its
//! own, matches together with the following line, or is left alone. A line
//! pulled into the previous line's match is `ConsumedByLookahead` and never
//! classified itself, so a wrapped URL is counted once.

use super::detector::ContactDetector;
use crate::domain::ContactKind;

/// Scanner state for the line about to be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Scanning,
    ConsumedByLookahead,
}

/// What to do with one line of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDecision {
    /// No contact information
    Keep,
    /// Redact this line's spans
    Redact(ContactKind),
    /// Redact this line and the next one
    RedactWithNext(ContactKind),
    /// Already redacted by the previous line's look-ahead
    Consumed,
}

impl LineDecision {
    /// State the scanner was in when it reached this line.
    pub fn state(&self) -> LineState {
        match self {
            Self::Consumed => LineState::ConsumedByLookahead,
            _ => LineState::Scanning,
        }
    }

    /// Whether this line's own spans are redacted.
    pub fn redacts_line(&self) -> bool {
        !matches!(self, Self::Keep)
    }
}

/// Plans every line of one block.
///
/// The returned vector has one decision per input line.
pub fn plan_lines<S: AsRef<str>>(detector: &dyn ContactDetector, lines: &[S]) -> Vec<LineDecision> {
    let mut plan = Vec::with_capacity(lines.len());
    let mut state = LineState::Scanning;

    for (idx, line) in lines.iter().enumerate() {
        if state == LineState::ConsumedByLookahead {
            plan.push(LineDecision::Consumed);
            state = LineState::Scanning;
            continue;
        }

        let text = line.as_ref();
        let decision = match detector.classify_line(text) {
            Some(kind) => LineDecision::Redact(kind),
            None => match lines.get(idx + 1) {
                Some(next) => match detector.classify_wrapped(text, next.as_ref()) {
                    Some(kind) => {
                        state = LineState::ConsumedByLookahead;
                        LineDecision::RedactWithNext(kind)
                    }
                    None => LineDecision::Keep,
                },
                None => LineDecision::Keep,
            },
        };

        plan.push(decision);
    }

    plan
}
