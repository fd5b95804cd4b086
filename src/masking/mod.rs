//! Contact masking pipeline.
//!
//! [`ContactMasker`] drives a [`Document`](crate::document::Document)
//! page by page. Line classification lives in [`detector`], the
//! look-ahead state machine in [`planner`].

pub mod config;
pub mod detector;
pub mod masker;
pub mod planner;
pub mod result;

pub use config::{MaskerConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use detector::{ContactDetector, RegexContactDetector};
pub use masker::{ContactMasker, PageRedactions};
pub use planner::{plan_lines, LineDecision, LineState};
pub use result::MaskingResult;
