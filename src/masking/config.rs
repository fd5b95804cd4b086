//! Masking options.

use crate::error::{MaskerError, MaskerResult};

/// Default detection confidence, kept for API compatibility.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.35;

/// Options controlling what the masker redacts.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskerConfig {
    /// Cover every image placement with a white box
    pub remove_photos: bool,

    /// Redact lines that look like US or regional postal addresses
    pub detect_addresses: bool,

    /// Redact lines containing landmark keywords ("near", "opposite", ...)
    pub detect_landmarks: bool,

    /// Run [`fix_contact_formatting`](crate::domain::fix_contact_formatting)
    /// on line text before classifying it
    pub normalize_text: bool,

    /// Minimum detection confidence in `0.0..=1.0`.
    ///
    /// Regex matches are binary, so this has no effect on the built-in
    /// detector. It is validated and passed through for detectors that
    /// score their matches.
    pub confidence_threshold: f32,
}

impl Default for MaskerConfig {
    fn default() -> Self {
        Self {
            remove_photos: true,
            detect_addresses: false,
            detect_landmarks: false,
            normalize_text: false,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl MaskerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remove_photos(mut self, remove_photos: bool) -> Self {
        self.remove_photos = remove_photos;
        self
    }

    pub fn with_address_detection(mut self, enabled: bool) -> Self {
        self.detect_addresses = enabled;
        self
    }

    pub fn with_landmark_detection(mut self, enabled: bool) -> Self {
        self.detect_landmarks = enabled;
        self
    }

    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize_text = enabled;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Checks that every option is within range.
    pub fn validate(&self) -> MaskerResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(MaskerError::InvalidInput {
                parameter: "confidence_threshold".to_string(),
                reason: format!(
                    "must be between 0.0 and 1.0, got {}",
                    self.confidence_threshold
                ),
            });
        }
        Ok(())
    }
}
