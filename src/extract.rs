//! Email extraction from free-text event messages.
//!
//! Two-step matching: a loose presence check used as a fast pre-filter, then
//! a stricter capture that requires the address to end in alphabetic
//! characters after the final dot. Both patterns are unanchored and greedy —
//! with two `mailto:` occurrences in one text, the first capture absorbs the
//! later occurrence. That behavior is load-bearing for compatibility and is
//! pinned by a regression test; do not tighten the patterns.

use regex::Regex;

use crate::error::ExtractError;

/// Extracts email addresses referenced by a `mailto:` marker.
///
/// Compiles its patterns once at construction; matching methods are pure.
pub struct EmailExtractor {
    presence: Regex,
    capture: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            // Loose: marker, anything, '@', anything, a dot, one more char.
            presence: Regex::new(r"mailto:.*@.*\..+").expect("invalid presence pattern"),
            // Strict: the capture must end in alphabetic chars after the final dot.
            capture: Regex::new(r"mailto:(.*@.*\.[a-zA-Z]+)").expect("invalid capture pattern"),
        }
    }

    /// Fast pre-check: does the text contain an email-shaped substring after
    /// a `mailto:` marker? Not a syntax validation.
    pub fn contains_email(&self, text: &str) -> bool {
        self.presence.is_match(text)
    }

    /// Extract the first `mailto:` address from the text.
    ///
    /// Returns `ExtractError::NotFound` when nothing matches or the captured
    /// group is empty. Matches after the first are ignored.
    pub fn extract_email(&self, text: &str) -> Result<String, ExtractError> {
        let email = self
            .capture
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(ExtractError::NotFound)?;

        Ok(email.to_string())
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}
