//! Mock backend for testing
//!
//! Returns a fixed tone for any non-empty text. No lemmatizer or tagger.

use super::SignalBackend;

/// Mock signal backend for testing
#[derive(Debug, Clone)]
pub struct MockBackend {
    /// Tone returned for every non-empty text
    pub tone: Option<f64>,
}

impl MockBackend {
    /// Create a mock that always reports a neutral tone
    pub fn new() -> Self {
        Self { tone: Some(0.0) }
    }

    /// Create a mock with a specific tone (None = no opinion)
    pub fn with_tone(tone: Option<f64>) -> Self {
        Self { tone }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBackend for MockBackend {
    fn tone(&self, text: &str) -> Option<f64> {
        if text.trim().is_empty() {
            return None;
        }
        self.tone
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fixed_tone() {
        let backend = MockBackend::with_tone(Some(-0.25));
        assert_eq!(backend.tone("anything at all"), Some(-0.25));
        assert_eq!(backend.tone(""), None);
    }

    #[test]
    fn test_mock_no_opinion() {
        assert_eq!(MockBackend::with_tone(None).tone("text"), None);
    }
}
