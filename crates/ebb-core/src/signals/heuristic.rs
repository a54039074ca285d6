//! Heuristic fallback backend
//!
//! Counts positive and negative word matches. No lemmatizer and no tagger, so
//! keyword extraction accepts every surviving token.

use super::{tokenize, SignalBackend};

const POSITIVE_WORDS: &[&str] = &[
    "happy", "great", "good", "grateful", "thankful", "calm", "joy", "love", "excited", "proud",
    "relaxed", "peace", "energized", "awesome", "amazing", "wonderful", "glad", "content",
    "rested", "productive", "cheerful", "hopeful", "fantastic", "delight", "smile",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "angry", "anxious", "stress", "tired", "lonely", "worried", "upset", "awful",
    "terrible", "hate", "depressed", "frustrat", "overwhelm", "exhausted", "sick", "hurt",
    "afraid", "scared", "nervous", "miserable", "annoyed", "cry", "panic",
];

/// Positive/negative word counting backend
#[derive(Debug, Clone, Default)]
pub struct HeuristicBackend;

impl HeuristicBackend {
    pub fn new() -> Self {
        Self
    }

    /// (positive, negative) match counts for the text
    fn counts(text: &str) -> (usize, usize) {
        let mut pos = 0;
        let mut neg = 0;
        for token in tokenize(text) {
            let lower = token.to_lowercase();
            if POSITIVE_WORDS.iter().any(|w| lower.contains(w)) {
                pos += 1;
            }
            if NEGATIVE_WORDS.iter().any(|w| lower.contains(w)) {
                neg += 1;
            }
        }
        (pos, neg)
    }
}

impl SignalBackend for HeuristicBackend {
    fn tone(&self, text: &str) -> Option<f64> {
        if text.trim().is_empty() {
            return None;
        }

        let (pos, neg) = Self::counts(text);
        let score = (pos as f64 - neg as f64) / (pos + neg).max(1) as f64;
        Some(score.clamp(-1.0, 1.0))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_sentence() {
        let tone = HeuristicBackend::new()
            .tone("This is great, I feel happy and grateful")
            .unwrap();
        assert!(tone > 0.0);
    }

    #[test]
    fn test_negative_sentence() {
        let tone = HeuristicBackend::new()
            .tone("This is bad, I feel anxious and stressed")
            .unwrap();
        assert!(tone < 0.0);
    }

    #[test]
    fn test_empty_is_absent() {
        assert_eq!(HeuristicBackend::new().tone(""), None);
        assert_eq!(HeuristicBackend::new().tone("   "), None);
    }

    #[test]
    fn test_no_matches_is_neutral() {
        assert_eq!(HeuristicBackend::new().tone("bought groceries"), Some(0.0));
    }

    #[test]
    fn test_mixed_sentence() {
        // 2 positive, 1 negative -> 1/3
        let tone = HeuristicBackend::new()
            .tone("Tired but happy and proud")
            .unwrap();
        assert!((tone - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let tone = HeuristicBackend::new().tone("FRUSTRATING day").unwrap();
        assert_eq!(tone, -1.0);
    }

    #[test]
    fn test_no_lemma_or_tagger() {
        let backend = HeuristicBackend::new();
        assert_eq!(backend.lemma("walks"), None);
        assert_eq!(backend.word_class("walks"), None);
    }
}
