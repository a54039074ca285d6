//! Pluggable text signal backends
//!
//! Derives a tone score and theme keywords from an entry's note. The backend
//! is chosen once at startup and everything downstream only sees
//! [`DerivedSignals`].
//!
//! # Architecture
//!
//! - `SignalBackend` trait: tone plus optional lemma / word-class capabilities
//! - `SignalClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `LexiconBackend`, `HeuristicBackend`, `MockBackend`
//! - `SignalExtractor`: the configured front door used by callers
//!
//! # Configuration
//!
//! Environment variables:
//! - `EBB_SIGNAL_BACKEND`: Backend to use (lexicon, heuristic, mock).
//!   Overrides the `signals.backend` config value.

mod heuristic;
mod lexicon;
mod mock;

pub use heuristic::HeuristicBackend;
pub use lexicon::LexiconBackend;
pub use mock::MockBackend;

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{clamp_tone, DerivedSignals};

/// Maximum number of keywords kept per note
pub const MAX_KEYWORDS: usize = 6;

/// Shortest token considered as a keyword
pub const MIN_KEYWORD_LEN: usize = 3;

/// Environment variable that overrides the configured backend
pub const BACKEND_ENV_VAR: &str = "EBB_SIGNAL_BACKEND";

/// Function words never reported as themes
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "his", "has", "him", "how", "its", "who", "did", "she", "too", "that",
    "with", "have", "this", "will", "your", "from", "they", "been", "were", "what", "when",
    "than", "then", "them", "just", "also", "into", "very", "some", "there", "their", "about",
    "would", "could", "should", "which", "because", "really",
];

/// Filler verbs that show up in nearly every note
const FILLER_VERBS: &[&str] = &[
    "feel", "felt", "feeling", "get", "got", "getting", "make", "made", "went", "going", "doing",
    "done", "say", "said", "think", "thought", "know", "like", "want", "need", "seem", "seemed",
    "today",
];

/// Coarse word classes a backend tagger can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    Noun,
    Adjective,
    Verb,
    Adverb,
    Other,
}

impl WordClass {
    /// Whether tokens of this class can become keywords
    pub fn is_keyword_candidate(&self) -> bool {
        matches!(self, WordClass::Noun | WordClass::Adjective)
    }
}

/// Trait defining the interface for all text signal backends
///
/// Backends should be Send + Sync so a single extractor can be shared.
pub trait SignalBackend: Send + Sync {
    /// Emotional valence of the text in [-1,1], or None for "no opinion"
    fn tone(&self, text: &str) -> Option<f64>;

    /// Up to six theme keywords, most frequent first
    fn keywords(&self, text: &str) -> Vec<String> {
        extract_keywords(self, text, &BTreeSet::new())
    }

    /// Dictionary form of a lowercase token, if the backend can lemmatize
    fn lemma(&self, _token: &str) -> Option<String> {
        None
    }

    /// Word class of a lowercase token, if the backend has a tagger
    fn word_class(&self, _token: &str) -> Option<WordClass> {
        None
    }

    /// Backend name (for logging)
    fn name(&self) -> &'static str;
}

/// Which backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Lexicon,
    Heuristic,
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexicon => "lexicon",
            Self::Heuristic => "heuristic",
            Self::Mock => "mock",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lexicon" => Ok(Self::Lexicon),
            "heuristic" | "fallback" => Ok(Self::Heuristic),
            "mock" => Ok(Self::Mock),
            _ => Err(format!(
                "Unknown signal backend: {} (valid: lexicon, heuristic, mock)",
                s
            )),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Concrete signal client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum SignalClient {
    /// Weighted valence lexicon with lemmatizer and word-class tagger
    Lexicon(LexiconBackend),
    /// Positive/negative word counting, no lemma or tagger
    Heuristic(HeuristicBackend),
    /// Deterministic fake for tests
    Mock(MockBackend),
}

impl SignalClient {
    pub fn from_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Lexicon => SignalClient::Lexicon(LexiconBackend::new()),
            BackendKind::Heuristic => SignalClient::Heuristic(HeuristicBackend::new()),
            BackendKind::Mock => SignalClient::Mock(MockBackend::new()),
        }
    }

    /// Create a client from `EBB_SIGNAL_BACKEND`, falling back to `default`
    pub fn from_env(default: BackendKind) -> Self {
        let kind = match std::env::var(BACKEND_ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|e: String| {
                tracing::warn!(backend = %value, error = %e, "Unknown signal backend, using default");
                default
            }),
            Err(_) => default,
        };
        Self::from_kind(kind)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            SignalClient::Lexicon(_) => BackendKind::Lexicon,
            SignalClient::Heuristic(_) => BackendKind::Heuristic,
            SignalClient::Mock(_) => BackendKind::Mock,
        }
    }
}

// Implement SignalBackend for SignalClient by delegating to the inner backend
impl SignalBackend for SignalClient {
    fn tone(&self, text: &str) -> Option<f64> {
        match self {
            SignalClient::Lexicon(b) => b.tone(text),
            SignalClient::Heuristic(b) => b.tone(text),
            SignalClient::Mock(b) => b.tone(text),
        }
    }

    fn keywords(&self, text: &str) -> Vec<String> {
        match self {
            SignalClient::Lexicon(b) => b.keywords(text),
            SignalClient::Heuristic(b) => b.keywords(text),
            SignalClient::Mock(b) => b.keywords(text),
        }
    }

    fn lemma(&self, token: &str) -> Option<String> {
        match self {
            SignalClient::Lexicon(b) => b.lemma(token),
            SignalClient::Heuristic(b) => b.lemma(token),
            SignalClient::Mock(b) => b.lemma(token),
        }
    }

    fn word_class(&self, token: &str) -> Option<WordClass> {
        match self {
            SignalClient::Lexicon(b) => b.word_class(token),
            SignalClient::Heuristic(b) => b.word_class(token),
            SignalClient::Mock(b) => b.word_class(token),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SignalClient::Lexicon(b) => b.name(),
            SignalClient::Heuristic(b) => b.name(),
            SignalClient::Mock(b) => b.name(),
        }
    }
}

/// Derives [`DerivedSignals`] for notes using one backend
#[derive(Clone)]
pub struct SignalExtractor {
    client: SignalClient,
    extra_stopwords: BTreeSet<String>,
}

impl SignalExtractor {
    pub fn new(client: SignalClient) -> Self {
        tracing::debug!(backend = client.name(), "Signal extractor ready");
        Self {
            client,
            extra_stopwords: BTreeSet::new(),
        }
    }

    pub fn lexicon() -> Self {
        Self::new(SignalClient::Lexicon(LexiconBackend::new()))
    }

    pub fn heuristic() -> Self {
        Self::new(SignalClient::Heuristic(HeuristicBackend::new()))
    }

    /// Build from config; `EBB_SIGNAL_BACKEND` wins over the configured backend
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(SignalClient::from_env(config.backend))
            .with_extra_stopwords(config.extra_stopwords.iter().cloned())
    }

    /// Add stopwords on top of the built-in set (compared lowercase)
    pub fn with_extra_stopwords(mut self, words: impl IntoIterator<Item = String>) -> Self {
        self.extra_stopwords
            .extend(words.into_iter().map(|w| w.trim().to_lowercase()));
        self
    }

    /// Derive tone and keywords for a note
    pub fn extract(&self, note: &str) -> DerivedSignals {
        if note.trim().is_empty() {
            return DerivedSignals::default();
        }

        DerivedSignals {
            tone: self.tone(note),
            keywords: self.keywords(note),
        }
    }

    /// Clamped tone for a note
    pub fn tone(&self, note: &str) -> Option<f64> {
        if note.trim().is_empty() {
            return None;
        }
        self.client.tone(note).and_then(clamp_tone)
    }

    pub fn keywords(&self, note: &str) -> Vec<String> {
        extract_keywords(&self.client, note, &self.extra_stopwords)
    }

    pub fn backend(&self) -> &SignalClient {
        &self.client
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::lexicon()
    }
}

fn word_regex() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*").expect("valid regex"))
}

/// Split text into word tokens, keeping inner apostrophes ("don't")
pub fn tokenize(text: &str) -> Vec<&str> {
    word_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether a normalized token is in the built-in stopword set
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token) || FILLER_VERBS.contains(&token)
}

/// Keyword pipeline shared by every backend
///
/// Letters-only tokens of length >= 3 are normalized (backend lemma, else
/// lowercase), stopwords dropped, restricted to nouns/adjectives when the
/// backend can tag, then ranked by frequency with ascending lexical tie-break.
pub fn extract_keywords<B: SignalBackend + ?Sized>(
    backend: &B,
    text: &str,
    extra_stopwords: &BTreeSet<String>,
) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        if token.chars().count() < MIN_KEYWORD_LEN || !token.chars().all(char::is_alphabetic) {
            continue;
        }

        let lower = token.to_lowercase();
        let normalized = backend
            .lemma(&lower)
            .map(|l| l.to_lowercase())
            .unwrap_or_else(|| lower.clone());

        if is_stopword(&normalized) || extra_stopwords.contains(&normalized) {
            continue;
        }

        if let Some(class) = backend.word_class(&lower) {
            if !class.is_keyword_candidate() {
                continue;
            }
        }

        *counts.entry(normalized).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}
