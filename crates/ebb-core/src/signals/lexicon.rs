//! Lexicon backend
//!
//! Primary on-device analyzer. Tone comes from a weighted valence lexicon with
//! negation and intensifier handling, squashed into (-1,1). It also provides a
//! rule-based lemmatizer (plurals and irregular forms) and a coarse word-class
//! tagger so keywords are limited to nouns and adjectives.

use std::collections::HashMap;

use super::{tokenize, SignalBackend, WordClass};

/// Squashing constant for the summed valence (larger = flatter curve)
const NORMALIZE_ALPHA: f64 = 15.0;

/// Valence multiplier when a negator precedes a word
const NEGATION_SCALAR: f64 = -0.74;

/// Valence multiplier when an intensifier precedes a word
const INTENSIFIER_SCALAR: f64 = 1.3;

/// How many preceding tokens a negator reaches
const NEGATION_WINDOW: usize = 3;

/// (word, valence on a -4..4 scale, word class)
const VALENCE: &[(&str, f64, WordClass)] = &[
    // Positive
    ("happy", 2.7, WordClass::Adjective),
    ("happiness", 2.6, WordClass::Noun),
    ("great", 3.1, WordClass::Adjective),
    ("good", 1.9, WordClass::Adjective),
    ("nice", 1.8, WordClass::Adjective),
    ("grateful", 2.3, WordClass::Adjective),
    ("thankful", 2.2, WordClass::Adjective),
    ("gratitude", 2.3, WordClass::Noun),
    ("calm", 1.3, WordClass::Adjective),
    ("peaceful", 2.2, WordClass::Adjective),
    ("peace", 2.5, WordClass::Noun),
    ("joy", 2.8, WordClass::Noun),
    ("joyful", 2.9, WordClass::Adjective),
    ("love", 3.2, WordClass::Noun),
    ("loved", 2.9, WordClass::Verb),
    ("lovely", 2.8, WordClass::Adjective),
    ("excited", 1.4, WordClass::Adjective),
    ("exciting", 2.2, WordClass::Adjective),
    ("proud", 2.1, WordClass::Adjective),
    ("relaxed", 2.2, WordClass::Adjective),
    ("rested", 1.6, WordClass::Adjective),
    ("energized", 1.8, WordClass::Adjective),
    ("productive", 1.7, WordClass::Adjective),
    ("awesome", 3.1, WordClass::Adjective),
    ("amazing", 2.8, WordClass::Adjective),
    ("wonderful", 2.7, WordClass::Adjective),
    ("fantastic", 2.6, WordClass::Adjective),
    ("glad", 2.0, WordClass::Adjective),
    ("content", 1.5, WordClass::Adjective),
    ("cheerful", 2.5, WordClass::Adjective),
    ("hopeful", 2.3, WordClass::Adjective),
    ("hope", 1.9, WordClass::Noun),
    ("fun", 2.3, WordClass::Noun),
    ("enjoy", 2.2, WordClass::Verb),
    ("enjoyed", 2.3, WordClass::Verb),
    ("smile", 1.5, WordClass::Noun),
    ("laugh", 2.6, WordClass::Noun),
    ("sunny", 1.2, WordClass::Adjective),
    ("better", 1.9, WordClass::Adjective),
    ("best", 3.2, WordClass::Adjective),
    ("fine", 0.8, WordClass::Adjective),
    ("okay", 0.9, WordClass::Adjective),
    ("win", 2.8, WordClass::Noun),
    ("success", 2.7, WordClass::Noun),
    ("beautiful", 2.9, WordClass::Adjective),
    ("kind", 2.4, WordClass::Adjective),
    ("safe", 1.9, WordClass::Adjective),
    ("strong", 2.3, WordClass::Adjective),
    // Negative
    ("sad", -2.1, WordClass::Adjective),
    ("sadness", -1.9, WordClass::Noun),
    ("bad", -2.5, WordClass::Adjective),
    ("angry", -2.3, WordClass::Adjective),
    ("anger", -2.7, WordClass::Noun),
    ("anxious", -1.0, WordClass::Adjective),
    ("anxiety", -0.7, WordClass::Noun),
    ("stress", -1.8, WordClass::Noun),
    ("stressed", -1.4, WordClass::Adjective),
    ("stressful", -2.2, WordClass::Adjective),
    ("tired", -1.9, WordClass::Adjective),
    ("exhausted", -1.5, WordClass::Adjective),
    ("lonely", -1.5, WordClass::Adjective),
    ("alone", -1.0, WordClass::Adjective),
    ("worried", -1.2, WordClass::Adjective),
    ("worry", -1.9, WordClass::Noun),
    ("upset", -1.6, WordClass::Adjective),
    ("awful", -2.0, WordClass::Adjective),
    ("terrible", -2.1, WordClass::Adjective),
    ("horrible", -2.5, WordClass::Adjective),
    ("hate", -2.7, WordClass::Verb),
    ("depressed", -2.3, WordClass::Adjective),
    ("frustrated", -1.5, WordClass::Adjective),
    ("frustrating", -1.9, WordClass::Adjective),
    ("overwhelmed", -1.5, WordClass::Adjective),
    ("sick", -2.3, WordClass::Adjective),
    ("pain", -2.3, WordClass::Noun),
    ("hurt", -2.4, WordClass::Adjective),
    ("afraid", -2.2, WordClass::Adjective),
    ("scared", -1.9, WordClass::Adjective),
    ("nervous", -1.1, WordClass::Adjective),
    ("miserable", -2.2, WordClass::Adjective),
    ("annoyed", -1.6, WordClass::Adjective),
    ("bored", -1.1, WordClass::Adjective),
    ("boring", -1.3, WordClass::Adjective),
    ("cry", -2.1, WordClass::Verb),
    ("cried", -1.6, WordClass::Verb),
    ("panic", -2.3, WordClass::Noun),
    ("fight", -1.6, WordClass::Noun),
    ("argument", -1.5, WordClass::Noun),
    ("worse", -2.1, WordClass::Adjective),
    ("worst", -3.1, WordClass::Adjective),
    ("fail", -2.5, WordClass::Verb),
    ("failed", -2.3, WordClass::Verb),
    ("guilty", -1.8, WordClass::Adjective),
    ("rough", -0.8, WordClass::Adjective),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "neither", "nor", "without", "hardly", "barely",
    "don't", "dont", "didn't", "didnt", "doesn't", "isn't", "wasn't", "weren't", "aren't",
    "can't", "cant", "couldn't", "won't", "wouldn't", "shouldn't", "haven't", "hasn't",
];

const INTENSIFIERS: &[&str] = &[
    "very", "really", "so", "extremely", "super", "incredibly", "totally", "truly", "quite",
];

/// Determiners, pronouns, prepositions, conjunctions, auxiliaries
const CLOSED_CLASS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "i", "me", "you", "he", "she", "it", "we", "they", "them", "us", "him", "myself",
    "in", "on", "at", "by", "for", "with", "from", "to", "of", "into", "onto", "about", "after",
    "before", "over", "under", "between", "through", "during", "without", "around", "and",
    "or", "but", "so", "because", "although", "while", "if", "then", "than", "is", "am", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "can", "could", "should", "might", "must", "shall", "may", "not", "no", "yes",
    "all", "some", "any", "each", "every", "much", "many", "more", "most", "few", "other",
    "another", "such", "only", "also", "just", "very", "really", "still", "even", "always",
    "never", "often", "sometimes", "again", "too", "here", "there", "where", "when", "what",
    "which", "who", "whom", "whose", "why", "how", "one", "two", "three",
];

/// Common verbs in base and irregular past forms
const VERBS: &[&str] = &[
    "go", "went", "gone", "run", "ran", "eat", "ate", "eaten", "sleep", "slept", "take", "took",
    "taken", "give", "gave", "given", "come", "came", "see", "saw", "seen", "leave", "left",
    "bring", "brought", "buy", "bought", "tell", "told", "try", "meet", "met", "sit", "sat",
    "stay", "spend", "spent", "keep", "kept", "begin", "began", "start", "finish", "wake",
    "woke", "call", "help", "play", "watch", "read", "write", "wrote", "cook", "clean", "visit",
    "talk", "walk", "swim", "swam", "drive", "drove", "ride", "rode", "lose", "lost", "find",
    "found", "feel", "felt", "think", "thought", "know", "knew", "get", "got", "make", "made",
];

/// Irregular forms mapped to their dictionary form
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("slept", "sleep"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("left", "leave"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("told", "tell"),
    ("met", "meet"),
    ("sat", "sit"),
    ("spent", "spend"),
    ("kept", "keep"),
    ("began", "begin"),
    ("woke", "wake"),
    ("wrote", "write"),
    ("swam", "swim"),
    ("drove", "drive"),
    ("rode", "ride"),
    ("lost", "lose"),
    ("found", "find"),
    ("felt", "feel"),
    ("feeling", "feel"),
    ("feelings", "feel"),
    ("thought", "think"),
    ("knew", "know"),
    ("got", "get"),
    ("made", "make"),
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
];

/// Words ending in "s" that are not plurals
const S_EXCEPTIONS: &[&str] = &[
    "always", "perhaps", "series", "species", "news", "chaos", "yes", "was", "has", "his", "its",
    "this", "thus", "plus", "gas", "lens", "christmas", "happiness", "sadness", "stress",
    "business", "illness", "fitness", "wellness", "kindness", "loneliness", "nervous",
    "anxious", "famous", "gorgeous", "serious", "delicious", "various",
];

/// Words ending in "ly" that are not adverbs
const LY_NOUNS_ADJECTIVES: &[&str] = &[
    "family", "belly", "jelly", "holly", "lily", "rally", "ally", "bully", "july", "italy",
    "supply", "reply", "fly", "butterfly", "lovely", "lonely", "friendly", "ugly", "early",
    "daily", "weekly", "silly", "chilly", "jolly", "holy", "costly", "elderly",
];

/// Nouns ending in "ing"
const ING_NOUNS: &[&str] = &[
    "morning", "evening", "meeting", "building", "painting", "wedding", "clothing", "ceiling",
    "training", "something", "nothing", "everything", "anything", "spring", "string", "thing",
    "ring", "wing", "king", "birthday", "gathering", "offering", "beginning", "ending",
    "feeling", "cooking", "reading", "writing", "swimming", "shopping", "camping", "hiking",
];

/// Nouns/adjectives ending in "ed"
const ED_NON_VERBS: &[&str] = &[
    "bed", "red", "speed", "seed", "need", "weed", "breed", "hundred", "sacred", "naked",
    "wicked", "shed", "sled",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less", "ish"];

/// Weighted valence lexicon backend
#[derive(Debug, Clone)]
pub struct LexiconBackend {
    valence: HashMap<&'static str, (f64, WordClass)>,
}

impl LexiconBackend {
    pub fn new() -> Self {
        let valence = VALENCE
            .iter()
            .map(|(word, score, class)| (*word, (*score, *class)))
            .collect();
        Self { valence }
    }

    /// Valence of a lowercase token, trying its lemma as well
    fn valence_of(&self, lower: &str) -> Option<f64> {
        if let Some((score, _)) = self.valence.get(lower) {
            return Some(*score);
        }
        self.lemma(lower)
            .and_then(|lemma| self.valence.get(lemma.as_str()).map(|(score, _)| *score))
    }
}

impl Default for LexiconBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBackend for LexiconBackend {
    fn tone(&self, text: &str) -> Option<f64> {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .map(|t| t.to_lowercase().replace('’', "'"))
            .collect();

        let mut sum = 0.0;
        let mut matched = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = self.valence_of(token) else {
                continue;
            };

            if i > 0 && INTENSIFIERS.contains(&tokens[i - 1].as_str()) {
                valence *= INTENSIFIER_SCALAR;
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i]
                .iter()
                .any(|t| NEGATORS.contains(&t.as_str()))
            {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
            matched += 1;
        }

        if matched == 0 {
            return None;
        }

        let score = sum / (sum * sum + NORMALIZE_ALPHA).sqrt();
        Some(score.clamp(-1.0, 1.0))
    }

    fn lemma(&self, token: &str) -> Option<String> {
        if let Some((_, lemma)) = IRREGULAR_LEMMAS.iter().find(|(form, _)| *form == token) {
            return Some((*lemma).to_string());
        }

        let len = token.len();
        if len > 4 && token.ends_with("ies") {
            return Some(format!("{}y", &token[..len - 3]));
        }
        if token.ends_with("sses") {
            return Some(token[..len - 2].to_string());
        }
        if len > 4
            && (token.ends_with("ches") || token.ends_with("shes") || token.ends_with("xes"))
        {
            return Some(token[..len - 2].to_string());
        }
        if len > 3
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
            && !S_EXCEPTIONS.contains(&token)
        {
            return Some(token[..len - 1].to_string());
        }

        Some(token.to_string())
    }

    fn word_class(&self, token: &str) -> Option<WordClass> {
        if CLOSED_CLASS.contains(&token) || NEGATORS.contains(&token) {
            return Some(WordClass::Other);
        }
        if let Some((_, class)) = self.valence.get(token) {
            return Some(*class);
        }
        if VERBS.contains(&token) {
            return Some(WordClass::Verb);
        }

        let len = token.len();
        if len > 4 && token.ends_with("ly") && !LY_NOUNS_ADJECTIVES.contains(&token) {
            return Some(WordClass::Adverb);
        }
        if len > 5 && token.ends_with("ing") && !ING_NOUNS.contains(&token) {
            return Some(WordClass::Verb);
        }
        if len > 4 && token.ends_with("ed") && !ED_NON_VERBS.contains(&token) {
            return Some(WordClass::Verb);
        }
        if ADJECTIVE_SUFFIXES.iter().any(|s| token.ends_with(s)) {
            return Some(WordClass::Adjective);
        }

        Some(WordClass::Noun)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
