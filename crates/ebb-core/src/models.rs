//! Domain models for Ebb

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::signals::SignalExtractor;

/// Lowest allowed rating value
pub const RATING_MIN: f64 = 0.0;
/// Highest allowed rating value
pub const RATING_MAX: f64 = 10.0;

/// Clamp a rating into [0,10]; non-finite input counts as 0
pub fn clamp_rating(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(RATING_MIN, RATING_MAX)
    } else {
        RATING_MIN
    }
}

/// Clamp a tone score into [-1,1]; non-finite input is dropped
pub fn clamp_tone(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(-1.0, 1.0))
}

// ========== Entries ==========

/// A single mood/journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub mood: f64,
    pub energy: f64,
    pub stress: f64,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub note: String,
    /// Signals derived from `note`; only ever replaced together with it
    #[serde(default)]
    pub derived: DerivedSignals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<EntryContext>,
}

impl Entry {
    /// Create an entry with clamped ratings and an empty note
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        mood: f64,
        energy: f64,
        stress: f64,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            mood: clamp_rating(mood),
            energy: clamp_rating(energy),
            stress: clamp_rating(stress),
            tags: BTreeSet::new(),
            note: String::new(),
            derived: DerivedSignals::default(),
            context: None,
        }
    }

    /// Set the note and derive its signals in one step
    pub fn with_note(mut self, note: impl Into<String>, extractor: &SignalExtractor) -> Self {
        self.set_note(note, extractor);
        self
    }

    /// Attach tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Attach externally sourced context (rest, activity)
    pub fn with_context(mut self, context: EntryContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Replace the note, recomputing derived signals from the new text
    pub fn set_note(&mut self, note: impl Into<String>, extractor: &SignalExtractor) {
        self.note = note.into();
        self.derived = extractor.extract(&self.note);
    }

    /// Number of whitespace-delimited words in the note
    pub fn word_count(&self) -> usize {
        self.note.split_whitespace().count()
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Signals derived from an entry's note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedSignals {
    /// Emotional valence in [-1,1]; absent when the note is empty or unscorable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<f64>,
    /// Up to six theme keywords, most frequent first
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl DerivedSignals {
    pub fn is_empty(&self) -> bool {
        self.tone.is_none() && self.keywords.is_empty()
    }
}

/// Optional external context resolved by the caller (health data, etc.)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryContext {
    /// Hours of rest the night before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_hours: Option<f64>,
    /// Activity count for the day (e.g. steps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_count: Option<f64>,
}

impl EntryContext {
    pub fn new(rest_hours: Option<f64>, activity_count: Option<f64>) -> Self {
        Self {
            rest_hours,
            activity_count,
        }
    }
}

/// Fixed tag vocabulary for entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Work,
    Family,
    Friends,
    Exercise,
    Sleep,
    Health,
    Food,
    Social,
    Hobby,
    Nature,
    Travel,
    Study,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Family => "family",
            Self::Friends => "friends",
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
            Self::Health => "health",
            Self::Food => "food",
            Self::Social => "social",
            Self::Hobby => "hobby",
            Self::Nature => "nature",
            Self::Travel => "travel",
            Self::Study => "study",
        }
    }

    /// All tags in declaration order
    pub fn all() -> &'static [Tag] {
        &[
            Self::Work,
            Self::Family,
            Self::Friends,
            Self::Exercise,
            Self::Sleep,
            Self::Health,
            Self::Food,
            Self::Social,
            Self::Hobby,
            Self::Nature,
            Self::Travel,
            Self::Study,
        ]
    }
}

impl std::str::FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("Unknown tag: {}", s))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Goals ==========

/// What a goal measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    #[serde(alias = "entries-today")]
    EntriesToday,
    #[serde(alias = "entries-this-week")]
    EntriesThisWeek,
    #[serde(alias = "days-journaled-this-week")]
    DaysJournaledThisWeek,
    #[serde(alias = "words-today")]
    WordsToday,
    #[serde(alias = "words-this-week")]
    WordsThisWeek,
}

impl GoalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntriesToday => "entries_today",
            Self::EntriesThisWeek => "entries_this_week",
            Self::DaysJournaledThisWeek => "days_journaled_this_week",
            Self::WordsToday => "words_today",
            Self::WordsThisWeek => "words_this_week",
        }
    }

    /// Inclusive bounds for a sensible target of this kind
    pub fn target_range(&self) -> (u32, u32) {
        match self {
            Self::EntriesToday => (1, 20),
            Self::EntriesThisWeek => (1, 100),
            Self::DaysJournaledThisWeek => (1, 7),
            Self::WordsToday => (10, 5_000),
            Self::WordsThisWeek => (50, 35_000),
        }
    }

    pub fn clamp_target(&self, target: u32) -> u32 {
        let (min, max) = self.target_range();
        target.clamp(min, max)
    }

    /// Unit noun used in progress labels
    pub fn unit(&self) -> &'static str {
        match self {
            Self::EntriesToday | Self::EntriesThisWeek => "entries",
            Self::DaysJournaledThisWeek => "days",
            Self::WordsToday | Self::WordsThisWeek => "words",
        }
    }

    /// Window phrase used in progress labels
    pub fn window(&self) -> &'static str {
        match self {
            Self::EntriesToday | Self::WordsToday => "today",
            Self::EntriesThisWeek | Self::DaysJournaledThisWeek | Self::WordsThisWeek => {
                "this week"
            }
        }
    }

    pub fn all() -> &'static [GoalKind] {
        &[
            Self::EntriesToday,
            Self::EntriesThisWeek,
            Self::DaysJournaledThisWeek,
            Self::WordsToday,
            Self::WordsThisWeek,
        ]
    }
}

impl std::str::FromStr for GoalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "entries_today" => Ok(Self::EntriesToday),
            "entries_this_week" => Ok(Self::EntriesThisWeek),
            "days_journaled_this_week" => Ok(Self::DaysJournaledThisWeek),
            "words_today" => Ok(Self::WordsToday),
            "words_this_week" => Ok(Self::WordsThisWeek),
            _ => Err(Error::InvalidData(format!("Unknown goal kind: {}", s))),
        }
    }
}

impl std::fmt::Display for GoalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined journaling goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub kind: GoalKind,
    pub target: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Goal {
    /// Create an active goal, clamping the target into the kind's range
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: GoalKind,
        target: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            target: kind.clamp_target(target),
            active: true,
            created_at,
        }
    }

    /// Check that the target lies within the kind's range
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.kind.target_range();
        if self.target < min || self.target > max {
            return Err(Error::InvalidData(format!(
                "Goal {} target {} outside {}..={} for {}",
                self.id, self.target, min, max, self.kind
            )));
        }
        Ok(())
    }
}
