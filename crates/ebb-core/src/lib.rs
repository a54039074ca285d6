//! Ebb Core Library
//!
//! On-device analytics for a private mood journal:
//! - Text signal extraction (tone and keywords) with pluggable backends
//! - Composite well-being score with a per-factor breakdown
//! - Goal progress for today and the current local week
//! - Trend aggregation by day, time of day, weekday, and tag
//! - Engine configuration with embedded defaults and a user override
//! - JSON import of entry and goal exports

pub mod calendar;
pub mod config;
pub mod error;
pub mod goals;
pub mod import;
pub mod models;
pub mod scoring;
pub mod signals;
pub mod trends;

pub use calendar::Calendar;
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use goals::{GoalEvaluator, GoalProgress};
pub use import::{parse_entries, parse_goals, read_entries, read_goals};
pub use models::{DerivedSignals, Entry, EntryContext, Goal, GoalKind, Tag};
pub use scoring::{ComponentKind, ScoreBreakdown, ScoreComponent, ScoreWeights, WellBeingScorer};
pub use signals::{
    BackendKind, HeuristicBackend, LexiconBackend, MockBackend, SignalBackend, SignalClient,
    SignalExtractor, WordClass,
};
pub use trends::{filter_entries, TimeOfDay, TrendAggregator, TrendsReport};
