//! JSON import of entry and goal exports
//!
//! Entries coming from disk bypass [`Entry::new`], so ratings and tone are
//! clamped here and notes without derived signals are analyzed on load.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{clamp_rating, clamp_tone, Entry, EntryContext, Goal};
use crate::signals::SignalExtractor;

/// Parse a JSON array of entries
pub fn parse_entries(json: &str, extractor: &SignalExtractor) -> Result<Vec<Entry>> {
    let raw: Vec<Entry> = serde_json::from_str(json)?;

    let mut derived = 0;
    let entries: Vec<Entry> = raw
        .into_iter()
        .map(|mut entry| {
            normalize(&mut entry);
            if entry.derived.is_empty() && !entry.note.trim().is_empty() {
                entry.derived = extractor.extract(&entry.note);
                derived += 1;
            }
            entry
        })
        .collect();

    tracing::debug!(entries = entries.len(), derived, "Imported entries");
    Ok(entries)
}

/// Parse a JSON array of goals, rejecting out-of-range targets
///
/// Goal kinds may be written `entries_today` or `entries-today`.
pub fn parse_goals(json: &str) -> Result<Vec<Goal>> {
    let goals: Vec<Goal> = serde_json::from_str(json)?;
    for goal in &goals {
        goal.validate()?;
    }
    tracing::debug!(goals = goals.len(), "Imported goals");
    Ok(goals)
}

pub fn read_entries(path: &Path, extractor: &SignalExtractor) -> Result<Vec<Entry>> {
    parse_entries(&fs::read_to_string(path)?, extractor)
}

pub fn read_goals(path: &Path) -> Result<Vec<Goal>> {
    parse_goals(&fs::read_to_string(path)?)
}

fn normalize(entry: &mut Entry) {
    entry.mood = clamp_rating(entry.mood);
    entry.energy = clamp_rating(entry.energy);
    entry.stress = clamp_rating(entry.stress);
    entry.derived.tone = entry.derived.tone.and_then(clamp_tone);

    if let Some(ctx) = entry.context {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        entry.context = Some(EntryContext::new(
            finite(ctx.rest_hours),
            finite(ctx.activity_count),
        ));
    }
}
