//! Goal progress
//!
//! Evaluates user-defined goals against an entry snapshot for today or the
//! local calendar week containing "now".

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::config::EngineConfig;
use crate::models::{Entry, Goal, GoalKind};

/// Progress of one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub kind: GoalKind,
    pub value: u32,
    pub target: u32,
    /// e.g. "2 / 3 entries today"
    pub label: String,
    /// value / target clamped to [0,1]; 0 when target is 0
    pub fraction: f64,
    pub is_complete: bool,
}

/// Evaluates goals in a given calendar
#[derive(Debug, Clone)]
pub struct GoalEvaluator<Tz: TimeZone> {
    calendar: Calendar<Tz>,
}

impl GoalEvaluator<Local> {
    /// Local time zone with the configured first weekday
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Calendar::local(config.week_start))
    }
}

impl<Tz: TimeZone> GoalEvaluator<Tz> {
    pub fn new(calendar: Calendar<Tz>) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &Calendar<Tz> {
        &self.calendar
    }

    /// Evaluate one goal (active or not)
    pub fn evaluate(&self, goal: &Goal, entries: &[Entry], now: DateTime<Utc>) -> GoalProgress {
        let value = self.value_for(goal.kind, entries, now);
        let target = goal.target;

        let fraction = if target > 0 {
            (f64::from(value) / f64::from(target)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        GoalProgress {
            goal_id: goal.id.clone(),
            kind: goal.kind,
            value,
            target,
            label: format!(
                "{} / {} {} {}",
                value,
                target,
                goal.kind.unit(),
                goal.kind.window()
            ),
            fraction,
            is_complete: target > 0 && value >= target,
        }
    }

    /// Evaluate the active goals, preserving input order
    pub fn evaluate_active(
        &self,
        goals: &[Goal],
        entries: &[Entry],
        now: DateTime<Utc>,
    ) -> Vec<GoalProgress> {
        let progress: Vec<GoalProgress> = goals
            .iter()
            .filter(|g| g.active)
            .map(|g| self.evaluate(g, entries, now))
            .collect();

        tracing::debug!(
            goals = goals.len(),
            active = progress.len(),
            complete = progress.iter().filter(|p| p.is_complete).count(),
            "Goal evaluation complete"
        );

        progress
    }

    /// Raw measured value for a goal kind
    pub fn value_for(&self, kind: GoalKind, entries: &[Entry], now: DateTime<Utc>) -> u32 {
        let today = self.calendar.day(&now);
        let (week_start, week_end) = self.calendar.week_range(&now);

        let in_today = |e: &&Entry| self.calendar.day(&e.timestamp) == today;
        let in_week = |e: &&Entry| {
            let day = self.calendar.day(&e.timestamp);
            day >= week_start && day < week_end
        };

        let count = match kind {
            GoalKind::EntriesToday => entries.iter().filter(in_today).count(),
            GoalKind::EntriesThisWeek => entries.iter().filter(in_week).count(),
            GoalKind::DaysJournaledThisWeek => entries
                .iter()
                .filter(in_week)
                .map(|e| self.calendar.day(&e.timestamp))
                .collect::<BTreeSet<NaiveDate>>()
                .len(),
            GoalKind::WordsToday => entries
                .iter()
                .filter(in_today)
                .map(Entry::word_count)
                .sum(),
            GoalKind::WordsThisWeek => entries.iter().filter(in_week).map(Entry::word_count).sum(),
        };

        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
