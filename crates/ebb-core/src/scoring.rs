//! Well-being score
//!
//! Combines an entry's ratings, note tone, and optional rest/activity context
//! into a 0-100 composite. Each factor is normalized into [0,1] or reported as
//! unavailable; base weights of the available factors are rescaled so they
//! sum to 1, so missing optional signals never drag the score toward 0.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{clamp_rating, clamp_tone, Entry};

/// Guard for the renormalization denominator
const WEIGHT_EPSILON: f64 = 1e-9;

/// Activity count treated as "full credit"
const ACTIVITY_FULL_CREDIT: f64 = 10_000.0;

/// Upper bound applied to raw activity counts
const ACTIVITY_MAX: f64 = 30_000.0;

/// Minimum credit for any recorded activity
const ACTIVITY_FLOOR: f64 = 0.10;

/// Credit for rest outside the 5-11 hour band
const REST_OUTSIDE_BAND: f64 = 0.25;

/// Factors contributing to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Mood,
    LowStress,
    Energy,
    Tone,
    Rest,
    Activity,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mood => "mood",
            Self::LowStress => "low_stress",
            Self::Energy => "energy",
            Self::Tone => "tone",
            Self::Rest => "rest",
            Self::Activity => "activity",
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Mood => "Mood",
            Self::LowStress => "Low stress",
            Self::Energy => "Energy",
            Self::Tone => "Note tone",
            Self::Rest => "Rest",
            Self::Activity => "Activity",
        }
    }

    /// All factors in breakdown order
    pub fn all() -> &'static [ComponentKind] {
        &[
            Self::Mood,
            Self::LowStress,
            Self::Energy,
            Self::Tone,
            Self::Rest,
            Self::Activity,
        ]
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Base weight per factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub mood: f64,
    pub low_stress: f64,
    pub energy: f64,
    pub tone: f64,
    pub rest: f64,
    pub activity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            mood: 0.35,
            low_stress: 0.15,
            energy: 0.15,
            tone: 0.15,
            rest: 0.10,
            activity: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn get(&self, kind: ComponentKind) -> f64 {
        match kind {
            ComponentKind::Mood => self.mood,
            ComponentKind::LowStress => self.low_stress,
            ComponentKind::Energy => self.energy,
            ComponentKind::Tone => self.tone,
            ComponentKind::Rest => self.rest,
            ComponentKind::Activity => self.activity,
        }
    }

    /// (config key, weight) pairs
    pub fn named(&self) -> [(&'static str, f64); 6] {
        let all = ComponentKind::all();
        std::array::from_fn(|i| (all[i].as_str(), self.get(all[i])))
    }

    pub fn sum(&self) -> f64 {
        ComponentKind::all().iter().map(|k| self.get(*k)).sum()
    }
}

/// One factor's contribution to the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub kind: ComponentKind,
    pub title: String,
    /// Renormalized weight; 0 exactly when `normalized_value` is None
    pub effective_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<f64>,
    pub points: f64,
}

/// Composite score with per-factor breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-100
    pub total: f64,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn component(&self, kind: ComponentKind) -> Option<&ScoreComponent> {
        self.components.iter().find(|c| c.kind == kind)
    }

    pub fn effective_weight_sum(&self) -> f64 {
        self.components.iter().map(|c| c.effective_weight).sum()
    }

    /// Components that contributed a value
    pub fn available(&self) -> impl Iterator<Item = &ScoreComponent> {
        self.components
            .iter()
            .filter(|c| c.normalized_value.is_some())
    }
}

/// Rest hours to [0,1]
///
/// Full credit for 7-9h, ramp 0->1 over 5-7h, taper 1.0->0.75 over 9-11h,
/// flat 0.25 outside 5-11h.
pub fn normalize_rest(hours: f64) -> f64 {
    match hours {
        h if (7.0..=9.0).contains(&h) => 1.0,
        h if (5.0..7.0).contains(&h) => (h - 5.0) / 2.0,
        h if h > 9.0 && h <= 11.0 => 1.0 - 0.25 * (h - 9.0) / 2.0,
        _ => REST_OUTSIDE_BAND,
    }
}

/// Activity count to [0.10,1] with diminishing returns
pub fn normalize_activity(count: f64) -> f64 {
    let count = count.clamp(0.0, ACTIVITY_MAX);
    let t = (count / ACTIVITY_FULL_CREDIT).min(1.0);
    (1.0 - (1.0 - t).powi(2)).max(ACTIVITY_FLOOR)
}

/// Computes [`ScoreBreakdown`]s with a fixed set of base weights
#[derive(Debug, Clone, Default)]
pub struct WellBeingScorer {
    weights: ScoreWeights,
}

impl WellBeingScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.weights)
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Normalized value of one factor, or None when its signal is missing
    pub fn normalized_value(&self, kind: ComponentKind, entry: &Entry) -> Option<f64> {
        let context = entry.context.as_ref();
        match kind {
            ComponentKind::Mood => Some(clamp_rating(entry.mood) / 10.0),
            ComponentKind::Energy => Some(clamp_rating(entry.energy) / 10.0),
            ComponentKind::LowStress => Some(1.0 - clamp_rating(entry.stress) / 10.0),
            ComponentKind::Tone => entry
                .derived
                .tone
                .and_then(clamp_tone)
                .map(|tone| (tone + 1.0) / 2.0),
            ComponentKind::Rest => context
                .and_then(|c| c.rest_hours)
                .filter(|h| h.is_finite())
                .map(normalize_rest),
            ComponentKind::Activity => context
                .and_then(|c| c.activity_count)
                .filter(|a| a.is_finite())
                .map(normalize_activity),
        }
    }

    /// Score an entry
    pub fn score(&self, entry: &Entry) -> ScoreBreakdown {
        let values: Vec<(ComponentKind, Option<f64>)> = ComponentKind::all()
            .iter()
            .map(|kind| (*kind, self.normalized_value(*kind, entry)))
            .collect();

        let available_weight: f64 = values
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(kind, _)| self.weights.get(*kind))
            .sum();
        let denominator = available_weight.max(WEIGHT_EPSILON);

        let components: Vec<ScoreComponent> = values
            .into_iter()
            .map(|(kind, value)| {
                let effective_weight = match value {
                    Some(_) => self.weights.get(kind) / denominator,
                    None => 0.0,
                };
                ScoreComponent {
                    kind,
                    title: kind.title().to_string(),
                    effective_weight,
                    normalized_value: value,
                    points: value.unwrap_or(0.0) * effective_weight * 100.0,
                }
            })
            .collect();

        let total = components.iter().map(|c| c.points).sum::<f64>().clamp(0.0, 100.0);

        ScoreBreakdown { total, components }
    }

    /// Just the 0-100 total
    pub fn total(&self, entry: &Entry) -> f64 {
        self.score(entry).total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryContext;
    use chrono::{TimeZone, Utc};

    const TOLERANCE: f64 = 1e-9;

    fn entry(mood: f64, energy: f64, stress: f64) -> Entry {
        let ts = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        Entry::new("e", ts, mood, energy, stress)
    }

    fn with_tone(mut entry: Entry, tone: f64) -> Entry {
        entry.derived.tone = Some(tone);
        entry
    }

    fn full_entry(mood: f64, energy: f64, stress: f64) -> Entry {
        with_tone(entry(mood, energy, stress), 0.2)
            .with_context(EntryContext::new(Some(8.0), Some(6_000.0)))
    }

    #[test]
    fn test_all_factors_weights_sum_to_one() {
        let breakdown = WellBeingScorer::default().score(&full_entry(7.0, 6.0, 3.0));
        assert_eq!(breakdown.available().count(), 6);
        assert!((breakdown.effective_weight_sum() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_all_factors_weighted_average() {
        let scorer = WellBeingScorer::default();
        let e = full_entry(8.0, 6.0, 2.0);
        let breakdown = scorer.score(&e);

        let activity = normalize_activity(6_000.0);
        let expected = 100.0
            * (0.35 * 0.8 + 0.15 * 0.8 + 0.15 * 0.6 + 0.15 * 0.6 + 0.10 * 1.0 + 0.10 * activity);
        assert!((breakdown.total - expected).abs() < 1e-6);
    }

    #[test]
    fn test_missing_tone_has_zero_weight() {
        let breakdown = WellBeingScorer::default()
            .score(&entry(5.0, 5.0, 5.0).with_context(EntryContext::new(Some(8.0), Some(1.0))));

        let tone = breakdown.component(ComponentKind::Tone).unwrap();
        assert_eq!(tone.effective_weight, 0.0);
        assert_eq!(tone.normalized_value, None);
        assert_eq!(tone.points, 0.0);
        assert!((breakdown.effective_weight_sum() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_missing_optional_signals_do_not_shrink_score() {
        // Ratings only: mood/low-stress/energy carry all the weight
        let breakdown = WellBeingScorer::default().score(&entry(10.0, 10.0, 0.0));
        assert!((breakdown.total - 100.0).abs() < 1e-6);

        let mood = breakdown.component(ComponentKind::Mood).unwrap();
        assert!((mood.effective_weight - 0.35 / 0.65).abs() < TOLERANCE);
    }

    #[test]
    fn test_neutral_entry_scores_fifty() {
        let breakdown = WellBeingScorer::default().score(&with_tone(entry(5.0, 5.0, 5.0), 0.0));
        assert!((breakdown.total - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_effective_weight_zero_iff_value_absent() {
        let breakdown = WellBeingScorer::default()
            .score(&entry(3.0, 4.0, 9.0).with_context(EntryContext::new(None, Some(2_000.0))));
        for component in &breakdown.components {
            assert_eq!(
                component.effective_weight == 0.0,
                component.normalized_value.is_none(),
                "{:?}",
                component.kind
            );
        }
    }

    #[test]
    fn test_total_in_range_for_all_inputs() {
        let scorer = WellBeingScorer::default();
        let tones = [None, Some(-1.0), Some(0.0), Some(1.0)];
        let contexts = [
            None,
            Some(EntryContext::new(Some(0.0), None)),
            Some(EntryContext::new(None, Some(45_000.0))),
            Some(EntryContext::new(Some(8.0), Some(10_000.0))),
        ];

        for mood in 0..=10 {
            for energy in [0.0, 5.0, 10.0] {
                for stress in [0.0, 5.0, 10.0] {
                    for tone in tones {
                        for context in contexts {
                            let mut e = entry(mood as f64, energy, stress);
                            e.derived.tone = tone;
                            e.context = context;
                            let total = scorer.total(&e);
                            assert!((0.0..=100.0).contains(&total), "total {}", total);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let mut e = entry(5.0, 5.0, 5.0);
        e.mood = 42.0;
        e.stress = -7.0;
        e.derived.tone = Some(9.0);
        let breakdown = WellBeingScorer::default().score(&e);

        assert_eq!(
            breakdown.component(ComponentKind::Mood).unwrap().normalized_value,
            Some(1.0)
        );
        assert_eq!(
            breakdown.component(ComponentKind::LowStress).unwrap().normalized_value,
            Some(1.0)
        );
        assert_eq!(
            breakdown.component(ComponentKind::Tone).unwrap().normalized_value,
            Some(1.0)
        );
        assert!(breakdown.total <= 100.0);
    }

    #[test]
    fn test_non_finite_context_is_unavailable() {
        let e = entry(5.0, 5.0, 5.0).with_context(EntryContext::new(Some(f64::NAN), None));
        let breakdown = WellBeingScorer::default().score(&e);
        assert_eq!(
            breakdown.component(ComponentKind::Rest).unwrap().normalized_value,
            None
        );
    }

    #[test]
    fn test_rest_curve() {
        assert_eq!(normalize_rest(8.0), 1.0);
        assert_eq!(normalize_rest(7.0), 1.0);
        assert_eq!(normalize_rest(9.0), 1.0);
        assert_eq!(normalize_rest(6.0), 0.5);
        assert_eq!(normalize_rest(5.0), 0.0);
        assert_eq!(normalize_rest(10.0), 0.875);
        assert_eq!(normalize_rest(11.0), 0.75);
        assert_eq!(normalize_rest(4.0), 0.25);
        assert_eq!(normalize_rest(12.5), 0.25);
        assert_eq!(normalize_rest(-1.0), 0.25);
    }

    #[test]
    fn test_activity_curve() {
        assert_eq!(normalize_activity(0.0), 0.10);
        assert_eq!(normalize_activity(-50.0), 0.10);
        assert!((normalize_activity(1_000.0) - 0.19).abs() < 1e-9);
        assert!((normalize_activity(5_000.0) - 0.75).abs() < 1e-9);
        assert_eq!(normalize_activity(10_000.0), 1.0);
        assert_eq!(normalize_activity(80_000.0), 1.0);
    }

    #[test]
    fn test_custom_weights_renormalize() {
        let weights = ScoreWeights {
            mood: 2.0,
            low_stress: 0.0,
            energy: 0.0,
            tone: 2.0,
            rest: 0.0,
            activity: 0.0,
        };
        let scorer = WellBeingScorer::new(weights);
        let breakdown = scorer.score(&with_tone(entry(10.0, 0.0, 10.0), -1.0));
        // mood 1.0 and tone 0.0 at half weight each
        assert!((breakdown.total - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_weights_named_and_sum() {
        let weights = ScoreWeights::default();
        assert!((weights.sum() - 1.0).abs() < TOLERANCE);
        assert_eq!(weights.named()[0], ("mood", 0.35));
        assert_eq!(weights.named()[5], ("activity", 0.10));
    }
}
