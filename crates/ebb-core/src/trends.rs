//! Trend aggregation
//!
//! Grouped mood and score statistics over a caller-filtered entry list.
//! All means are unweighted and the input is never mutated.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::config::EngineConfig;
use crate::models::{clamp_rating, Entry, Tag};
use crate::scoring::WellBeingScorer;

/// Coarse part of the local day an entry was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Morning [5,12), afternoon [12,17), evening [17,22), night otherwise
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }

    pub fn all() -> &'static [TimeOfDay] {
        &[Self::Morning, Self::Afternoon, Self::Evening, Self::Night]
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Mean mood of one local day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAverage {
    pub day: NaiveDate,
    pub average_mood: f64,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayAverage {
    pub bucket: TimeOfDay,
    pub average_mood: f64,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    pub average_mood: f64,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMoodAverage {
    pub tag: Tag,
    pub average_mood: f64,
    pub entry_count: usize,
}

/// How often a derived keyword appears across entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// All trend series for one entry list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsReport {
    pub entry_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    pub rolling_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_average_score: Option<f64>,
    pub daily: Vec<DailyAverage>,
    pub time_of_day: Vec<TimeOfDayAverage>,
    pub weekdays: Vec<WeekdayAverage>,
    pub tags: Vec<TagMoodAverage>,
    pub keywords: Vec<KeywordCount>,
}

/// Running unweighted mean
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Number of keywords included in a [`TrendsReport`]
const REPORT_KEYWORD_LIMIT: usize = 10;

/// Computes trend series in a given calendar
#[derive(Debug, Clone)]
pub struct TrendAggregator<Tz: TimeZone> {
    calendar: Calendar<Tz>,
    scorer: WellBeingScorer,
}

impl TrendAggregator<Local> {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            Calendar::local(config.week_start),
            WellBeingScorer::from_config(config),
        )
    }
}

impl<Tz: TimeZone> TrendAggregator<Tz> {
    pub fn new(calendar: Calendar<Tz>, scorer: WellBeingScorer) -> Self {
        Self { calendar, scorer }
    }

    pub fn calendar(&self) -> &Calendar<Tz> {
        &self.calendar
    }

    /// Mean mood per local day, ascending by day
    pub fn daily_averages(&self, entries: &[Entry]) -> Vec<DailyAverage> {
        let mut days: BTreeMap<NaiveDate, Mean> = BTreeMap::new();
        for entry in entries {
            days.entry(self.calendar.day(&entry.timestamp))
                .or_default()
                .push(clamp_rating(entry.mood));
        }

        days.into_iter()
            .filter_map(|(day, mean)| {
                Some(DailyAverage {
                    day,
                    average_mood: mean.value()?,
                    entry_count: mean.count,
                })
            })
            .collect()
    }

    /// Mean mood per time-of-day bucket; empty buckets omitted
    pub fn time_of_day_averages(&self, entries: &[Entry]) -> Vec<TimeOfDayAverage> {
        let mut buckets: BTreeMap<TimeOfDay, Mean> = BTreeMap::new();
        for entry in entries {
            let bucket = TimeOfDay::from_hour(self.calendar.hour(&entry.timestamp));
            buckets.entry(bucket).or_default().push(clamp_rating(entry.mood));
        }

        buckets
            .into_iter()
            .filter_map(|(bucket, mean)| {
                Some(TimeOfDayAverage {
                    bucket,
                    average_mood: mean.value()?,
                    entry_count: mean.count,
                })
            })
            .collect()
    }

    /// Mean mood per weekday, starting at the configured first weekday
    pub fn weekday_averages(&self, entries: &[Entry]) -> Vec<WeekdayAverage> {
        let mut weekdays = [Mean::default(); 7];
        for entry in entries {
            let idx = self.calendar.weekday(&entry.timestamp).num_days_from_monday() as usize;
            weekdays[idx].push(clamp_rating(entry.mood));
        }

        self.calendar
            .ordered_weekdays()
            .into_iter()
            .filter_map(|weekday| {
                let mean = weekdays[weekday.num_days_from_monday() as usize];
                Some(WeekdayAverage {
                    weekday,
                    average_mood: mean.value()?,
                    entry_count: mean.count,
                })
            })
            .collect()
    }

    /// Mean mood per tag
    ///
    /// Sorted by entry count (desc), then mean mood (desc), then tag order.
    pub fn tag_mood_averages(&self, entries: &[Entry]) -> Vec<TagMoodAverage> {
        let mut tags: BTreeMap<Tag, Mean> = BTreeMap::new();
        for entry in entries {
            for tag in &entry.tags {
                tags.entry(*tag).or_default().push(clamp_rating(entry.mood));
            }
        }

        let mut averages: Vec<TagMoodAverage> = tags
            .into_iter()
            .filter_map(|(tag, mean)| {
                Some(TagMoodAverage {
                    tag,
                    average_mood: mean.value()?,
                    entry_count: mean.count,
                })
            })
            .collect();

        // Stable sort keeps declaration order for full ties
        averages.sort_by(|a, b| {
            b.entry_count.cmp(&a.entry_count).then_with(|| {
                b.average_mood
                    .partial_cmp(&a.average_mood)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        averages
    }

    /// Mean well-being score over the last `days` local days up to `now`
    ///
    /// The window opens at the start of the local day `days - 1` days before
    /// today and closes at `now` (inclusive). None when nothing falls inside,
    /// which includes `days == 0`.
    pub fn rolling_average_score(
        &self,
        entries: &[Entry],
        days: u32,
        now: DateTime<Utc>,
    ) -> Option<f64> {
        if days == 0 {
            return None;
        }

        // A window reaching past the calendar range has no lower bound
        let today = self.calendar.day(&now);
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .map(|first_day| self.calendar.start_of_day(first_day));

        let mut mean = Mean::default();
        for entry in entries
            .iter()
            .filter(|e| start.map_or(true, |s| e.timestamp >= s) && e.timestamp <= now)
        {
            mean.push(self.scorer.total(entry));
        }

        tracing::debug!(days, start = ?start, %now, in_window = mean.count, "Rolling score window");
        mean.value()
    }

    /// Mean well-being score over every entry
    pub fn average_score(&self, entries: &[Entry]) -> Option<f64> {
        let mut mean = Mean::default();
        for entry in entries {
            mean.push(self.scorer.total(entry));
        }
        mean.value()
    }

    /// Most frequent derived keywords (count desc, then lexical asc)
    pub fn keyword_frequencies(&self, entries: &[Entry], limit: usize) -> Vec<KeywordCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in entries {
            for keyword in &entry.derived.keywords {
                *counts.entry(keyword.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<KeywordCount> = counts
            .into_iter()
            .map(|(keyword, count)| KeywordCount {
                keyword: keyword.to_string(),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
        ranked.truncate(limit);
        ranked
    }

    /// Every trend series in one serializable report
    pub fn report(&self, entries: &[Entry], now: DateTime<Utc>, rolling_days: u32) -> TrendsReport {
        let report = TrendsReport {
            entry_count: entries.len(),
            average_score: self.average_score(entries),
            rolling_days,
            rolling_average_score: self.rolling_average_score(entries, rolling_days, now),
            daily: self.daily_averages(entries),
            time_of_day: self.time_of_day_averages(entries),
            weekdays: self.weekday_averages(entries),
            tags: self.tag_mood_averages(entries),
            keywords: self.keyword_frequencies(entries, REPORT_KEYWORD_LIMIT),
        };

        tracing::debug!(
            entries = report.entry_count,
            days = report.daily.len(),
            tags = report.tags.len(),
            "Built trends report"
        );

        report
    }
}

/// Copies of the entries with `from <= timestamp < to`, in input order
///
/// An absent bound is open.
pub fn filter_entries(
    entries: &[Entry],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Entry> {
    entries
        .iter()
        .filter(|e| from.map_or(true, |f| e.timestamp >= f))
        .filter(|e| to.map_or(true, |t| e.timestamp < t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryContext;

    fn utc(d: u32, h: u32) -> DateTime<Utc> {
        // March 2024: the 4th is a Monday
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    fn aggregator(week_start: Weekday) -> TrendAggregator<Utc> {
        TrendAggregator::new(Calendar::new(Utc, week_start), WellBeingScorer::default())
    }

    fn entry(id: &str, ts: DateTime<Utc>, mood: f64) -> Entry {
        Entry::new(id, ts, mood, 5.0, 5.0)
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn test_daily_averages() {
        let entries = vec![
            entry("c", utc(6, 9), 7.0),
            entry("a", utc(4, 9), 4.0),
            entry("b", utc(4, 20), 8.0),
            entry("d", utc(5, 9), 3.0),
        ];

        let daily = aggregator(Weekday::Mon).daily_averages(&entries);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].day, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(daily[0].average_mood, 6.0);
        assert_eq!(daily[0].entry_count, 2);
        assert_eq!(daily[1].average_mood, 3.0);
        assert_eq!(daily[2].average_mood, 7.0);
        assert!(daily.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        let agg = aggregator(Weekday::Mon);
        assert!(agg.daily_averages(&[]).is_empty());
        assert!(agg.time_of_day_averages(&[]).is_empty());
        assert!(agg.weekday_averages(&[]).is_empty());
        assert!(agg.tag_mood_averages(&[]).is_empty());
        assert!(agg.keyword_frequencies(&[], 5).is_empty());
        assert_eq!(agg.average_score(&[]), None);
    }

    #[test]
    fn test_time_of_day_skips_empty_buckets() {
        let entries = vec![
            entry("a", utc(4, 23), 2.0),
            entry("b", utc(4, 8), 6.0),
            entry("c", utc(5, 9), 8.0),
        ];

        let buckets = aggregator(Weekday::Mon).time_of_day_averages(&entries);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].bucket, TimeOfDay::Morning);
        assert_eq!(buckets[0].average_mood, 7.0);
        assert_eq!(buckets[1].bucket, TimeOfDay::Night);
        assert_eq!(buckets[1].entry_count, 1);
    }

    #[test]
    fn test_weekday_order_follows_week_start() {
        let entries = vec![
            entry("mon", utc(4, 9), 4.0),
            entry("sun", utc(10, 9), 6.0),
            entry("wed", utc(6, 9), 8.0),
        ];

        let monday_first = aggregator(Weekday::Mon).weekday_averages(&entries);
        let order: Vec<Weekday> = monday_first.iter().map(|w| w.weekday).collect();
        assert_eq!(order, vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]);

        let sunday_first = aggregator(Weekday::Sun).weekday_averages(&entries);
        let order: Vec<Weekday> = sunday_first.iter().map(|w| w.weekday).collect();
        assert_eq!(order, vec![Weekday::Sun, Weekday::Mon, Weekday::Wed]);
    }

    #[test]
    fn test_tag_sort_order() {
        let entries = vec![
            entry("a", utc(4, 9), 4.0).with_tags([Tag::Work, Tag::Sleep]),
            entry("b", utc(4, 10), 6.0).with_tags([Tag::Work]),
            entry("c", utc(4, 11), 9.0).with_tags([Tag::Exercise]),
            entry("d", utc(4, 12), 9.0).with_tags([Tag::Family]),
        ];

        let tags = aggregator(Weekday::Mon).tag_mood_averages(&entries);
        let order: Vec<Tag> = tags.iter().map(|t| t.tag).collect();
        // Work has most entries; Family and Exercise tie on count and mood
        assert_eq!(order, vec![Tag::Work, Tag::Family, Tag::Exercise, Tag::Sleep]);
        assert_eq!(tags[0].average_mood, 5.0);
        assert_eq!(tags[0].entry_count, 2);
    }

    #[test]
    fn test_rolling_average_window() {
        let now = utc(10, 12);
        let agg = aggregator(Weekday::Mon);
        let entries = vec![
            // Before the 7-day window (starts on the 4th)
            entry("old", utc(3, 23), 0.0),
            entry("in", utc(4, 0), 10.0),
            // After now
            entry("future", utc(10, 13), 0.0),
        ];

        let expected = agg.scorer.total(&entries[1]);
        assert_eq!(agg.rolling_average_score(&entries, 7, now), Some(expected));
    }

    #[test]
    fn test_rolling_average_empty_window() {
        let agg = aggregator(Weekday::Mon);
        let entries = vec![entry("old", utc(1, 9), 5.0)];
        assert_eq!(agg.rolling_average_score(&entries, 7, utc(10, 12)), None);
        assert_eq!(agg.rolling_average_score(&entries, 0, utc(1, 12)), None);
    }

    #[test]
    fn test_rolling_average_huge_window() {
        let agg = aggregator(Weekday::Mon);
        let entries = vec![
            entry("old", utc(1, 9), 5.0),
            entry("future", utc(11, 9), 5.0),
        ];
        let expected = agg.scorer.total(&entries[0]);

        assert_eq!(
            agg.rolling_average_score(&entries, u32::MAX, utc(10, 12)),
            Some(expected)
        );
        assert_eq!(
            agg.rolling_average_score(&entries, 200_000_000, utc(10, 12)),
            Some(expected)
        );
        assert_eq!(agg.rolling_average_score(&entries, 1, utc(1, 12)), Some(expected));
    }

    #[test]
    fn test_out_of_range_mood_is_clamped() {
        let mut high = entry("high", utc(4, 9), 5.0).with_tags([Tag::Work]);
        high.mood = 42.0;
        let mut low = entry("low", utc(4, 10), 5.0).with_tags([Tag::Work]);
        low.mood = -3.0;
        let mut nan = entry("nan", utc(5, 9), 5.0);
        nan.mood = f64::NAN;
        let entries = vec![high, low, nan];

        let agg = aggregator(Weekday::Mon);
        let daily = agg.daily_averages(&entries);
        assert_eq!(daily[0].average_mood, 5.0);
        assert_eq!(daily[1].average_mood, 0.0);

        let buckets = agg.time_of_day_averages(&entries);
        assert!(buckets.iter().all(|b| (0.0..=10.0).contains(&b.average_mood)));
        let weekdays = agg.weekday_averages(&entries);
        assert!(weekdays.iter().all(|w| (0.0..=10.0).contains(&w.average_mood)));
        let tags = agg.tag_mood_averages(&entries);
        assert_eq!(tags[0].average_mood, 5.0);
    }

    #[test]
    fn test_rolling_average_uses_scores() {
        let agg = aggregator(Weekday::Mon);
        let entries = vec![
            entry("a", utc(9, 9), 10.0).with_context(EntryContext::new(Some(8.0), None)),
            entry("b", utc(10, 9), 0.0),
        ];
        let expected = (agg.scorer.total(&entries[0]) + agg.scorer.total(&entries[1])) / 2.0;
        let avg = agg.rolling_average_score(&entries, 2, utc(10, 12)).unwrap();
        assert!((avg - expected).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_frequencies() {
        let mut a = entry("a", utc(4, 9), 5.0);
        a.derived.keywords = vec!["park".into(), "dog".into()];
        let mut b = entry("b", utc(5, 9), 5.0);
        b.derived.keywords = vec!["dog".into(), "rain".into()];

        let top = aggregator(Weekday::Mon).keyword_frequencies(&[a, b], 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], KeywordCount { keyword: "dog".into(), count: 2 });
        assert_eq!(top[1].keyword, "park");
    }

    #[test]
    fn test_report_bundles_series() {
        let entries = vec![
            entry("a", utc(4, 9), 4.0).with_tags([Tag::Work]),
            entry("b", utc(5, 20), 8.0),
        ];
        let report = aggregator(Weekday::Mon).report(&entries, utc(5, 21), 7);
        assert_eq!(report.entry_count, 2);
        assert_eq!(report.rolling_days, 7);
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.tags.len(), 1);
        assert!(report.average_score.is_some());
        assert_eq!(report.average_score, report.rolling_average_score);
    }

    #[test]
    fn test_filter_entries_half_open() {
        let entries = vec![
            entry("a", utc(4, 0), 5.0),
            entry("b", utc(5, 0), 5.0),
            entry("c", utc(6, 0), 5.0),
        ];

        let ids: Vec<String> = filter_entries(&entries, Some(utc(4, 0)), Some(utc(6, 0)))
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        assert_eq!(filter_entries(&entries, None, None).len(), 3);
        assert_eq!(filter_entries(&entries, Some(utc(5, 1)), None).len(), 1);
    }
}
