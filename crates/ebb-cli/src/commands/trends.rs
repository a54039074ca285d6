//! Trend report command and period resolution

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use ebb_core::{filter_entries, Calendar, EngineConfig, TrendAggregator, TrendsReport};

use super::{build_extractor, load_entries, truncate};

/// Resolve a period name to a half-open instant range in the given calendar
///
/// A `None` bound is open.
pub fn resolve_period<Tz: TimeZone>(
    period: &str,
    calendar: &Calendar<Tz>,
    now: DateTime<Utc>,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let today = calendar.day(&now);

    let from = match period.to_lowercase().as_str() {
        "last-7-days" => Some(today - Duration::days(6)),
        "last-30-days" => Some(today - Duration::days(29)),
        "this-month" => NaiveDate::from_ymd_opt(today.year(), today.month(), 1),
        "this-year" => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        "all" => None,
        _ => anyhow::bail!(
            "Unknown period: {}. Available: last-7-days, last-30-days, this-month, this-year, all",
            period
        ),
    };

    Ok((from.map(|d| calendar.start_of_day(d)), None))
}

pub fn cmd_trends(
    config: &EngineConfig,
    entries_path: &Path,
    period: &str,
    rolling_days: u32,
    json: bool,
) -> Result<()> {
    let extractor = build_extractor(config, None)?;
    let entries = load_entries(entries_path, &extractor)?;

    let aggregator = TrendAggregator::from_config(config);
    let now = Utc::now();
    let (from, to) = resolve_period(period, aggregator.calendar(), now)?;
    let entries = filter_entries(&entries, from, to);
    tracing::debug!(period, from = ?from, in_period = entries.len(), "Resolved trend period");

    let report = aggregator.report(&entries, now, rolling_days);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, period);
    Ok(())
}

fn print_report(report: &TrendsReport, period: &str) {
    println!();
    println!("📈 Mood Trends ({})", period);
    println!("   ─────────────────────────────────────────────");

    if report.entry_count == 0 {
        println!("   No entries found.");
        return;
    }

    println!("   Entries:        {}", report.entry_count);
    if let Some(avg) = report.average_score {
        println!("   Average score:  {:.1}", avg);
    }
    match report.rolling_average_score {
        Some(avg) => println!("   Last {} days:    {:.1}", report.rolling_days, avg),
        None => println!("   Last {} days:    no entries", report.rolling_days),
    }

    println!();
    println!("   {:12} │ {:>5} │ {:>5}", "Day", "Mood", "Count");
    println!("   ─────────────┼───────┼───────");
    for point in &report.daily {
        println!(
            "   {:12} │ {:>5.1} │ {:>5}",
            point.day.to_string(),
            point.average_mood,
            point.entry_count
        );
    }

    println!();
    println!("   {:12} │ {:>5} │ {:>5}", "Time of day", "Mood", "Count");
    println!("   ─────────────┼───────┼───────");
    for bucket in &report.time_of_day {
        println!(
            "   {:12} │ {:>5.1} │ {:>5}",
            bucket.bucket.label(),
            bucket.average_mood,
            bucket.entry_count
        );
    }

    println!();
    println!("   {:12} │ {:>5} │ {:>5}", "Weekday", "Mood", "Count");
    println!("   ─────────────┼───────┼───────");
    for day in &report.weekdays {
        println!(
            "   {:12} │ {:>5.1} │ {:>5}",
            day.weekday.to_string(),
            day.average_mood,
            day.entry_count
        );
    }

    if !report.tags.is_empty() {
        println!();
        println!("   {:12} │ {:>5} │ {:>5}", "Tag", "Mood", "Count");
        println!("   ─────────────┼───────┼───────");
        for tag in &report.tags {
            println!(
                "   {:12} │ {:>5.1} │ {:>5}",
                tag.tag.as_str(),
                tag.average_mood,
                tag.entry_count
            );
        }
    }

    if !report.keywords.is_empty() {
        println!();
        let themes: Vec<String> = report
            .keywords
            .iter()
            .map(|k| format!("{} ({})", truncate(&k.keyword, 20), k.count))
            .collect();
        println!("   Themes: {}", themes.join(", "));
    }
}
