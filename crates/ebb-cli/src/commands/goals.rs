//! Goal progress command

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use ebb_core::{EngineConfig, GoalEvaluator, GoalProgress};

use super::{build_extractor, load_entries, load_goals, progress_bar, truncate};

pub fn cmd_goals(
    config: &EngineConfig,
    entries_path: &Path,
    goals_path: &Path,
    include_inactive: bool,
    json: bool,
) -> Result<()> {
    let extractor = build_extractor(config, None)?;
    let entries = load_entries(entries_path, &extractor)?;
    let goals = load_goals(goals_path)?;

    let evaluator = GoalEvaluator::from_config(config);
    let now = Utc::now();

    let progress: Vec<GoalProgress> = if include_inactive {
        goals
            .iter()
            .map(|g| evaluator.evaluate(g, &entries, now))
            .collect()
    } else {
        evaluator.evaluate_active(&goals, &entries, now)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    println!();
    println!("🎯 Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    if progress.is_empty() {
        println!("   No goals to show.");
        return Ok(());
    }

    let titles: HashMap<&str, (&str, bool)> = goals
        .iter()
        .map(|g| (g.id.as_str(), (g.title.as_str(), g.active)))
        .collect();

    for p in &progress {
        let (title, active) = titles.get(p.goal_id.as_str()).copied().unwrap_or(("", true));
        let status = if p.is_complete {
            "✅"
        } else if active {
            "⏳"
        } else {
            "💤"
        };
        println!(
            "   {} {:24} {} {}",
            status,
            truncate(title, 24),
            progress_bar(p.fraction, 20),
            p.label
        );
    }

    let complete = progress.iter().filter(|p| p.is_complete).count();
    println!();
    println!("   {} of {} complete", complete, progress.len());

    Ok(())
}
