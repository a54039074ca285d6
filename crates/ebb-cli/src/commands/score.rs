//! Well-being score command

use std::path::Path;

use anyhow::Result;
use ebb_core::{EngineConfig, ScoreBreakdown, WellBeingScorer};
use serde_json::json;

use super::{build_extractor, load_entries, progress_bar};

pub fn cmd_score(
    config: &EngineConfig,
    entries_path: &Path,
    id: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let extractor = build_extractor(config, None)?;
    let mut entries = load_entries(entries_path, &extractor)?;

    if let Some(id) = id {
        entries.retain(|e| e.id == id);
        if entries.is_empty() {
            anyhow::bail!("No entry with id {}", id);
        }
    }

    let scorer = WellBeingScorer::from_config(config);

    if json_output {
        let scores: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "id": e.id,
                    "timestamp": e.timestamp,
                    "score": scorer.score(e),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    for entry in &entries {
        let breakdown = scorer.score(entry);
        println!();
        println!(
            "💚 {} ({})  Score: {:.0}",
            entry.id,
            entry.timestamp.format("%Y-%m-%d %H:%M UTC"),
            breakdown.total
        );
        print_breakdown(&breakdown);
    }

    Ok(())
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    println!("   {:14} │ {:>6} │ {:>5} │ {:>6}", "Factor", "Weight", "Value", "Points");
    println!("   ───────────────┼────────┼───────┼────────");
    for component in &breakdown.components {
        match component.normalized_value {
            Some(value) => println!(
                "   {:14} │ {:>5.1}% │ {:>5.2} │ {:>6.1} {}",
                component.title,
                component.effective_weight * 100.0,
                value,
                component.points,
                progress_bar(value, 10)
            ),
            None => println!(
                "   {:14} │ {:>6} │ {:>5} │ {:>6}",
                component.title, "-", "n/a", "-"
            ),
        }
    }
}
