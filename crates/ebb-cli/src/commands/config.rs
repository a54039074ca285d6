//! Configuration display command

use std::path::Path;

use anyhow::Result;
use ebb_core::config::default_config_path;
use ebb_core::signals::BACKEND_ENV_VAR;
use ebb_core::EngineConfig;

pub fn cmd_config(config: &EngineConfig, explicit_path: Option<&Path>) -> Result<()> {
    println!();
    println!("⚙️  Engine Configuration");
    println!("   ─────────────────────────────────────────────");

    let source = match explicit_path {
        Some(path) => path.display().to_string(),
        None => match default_config_path() {
            Some(path) if path.exists() => path.display().to_string(),
            Some(path) => format!("built-in defaults (override: {})", path.display()),
            None => "built-in defaults".to_string(),
        },
    };
    println!("   Source:      {}", source);

    println!("   Week starts: {}", config.week_start);
    match std::env::var(BACKEND_ENV_VAR) {
        Ok(value) => println!(
            "   Backend:     {} ({}={} overrides at startup)",
            config.backend, BACKEND_ENV_VAR, value
        ),
        Err(_) => println!("   Backend:     {}", config.backend),
    }
    if !config.extra_stopwords.is_empty() {
        println!("   Stopwords:   {}", config.extra_stopwords.join(", "));
    }

    println!();
    println!("   {:14} │ {:>6}", "Weight", "Base");
    println!("   ───────────────┼────────");
    for (name, weight) in config.weights.named() {
        println!("   {:14} │ {:>6.2}", name, weight);
    }
    println!("   {:14} │ {:>6.2}", "sum", config.weights.sum());

    Ok(())
}
