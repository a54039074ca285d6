//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Resolve the engine config (override path or defaults)
//! - `build_extractor` - Signal extractor with an optional backend override
//! - `load_entries` / `load_goals` - Read JSON exports

use std::path::Path;

use anyhow::{Context, Result};
use ebb_core::{BackendKind, EngineConfig, Entry, Goal, SignalClient, SignalExtractor};

/// Load config from an explicit path, else the user override, else defaults
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            EngineConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => EngineConfig::load().context("Failed to load engine config"),
    }
}

/// Signal extractor for the config, optionally forcing a backend
pub fn build_extractor(config: &EngineConfig, backend: Option<&str>) -> Result<SignalExtractor> {
    let extractor = match backend {
        Some(name) => {
            let kind: BackendKind = name.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            SignalExtractor::new(SignalClient::from_kind(kind))
                .with_extra_stopwords(config.extra_stopwords.iter().cloned())
        }
        None => SignalExtractor::from_config(config),
    };
    tracing::debug!(backend = %extractor.backend().kind(), "Using signal backend");
    Ok(extractor)
}

/// Read an entries export; notes without derived signals are analyzed on load
pub fn load_entries(path: &Path, extractor: &SignalExtractor) -> Result<Vec<Entry>> {
    let entries = ebb_core::read_entries(path, extractor)
        .with_context(|| format!("Failed to read entries from {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = entries.len(), "Loaded entries");
    Ok(entries)
}

pub fn load_goals(path: &Path) -> Result<Vec<Goal>> {
    let goals = ebb_core::read_goals(path)
        .with_context(|| format!("Failed to read goals from {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = goals.len(), "Loaded goals");
    Ok(goals)
}
