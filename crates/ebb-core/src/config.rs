//! Engine configuration
//!
//! Holds the tunable product parameters: score weights, the first weekday,
//! the text signal backend, and extra keyword stopwords.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/ebb/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::scoring::ScoreWeights;
use crate::signals::BackendKind;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Tolerance when checking that weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Resolved engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Base weights for the well-being score
    pub weights: ScoreWeights,
    /// First day of the calendar week
    pub week_start: Weekday,
    /// Text signal backend to construct at startup
    pub backend: BackendKind,
    /// Additional keyword stopwords
    pub extra_stopwords: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            week_start: Weekday::Mon,
            backend: BackendKind::Lexicon,
            extra_stopwords: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Load from the default override location, else the embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit override path (embedded defaults if it is missing)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse config from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Check weights are usable
    ///
    /// Each weight must be finite and non-negative and at least one must be
    /// positive. A sum other than 1.0 is allowed since scoring renormalizes.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in self.weights.named() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Config(format!(
                    "Weight `{}` must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let sum = self.weights.sum();
        if sum <= 0.0 {
            return Err(Error::Config("At least one weight must be positive".into()));
        }
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            tracing::warn!(sum, "Score weights do not sum to 1.0; they will be renormalized");
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("ebb").join("config").join("engine.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    let content = match path {
        Some(ref path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading engine config override");
            fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    weights: Option<RawWeights>,
    calendar: Option<RawCalendar>,
    signals: Option<RawSignals>,
}

#[derive(Debug, Deserialize)]
struct RawWeights {
    mood: Option<f64>,
    low_stress: Option<f64>,
    energy: Option<f64>,
    tone: Option<f64>,
    rest: Option<f64>,
    activity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCalendar {
    week_start: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSignals {
    backend: Option<String>,
    extra_stopwords: Option<Vec<String>>,
}

fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut config = EngineConfig::default();

    if let Some(weights) = raw.weights {
        let w = &mut config.weights;
        w.mood = weights.mood.unwrap_or(w.mood);
        w.low_stress = weights.low_stress.unwrap_or(w.low_stress);
        w.energy = weights.energy.unwrap_or(w.energy);
        w.tone = weights.tone.unwrap_or(w.tone);
        w.rest = weights.rest.unwrap_or(w.rest);
        w.activity = weights.activity.unwrap_or(w.activity);
    }

    if let Some(week_start) = raw.calendar.and_then(|c| c.week_start) {
        config.week_start = week_start
            .parse::<Weekday>()
            .map_err(|_| Error::Config(format!("Unknown week_start: {}", week_start)))?;
    }

    if let Some(signals) = raw.signals {
        if let Some(backend) = signals.backend {
            config.backend = backend.parse().map_err(Error::Config)?;
        }
        if let Some(words) = signals.extra_stopwords {
            config.extra_stopwords = words;
        }
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!((config.weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            [weights]
            mood = 0.40
            low_stress = 0.10

            [calendar]
            week_start = "Sunday"
            "#,
        )
        .unwrap();

        assert_eq!(config.weights.mood, 0.40);
        assert_eq!(config.weights.low_stress, 0.10);
        assert_eq!(config.weights.energy, ScoreWeights::default().energy);
        assert_eq!(config.week_start, Weekday::Sun);
        assert_eq!(config.backend, BackendKind::Lexicon);
    }

    #[test]
    fn test_signals_section() {
        let config = EngineConfig::from_toml_str(
            r#"
            [signals]
            backend = "heuristic"
            extra_stopwords = ["honestly", "basically"]
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, BackendKind::Heuristic);
        assert_eq!(config.extra_stopwords.len(), 2);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(
            EngineConfig::from_toml_str("").unwrap(),
            EngineConfig::default()
        );
    }

    #[test]
    fn test_rejects_negative_weight() {
        let result = EngineConfig::from_toml_str("[weights]\nrest = -0.1\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let result = EngineConfig::from_toml_str(
            "[weights]\nmood = 0\nlow_stress = 0\nenergy = 0\ntone = 0\nrest = 0\nactivity = 0\n",
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_backend_and_weekday() {
        assert!(EngineConfig::from_toml_str("[signals]\nbackend = \"cloud\"\n").is_err());
        assert!(EngineConfig::from_toml_str("[calendar]\nweek_start = \"someday\"\n").is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = EngineConfig::from_toml_str("[weights\nmood = ");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_from_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[calendar]\nweek_start = \"sat\"").unwrap();

        let config = EngineConfig::load_from(file.path()).unwrap();
        assert_eq!(config.week_start, Weekday::Sat);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
