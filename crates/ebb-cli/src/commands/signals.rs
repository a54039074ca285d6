//! Text signal command

use anyhow::Result;
use ebb_core::{EngineConfig, SignalBackend};

use super::build_extractor;

pub fn cmd_signals(config: &EngineConfig, text: &str, backend: Option<&str>) -> Result<()> {
    let extractor = build_extractor(config, backend)?;
    let signals = extractor.extract(text);

    println!();
    println!("🔎 Text Signals ({})", extractor.backend().name());
    println!("   ─────────────────────────────────────────────");

    match signals.tone {
        Some(tone) => println!("   Tone:     {:+.2} ({})", tone, tone_label(tone)),
        None => println!("   Tone:     no opinion"),
    }

    if signals.keywords.is_empty() {
        println!("   Keywords: (none)");
    } else {
        println!("   Keywords: {}", signals.keywords.join(", "));
    }

    Ok(())
}

/// Coarse wording for a tone score
pub fn tone_label(tone: f64) -> &'static str {
    match tone {
        t if t >= 0.5 => "very positive",
        t if t >= 0.05 => "positive",
        t if t > -0.05 => "neutral",
        t if t > -0.5 => "negative",
        _ => "very negative",
    }
}
