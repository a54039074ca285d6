//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, entry and goal loading, extractor setup)
//! - `signals` - Text signal extraction
//! - `score` - Well-being score breakdowns
//! - `trends` - Trend reports and period resolution
//! - `goals` - Goal progress
//! - `config` - Resolved configuration display

pub mod config;
pub mod core;
pub mod goals;
pub mod score;
pub mod signals;
pub mod trends;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use goals::*;
pub use score::*;
pub use signals::*;
pub use trends::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Text progress bar for a fraction in [0,1]
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
