//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `patterns` - Pattern commands (analyze, summary, detail) and text rendering
//! - `serve` - Web server command

pub mod patterns;
pub mod serve;

// Re-export command functions for main.rs
pub use patterns::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
