//! Shared helper functions for CLI commands

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::Config;

/// Load the layered configuration, apply a `--thickness` override, and validate
///
/// Validation happens here, before any document is read, so an out-of-range
/// thickness never reaches the engine.
pub fn load_config(global: &GlobalOpts, thickness: Option<u32>) -> Result<Config> {
    let mut config = Config::load(global.config.as_deref())?;
    if let Some(thickness) = thickness {
        config.thickness_mm = thickness;
    }
    config.validate()?;
    Ok(config)
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Counts characters, not bytes, so document names with non-ASCII text
/// never split inside a character.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Length or area for display (3 decimal places)
pub fn format_qty(value: f64) -> String {
    format!("{:.3}", value)
}

/// Currency amount for display
pub fn format_money(value: f64) -> String {
    format!("£{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Zeichnung-Ü-001.txt", 12), "Zeichnung...");
    }

    #[test]
    fn test_format_qty_and_money() {
        assert_eq!(format_qty(2.1389), "2.139");
        assert_eq!(format_qty(4.0), "4.000");
        assert_eq!(format_money(78.586), "£78.59");
    }
}
