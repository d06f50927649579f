//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Status lines go to stderr
//! so JSON written to stdout can be piped.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print a step message (for multi-step operations)
    pub fn step(step: usize, total: usize, message: &str) {
        println!(
            "{} {}",
            format!("[{}/{}]", step, total).dimmed(),
            message
        );
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "brand", "brands"), "1 brand");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(3, "brand", "brands"), "3 brands");
        assert_eq!(format_count(0, "field", "fields"), "0 fields");
    }
}
