//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (entry text, config values)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Format one history row: right-aligned id, then the elided text
    pub fn format_entry(&self, id: i64, preview: &str, id_width: usize) -> String {
        let label = format!("{:>width$}", id, width = id_width);
        format!("{}  {}", label.dimmed(), preview)
    }

    /// Print one history row to stdout
    pub fn history_entry(&self, id: i64, preview: &str, id_width: usize) {
        println!("{}", self.format_entry(id, preview, id_width));
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
