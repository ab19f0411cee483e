//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use crate::domain::history::RecordId;

/// ClipTracker - clipboard history for the terminal
#[derive(Parser, Debug)]
#[command(name = "clip-tracker")]
#[command(version)]
#[command(about = "Records clipboard text and lets you recall it later")]
#[command(long_about = None)]
pub struct Cli {
    /// Run the capture daemon in the foreground
    #[arg(long)]
    pub daemon: bool,

    /// History database path
    #[arg(long, value_name = "PATH", env = "CLIP_TRACKER_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Reject `--daemon` combined with a subcommand
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.daemon && self.command.is_some() {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--daemon cannot be used with a subcommand",
            ));
        }
        Ok(())
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recent entries, most recent first
    List {
        /// Number of entries to show
        #[arg(short = 'n', long, value_name = "LIMIT")]
        limit: Option<usize>,
    },
    /// Print the full text of an entry
    Show {
        /// Entry id, as shown by `list`
        id: RecordId,
    },
    /// Put an entry back on the clipboard
    Copy {
        /// Entry id, as shown by `list`
        id: RecordId,
    },
    /// Record the current clipboard text once
    Capture,
    /// Remove entries older than `expiration_days`
    Prune,
    /// Show daemon and database status
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "history_limit",
    "expiration_days",
    "watcher",
    "poll_interval_ms",
    "clipboard_backend",
    "notify",
    "database_path",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::try_parse_from(["clip-tracker"]).unwrap();
        assert!(!cli.daemon);
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_daemon() {
        let cli = Cli::try_parse_from(["clip-tracker", "--daemon"]).unwrap();
        assert!(cli.daemon);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn daemon_conflicts_with_subcommand() {
        let cli = Cli::try_parse_from(["clip-tracker", "--daemon", "list"]).unwrap();
        let err = cli.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn cli_parses_list_limit() {
        let cli = Cli::try_parse_from(["clip-tracker", "list", "-n", "5"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { limit: Some(5) })));
    }

    #[test]
    fn cli_parses_show_id() {
        let cli = Cli::try_parse_from(["clip-tracker", "show", "42"]).unwrap();
        match cli.command {
            Some(Commands::Show { id }) => assert_eq!(id, RecordId::new(42)),
            other => panic!("Expected Show command, got {:?}", other),
        }
    }

    #[test]
    fn cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["clip-tracker", "copy", "abc"]).is_err());
        assert!(Cli::try_parse_from(["clip-tracker", "copy", "0"]).is_err());
    }

    #[test]
    fn global_db_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["clip-tracker", "list", "--db", "/tmp/h.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/h.db")));
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["clip-tracker", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli =
            Cli::try_parse_from(["clip-tracker", "config", "set", "expiration_days", "7"]).unwrap();
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "expiration_days");
            assert_eq!(value, "7");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("history_limit"));
        assert!(is_valid_config_key("expiration_days"));
        assert!(is_valid_config_key("database_path"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
