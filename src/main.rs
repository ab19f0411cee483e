//! ClipTracker CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clip_tracker::cli::{
    app::load_merged_config,
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    history_cmd::{run_capture, run_copy, run_list, run_prune, run_show, run_status},
    logging::init_logging,
    presenter::Presenter,
    EXIT_ERROR,
};
use clip_tracker::domain::config::AppConfig;
use clip_tracker::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }

    init_logging(cli.verbose);
    let presenter = Presenter::new();

    // Config subcommands work on the file itself, not the merged view
    let command = match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        other => other,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        database_path: cli.db.as_ref().map(|p| p.display().to_string()),
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Route to appropriate handler
    if cli.daemon {
        return run_daemon(config).await;
    }

    match command {
        None => run_list(&config, None, &presenter),
        Some(Commands::List { limit }) => run_list(&config, limit, &presenter),
        Some(Commands::Show { id }) => run_show(&config, id, &presenter),
        Some(Commands::Copy { id }) => run_copy(&config, id, &presenter).await,
        Some(Commands::Capture) => run_capture(&config, &presenter).await,
        Some(Commands::Prune) => run_prune(&config, &presenter),
        Some(Commands::Status) => run_status(&config, &presenter),
        Some(Commands::Config { .. }) => ExitCode::SUCCESS,
    }
}
