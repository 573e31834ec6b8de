//! vaultrc CLI - inspect and validate the Vault CLI client configuration.

use clap::Parser;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;
use vaultrc::cli::{Cli, Commands};
use vaultrc::commands::{self, Output};
use vaultrc::config::CachedClientConfig;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "VAULTRC_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();
    let human = cli.human_readable;

    // Built once and handed to every command that needs the current config.
    let cache = CachedClientConfig::from_env();

    let result = run_command(cli.command, &cache, cli.config_path.as_deref(), human);

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_command(
    command: Commands,
    cache: &CachedClientConfig,
    config_path: Option<&Path>,
    human: bool,
) -> Result<(), vaultrc::Error> {
    match command {
        Commands::Show => {
            let result = commands::show(cache, config_path)?;
            output(&result, human);
        }
        Commands::Path => {
            let result = commands::path(cache.resolver(), config_path)?;
            output(&result, human);
        }
        Commands::Check { file } => {
            let result = commands::check(cache.resolver(), &file)?;
            output(&result, human);
        }
    }
    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
