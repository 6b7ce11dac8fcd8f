use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod infrastructure;
mod services;
mod tools;
mod ui;

use cli::{Cli, Commands, USAGE};
use config::ResolvedConfig;
use error::{ComposeError, ConfigError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            return ExitCode::from(usage_failure(&mut std::io::stdout()));
        }
    };

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false) // Disable ANSI escape codes for cleaner output
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error(&format!("{:#}", e));
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if !cli.project_dir.is_dir() {
        return Err(ConfigError::InvalidValue {
            field: "project-dir".to_string(),
            value: cli.project_dir.display().to_string(),
        }
        .into());
    }
    let config = ResolvedConfig::load(&cli.project_dir, cli.config.as_deref())?;

    match &cli.command {
        Commands::Health(args) => {
            commands::health::execute(args.target, &config, cli.dry_run).await?;
        }
        Commands::Config => {
            commands::show_config::execute(&config)?;
        }
        Commands::Up(_)
        | Commands::Down(_)
        | Commands::Restart(_)
        | Commands::Logs { .. }
        | Commands::Status(_)
        | Commands::Init => {
            if let Some((action, selector)) = cli.command.lifecycle() {
                commands::lifecycle::execute(action, selector, &config, cli.dry_run).await?;
            }
        }
    }
    Ok(())
}

/// Unknown command or selector: nothing has run yet. Prints the short
/// usage and returns the exit status.
fn usage_failure(out: &mut impl Write) -> u8 {
    let _ = writeln!(out, "{}", USAGE);
    2
}

/// External tool failures propagate their exit status; everything else is 1
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ComposeError>()
        .map(|e| u8::try_from(e.exit_code()).unwrap_or(1))
        .unwrap_or(1)
}
