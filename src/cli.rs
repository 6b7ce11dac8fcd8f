//! CLI definitions for stackctl
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Action, Selector};

/// Short usage shown when the command line cannot be parsed
pub const USAGE: &str = "\
Usage: stackctl {up|down|restart|logs|status} [main|airflow|all]
       stackctl init
       stackctl health [main|airflow|all]
       stackctl config";

#[derive(Parser, Debug)]
#[command(
    name = "stackctl",
    version,
    about = "Manage the travel recommendation container stack",
    long_about = "Starts, stops and inspects the main application stack (API, PostgreSQL, Qdrant)\n\
                  and the Airflow stack through docker compose."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory containing the compose files
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "STACKCTL_PROJECT_DIR",
        default_value = "."
    )]
    pub project_dir: PathBuf,

    /// Config file (default: <project-dir>/stackctl.yaml if present)
    #[arg(short, long, global = true, env = "STACKCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the commands that would run without running them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// Service group argument shared by lifecycle commands
#[derive(Args, Debug, Clone, Copy)]
pub struct TargetArgs {
    /// Service group: main, airflow or all (empty means all)
    #[arg(value_name = "TARGET", default_value = "all")]
    pub target: Selector,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the service group in the background
    Up(TargetArgs),

    /// Stop and remove the service group's containers
    Down(TargetArgs),

    /// Stop then start the service group
    Restart(TargetArgs),

    /// Follow combined logs of the service group (Ctrl-C to detach)
    Logs {
        #[command(flatten)]
        target: TargetArgs,

        /// Number of lines to show from the end of each container's log
        #[arg(long)]
        tail: Option<u32>,
    },

    /// Show container status of the service group
    Status(TargetArgs),

    /// Create Airflow directories and run the one-time Airflow initialization
    Init,

    /// Probe the HTTP health endpoints of the service group
    Health(TargetArgs),

    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Lifecycle action and target, for commands that dispatch to compose
    pub fn lifecycle(&self) -> Option<(Action, Selector)> {
        match self {
            Self::Up(args) => Some((Action::Up, args.target)),
            Self::Down(args) => Some((Action::Down, args.target)),
            Self::Restart(args) => Some((Action::Restart, args.target)),
            Self::Logs { target, tail } => Some((Action::Logs { tail: *tail }, target.target)),
            Self::Status(args) => Some((Action::Status, args.target)),
            Self::Init => Some((Action::Init, Selector::Airflow)),
            Self::Health(_) | Self::Config => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("stackctl").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_target_is_all() {
        let cli = parse(&["up"]).unwrap();
        assert_eq!(cli.command.lifecycle(), Some((Action::Up, Selector::All)));
    }

    #[test]
    fn test_explicit_targets() {
        let cli = parse(&["down", "main"]).unwrap();
        assert_eq!(cli.command.lifecycle(), Some((Action::Down, Selector::Main)));

        let cli = parse(&["restart", "airflow"]).unwrap();
        assert_eq!(
            cli.command.lifecycle(),
            Some((Action::Restart, Selector::Airflow))
        );

        let cli = parse(&["status", ""]).unwrap();
        assert_eq!(cli.command.lifecycle(), Some((Action::Status, Selector::All)));
    }

    #[test]
    fn test_logs_tail() {
        let cli = parse(&["logs", "main", "--tail", "100"]).unwrap();
        assert_eq!(
            cli.command.lifecycle(),
            Some((Action::Logs { tail: Some(100) }, Selector::Main))
        );
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let err = parse(&["up", "frontend"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_unknown_command_rejected() {
        let err = parse(&["deploy", "main"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_init_takes_no_selector() {
        let cli = parse(&["init"]).unwrap();
        assert_eq!(cli.command.lifecycle(), Some((Action::Init, Selector::Airflow)));
        assert!(parse(&["init", "main"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["up", "main", "--dry-run", "-C", "/srv/travel"]).unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.project_dir, PathBuf::from("/srv/travel"));
    }

    #[test]
    fn test_health_and_config_are_not_lifecycle() {
        assert!(parse(&["health"]).unwrap().command.lifecycle().is_none());
        assert!(parse(&["config"]).unwrap().command.lifecycle().is_none());
    }
}
