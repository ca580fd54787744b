//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Framecast - ASCII game multiplexer for chat bots
///
/// Multiplexes a game engine's frames to many chat users as
/// rate-limited ASCII updates.
#[derive(Parser, Debug)]
#[command(name = "framecast")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FRAMECAST_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the session driver against the built-in demo engine
    Run(RunArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Number of demo sessions to pre-create
    #[arg(long, default_value = "1")]
    pub demo_users: usize,

    /// Stop after this many ticks (runs until Ctrl-C if omitted)
    #[arg(long)]
    pub ticks: Option<u64>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_run() {
        let cli = Cli::parse_from(["framecast", "run", "--demo-users", "3"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.demo_users, 3);
                assert!(args.ticks.is_none());
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_run_with_ticks() {
        let cli = Cli::parse_from(["framecast", "run", "--ticks", "5"]);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.ticks, Some(5)),
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_config_show() {
        let cli = Cli::parse_from(["framecast", "config", "show"]);
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.action, Some(ConfigAction::Show))),
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn cli_parses_config_init_force() {
        let cli = Cli::parse_from(["framecast", "config", "init", "--force"]);
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(args.action, Some(ConfigAction::Init { force: true })))
            }
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["framecast", "config", "path"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["framecast", "-vv", "config", "path"]);
        assert_eq!(cli.verbose, 2);
    }
}
