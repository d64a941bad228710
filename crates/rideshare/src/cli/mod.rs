//! Command-line interface for rideshare.
//!
//! This module provides the CLI structure for the `rideshare` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClearCommand, ConfigCommand, FindCommand, ListCommand, OutputFormat, RegisterCommand,
    StatusCommand,
};

/// rideshare - Find classmates heading your way
///
/// Register where you are and where you are going, then look up other
/// students with the same destination. Runs the interactive menu when no
/// command is given.
#[derive(Debug, Parser)]
#[command(name = "rideshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Data file to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu,

    /// Register or update your location and destination
    Register(RegisterCommand),

    /// Find students going to a destination
    Find(FindCommand),

    /// List all registered students
    List(ListCommand),

    /// Delete every registered student
    Clear(ClearCommand),

    /// Show data file and directory status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Whether this command reads or writes the data file.
    #[must_use]
    pub fn uses_directory(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            data_file: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "rideshare");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["rideshare"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_register() {
        let cli = Cli::try_parse_from(["rideshare", "register", "Ali", "Saddar", "Library"]).unwrap();
        match cli.command {
            Some(Command::Register(cmd)) => {
                assert_eq!(cmd.name, "Ali");
                assert_eq!(cmd.destination, "Saddar");
                assert_eq!(cmd.location, "Library");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_requires_all_fields() {
        assert!(Cli::try_parse_from(["rideshare", "register", "Ali", "Saddar"]).is_err());
    }

    #[test]
    fn test_parse_find_with_format() {
        let cli = Cli::try_parse_from(["rideshare", "find", "Saddar", "--format", "json"]).unwrap();
        match cli.command {
            Some(Command::Find(cmd)) => {
                assert_eq!(cmd.destination, "Saddar");
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_clear_yes() {
        let cli = Cli::try_parse_from(["rideshare", "clear", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Clear(ClearCommand { yes: true }))
        ));
    }

    #[test]
    fn test_parse_with_data_file() {
        let cli = Cli::try_parse_from(["rideshare", "list", "--data-file", "/tmp/rides.txt"]).unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/rides.txt")));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["rideshare", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_config_commands_skip_the_data_file() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command.unwrap();

        assert!(!parse(&["rideshare", "config", "path"]).uses_directory());
        assert!(!parse(&["rideshare", "config", "show", "--json"]).uses_directory());
        assert!(parse(&["rideshare", "menu"]).uses_directory());
        assert!(parse(&["rideshare", "list"]).uses_directory());
        assert!(parse(&["rideshare", "status"]).uses_directory());
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["rideshare", "-v", "menu"]).unwrap();
        assert_eq!(cli.verbose, 1);

        let cli = Cli::try_parse_from(["rideshare", "-q", "menu"]).unwrap();
        assert!(cli.quiet);
    }
}
