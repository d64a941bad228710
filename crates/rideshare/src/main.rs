//! `rideshare` - CLI for the student ride-share directory
//!
//! This binary runs the interactive menu by default, and also exposes each
//! directory operation as a one-shot subcommand.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use rideshare::cli::{
    ClearCommand, Cli, Command, ConfigCommand, FindCommand, ListCommand, OutputFormat,
    RegisterCommand,
};
use rideshare::console::{self, user_message};
use rideshare::{init_logging, Config, Console, Directory, StudentRecord};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(path) = cli.data_file.clone() {
        config.storage.data_file = Some(path);
    }

    let command = cli.command.unwrap_or(Command::Menu);
    let directory = config.directory();
    if command.uses_directory() {
        if let Err(e) = directory.ensure_storage_exists() {
            warn!("{e}");
            eprintln!("{}", user_message(&e));
        }
    }

    match command {
        Command::Menu => {
            let stdin = io::stdin();
            let mut console = Console::new(directory, stdin.lock(), io::stdout().lock());
            console.run().context("running interactive menu")
        }
        Command::Register(cmd) => handle_register(&directory, cmd),
        Command::Find(cmd) => handle_find(&directory, &cmd),
        Command::List(cmd) => handle_list(&directory, &cmd),
        Command::Clear(cmd) => handle_clear(&directory, &cmd),
        Command::Status(status_cmd) => handle_status(&directory, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_register(directory: &Directory, cmd: RegisterCommand) -> anyhow::Result<()> {
    let record = StudentRecord::new(cmd.name, cmd.destination, cmd.location);
    match directory.upsert(record) {
        Ok(outcome) if outcome.was_new => {
            println!("✓ SUCCESS: You have been registered!");
            Ok(())
        }
        Ok(_) => {
            println!("✓ SUCCESS: Your details have been UPDATED!");
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(user_message(&e))),
    }
}

fn handle_find(directory: &Directory, cmd: &FindCommand) -> anyhow::Result<()> {
    let partners = directory.find_by_destination(&cmd.destination);
    if partners.is_empty() && cmd.format != OutputFormat::Json {
        println!("No students found going to '{}' yet.", cmd.destination);
        return Ok(());
    }
    print_records(&partners, cmd.format, true)
}

fn handle_list(directory: &Directory, cmd: &ListCommand) -> anyhow::Result<()> {
    let records = directory.list_all();
    if records.is_empty() && cmd.format != OutputFormat::Json {
        println!("No students registered yet. Database is empty.");
        return Ok(());
    }
    print_records(&records, cmd.format, false)
}

fn print_records(
    records: &[StudentRecord],
    format: OutputFormat,
    partners_only: bool,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(records)?)?,
        OutputFormat::Plain => console::render_plain(&mut out, records)?,
        OutputFormat::Table if partners_only => console::render_partner_table(&mut out, records)?,
        OutputFormat::Table => console::render_directory_table(&mut out, records)?,
    }
    Ok(())
}

fn handle_clear(directory: &Directory, cmd: &ClearCommand) -> anyhow::Result<()> {
    let count = directory.list_all().len();
    if count == 0 {
        println!("No data to clear.");
        return Ok(());
    }

    if !cmd.yes {
        println!("This will delete ALL {count} student records.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let cleared = directory.clear_all().context("clearing directory")?;
    println!("✓ Deleted {cleared} student records.");
    Ok(())
}

fn handle_status(directory: &Directory, json: bool) -> anyhow::Result<()> {
    let stats = directory.stats();
    if json {
        let status = serde_json::json!({
            "data_file": directory.path(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rideshare status");
        println!("----------------");
        println!("Data file:     {}", directory.path().display());
        println!(
            "Students:      {} / {}",
            stats.total_records, stats.capacity
        );
        println!("Destinations:  {}", stats.distinct_destinations);
        println!("File size:     {} bytes", stats.file_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!("  Max records:        {}", config.storage.max_records);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
