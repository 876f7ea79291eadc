//! `odolog` - CLI for recording and reviewing vehicle odometer readings.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use chrono::Local;
use clap::Parser;

use odolog::actions::{self, Action};
use odolog::cli::{AddCommand, Cli, Command, ConfigCommand, ShowCommand};
use odolog::{init_logging, Config, Reading, Storage};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Show(show_cmd) => handle_show(&config, &show_cmd),
        Command::Add(add_cmd) => handle_add(&config, &add_cmd),
        Command::Sample => handle_sample(&config),
        Command::Clear => handle_clear(&config),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, &config_cmd),
    }
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    Ok(Storage::open(config.database_path())?)
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;

    if cmd.json {
        let readings = storage.list_all()?;
        println!("{}", serde_json::to_string_pretty(&readings)?);
    } else {
        println!("{}", actions::handle(&storage, Action::Show)?);
    }
    Ok(())
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;

    let date = cmd
        .date
        .clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let reading = Reading::new(cmd.vehicle, date, cmd.odometer);

    let id = storage.insert(&reading)?;
    println!("Recorded reading {id}.");
    Ok(())
}

fn handle_sample(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    println!("{}", actions::handle(&storage, Action::InsertSample)?);
    Ok(())
}

fn handle_clear(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    println!("{}", actions::handle(&storage, Action::DeleteAll)?);
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "total_readings": stats.total_readings,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("odolog status");
        println!("-------------");
        println!("Database:  {}", storage.path().display());
        println!("Readings:  {}", stats.total_readings);
        println!("Size:      {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
