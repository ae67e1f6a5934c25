//! `recbook` - CLI for recordbook
//!
//! This binary opens the record store and runs one add, list, show, update
//! or delete against it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use recordbook::cli::{fields_to_record, Cli, Command, ConfigCommand, OutputFormat};
use recordbook::{init_logging, Config, Error, Record, RecordType, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = Some(dir);
    }
    if let Some(format) = cli.format {
        config.storage.format = format.into();
    }

    run(&config, cli.command)
}

fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Config(cmd) => handle_config(config, cmd)?,
        Command::Add(cmd) => {
            let mut store = Store::from_config(config)?;
            let id = store.add(cmd.record_type.as_str(), fields_to_record(&cmd.fields))?;
            println!("{id}");
        }
        Command::List(cmd) => {
            let store = Store::from_config(config)?;
            print_records(store.records(cmd.record_type.as_str())?, cmd.output)?;
        }
        Command::Show(cmd) => {
            let store = Store::from_config(config)?;
            let record_type: RecordType = cmd.record_type.parse()?;
            let record = store
                .get(record_type, &cmd.id)?
                .ok_or_else(|| Error::record_not_found(record_type, &cmd.id))?;
            print_records(std::slice::from_ref(record), cmd.output)?;
        }
        Command::Update(cmd) => {
            let mut store = Store::from_config(config)?;
            cmd.apply(&mut store)?;
        }
        Command::Delete(cmd) => {
            let mut store = Store::from_config(config)?;
            store.delete(cmd.record_type.as_str(), &cmd.id)?;
        }
    }
    Ok(())
}

fn print_records(records: &[Record], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Plain => {
            for (i, record) in records.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                for (field, value) in record.iter() {
                    match value {
                        Value::String(s) => println!("{field}: {s}"),
                        other => println!("{field}: {other}"),
                    }
                }
            }
        }
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
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Format:             {}", config.storage.format);
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
